use std::time::Duration;

use bevy::prelude::*;
use engine::camera::{CameraPlugin, CameraTarget, ChaseCamera};

#[test]
fn chase_camera_snaps_with_high_stiffness() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, CameraPlugin));
    app.world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(0.5));
    app.world
        .spawn((CameraTarget, Transform::from_xyz(4.0, 8.0, 0.0)));
    let camera = app
        .world
        .spawn((
            ChaseCamera {
                offset: Vec3::new(0.0, 0.0, 10.0),
                stiffness: 10.0,
            },
            Transform::default(),
        ))
        .id();
    app.world.run_schedule(Update);
    let transform = app.world.get::<Transform>(camera).unwrap();
    assert!((transform.translation - Vec3::new(4.0, 8.0, 10.0)).length() < 1e-4);
}
