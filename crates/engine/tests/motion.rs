use std::time::Duration;

use bevy::prelude::*;
use engine::motion::{MotionPlugin, Oscillate, Spin};
use flight::{Oscillator, Rotator};

#[test]
fn oscillating_block_reaches_peak() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(MotionPlugin);
    app.world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(0.5));
    let start = Vec3::new(3.0, 1.0, 0.0);
    let entity = app
        .world
        .spawn((
            Oscillate::anchored(Oscillator::new(Vec3::new(0.0, 4.0, 0.0), 2.0), start),
            Transform::from_translation(start),
        ))
        .id();
    app.world.run_schedule(Update);
    let transform = app.world.get::<Transform>(entity).unwrap();
    assert!((transform.translation - Vec3::new(3.0, 5.0, 0.0)).length() < 1e-4);
}

#[test]
fn zero_period_block_stays_put() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(MotionPlugin);
    app.world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(7.25));
    let start = Vec3::new(-2.0, 6.0, 0.0);
    let entity = app
        .world
        .spawn((
            Oscillate::anchored(Oscillator::new(Vec3::splat(10.0), 0.0), start),
            Transform::from_translation(start),
        ))
        .id();
    app.world.run_schedule(Update);
    assert_eq!(app.world.get::<Transform>(entity).unwrap().translation, start);
}

#[test]
fn spinner_rotates_by_rate_times_delta() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(MotionPlugin);
    app.world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(0.5));
    let entity = app
        .world
        .spawn((Spin(Rotator::new(90.0)), Transform::default()))
        .id();
    app.world.run_schedule(Update);
    let rotation = app.world.get::<Transform>(entity).unwrap().rotation;
    let expected = Quat::from_rotation_z(45f32.to_radians());
    assert!(rotation.angle_between(expected) < 1e-3);
}
