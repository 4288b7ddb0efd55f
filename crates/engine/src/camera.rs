use bevy::prelude::*;

/// Entity the chase camera keeps in view.
#[derive(Component)]
pub struct CameraTarget;

/// Camera that trails the [`CameraTarget`] at a fixed offset.
#[derive(Component)]
pub struct ChaseCamera {
    pub offset: Vec3,
    /// Fraction of the remaining distance covered per second.
    pub stiffness: f32,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 2.0, 30.0),
            stiffness: 4.0,
        }
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, chase_target);
    }
}

pub fn chase_target(
    time: Res<Time>,
    targets: Query<&Transform, (With<CameraTarget>, Without<ChaseCamera>)>,
    mut cameras: Query<(&ChaseCamera, &mut Transform)>,
) {
    let Ok(target) = targets.get_single() else {
        return;
    };
    let dt = time.delta_seconds();
    for (camera, mut transform) in &mut cameras {
        let goal = target.translation + camera.offset;
        let blend = (camera.stiffness * dt).min(1.0);
        transform.translation = transform.translation.lerp(goal, blend);
        transform.look_at(target.translation, Vec3::Y);
    }
}
