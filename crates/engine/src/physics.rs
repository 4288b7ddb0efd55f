use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Rapier stepping on the fixed schedule.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
    }
}
