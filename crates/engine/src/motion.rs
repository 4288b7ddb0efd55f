use bevy::prelude::*;
use flight::{Oscillator, Rotator};

/// Bobs an entity around the position it was anchored at.
#[derive(Component, Debug, Clone, Copy)]
pub struct Oscillate(pub Oscillator);

impl Oscillate {
    pub fn anchored(oscillator: Oscillator, start: Vec3) -> Self {
        Self(oscillator.anchored_at(start))
    }
}

/// Spins an entity at a constant rate.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spin(pub Rotator);

/// Plugin registering the periodic motion systems.
pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (oscillate, spin));
    }
}

pub fn oscillate(time: Res<Time>, mut query: Query<(&Oscillate, &mut Transform)>) {
    let elapsed = time.elapsed_seconds();
    for (oscillate, mut transform) in &mut query {
        if let Some(position) = oscillate.0.position_at(elapsed) {
            transform.translation = position;
        }
    }
}

pub fn spin(time: Res<Time>, mut query: Query<(&Spin, &mut Transform)>) {
    for (spin, mut transform) in &mut query {
        transform.rotation = spin.0.step(transform.rotation, time.delta_seconds());
    }
}
