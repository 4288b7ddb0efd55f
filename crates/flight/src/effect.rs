use std::time::Duration;

use glam::Vec3;

/// Audio clips the craft can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    MainEngine,
    Death,
    Success,
}

/// Particle systems mounted on the craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emitter {
    Thrust,
    Death,
    Success,
}

impl Emitter {
    pub const ALL: [Emitter; 3] = [Emitter::Thrust, Emitter::Death, Emitter::Success];

    pub fn slot(self) -> usize {
        match self {
            Emitter::Thrust => 0,
            Emitter::Death => 1,
            Emitter::Success => 2,
        }
    }
}

/// A request from the controller to one of its collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Force in the craft's local frame.
    ApplyForce(Vec3),
    SetRotationLocked(bool),
    /// Rotation about a local axis, in degrees.
    Rotate { axis: Vec3, degrees: f32 },
    PlayLooping(Clip),
    PlayOneShot(Clip),
    StopAudio,
    PlayParticles(Emitter),
    StopParticles(Emitter),
    /// Load `level` once `delay` has elapsed.
    ScheduleLoad { level: usize, delay: Duration },
    /// Load `level` immediately.
    LoadLevel(usize),
}
