//! Collaborator contracts the controller's effects are carried out with.

use std::time::Duration;

use glam::Vec3;

use crate::effect::{Clip, Effect, Emitter};
use crate::input::Control;

/// Rigid body the craft is attached to.
pub trait Physics {
    /// Add a force expressed in the body's local frame.
    fn apply_force(&mut self, force: Vec3);
    fn set_rotation_locked(&mut self, locked: bool);
    /// Rotate about a local axis by `degrees`.
    fn rotate(&mut self, axis: Vec3, degrees: f32);
}

pub trait InputSource {
    fn is_held(&self, control: Control) -> bool;
    fn is_pressed_this_frame(&self, control: Control) -> bool;
}

/// The craft's single audio channel.
pub trait Audio {
    fn play_looping(&mut self, clip: Clip);
    /// Fire-and-forget; does not affect [`Audio::is_playing`].
    fn play_one_shot(&mut self, clip: Clip);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// The craft's particle systems.
pub trait Particles {
    fn play(&mut self, emitter: Emitter);
    fn stop(&mut self, emitter: Emitter);
    fn is_playing(&self, emitter: Emitter) -> bool;
}

pub trait SceneService {
    fn load_scene(&mut self, index: usize);
    fn current_scene_index(&self) -> usize;
    fn scene_count(&self) -> usize;
}

/// Where level-change effects end up: a deferred queue or the scene service.
pub trait Transitions {
    fn schedule_load(&mut self, level: usize, delay: Duration);
    fn load_now(&mut self, level: usize);
}

/// Playback status the controller consults to avoid restarting effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Playback {
    pub engine_audio: bool,
    pub thrust_particles: bool,
}

/// Borrowed set of collaborators for one dispatch.
pub struct Services<'a> {
    pub physics: &'a mut dyn Physics,
    pub audio: &'a mut dyn Audio,
    pub particles: &'a mut dyn Particles,
    pub transitions: &'a mut dyn Transitions,
}

impl Services<'_> {
    pub fn playback(&self) -> Playback {
        Playback {
            engine_audio: self.audio.is_playing(),
            thrust_particles: self.particles.is_playing(Emitter::Thrust),
        }
    }

    /// Carry out `effects` in order.
    pub fn dispatch(&mut self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            match effect {
                Effect::ApplyForce(force) => self.physics.apply_force(force),
                Effect::SetRotationLocked(locked) => self.physics.set_rotation_locked(locked),
                Effect::Rotate { axis, degrees } => self.physics.rotate(axis, degrees),
                Effect::PlayLooping(clip) => self.audio.play_looping(clip),
                Effect::PlayOneShot(clip) => self.audio.play_one_shot(clip),
                Effect::StopAudio => self.audio.stop(),
                Effect::PlayParticles(emitter) => self.particles.play(emitter),
                Effect::StopParticles(emitter) => self.particles.stop(emitter),
                Effect::ScheduleLoad { level, delay } => {
                    self.transitions.schedule_load(level, delay)
                }
                Effect::LoadLevel(level) => self.transitions.load_now(level),
            }
        }
    }
}
