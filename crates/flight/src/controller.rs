use std::time::Duration;

use glam::Vec3;
use log::{debug, info};

use crate::config::FlightTunables;
use crate::effect::{Clip, Effect, Emitter};
use crate::input::InputState;
use crate::level::{ContactTag, FailurePolicy, LevelCursor};
use crate::services::Playback;

/// Lifecycle of a single craft. `Dying` and `Transcending` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Alive,
    Dying,
    Transcending,
}

/// Everything the controller reads during one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame {
    /// Seconds since the previous tick.
    pub delta: f32,
    pub input: InputState,
    pub playback: Playback,
}

/// Lifecycle state machine for the player's craft.
///
/// One controller exists per level load. It never touches the host
/// directly: every tick and every collision returns the [`Effect`]s the
/// host should carry out.
#[derive(Debug, Clone)]
pub struct FlightController {
    state: LifecycleState,
    level: LevelCursor,
    collisions_enabled: bool,
    main_thrust: f32,
    rotation_rate: f32,
    load_delay: Duration,
    failure_policy: FailurePolicy,
    debug_keys: bool,
}

impl FlightController {
    pub fn new(tunables: &FlightTunables, level: LevelCursor) -> Self {
        Self {
            state: LifecycleState::Alive,
            level,
            collisions_enabled: true,
            main_thrust: tunables.main_thrust,
            rotation_rate: tunables.rotation_rate,
            load_delay: tunables.load_delay(),
            failure_policy: tunables.failure_policy,
            debug_keys: tunables.debug_keys,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn level(&self) -> LevelCursor {
        self.level
    }

    pub fn collisions_enabled(&self) -> bool {
        self.collisions_enabled
    }

    /// Advance one tick.
    pub fn on_frame(&mut self, frame: &Frame) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.state == LifecycleState::Alive {
            self.thrust(frame, &mut effects);
            self.rotate(frame, &mut effects);
        }
        if self.debug_keys {
            self.debug_input(&frame.input, &mut effects);
        }
        effects
    }

    /// React to the craft touching a surface.
    pub fn on_collision(&mut self, tag: ContactTag) -> Vec<Effect> {
        if self.state != LifecycleState::Alive || !self.collisions_enabled {
            return Vec::new();
        }
        match tag {
            ContactTag::Friendly => Vec::new(),
            ContactTag::Finish => self.level_completed(),
            ContactTag::Hazard => self.level_failed(),
        }
    }

    fn thrust(&self, frame: &Frame, effects: &mut Vec<Effect>) {
        if frame.input.thrust {
            effects.push(Effect::ApplyForce(Vec3::Y * self.main_thrust));
            if !frame.playback.engine_audio {
                effects.push(Effect::PlayLooping(Clip::MainEngine));
            }
            if !frame.playback.thrust_particles {
                effects.push(Effect::PlayParticles(Emitter::Thrust));
            }
        } else {
            if frame.playback.engine_audio {
                effects.push(Effect::StopAudio);
            }
            if frame.playback.thrust_particles {
                effects.push(Effect::StopParticles(Emitter::Thrust));
            }
        }
    }

    fn rotate(&self, frame: &Frame, effects: &mut Vec<Effect>) {
        let direction = frame.input.rotation();
        if direction == 0.0 {
            return;
        }
        // Physics must not fight the manual rotation.
        effects.push(Effect::SetRotationLocked(true));
        effects.push(Effect::Rotate {
            axis: Vec3::Z,
            degrees: direction * self.rotation_rate * frame.delta,
        });
        effects.push(Effect::SetRotationLocked(false));
    }

    fn debug_input(&mut self, input: &InputState, effects: &mut Vec<Effect>) {
        if input.skip_level {
            self.level = self.level.next();
            debug!("skipping to level {}", self.level.index());
            effects.push(Effect::LoadLevel(self.level.index()));
        }
        if input.toggle_collisions {
            self.collisions_enabled = !self.collisions_enabled;
            debug!(
                "collision handling {}",
                if self.collisions_enabled { "enabled" } else { "disabled" }
            );
        }
    }

    fn level_completed(&mut self) -> Vec<Effect> {
        self.state = LifecycleState::Transcending;
        self.level = self.level.next();
        info!("level completed, next level {}", self.level.index());
        self.transition(Clip::Success, Emitter::Success)
    }

    fn level_failed(&mut self) -> Vec<Effect> {
        self.state = LifecycleState::Dying;
        self.level = self.level.after_failure(self.failure_policy);
        info!("craft destroyed, returning to level {}", self.level.index());
        self.transition(Clip::Death, Emitter::Death)
    }

    fn transition(&self, clip: Clip, burst: Emitter) -> Vec<Effect> {
        vec![
            Effect::StopAudio,
            Effect::StopParticles(Emitter::Thrust),
            Effect::PlayOneShot(clip),
            Effect::PlayParticles(burst),
            Effect::ScheduleLoad {
                level: self.level.index(),
                delay: self.load_delay,
            },
        ]
    }
}
