//! Headless frame loop.
//!
//! Owns a controller together with its collaborators and stands in for the
//! host engine. Every level load replaces the craft.

use std::time::Duration;

use log::info;

use crate::config::FlightTunables;
use crate::controller::{FlightController, Frame};
use crate::effect::Effect;
use crate::error::FlightError;
use crate::input::InputState;
use crate::level::{ContactTag, LevelCursor};
use crate::schedule::TransitionTimer;
use crate::services::{
    Audio, InputSource, Particles, Physics, Playback, SceneService, Services, Transitions,
};

struct Deferred<'a> {
    timer: &'a mut TransitionTimer,
    reload: &'a mut Option<usize>,
}

impl Transitions for Deferred<'_> {
    fn schedule_load(&mut self, level: usize, delay: Duration) {
        self.timer.arm(level, delay);
    }

    fn load_now(&mut self, level: usize) {
        *self.reload = Some(level);
    }
}

pub struct Simulation<P, A, F, S> {
    pub physics: P,
    pub audio: A,
    pub particles: F,
    pub scenes: S,
    tunables: FlightTunables,
    controller: FlightController,
    timer: TransitionTimer,
}

impl<P, A, F, S> Simulation<P, A, F, S>
where
    P: Physics,
    A: Audio,
    F: Particles,
    S: SceneService,
{
    pub fn new(
        physics: P,
        audio: A,
        particles: F,
        scenes: S,
        tunables: FlightTunables,
    ) -> Result<Self, FlightError> {
        tunables.validate()?;
        let controller = spawn_craft(&scenes, &tunables)?;
        Ok(Self {
            physics,
            audio,
            particles,
            scenes,
            tunables,
            controller,
            timer: TransitionTimer::new(),
        })
    }

    pub fn controller(&self) -> &FlightController {
        &self.controller
    }

    pub fn timer(&self) -> &TransitionTimer {
        &self.timer
    }

    pub fn tunables(&self) -> &FlightTunables {
        &self.tunables
    }

    /// Run one tick of `delta` with the given input.
    pub fn step(&mut self, delta: Duration, input: &impl InputSource) -> Result<(), FlightError> {
        let input = InputState::poll(input);
        let seconds = delta.as_secs_f32();
        self.drive(|controller, playback| {
            controller.on_frame(&Frame {
                delta: seconds,
                input,
                playback,
            })
        })?;
        if let Some(level) = self.timer.tick(delta) {
            self.load(level)?;
        }
        Ok(())
    }

    /// Deliver a collision with a surface carrying `tag`.
    pub fn collide(&mut self, tag: ContactTag) -> Result<(), FlightError> {
        self.drive(|controller, _| controller.on_collision(tag))
    }

    /// Run one controller callback against the collaborators and carry out
    /// its effects.
    fn drive(
        &mut self,
        callback: impl FnOnce(&mut FlightController, Playback) -> Vec<Effect>,
    ) -> Result<(), FlightError> {
        let mut reload = None;
        let mut transitions = Deferred {
            timer: &mut self.timer,
            reload: &mut reload,
        };
        let mut services = Services {
            physics: &mut self.physics,
            audio: &mut self.audio,
            particles: &mut self.particles,
            transitions: &mut transitions,
        };
        let effects = callback(&mut self.controller, services.playback());
        services.dispatch(effects);
        match reload {
            Some(level) => self.load(level),
            None => Ok(()),
        }
    }

    fn load(&mut self, level: usize) -> Result<(), FlightError> {
        info!("loading level {level}");
        self.scenes.load_scene(level);
        self.timer.cancel();
        self.controller = spawn_craft(&self.scenes, &self.tunables)?;
        Ok(())
    }
}

fn spawn_craft(
    scenes: &impl SceneService,
    tunables: &FlightTunables,
) -> Result<FlightController, FlightError> {
    let cursor = LevelCursor::new(scenes.current_scene_index(), scenes.scene_count())?;
    Ok(FlightController::new(tunables, cursor))
}
