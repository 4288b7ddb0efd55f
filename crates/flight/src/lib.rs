//! Rocket flight core.
//!
//! Engine-independent control logic for a thrust-and-rotate craft and the
//! cosmetic motion helpers used by level geometry. Hosts drive
//! [`FlightController`] once per tick and forward the returned [`Effect`]s
//! to their own physics, audio, particle and scene services.

pub mod config;
pub mod controller;
pub mod effect;
pub mod error;
pub mod input;
pub mod level;
pub mod motion;
pub mod schedule;
pub mod services;
pub mod sim;

pub use config::FlightTunables;
pub use controller::{FlightController, Frame, LifecycleState};
pub use effect::{Clip, Effect, Emitter};
pub use error::FlightError;
pub use input::{Control, InputState};
pub use level::{ContactTag, FailurePolicy, LevelCursor};
pub use motion::{Oscillator, Rotator};
pub use schedule::TransitionTimer;
pub use services::{Audio, InputSource, Particles, Physics, Playback, SceneService, Services, Transitions};
pub use sim::Simulation;
