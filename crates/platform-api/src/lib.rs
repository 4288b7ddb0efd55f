use anyhow::Result;
use bevy::prelude::*;
use bitflags::bitflags;

#[derive(States, Default, Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum AppState {
    #[default]
    Boot,
    RocketBoost,
}

bitflags! {
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CapabilityFlags: u32 {
        /// Module plays sound and needs bevy audio.
        const AUDIO = 0b0001;
        /// Module exposes debug-only key bindings.
        const DEBUG_KEYS = 0b0010;
    }
}

/// Describes a game module and its capabilities.
#[derive(Clone, Debug)]
pub struct ModuleMetadata {
    /// Unique string identifier for the module.
    pub id: String,
    /// Human-readable name shown to players.
    pub name: String,
    /// Semver-style version string.
    pub version: String,
    /// The [`AppState`] associated with the module.
    pub state: AppState,
    /// Feature flags implemented by the module.
    pub capabilities: CapabilityFlags,
}

/// Context handed to module hooks giving access to the Bevy [`World`].
pub struct ModuleContext<'a> {
    world: &'a mut World,
}

impl<'a> ModuleContext<'a> {
    pub fn new(world: &'a mut World) -> Self {
        Self { world }
    }

    pub fn world(&mut self) -> &mut World {
        self.world
    }
}

/// Common interface implemented by all game modules.
pub trait GameModule: Plugin + Sized {
    /// Compile-time identifier for the module.
    const ID: &'static str;

    /// Returns static metadata describing the module.
    fn metadata() -> ModuleMetadata;

    /// Called whenever the engine transitions into the module's state.
    fn enter(_ctx: &mut ModuleContext) -> Result<()> {
        Ok(())
    }

    /// Called whenever the engine leaves the module's state.
    fn exit(_ctx: &mut ModuleContext) -> Result<()> {
        Ok(())
    }
}
