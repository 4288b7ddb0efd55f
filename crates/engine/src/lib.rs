use bevy::prelude::*;
use platform_api::{AppState, GameModule, ModuleContext, ModuleMetadata};

pub mod camera;
pub mod motion;
pub mod physics;

/// Simulation tick rate for [`FixedUpdate`].
pub const FIXED_HZ: f64 = 60.0;

#[derive(Resource, Default)]
pub struct ModuleRegistry {
    pub modules: Vec<ModuleMetadata>,
}

/// Core engine wiring shared by every game module.
pub struct EnginePlugin;

impl Plugin for EnginePlugin {
    fn build(&self, app: &mut App) {
        // Deterministic fixed update at 60 Hz
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .init_resource::<ModuleRegistry>()
            .add_state::<AppState>()
            .add_plugins((motion::MotionPlugin, camera::CameraPlugin));
    }
}

/// Register a module, hooking its enter/exit callbacks to its state.
pub fn register_module<M: GameModule + Default + 'static>(app: &mut App) {
    let info = M::metadata();
    let state = info.state;
    app.world
        .get_resource_or_insert_with(ModuleRegistry::default)
        .modules
        .push(info);
    app.add_systems(OnEnter(state), enter_module::<M>)
        .add_systems(OnExit(state), exit_module::<M>)
        .add_plugins(M::default());
}

fn enter_module<M: GameModule>(world: &mut World) {
    let mut ctx = ModuleContext::new(world);
    if let Err(err) = M::enter(&mut ctx) {
        log::error!("module enter failed ({}): {err:#}", M::ID);
    }
}

fn exit_module<M: GameModule>(world: &mut World) {
    let mut ctx = ModuleContext::new(world);
    if let Err(err) = M::exit(&mut ctx) {
        log::error!("module exit failed ({}): {err:#}", M::ID);
    }
}

pub trait AppExt {
    fn add_game_module<M: GameModule + Default + 'static>(&mut self) -> &mut Self;

    /// Leave the boot state for `state` on the first frame.
    fn start_in(&mut self, state: AppState) -> &mut Self;
}

impl AppExt for App {
    fn add_game_module<M: GameModule + Default + 'static>(&mut self) -> &mut Self {
        register_module::<M>(self);
        self
    }

    fn start_in(&mut self, state: AppState) -> &mut Self {
        self.add_systems(Startup, move |mut next: ResMut<NextState<AppState>>| {
            next.set(state);
        })
    }
}
