use bevy::prelude::*;
use engine::{AppExt, EnginePlugin, ModuleRegistry};
use log::Level;
use logtest::Logger;
use platform_api::{AppState, CapabilityFlags, GameModule, ModuleContext, ModuleMetadata};

#[derive(Default)]
struct FailingModule;

impl Plugin for FailingModule {
    fn build(&self, _app: &mut App) {}
}

impl GameModule for FailingModule {
    const ID: &'static str = "failing";

    fn metadata() -> ModuleMetadata {
        ModuleMetadata {
            id: Self::ID.to_string(),
            name: "Failing".to_string(),
            version: "0.1.0".to_string(),
            state: AppState::RocketBoost,
            capabilities: CapabilityFlags::empty(),
        }
    }

    fn enter(_ctx: &mut ModuleContext) -> anyhow::Result<()> {
        anyhow::bail!("boom")
    }

    fn exit(_ctx: &mut ModuleContext) -> anyhow::Result<()> {
        anyhow::bail!("bust")
    }
}

#[test]
fn logs_module_errors_without_panic() {
    let mut logger = Logger::start();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(EnginePlugin);
    app.add_game_module::<FailingModule>();

    assert_eq!(app.world.resource::<ModuleRegistry>().modules.len(), 1);

    app.world
        .resource_mut::<NextState<AppState>>()
        .set(AppState::RocketBoost);
    app.update();
    assert!(logger.any(|r| r.level() == Level::Error && r.args().contains("module enter failed")));

    app.world
        .resource_mut::<NextState<AppState>>()
        .set(AppState::Boot);
    app.update();
    assert!(logger.any(|r| r.level() == Level::Error && r.args().contains("module exit failed")));
}

#[test]
fn start_in_leaves_boot_state() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(EnginePlugin);
    app.start_in(AppState::RocketBoost);
    app.update();
    app.update();
    assert_eq!(*app.world.resource::<State<AppState>>().get(), AppState::RocketBoost);
}
