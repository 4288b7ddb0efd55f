use bevy::prelude::*;
use client::config::RuntimeConfig;
use engine::physics::PhysicsPlugin;
use engine::{AppExt, EnginePlugin};
use platform_api::AppState;
use rocket_boost::{RocketBoostPlugin, RocketBoostSettings};

fn main() {
    let mut app = App::new();
    // Logging is installed by DefaultPlugins; load config after it.
    app.add_plugins(DefaultPlugins);

    let config = RuntimeConfig::load_sync();
    let settings = config.settings().unwrap_or_else(|err| {
        log::error!("falling back to built-in settings: {err:#}");
        RocketBoostSettings::default()
    });

    app.add_plugins((EnginePlugin, PhysicsPlugin))
        .insert_resource(config)
        .insert_resource(settings)
        .add_game_module::<RocketBoostPlugin>()
        .start_in(AppState::RocketBoost)
        .run();
}
