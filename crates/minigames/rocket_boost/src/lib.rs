use anyhow::{Result, bail};
use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use engine::camera::ChaseCamera;
use flight::FlightTunables;
use platform_api::{AppState, CapabilityFlags, GameModule, ModuleContext, ModuleMetadata};

pub mod craft;
pub mod feedback;
pub mod level;

pub use craft::{Craft, KeyBindings, PendingLoad, drive_craft, fire_pending_load, handle_collisions};
pub use feedback::{EmitterRack, EmitterVisual, EngineAudio, sync_emitters};
pub use level::{ActiveLevel, BlockSpec, ContactSurface, LevelEntity, LevelSet, LevelSpec, load_level};

/// Marker for every entity the module owns; despawned on exit.
#[derive(Component)]
pub struct RocketBoostEntity;

/// Tunables and levels the module runs with.
///
/// Inserted by the host before entering; defaults are used otherwise.
#[derive(Resource, Debug, Clone, Default)]
pub struct RocketBoostSettings {
    pub tunables: FlightTunables,
    pub levels: LevelSet,
    /// Asset folder holding `main_engine.ogg`, `death.ogg` and `success.ogg`.
    ///
    /// The clips are not bundled with the module; without a folder it runs
    /// silent and requests no audio assets.
    pub sounds_dir: Option<String>,
}

fn setup(world: &mut World) -> Result<()> {
    let settings = world
        .get_resource_or_insert_with(RocketBoostSettings::default)
        .clone();
    if settings.levels.is_empty() {
        bail!("no levels configured");
    }
    settings.tunables.validate()?;

    world.insert_resource(ActiveLevel::new(settings.levels.len()));
    world.insert_resource(PendingLoad::default());
    world.spawn((
        Camera3dBundle {
            transform: Transform::from_xyz(0.0, 2.0, 30.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        ChaseCamera::default(),
        RocketBoostEntity,
    ));
    world.spawn((
        DirectionalLightBundle {
            transform: Transform::from_xyz(4.0, 12.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        RocketBoostEntity,
    ));

    #[cfg(feature = "audio")]
    if let (Some(dir), Some(asset_server)) = (
        settings.sounds_dir.as_deref(),
        world.get_resource::<AssetServer>(),
    ) {
        let sounds = feedback::RocketSounds::load(asset_server, dir);
        world.insert_resource(sounds);
    }

    log::info!("rocket boost ready with {} levels", settings.levels.len());
    Ok(())
}

fn cleanup(world: &mut World) {
    let owned: Vec<Entity> = world
        .query_filtered::<Entity, With<RocketBoostEntity>>()
        .iter(world)
        .collect();
    for entity in owned {
        if let Some(entity) = world.get_entity_mut(entity) {
            entity.despawn_recursive();
        }
    }
    world.remove_resource::<ActiveLevel>();
    world.remove_resource::<PendingLoad>();
    #[cfg(feature = "audio")]
    world.remove_resource::<feedback::RocketSounds>();
}

#[derive(Default)]
pub struct RocketBoostPlugin;

impl Plugin for RocketBoostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .add_event::<CollisionEvent>()
            .add_systems(
                Update,
                // Ticks before input and contacts: a load armed this frame
                // waits the full delay.
                (
                    fire_pending_load,
                    drive_craft,
                    handle_collisions,
                    load_level,
                    sync_emitters,
                )
                    .chain()
                    .run_if(in_state(AppState::RocketBoost)),
            );
        #[cfg(feature = "audio")]
        app.add_systems(
            Update,
            feedback::play_audio
                .after(drive_craft)
                .after(handle_collisions)
                .run_if(in_state(AppState::RocketBoost)),
        );
    }
}

impl GameModule for RocketBoostPlugin {
    const ID: &'static str = "rocket_boost";

    fn metadata() -> ModuleMetadata {
        ModuleMetadata {
            id: Self::ID.to_string(),
            name: "Rocket Boost".to_string(),
            version: "0.1.0".to_string(),
            state: AppState::RocketBoost,
            capabilities: CapabilityFlags::AUDIO | CapabilityFlags::DEBUG_KEYS,
        }
    }

    fn enter(ctx: &mut ModuleContext) -> Result<()> {
        setup(ctx.world())
    }

    fn exit(ctx: &mut ModuleContext) -> Result<()> {
        cleanup(ctx.world());
        Ok(())
    }
}
