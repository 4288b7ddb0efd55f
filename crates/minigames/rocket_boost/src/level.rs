use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use engine::motion::{Oscillate, Spin};
use flight::{ContactTag, FlightController, LevelCursor, Oscillator, Rotator, SceneService};
use serde::{Deserialize, Serialize};

use crate::craft::{Craft, PendingLoad};
use crate::{RocketBoostEntity, RocketBoostSettings};

/// Marker for everything that is rebuilt when a level loads.
#[derive(Component)]
pub struct LevelEntity;

/// Classification of a block the craft can touch.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactSurface(pub ContactTag);

/// One axis-aligned block of level geometry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlockSpec {
    pub center: Vec3,
    pub size: Vec3,
    #[serde(default)]
    pub tag: ContactTag,
    #[serde(default)]
    pub oscillate: Option<Oscillator>,
    #[serde(default)]
    pub spin: Option<Rotator>,
}

impl BlockSpec {
    fn new(center: Vec3, size: Vec3, tag: ContactTag) -> Self {
        Self {
            center,
            size,
            tag,
            oscillate: None,
            spin: None,
        }
    }

    fn is_moving(&self) -> bool {
        self.oscillate.is_some() || self.spin.is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelSpec {
    pub name: String,
    /// Where the craft spawns.
    pub launch: Vec3,
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
}

/// Ordered list of levels; the index into it is the scene index.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LevelSet {
    pub levels: Vec<LevelSpec>,
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelSet {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let set: Self = toml::from_str(source).context("malformed level set")?;
        if set.levels.is_empty() {
            bail!("level set contains no levels");
        }
        Ok(set)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&source)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelSpec> {
        self.levels.get(index)
    }

    /// Three short levels shipped with the module.
    pub fn builtin() -> Self {
        let floor = || BlockSpec::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(60.0, 2.0, 8.0), ContactTag::Hazard);
        let launch_pad = || BlockSpec::new(Vec3::new(-12.0, 0.25, 0.0), Vec3::new(4.0, 0.5, 4.0), ContactTag::Friendly);
        let landing_pad = || BlockSpec::new(Vec3::new(12.0, 0.25, 0.0), Vec3::new(4.0, 0.5, 4.0), ContactTag::Finish);
        let launch = Vec3::new(-12.0, 2.0, 0.0);

        let mut gate = BlockSpec::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(2.0, 6.0, 4.0), ContactTag::Hazard);
        gate.oscillate = Some(Oscillator::new(Vec3::new(0.0, 8.0, 0.0), 3.0));

        let mut bar = BlockSpec::new(Vec3::new(0.0, 9.0, 0.0), Vec3::new(12.0, 1.0, 4.0), ContactTag::Hazard);
        bar.spin = Some(Rotator::new(30.0));

        Self {
            levels: vec![
                LevelSpec {
                    name: "Lift-off".to_string(),
                    launch,
                    blocks: vec![
                        floor(),
                        launch_pad(),
                        landing_pad(),
                        BlockSpec::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(2.0, 4.0, 4.0), ContactTag::Hazard),
                    ],
                },
                LevelSpec {
                    name: "Moving gate".to_string(),
                    launch,
                    blocks: vec![floor(), launch_pad(), landing_pad(), gate],
                },
                LevelSpec {
                    name: "Windmill".to_string(),
                    launch,
                    blocks: vec![
                        floor(),
                        launch_pad(),
                        landing_pad(),
                        BlockSpec::new(Vec3::new(0.0, 20.0, 0.0), Vec3::new(60.0, 2.0, 8.0), ContactTag::Hazard),
                        bar,
                    ],
                },
            ],
        }
    }
}

/// Scene service backed by the module's [`LevelSet`].
///
/// Loads are requests picked up by [`load_level`] later in the frame.
#[derive(Resource, Debug)]
pub struct ActiveLevel {
    index: usize,
    count: usize,
    requested: Option<usize>,
}

impl ActiveLevel {
    /// Start at the first level with a load already requested.
    pub fn new(count: usize) -> Self {
        Self {
            index: 0,
            count,
            requested: Some(0),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn requested(&self) -> Option<usize> {
        self.requested
    }
}

impl SceneService for ActiveLevel {
    fn load_scene(&mut self, index: usize) {
        self.requested = Some(index);
    }

    fn current_scene_index(&self) -> usize {
        self.index
    }

    fn scene_count(&self) -> usize {
        self.count
    }
}

/// Mesh and material stores; absent in headless apps.
pub(crate) struct Palette<'a> {
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
}

impl Palette<'_> {
    pub fn block(&mut self, size: Vec3, color: Color) -> (Handle<Mesh>, Handle<StandardMaterial>) {
        (
            self.meshes.add(Mesh::from(shape::Box::new(size.x, size.y, size.z))),
            self.materials.add(color.into()),
        )
    }
}

fn surface_color(tag: ContactTag) -> Color {
    match tag {
        ContactTag::Friendly => Color::rgb(0.2, 0.4, 0.9),
        ContactTag::Finish => Color::rgb(0.2, 0.8, 0.3),
        ContactTag::Hazard => Color::rgb(0.6, 0.3, 0.2),
    }
}

/// Replace the current level with the requested one and spawn a fresh craft.
pub fn load_level(
    mut commands: Commands,
    settings: Res<RocketBoostSettings>,
    mut active: ResMut<ActiveLevel>,
    mut pending: ResMut<PendingLoad>,
    existing: Query<Entity, With<LevelEntity>>,
    mut meshes: Option<ResMut<Assets<Mesh>>>,
    mut materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let Some(index) = active.requested.take() else {
        return;
    };
    let cursor = match LevelCursor::new(index, settings.levels.len()) {
        Ok(cursor) => cursor,
        Err(err) => {
            log::error!("cannot load level {index}: {err}");
            return;
        }
    };
    let Some(spec) = settings.levels.get(index) else {
        return;
    };

    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    // The replaced craft's deferred load dies with it.
    pending.0.cancel();
    active.index = index;

    let mut palette = match (meshes.as_deref_mut(), materials.as_deref_mut()) {
        (Some(meshes), Some(materials)) => Some(Palette { meshes, materials }),
        _ => None,
    };
    for block in &spec.blocks {
        spawn_block(&mut commands, block, palette.as_mut());
    }
    let controller = FlightController::new(&settings.tunables, cursor);
    Craft::spawn(&mut commands, spec.launch, controller, palette.as_mut());
    log::info!("loaded level {index} ({})", spec.name);
}

fn spawn_block(commands: &mut Commands, block: &BlockSpec, palette: Option<&mut Palette>) {
    let half = block.size / 2.0;
    let body = if block.is_moving() {
        RigidBody::KinematicPositionBased
    } else {
        RigidBody::Fixed
    };
    let mut entity = commands.spawn((
        SpatialBundle::from_transform(Transform::from_translation(block.center)),
        body,
        Collider::cuboid(half.x, half.y, half.z),
        ContactSurface(block.tag),
        LevelEntity,
        RocketBoostEntity,
    ));
    if let Some(oscillator) = block.oscillate {
        entity.insert(Oscillate::anchored(oscillator, block.center));
    }
    if let Some(rotator) = block.spin {
        entity.insert(Spin(rotator));
    }
    if let Some(palette) = palette {
        entity.insert(palette.block(block.size, surface_color(block.tag)));
    }
}
