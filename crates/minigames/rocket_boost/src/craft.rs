use std::time::Duration;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use engine::camera::CameraTarget;
use flight::{
    Control, Effect, Emitter, FlightController, Frame, InputSource, InputState,
    Physics, Playback, SceneService, Services, TransitionTimer, Transitions,
};

use crate::feedback::{EmitterRack, EmitterVisual, EngineAudio};
use crate::level::{ActiveLevel, ContactSurface, LevelEntity, Palette};
use crate::RocketBoostEntity;

/// The player's craft and its lifecycle.
#[derive(Component, Debug)]
pub struct Craft(pub FlightController);

/// Deferred level load armed by a finished or crashed craft.
#[derive(Resource, Debug, Default)]
pub struct PendingLoad(pub TransitionTimer);

/// Keyboard bindings for each control; any bound key triggers it.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub thrust: Vec<KeyCode>,
    pub rotate_left: Vec<KeyCode>,
    pub rotate_right: Vec<KeyCode>,
    pub skip_level: Vec<KeyCode>,
    pub toggle_collisions: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            thrust: vec![KeyCode::Space],
            rotate_left: vec![KeyCode::A, KeyCode::Left],
            rotate_right: vec![KeyCode::D, KeyCode::Right],
            skip_level: vec![KeyCode::L],
            toggle_collisions: vec![KeyCode::C],
        }
    }
}

impl KeyBindings {
    pub fn keys(&self, control: Control) -> &[KeyCode] {
        match control {
            Control::Thrust => &self.thrust,
            Control::RotateLeft => &self.rotate_left,
            Control::RotateRight => &self.rotate_right,
            Control::SkipLevel => &self.skip_level,
            Control::ToggleCollisions => &self.toggle_collisions,
        }
    }
}

struct Keyboard<'a> {
    keys: &'a Input<KeyCode>,
    bindings: &'a KeyBindings,
}

impl InputSource for Keyboard<'_> {
    fn is_held(&self, control: Control) -> bool {
        self.keys.any_pressed(self.bindings.keys(control).iter().copied())
    }

    fn is_pressed_this_frame(&self, control: Control) -> bool {
        self.keys.any_just_pressed(self.bindings.keys(control).iter().copied())
    }
}

/// Rigid body view of the craft used by the physics collaborator.
struct CraftBody<'a> {
    transform: &'a mut Transform,
    force: &'a mut ExternalForce,
    axes: &'a mut LockedAxes,
    velocity: &'a mut Velocity,
}

impl Physics for CraftBody<'_> {
    fn apply_force(&mut self, force: Vec3) {
        self.force.force += self.transform.rotation * force;
    }

    fn set_rotation_locked(&mut self, locked: bool) {
        if locked {
            // Freezing rotation discards accumulated spin.
            self.velocity.angvel = Vec3::ZERO;
        }
        self.axes.set(LockedAxes::ROTATION_LOCKED_Z, locked);
    }

    fn rotate(&mut self, axis: Vec3, degrees: f32) {
        self.transform.rotate_local_axis(axis, degrees.to_radians());
    }
}

struct LevelRequests<'a> {
    pending: &'a mut PendingLoad,
    scenes: &'a mut ActiveLevel,
}

impl Transitions for LevelRequests<'_> {
    fn schedule_load(&mut self, level: usize, delay: Duration) {
        self.pending.0.arm(level, delay);
    }

    fn load_now(&mut self, level: usize) {
        self.scenes.load_scene(level);
    }
}

type CraftParts = (
    &'static mut Craft,
    &'static mut Transform,
    &'static mut ExternalForce,
    &'static mut LockedAxes,
    &'static mut Velocity,
    &'static mut EngineAudio,
    &'static mut EmitterRack,
);

/// Run one controller callback and carry out its effects.
fn step_craft(
    controller: &mut FlightController,
    mut body: CraftBody<'_>,
    audio: &mut EngineAudio,
    rack: &mut EmitterRack,
    mut requests: LevelRequests<'_>,
    callback: impl FnOnce(&mut FlightController, Playback) -> Vec<Effect>,
) {
    let mut services = Services {
        physics: &mut body,
        audio,
        particles: rack,
        transitions: &mut requests,
    };
    let effects = callback(controller, services.playback());
    services.dispatch(effects);
}

/// Poll the keyboard and advance every craft by one frame.
pub fn drive_craft(
    time: Res<Time>,
    keys: Res<Input<KeyCode>>,
    bindings: Res<KeyBindings>,
    mut active: ResMut<ActiveLevel>,
    mut pending: ResMut<PendingLoad>,
    mut crafts: Query<CraftParts>,
) {
    let input = InputState::poll(&Keyboard {
        keys: &keys,
        bindings: &bindings,
    });
    let delta = time.delta_seconds();
    for (mut craft, mut transform, mut force, mut axes, mut velocity, mut audio, mut rack) in
        &mut crafts
    {
        // Thrust is a per-frame force; rapier keeps it until replaced.
        force.force = Vec3::ZERO;
        step_craft(
            &mut craft.0,
            CraftBody {
                transform: &mut transform,
                force: &mut force,
                axes: &mut axes,
                velocity: &mut velocity,
            },
            &mut audio,
            &mut rack,
            LevelRequests {
                pending: &mut pending,
                scenes: &mut active,
            },
            |controller, playback| {
                controller.on_frame(&Frame {
                    delta,
                    input,
                    playback,
                })
            },
        );
    }
}

/// Feed rapier contact starts between a craft and a tagged block to the craft.
pub fn handle_collisions(
    mut events: EventReader<CollisionEvent>,
    surfaces: Query<&ContactSurface>,
    mut active: ResMut<ActiveLevel>,
    mut pending: ResMut<PendingLoad>,
    mut crafts: Query<CraftParts>,
) {
    for event in events.read() {
        let (first, second) = match event {
            CollisionEvent::Started(first, second, _) => (*first, *second),
            CollisionEvent::Stopped(..) => continue,
        };
        for (craft_entity, other) in [(first, second), (second, first)] {
            let Ok(&ContactSurface(tag)) = surfaces.get(other) else {
                continue;
            };
            let Ok((mut craft, mut transform, mut force, mut axes, mut velocity, mut audio, mut rack)) =
                crafts.get_mut(craft_entity)
            else {
                continue;
            };
            step_craft(
                &mut craft.0,
                CraftBody {
                    transform: &mut transform,
                    force: &mut force,
                    axes: &mut axes,
                    velocity: &mut velocity,
                },
                &mut audio,
                &mut rack,
                LevelRequests {
                    pending: &mut pending,
                    scenes: &mut active,
                },
                |controller, _| controller.on_collision(tag),
            );
        }
    }
}

/// Tick the deferred load and hand it to the scene service when due.
pub fn fire_pending_load(
    time: Res<Time>,
    mut pending: ResMut<PendingLoad>,
    mut active: ResMut<ActiveLevel>,
) {
    if let Some(level) = pending.0.tick(time.delta()) {
        active.load_scene(level);
    }
}

impl Craft {
    pub(crate) fn spawn(
        commands: &mut Commands,
        launch: Vec3,
        controller: FlightController,
        mut palette: Option<&mut Palette>,
    ) -> Entity {
        let size = Vec3::new(1.0, 3.0, 1.0);
        let mut craft = commands.spawn((
            SpatialBundle::from_transform(Transform::from_translation(launch)),
            Craft(controller),
            RigidBody::Dynamic,
            Collider::cuboid(size.x / 2.0, size.y / 2.0, size.z / 2.0),
            ActiveEvents::COLLISION_EVENTS,
            ExternalForce::default(),
            Velocity::default(),
            LockedAxes::TRANSLATION_LOCKED_Z
                | LockedAxes::ROTATION_LOCKED_X
                | LockedAxes::ROTATION_LOCKED_Y,
            EngineAudio::default(),
            EmitterRack::default(),
            CameraTarget,
            LevelEntity,
            RocketBoostEntity,
        ));
        if let Some(palette) = palette.as_deref_mut() {
            craft.insert(palette.block(size, Color::rgb(0.85, 0.85, 0.9)));
        }
        craft.with_children(|parent| {
            for emitter in Emitter::ALL {
                let mut visual = parent.spawn((
                    SpatialBundle {
                        visibility: Visibility::Hidden,
                        transform: Transform::from_translation(emitter_offset(emitter)),
                        ..default()
                    },
                    EmitterVisual(emitter),
                ));
                if let Some(palette) = palette.as_deref_mut() {
                    visual.insert(palette.block(Vec3::splat(0.6), emitter_color(emitter)));
                }
            }
        });
        craft.id()
    }
}

fn emitter_offset(emitter: Emitter) -> Vec3 {
    match emitter {
        Emitter::Thrust => Vec3::new(0.0, -1.8, 0.0),
        Emitter::Death | Emitter::Success => Vec3::ZERO,
    }
}

fn emitter_color(emitter: Emitter) -> Color {
    match emitter {
        Emitter::Thrust => Color::rgb(1.0, 0.5, 0.1),
        Emitter::Death => Color::rgb(0.9, 0.1, 0.1),
        Emitter::Success => Color::rgb(1.0, 0.9, 0.2),
    }
}
