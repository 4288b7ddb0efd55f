use std::collections::HashSet;
use std::time::Duration;

use flight::{
    Audio, Clip, ContactTag, Control, Emitter, FlightTunables, InputSource, LifecycleState,
    Particles, Physics, SceneService, Simulation,
};
use glam::Vec3;
use log::Level;
use logtest::Logger;

#[derive(Default)]
struct Body {
    forces: Vec<Vec3>,
    rotations: Vec<f32>,
    lock_changes: Vec<bool>,
}

impl Physics for Body {
    fn apply_force(&mut self, force: Vec3) {
        self.forces.push(force);
    }

    fn set_rotation_locked(&mut self, locked: bool) {
        self.lock_changes.push(locked);
    }

    fn rotate(&mut self, _axis: Vec3, degrees: f32) {
        self.rotations.push(degrees);
    }
}

#[derive(Default)]
struct Speaker {
    looping: Option<Clip>,
    loop_starts: usize,
    one_shots: Vec<Clip>,
}

impl Audio for Speaker {
    fn play_looping(&mut self, clip: Clip) {
        self.looping = Some(clip);
        self.loop_starts += 1;
    }

    fn play_one_shot(&mut self, clip: Clip) {
        self.one_shots.push(clip);
    }

    fn stop(&mut self) {
        self.looping = None;
    }

    fn is_playing(&self) -> bool {
        self.looping.is_some()
    }
}

#[derive(Default)]
struct Rack {
    playing: HashSet<Emitter>,
    plays: Vec<Emitter>,
}

impl Particles for Rack {
    fn play(&mut self, emitter: Emitter) {
        self.playing.insert(emitter);
        self.plays.push(emitter);
    }

    fn stop(&mut self, emitter: Emitter) {
        self.playing.remove(&emitter);
    }

    fn is_playing(&self, emitter: Emitter) -> bool {
        self.playing.contains(&emitter)
    }
}

struct Scenes {
    current: usize,
    count: usize,
    loads: Vec<usize>,
}

impl Scenes {
    fn new(current: usize, count: usize) -> Self {
        Self {
            current,
            count,
            loads: Vec::new(),
        }
    }
}

impl SceneService for Scenes {
    fn load_scene(&mut self, index: usize) {
        self.current = index;
        self.loads.push(index);
    }

    fn current_scene_index(&self) -> usize {
        self.current
    }

    fn scene_count(&self) -> usize {
        self.count
    }
}

#[derive(Default)]
struct Keys {
    held: HashSet<Control>,
    pressed: HashSet<Control>,
}

impl Keys {
    fn holding(controls: &[Control]) -> Self {
        Self {
            held: controls.iter().copied().collect(),
            pressed: HashSet::new(),
        }
    }

    fn pressing(control: Control) -> Self {
        Self {
            held: HashSet::from([control]),
            pressed: HashSet::from([control]),
        }
    }
}

impl InputSource for Keys {
    fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    fn is_pressed_this_frame(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }
}

type Sim = Simulation<Body, Speaker, Rack, Scenes>;

fn sim(current: usize, count: usize, tunables: FlightTunables) -> Sim {
    Simulation::new(
        Body::default(),
        Speaker::default(),
        Rack::default(),
        Scenes::new(current, count),
        tunables,
    )
    .unwrap()
}

const TICK: Duration = Duration::from_millis(100);

#[test]
fn engine_feedback_starts_once_and_stops_on_release() {
    let mut sim = sim(0, 3, FlightTunables::default());
    let thrust = Keys::holding(&[Control::Thrust]);
    for _ in 0..5 {
        sim.step(TICK, &thrust).unwrap();
    }
    assert_eq!(sim.physics.forces.len(), 5);
    assert_eq!(sim.audio.loop_starts, 1);
    assert_eq!(sim.audio.looping, Some(Clip::MainEngine));
    assert_eq!(sim.particles.plays, vec![Emitter::Thrust]);

    sim.step(TICK, &Keys::default()).unwrap();
    assert!(!sim.audio.is_playing());
    assert!(!sim.particles.is_playing(Emitter::Thrust));

    sim.step(TICK, &thrust).unwrap();
    assert_eq!(sim.audio.loop_starts, 2);
}

#[test]
fn rotation_is_bracketed_by_lock() {
    let mut sim = sim(0, 1, FlightTunables::default());
    sim.step(TICK, &Keys::holding(&[Control::RotateRight])).unwrap();
    assert_eq!(sim.physics.lock_changes, vec![true, false]);
    assert_eq!(sim.physics.rotations.len(), 1);
    assert!((sim.physics.rotations[0] + 15.0).abs() < 1e-4);
}

#[test]
fn scheduled_load_fires_once_after_delay() {
    let mut sim = sim(1, 3, FlightTunables::default());
    sim.collide(ContactTag::Finish).unwrap();
    assert_eq!(sim.controller().state(), LifecycleState::Transcending);
    assert_eq!(sim.audio.one_shots, vec![Clip::Success]);

    let idle = Keys::default();
    for _ in 0..9 {
        sim.step(TICK, &idle).unwrap();
    }
    assert!(sim.scenes.loads.is_empty());
    assert!(sim.timer().is_pending());

    sim.step(TICK, &idle).unwrap();
    assert_eq!(sim.scenes.loads, vec![2]);

    for _ in 0..50 {
        sim.step(TICK, &idle).unwrap();
    }
    assert_eq!(sim.scenes.loads, vec![2]);
}

#[test]
fn reload_recreates_a_live_craft() {
    let mut sim = sim(2, 3, FlightTunables::default());
    sim.collide(ContactTag::Hazard).unwrap();
    assert_eq!(sim.controller().state(), LifecycleState::Dying);

    let idle = Keys::default();
    for _ in 0..10 {
        sim.step(TICK, &idle).unwrap();
    }
    assert_eq!(sim.scenes.loads, vec![0]);
    assert_eq!(sim.controller().state(), LifecycleState::Alive);
    assert_eq!(sim.controller().level().index(), 0);
    assert!(sim.controller().collisions_enabled());
}

#[test]
fn repeated_collisions_arm_a_single_load() {
    let mut sim = sim(0, 3, FlightTunables::default());
    sim.collide(ContactTag::Hazard).unwrap();
    sim.collide(ContactTag::Finish).unwrap();
    sim.collide(ContactTag::Hazard).unwrap();
    assert_eq!(sim.audio.one_shots, vec![Clip::Death]);
    assert_eq!(sim.timer().target(), Some(0));
}

#[test]
fn debug_skip_loads_next_level_and_discards_pending_load() {
    let tunables = FlightTunables {
        debug_keys: true,
        ..Default::default()
    };
    let mut sim = sim(0, 3, tunables);
    sim.collide(ContactTag::Hazard).unwrap();
    assert!(sim.timer().is_pending());

    sim.step(TICK, &Keys::pressing(Control::SkipLevel)).unwrap();
    assert_eq!(sim.scenes.loads, vec![1]);
    assert!(!sim.timer().is_pending());
    assert_eq!(sim.controller().state(), LifecycleState::Alive);
    assert_eq!(sim.controller().level().index(), 1);
}

#[test]
fn toggling_collisions_logs() {
    let mut logger = Logger::start();
    let tunables = FlightTunables {
        debug_keys: true,
        ..Default::default()
    };
    let mut sim = sim(0, 2, tunables);
    sim.step(TICK, &Keys::pressing(Control::ToggleCollisions)).unwrap();
    sim.collide(ContactTag::Finish).unwrap();
    assert_eq!(sim.controller().state(), LifecycleState::Alive);
    assert!(logger.any(|r| {
        r.level() == Level::Debug && r.args().contains("collision handling disabled")
    }));
}

#[test]
fn rejects_scene_service_without_levels() {
    let result = Simulation::new(
        Body::default(),
        Speaker::default(),
        Rack::default(),
        Scenes::new(0, 0),
        FlightTunables::default(),
    );
    assert!(matches!(result, Err(flight::FlightError::NoLevels)));
}
