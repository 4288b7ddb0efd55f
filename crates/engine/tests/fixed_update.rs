use bevy::prelude::*;
use engine::{EnginePlugin, FIXED_HZ};

#[test]
fn engine_ticks_fixed_update_at_sixty_hz() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(EnginePlugin);

    #[derive(Resource, Default)]
    struct Counter(u32);
    app.init_resource::<Counter>();

    app.add_systems(FixedUpdate, |mut c: ResMut<Counter>| {
        c.0 += 1;
    });

    let timestep = app.world.resource::<Time<Fixed>>().timestep();
    assert!((timestep.as_secs_f64() - 1.0 / FIXED_HZ).abs() < 1e-9);

    for _ in 0..60 {
        app.world.resource_mut::<Time<Fixed>>().advance_by(timestep);
        app.world.run_schedule(FixedUpdate);
    }

    assert_eq!(app.world.resource::<Counter>().0, 60);
    let elapsed = app.world.resource::<Time<Fixed>>().elapsed_seconds();
    assert!((elapsed - 1.0).abs() < 1e-4);
}
