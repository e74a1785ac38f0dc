//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::f64::consts::TAU;

use bevy::math::DVec3;
use spaze::body::{Body, BodyId};
use spaze::generator::{GeneratorConfig, generate};
use spaze::player::{FlightConfig, FlightInput, Player, SpawnPoint};
use spaze::system::{StarSystem, Wormhole};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Gravitational constant used throughout the game.
pub const G: f64 = 5.0;

/// Live fixed timestep.
pub const DT: f64 = 1.0 / 60.0;

/// Ids of the bodies in [`sun_planet_moon`].
pub struct Hierarchy {
    pub system: StarSystem,
    pub planet: BodyId,
    pub moon: BodyId,
}

/// Star of mass 250000 alone at the origin.
pub fn lone_star() -> StarSystem {
    StarSystem::new(Body::star(250.0, 20.0, G).expect("valid star")).expect("valid system")
}

/// Star, one planet at orbit 500 and a moon at 125 around it.
pub fn sun_planet_moon() -> Hierarchy {
    let mut system = lone_star();
    let planet = system
        .add(Body::satellite(BodyId::ROOT, 500.0, 50.0, 3.0, G).expect("valid planet"))
        .expect("planet after star");
    let moon = system
        .add(Body::satellite(planet, 125.0, 15.0, 1.0, G).expect("valid moon"))
        .expect("moon after planet");
    system.update(G, 0.0);
    Hierarchy { system, planet, moon }
}

/// Same as [`sun_planet_moon`] with a wormhole far out on the x axis.
pub fn with_wormhole() -> Hierarchy {
    let mut h = sun_planet_moon();
    h.system = h.system.with_wormhole(Wormhole::new(DVec3::new(2000.0, 0.0, 0.0), 50.0));
    h
}

/// Deterministically generated system.
pub fn seeded_system(seed: u64) -> StarSystem {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(G, DT, &GeneratorConfig::default(), &mut rng).expect("default config generates")
}

/// Player at the default spawn point.
pub fn spawned_player() -> Player {
    Player::spawn(&SpawnPoint::default())
}

/// Run `ticks` full live steps without input.
pub fn fly(system: &mut StarSystem, player: &mut Player, ticks: usize) {
    let mut input = FlightInput::default();
    let config = FlightConfig::default();
    for _ in 0..ticks {
        player.tick(system, &mut input, &config, G, DT, false);
    }
}

/// Shortest distance between two angles on the circle.
pub fn angle_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}
