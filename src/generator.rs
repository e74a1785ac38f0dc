//! Procedural star system generation.
//!
//! A system is one star at the origin, a handful of planets on widening
//! orbits, an occasional moon per planet and a wormhole past the outermost
//! orbit. Bodies are added star first, then planets, then moons, so the
//! result always satisfies the hierarchy's ordering rule.

use std::f64::consts::TAU;
use std::ops::RangeInclusive;
use std::sync::Arc;

use bevy::math::DVec3;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::body::{Appearance, Body, BodyError, BodyId, BodyKind, Climate};
use crate::system::{HierarchyError, StarSystem, Wormhole};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("empty range for {0}")]
    EmptyRange(&'static str),

    #[error("moon chance {0} is not a probability")]
    InvalidProbability(f64),
}

/// Tunable generation ranges.
#[derive(Resource, Clone, Debug)]
pub struct GeneratorConfig {
    pub star_radius: f64,
    pub star_surface_gravity: f64,
    pub planet_count: RangeInclusive<usize>,
    pub planet_radius: RangeInclusive<u32>,
    /// Orbit radius of the innermost planet
    pub first_orbit: f64,
    /// Planet `i` orbits at `first_orbit + spacing * i`, spacing drawn per planet
    pub orbit_spacing: RangeInclusive<u32>,
    /// Surface gravity is `floor(factor * radius)`
    pub surface_gravity_factor: f64,
    pub moon_chance: f64,
    pub moon_radius: RangeInclusive<u32>,
    pub moon_orbit: f64,
    /// Distance of the wormhole beyond the outermost planet orbit
    pub wormhole_margin: f64,
    pub wormhole_radius: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            star_radius: 250.0,
            star_surface_gravity: 20.0,
            planet_count: 3..=7,
            planet_radius: 40..=75,
            first_orbit: 500.0,
            orbit_spacing: 175..=250,
            surface_gravity_factor: 0.075,
            moon_chance: 0.25,
            moon_radius: 12..=25,
            moon_orbit: 125.0,
            wormhole_margin: 400.0,
            wormhole_radius: 50.0,
        }
    }
}

impl GeneratorConfig {
    /// Reject ranges the generator cannot sample from.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.planet_count.is_empty() {
            return Err(GeneratorError::EmptyRange("planet_count"));
        }
        if self.planet_radius.is_empty() {
            return Err(GeneratorError::EmptyRange("planet_radius"));
        }
        if self.orbit_spacing.is_empty() {
            return Err(GeneratorError::EmptyRange("orbit_spacing"));
        }
        if self.moon_radius.is_empty() {
            return Err(GeneratorError::EmptyRange("moon_radius"));
        }
        if !(0.0..=1.0).contains(&self.moon_chance) {
            return Err(GeneratorError::InvalidProbability(self.moon_chance));
        }
        Ok(())
    }

    fn surface_gravity(&self, radius: f64) -> f64 {
        (self.surface_gravity_factor * radius).floor()
    }
}

/// Random source for system generation.
#[derive(Resource)]
pub struct GeneratorRng(pub StdRng);

impl GeneratorRng {
    /// Seeded for reproducible runs, or from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

fn random_climate<R: Rng + ?Sized>(rng: &mut R) -> Climate {
    Climate {
        oxygen: rng.gen_range(0..=Climate::MAX_OXYGEN),
        temperature: rng.gen_range(Climate::MIN_TEMPERATURE..=Climate::MAX_TEMPERATURE),
        water: rng.gen_range(0..=Climate::MAX_WATER),
    }
}

fn random_appearance<R: Rng + ?Sized>(kind: BodyKind, rng: &mut R) -> Arc<Appearance> {
    let seed = rng.gen_range(0..=u32::MAX);
    Arc::new(Appearance::with_climate(kind, seed, random_climate(rng)))
}

/// Build a fresh star system.
///
/// Orbit phases are randomized and one `update(g, timestep)` is run so
/// every body has a valid position and transform on return.
pub fn generate<R: Rng + ?Sized>(
    g: f64,
    timestep: f64,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<StarSystem, GeneratorError> {
    config.validate()?;

    let star = Body::star(config.star_radius, config.star_surface_gravity, g)?
        .with_appearance(Arc::new(Appearance::star(rng.gen_range(0..=u32::MAX))));
    let mut system = StarSystem::new(star)?;

    let planet_count = rng.gen_range(config.planet_count.clone());
    let mut planets: Vec<BodyId> = Vec::with_capacity(planet_count);
    let mut outermost_orbit = config.star_radius;

    for i in 0..planet_count {
        let radius = f64::from(rng.gen_range(config.planet_radius.clone()));
        let spacing = f64::from(rng.gen_range(config.orbit_spacing.clone()));
        let orbit = config.first_orbit + spacing * i as f64;

        let planet = Body::satellite(BodyId::ROOT, orbit, radius, config.surface_gravity(radius), g)?
            .with_appearance(random_appearance(BodyKind::Planet, rng));
        planets.push(system.add(planet)?);
        outermost_orbit = outermost_orbit.max(orbit);
    }

    let mut moon_count = 0;
    for &planet in &planets {
        if !rng.gen_bool(config.moon_chance) {
            continue;
        }
        let radius = f64::from(rng.gen_range(config.moon_radius.clone()));
        let moon = Body::satellite(planet, config.moon_orbit, radius, config.surface_gravity(radius), g)?
            .with_appearance(random_appearance(BodyKind::Moon, rng));
        system.add(moon)?;
        moon_count += 1;
    }

    system.randomize_orbit_phases(rng);
    system.update(g, timestep);

    let (sin, cos) = rng.gen_range(0.0..TAU).sin_cos();
    let distance = outermost_orbit + config.wormhole_margin;
    let wormhole = Wormhole::new(DVec3::new(cos, 0.0, sin) * distance, config.wormhole_radius);

    debug!(
        "Generated star system: {} planets, {} moons, wormhole at {:.0} units",
        planet_count, moon_count, distance
    );

    Ok(system.with_wormhole(wormhole))
}
