//! Run lifecycle: flying, death and wormhole transit.
//!
//! Monitors the player after every physics tick. On hitting a body:
//! - The simulation is paused
//! - The death screen is shown for `death_screen_secs`
//!
//! On entering the wormhole the simulation keeps running through the
//! transit. Either way the run ends with a freshly generated system and the
//! player back at the spawn point.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::body::BodyId;
use crate::generator::{GeneratorConfig, GeneratorError, GeneratorRng, generate};
use crate::physics::simulation_ready;
use crate::player::{FlightInput, Player, SpawnPoint};
use crate::prediction::Forecast;
use crate::selection::{Scanner, SelectedBody};
use crate::system::StarSystem;
use crate::time::SimulationClock;
use crate::types::{SimulationConfig, TickSet};

/// Plugin providing system generation and the run lifecycle.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .init_resource::<SimulationClock>()
            .init_resource::<SessionConfig>()
            .init_resource::<SessionState>()
            .init_resource::<GeneratorConfig>()
            .init_resource::<SpawnPoint>()
            .add_systems(Startup, start_session)
            .add_systems(
                FixedUpdate,
                detect_hazards.in_set(TickSet::Hazards).run_if(simulation_ready),
            )
            .add_systems(Update, advance_session);
    }
}

/// Session tuning.
#[derive(Resource, Clone, Debug)]
pub struct SessionConfig {
    /// Real seconds the death screen stays up
    pub death_screen_secs: f64,
    /// Real seconds spent in the wormhole
    pub wormhole_transit_secs: f64,
    /// Fixed seed for reproducible systems, entropy when `None`
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            death_screen_secs: 5.0,
            wormhole_transit_secs: 8.0,
            seed: None,
        }
    }
}

/// Where the current run stands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Flying,
    /// Hit a body; `elapsed` real seconds on the death screen
    Dead { elapsed: f64 },
    /// Inside the wormhole; `elapsed` real seconds into the transit
    Transiting { elapsed: f64 },
}

/// Details of the most recent crash.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    pub body: BodyId,
    /// Player speed relative to the body at impact
    pub speed: f64,
}

/// Session state resource.
#[derive(Resource, Clone, Debug)]
pub struct SessionState {
    pub phase: Phase,
    /// Number of completed resets
    pub run: u32,
    pub last_impact: Option<Impact>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: Phase::Flying,
            run: 0,
            last_impact: None,
        }
    }
}

impl SessionState {
    pub fn is_flying(&self) -> bool {
        self.phase == Phase::Flying
    }

    /// Add `delta` real seconds to the current phase.
    ///
    /// Returns true once the phase has lasted its configured duration.
    pub fn advance(&mut self, delta: f64, config: &SessionConfig) -> bool {
        match &mut self.phase {
            Phase::Flying => false,
            Phase::Dead { elapsed } => {
                *elapsed += delta;
                *elapsed >= config.death_screen_secs
            }
            Phase::Transiting { elapsed } => {
                *elapsed += delta;
                *elapsed >= config.wormhole_transit_secs
            }
        }
    }
}

/// Something the player ran into this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hazard {
    Collision(BodyId),
    Wormhole,
}

/// Check `position` against every body, then the wormhole.
///
/// Collisions take priority over the wormhole.
pub fn check_hazards(system: &StarSystem, position: DVec3) -> Option<Hazard> {
    if let Some(id) = system.colliding_body(position) {
        return Some(Hazard::Collision(id));
    }
    system
        .wormhole()
        .filter(|w| w.contains(position))
        .map(|_| Hazard::Wormhole)
}

fn start_session(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    session: Res<SessionConfig>,
    generator: Res<GeneratorConfig>,
    spawn: Res<SpawnPoint>,
) {
    let mut rng = GeneratorRng::new(session.seed);
    match generate(config.gravitational_constant, config.timestep, &generator, &mut rng.0) {
        Ok(system) => {
            info!("Star system ready with {} bodies", system.len());
            commands.insert_resource(system);
            commands.insert_resource(Player::spawn(&spawn));
        }
        Err(err) => error!("Failed to generate star system: {}", err),
    }
    commands.insert_resource(rng);
}

fn detect_hazards(
    mut session: ResMut<SessionState>,
    mut clock: ResMut<SimulationClock>,
    system: Res<StarSystem>,
    player: Res<Player>,
) {
    let hazard = match session.phase {
        Phase::Dead { .. } => return,
        Phase::Flying => check_hazards(&system, player.position),
        // already inside the wormhole, bodies can still be hit
        Phase::Transiting { .. } => system.colliding_body(player.position).map(Hazard::Collision),
    };

    match hazard {
        Some(Hazard::Collision(id)) => {
            let speed = system
                .body(id)
                .map_or(player.velocity.length(), |b| (player.velocity - b.velocity()).length());
            info!("Player crashed into body {} at {:.1} units/s", id, speed);
            session.phase = Phase::Dead { elapsed: 0.0 };
            session.last_impact = Some(Impact { body: id, speed });
            clock.paused = true;
        }
        Some(Hazard::Wormhole) => {
            info!("Entering wormhole");
            session.phase = Phase::Transiting { elapsed: 0.0 };
        }
        None => {}
    }
}

/// Swap in a new system and put the player back at the spawn point.
pub fn reset_run(
    system: &mut StarSystem,
    player: &mut Player,
    spawn: &SpawnPoint,
    g: f64,
    timestep: f64,
    generator: &GeneratorConfig,
    rng: &mut GeneratorRng,
) -> Result<(), GeneratorError> {
    *system = generate(g, timestep, generator, &mut rng.0)?;
    player.reset(spawn);
    Ok(())
}

fn advance_session(
    time: Res<Time>,
    config: Res<SessionConfig>,
    sim: Res<SimulationConfig>,
    generator: Res<GeneratorConfig>,
    spawn: Res<SpawnPoint>,
    mut session: ResMut<SessionState>,
    mut clock: ResMut<SimulationClock>,
    mut rng: Option<ResMut<GeneratorRng>>,
    mut system: Option<ResMut<StarSystem>>,
    mut player: Option<ResMut<Player>>,
    mut selected: Option<ResMut<SelectedBody>>,
    mut scanner: Option<ResMut<Scanner>>,
    mut forecast: Option<ResMut<Forecast>>,
    mut input: Option<ResMut<FlightInput>>,
) {
    let was_dead = matches!(session.phase, Phase::Dead { .. });
    if !session.advance(time.delta_secs_f64(), &config) {
        return;
    }
    let (Some(rng), Some(system), Some(player)) = (rng.as_deref_mut(), system.as_deref_mut(), player.as_deref_mut())
    else {
        return;
    };

    if let Err(err) = reset_run(
        system,
        player,
        &spawn,
        sim.gravitational_constant,
        sim.timestep,
        &generator,
        rng,
    ) {
        // keep the old system and try again next frame
        warn!("System reset failed: {}", err);
        return;
    }

    if let Some(selected) = selected.as_deref_mut() {
        selected.clear();
    }
    if let Some(scanner) = scanner.as_deref_mut() {
        scanner.reset();
    }
    if let Some(forecast) = forecast.as_deref_mut() {
        *forecast = Forecast::default();
    }
    if let Some(input) = input.as_deref_mut() {
        input.take_look_delta();
    }

    session.phase = Phase::Flying;
    session.run += 1;
    // a transit leaves a player-chosen pause alone
    if was_dead {
        clock.paused = false;
    }
    info!("Run {} started with {} bodies", session.run, system.len());
}
