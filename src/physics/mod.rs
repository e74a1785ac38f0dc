//! Fixed-tick simulation of the star system and the player.
//!
//! This module provides the physics layer around the pure functions in
//! [`gravity`] and [`integrator`]. It runs in Bevy's FixedUpdate schedule,
//! one step per fixed tick, in this order:
//!
//! orbits → gravity → orientation → thrust → integrate → camera sync

pub mod gravity;
pub mod integrator;

#[cfg(test)]
mod proptest_physics;

use bevy::prelude::*;

pub use gravity::{ClosestBodyInfo, GRAVITY_EPSILON, closest_body, net_acceleration};
pub use integrator::ThrustMode;

use crate::player::{FlightConfig, FlightInput, Player};
use crate::prediction::MapOverlay;
use crate::system::StarSystem;
use crate::time::SimulationClock;
use crate::types::{SimulationConfig, TickSet};

/// Plugin providing the fixed-tick flight simulation.
///
/// Adds systems for:
/// - Orbit propagation of every body
/// - Gravity, orientation, thrust and integration of the [`Player`]
/// - Camera pose sync
///
/// Nothing runs until both a [`StarSystem`] and a [`Player`] resource exist
/// and the [`SimulationClock`] is unpaused.
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        let timestep = app
            .world()
            .get_resource::<SimulationConfig>()
            .map_or_else(|| SimulationConfig::default().timestep, |c| c.timestep);

        app.init_resource::<SimulationConfig>()
            .init_resource::<SimulationClock>()
            .init_resource::<FlightConfig>()
            .init_resource::<FlightInput>()
            .insert_resource(Time::<Fixed>::from_seconds(timestep))
            .configure_sets(
                FixedUpdate,
                (TickSet::Orbits, TickSet::Flight, TickSet::Hazards).chain(),
            )
            .add_systems(
                FixedUpdate,
                advance_orbits
                    .in_set(TickSet::Orbits)
                    .run_if(simulation_ready),
            )
            .add_systems(
                FixedUpdate,
                (
                    apply_gravity,
                    apply_orientation,
                    apply_thrust,
                    integrate_player,
                    sync_camera,
                )
                    .chain()
                    .in_set(TickSet::Flight)
                    .run_if(simulation_ready),
            );
    }
}

/// Run condition: unpaused, with a system and a player to simulate.
pub fn simulation_ready(
    clock: Res<SimulationClock>,
    system: Option<Res<StarSystem>>,
    player: Option<Res<Player>>,
) -> bool {
    !clock.paused && system.is_some() && player.is_some()
}

fn advance_orbits(mut system: ResMut<StarSystem>, config: Res<SimulationConfig>) {
    system.update(config.gravitational_constant, config.timestep);
}

fn apply_gravity(mut player: ResMut<Player>, system: Res<StarSystem>, config: Res<SimulationConfig>) {
    player.apply_gravity(config.gravitational_constant, config.timestep, system.bodies());
}

/// Consumes pointer motion every tick; it only turns the ship while the map is closed.
fn apply_orientation(
    mut player: ResMut<Player>,
    mut input: ResMut<FlightInput>,
    flight: Res<FlightConfig>,
    config: Res<SimulationConfig>,
    map: Option<Res<MapOverlay>>,
) {
    let look_delta = input.take_look_delta();
    if map.is_some_and(|m| m.enabled) {
        return;
    }
    player.handle_orientation_input(look_delta, input.roll, &flight, config.timestep);
}

fn apply_thrust(
    mut player: ResMut<Player>,
    input: Res<FlightInput>,
    flight: Res<FlightConfig>,
    config: Res<SimulationConfig>,
) {
    player.handle_thrust_input(&input, &flight, config.timestep);
}

fn integrate_player(mut player: ResMut<Player>, config: Res<SimulationConfig>) {
    player.integrate(config.timestep);
}

fn sync_camera(mut player: ResMut<Player>) {
    player.sync_camera();
}
