//! Pause state and elapsed simulated time.

use bevy::prelude::*;

use crate::types::{SimulationConfig, TickSet};

/// Plugin providing the simulation clock.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_systems(
                FixedUpdate,
                advance_clock
                    .in_set(TickSet::Orbits)
                    .run_if(simulation_running),
            );
    }
}

/// Simulation clock resource.
///
/// The game starts paused, and only unpaused ticks count toward `elapsed`.
#[derive(Resource, Clone, Debug)]
pub struct SimulationClock {
    /// Whether the simulation is paused
    pub paused: bool,
    /// Simulated seconds spent unpaused
    pub elapsed: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            paused: true,
            elapsed: 0.0,
        }
    }
}

impl SimulationClock {
    /// Create a clock that is already running.
    pub fn running() -> Self {
        Self {
            paused: false,
            elapsed: 0.0,
        }
    }

    /// Flip the pause state, returning the new value.
    pub fn toggle(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

/// Run condition: is the simulation unpaused?
pub fn simulation_running(clock: Res<SimulationClock>) -> bool {
    !clock.paused
}

fn advance_clock(mut clock: ResMut<SimulationClock>, config: Res<SimulationConfig>) {
    clock.elapsed += config.timestep;
}
