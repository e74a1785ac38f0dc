//! Simulation constants, configuration and schedule labels.

use bevy::prelude::*;

/// Default gravitational constant in game units.
pub const DEFAULT_G: f64 = 5.0;

/// Default fixed physics timestep (seconds).
pub const DEFAULT_TIMESTEP: f64 = 1.0 / 60.0;

/// Labels for the ordered phases of one fixed tick.
///
/// Orbits must be advanced before gravity is evaluated on the player,
/// and hazards are checked against the integrated player position.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Advance every body along its orbit
    Orbits,
    /// Gravity, orientation, thrust, integration and camera sync
    Flight,
    /// Collision, wormhole and scanner checks
    Hazards,
}

/// Global simulation parameters.
#[derive(Resource, Clone, Debug)]
pub struct SimulationConfig {
    /// Gravitational constant used for orbits, masses and the player field.
    pub gravitational_constant: f64,
    /// Fixed physics timestep in seconds.
    pub timestep: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_G,
            timestep: DEFAULT_TIMESTEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_config_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.gravitational_constant, 5.0);
        assert!((config.timestep - 1.0 / 60.0).abs() < 1e-15);
    }
}
