//! Trajectory prediction for the player.
//!
//! This module provides forward simulation of the player's coasting path,
//! shown on the map overlay. Prediction runs on a private snapshot of the
//! star system and a copy of the player, so live state is never touched.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::body::BodyId;
use crate::player::Player;
use crate::system::StarSystem;
use crate::types::SimulationConfig;

/// Plugin providing trajectory prediction while the map is open.
pub struct PredictionPlugin;

impl Plugin for PredictionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .init_resource::<PredictionSettings>()
            .init_resource::<MapOverlay>()
            .init_resource::<Forecast>()
            .add_systems(
                Update,
                update_forecast
                    .run_if(map_enabled)
                    .run_if(resource_exists::<StarSystem>)
                    .run_if(resource_exists::<Player>),
            );
    }
}

/// Configuration for trajectory prediction.
#[derive(Resource, Clone, Debug)]
pub struct PredictionSettings {
    /// Maximum number of coast steps per forecast.
    pub steps: usize,
    /// Simulated seconds per step, far coarser than the live tick.
    pub timestep: f64,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            steps: 100,
            timestep: 0.5,
        }
    }
}

/// Map overlay toggle.
#[derive(Resource, Clone, Debug, Default)]
pub struct MapOverlay {
    pub enabled: bool,
}

impl MapOverlay {
    /// Flip the overlay, returning whether it is now open.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

/// Run condition: is the map overlay open?
pub fn map_enabled(map: Res<MapOverlay>) -> bool {
    map.enabled
}

/// Predicted coasting path of the player.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct Forecast {
    /// Live position first, then one point per non-colliding step.
    pub points: Vec<DVec3>,
    /// Whether the path ends by hitting a body.
    pub collided: bool,
    /// The body that would be hit.
    pub collision_target: Option<BodyId>,
}

/// Coast the player forward through a snapshot of `system`.
///
/// Each step advances the snapshot's orbits, applies gravity to the copied
/// player and integrates its position. Thrust and orientation are ignored.
/// The first step that lands inside a body ends the forecast and is not
/// recorded.
pub fn predict(system: &StarSystem, player: &Player, g: f64, settings: &PredictionSettings) -> Forecast {
    let mut system = system.snapshot();
    let mut ghost = player.clone();
    let dt = settings.timestep;

    let mut forecast = Forecast {
        points: Vec::with_capacity(settings.steps + 1),
        collided: false,
        collision_target: None,
    };
    forecast.points.push(ghost.position);

    for _ in 0..settings.steps {
        system.update(g, dt);
        ghost.apply_gravity(g, dt, system.bodies());
        ghost.integrate(dt);

        if let Some(id) = system.colliding_body(ghost.position) {
            forecast.collided = true;
            forecast.collision_target = Some(id);
            break;
        }
        forecast.points.push(ghost.position);
    }

    forecast
}

fn update_forecast(
    system: Res<StarSystem>,
    player: Res<Player>,
    config: Res<SimulationConfig>,
    settings: Res<PredictionSettings>,
    mut forecast: ResMut<Forecast>,
) {
    *forecast = predict(&system, &player, config.gravitational_constant, &settings);
}

/// Color for a forecast segment at `t_normalized` along the path.
///
/// Fades from opaque to 20% alpha. Paths that end in a collision shift from
/// orange-red to bright red.
pub fn trajectory_color(t_normalized: f32, collided: bool) -> Color {
    let alpha = 1.0 - t_normalized * 0.8;

    if collided {
        let intensity = 0.6 + t_normalized * 0.4;
        let green = 0.3 * (1.0 - t_normalized);
        Color::srgba(intensity, green, 0.1, alpha.max(0.5))
    } else {
        Color::srgba(0.0, 0.85, 1.0, alpha)
    }
}
