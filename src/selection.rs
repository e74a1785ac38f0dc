//! Body selection, approach readout and the planet scanner.
//!
//! The player selects a body by clicking while it sits under the crosshair.
//! A selected planet or moon can be scanned from close range, which reveals
//! its climate.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::body::{Body, BodyId, BodyKind};
use crate::physics::simulation_ready;
use crate::player::Player;
use crate::system::{HierarchyError, StarSystem};
use crate::types::TickSet;

/// Plugin providing selection state and the scanner tick.
pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedBody>()
            .init_resource::<Scanner>()
            .init_resource::<ScannerConfig>()
            .add_systems(
                FixedUpdate,
                run_scanner.in_set(TickSet::Hazards).run_if(simulation_ready),
            );
    }
}

/// Currently selected body, if any.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct SelectedBody {
    pub body: Option<BodyId>,
}

impl SelectedBody {
    /// Apply a click on `hit`: selecting the current body again deselects
    /// it, clicking empty space keeps the selection.
    pub fn toggle(&mut self, hit: Option<BodyId>) {
        match hit {
            Some(id) if self.body == Some(id) => self.body = None,
            Some(id) => self.body = Some(id),
            None => {}
        }
    }

    pub fn clear(&mut self) {
        self.body = None;
    }
}

/// Closest body hit by a ray, ignoring bodies behind `origin`.
///
/// `direction` need not be normalized. Hits are ranked by squared distance
/// from `origin` to the body center.
pub fn pick_body(system: &StarSystem, origin: DVec3, direction: DVec3) -> Option<BodyId> {
    let direction = direction.normalize_or_zero();
    if direction == DVec3::ZERO {
        return None;
    }

    let mut closest: Option<(BodyId, f64)> = None;
    for (id, body) in system.iter() {
        let to_body = body.position() - origin;
        let along = direction.dot(to_body);
        if along < 0.0 {
            continue;
        }

        let dist_sq = to_body.length_squared();
        let miss_sq = dist_sq - along * along;
        if miss_sq > body.radius() * body.radius() {
            continue;
        }
        if closest.is_none_or(|(_, best)| dist_sq < best) {
            closest = Some((id, dist_sq));
        }
    }

    closest.map(|(id, _)| id)
}

/// Relative motion between the player and a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproachReadout {
    /// Center-to-center distance
    pub distance: f64,
    /// Player velocity relative to the body
    pub relative_velocity: DVec3,
    /// Rate at which the distance shrinks, negative when receding
    pub closing_speed: f64,
}

impl ApproachReadout {
    pub fn between(player: &Player, body: &Body) -> Self {
        let offset = body.position() - player.position;
        let distance = offset.length();
        let relative_velocity = player.velocity - body.velocity();
        let closing_speed = if distance > 0.0 {
            relative_velocity.dot(offset) / distance
        } else {
            0.0
        };
        Self {
            distance,
            relative_velocity,
            closing_speed,
        }
    }
}

/// Scanner tuning.
#[derive(Resource, Clone, Debug)]
pub struct ScannerConfig {
    /// Scanning works within `radius + range_margin` of the body center
    pub range_margin: f64,
    /// Progress gained per tick
    pub rate: f64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            range_margin: 250.0,
            rate: 0.005,
        }
    }
}

/// Outcome of one scanner tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScanStatus {
    /// Stars cannot be scanned
    Star,
    AlreadyScanned,
    TooFar,
    /// In progress, with progress in `[0, 1)`
    Scanning(f64),
    /// Finished this tick; the body is now marked scanned
    Completed,
}

/// Scan progress on the selected body.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct Scanner {
    pub progress: f64,
    /// Status from the most recent tick, `None` with nothing selected
    pub status: Option<ScanStatus>,
}

impl Scanner {
    /// Advance the scan of `target` by one tick.
    ///
    /// Progress is kept while out of range and resets on completion.
    pub fn tick(
        &mut self,
        system: &mut StarSystem,
        target: BodyId,
        player_position: DVec3,
        config: &ScannerConfig,
    ) -> Result<ScanStatus, HierarchyError> {
        let body = system.try_body(target)?;

        let status = if body.kind() == BodyKind::Star {
            ScanStatus::Star
        } else if body.is_scanned() {
            ScanStatus::AlreadyScanned
        } else {
            let range = body.radius() + config.range_margin;
            if player_position.distance_squared(body.position()) > range * range {
                ScanStatus::TooFar
            } else {
                self.progress += config.rate;
                if self.progress >= 1.0 {
                    self.progress = 0.0;
                    system.mark_scanned(target)?;
                    ScanStatus::Completed
                } else {
                    ScanStatus::Scanning(self.progress)
                }
            }
        };

        self.status = Some(status);
        Ok(status)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn run_scanner(
    mut scanner: ResMut<Scanner>,
    mut selected: ResMut<SelectedBody>,
    mut system: ResMut<StarSystem>,
    player: Res<Player>,
    config: Res<ScannerConfig>,
) {
    let Some(target) = selected.body else {
        scanner.status = None;
        return;
    };

    match scanner.tick(&mut system, target, player.position, &config) {
        Ok(ScanStatus::Completed) => {
            if let Some(climate) = system.body(target).and_then(|b| b.appearance().climate) {
                info!(
                    "Scan of body {} complete: {}% O2, {} C, {}% water",
                    target, climate.oxygen, climate.temperature, climate.water
                );
            }
        }
        Ok(_) => {}
        Err(err) => {
            warn!("Dropping selection: {}", err);
            selected.clear();
            scanner.reset();
        }
    }
}
