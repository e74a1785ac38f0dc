//! Semi-implicit Euler stepping for the player.
//!
//! One tick applies a velocity kick from gravity, then thrust, then a
//! position drift with the updated velocity:
//!
//! ```text
//! v' = v + a dt
//! v' = v' + thrust
//! x' = x + v' dt
//! ```

use bevy::math::DVec3;

/// How a thrust command is turned into a velocity change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThrustMode {
    /// Fixed velocity change per tick, independent of `dt`.
    ///
    /// Under a fixed timestep this is stable across frame rates.
    #[default]
    Impulse,
    /// Acceleration scaled by `dt`.
    Continuous,
}

/// Velocity after accelerating by `acc` for `dt`.
#[inline]
pub fn kick(velocity: DVec3, acc: DVec3, dt: f64) -> DVec3 {
    velocity + acc * dt
}

/// Position after moving at `velocity` for `dt`.
#[inline]
pub fn drift(position: DVec3, velocity: DVec3, dt: f64) -> DVec3 {
    position + velocity * dt
}

/// Velocity after applying `thrust` in the given mode.
///
/// `thrust` is already the world-space vector (basis direction × axis × speed).
#[inline]
pub fn apply_thrust(velocity: DVec3, thrust: DVec3, mode: ThrustMode, dt: f64) -> DVec3 {
    match mode {
        ThrustMode::Impulse => velocity + thrust,
        ThrustMode::Continuous => velocity + thrust * dt,
    }
}
