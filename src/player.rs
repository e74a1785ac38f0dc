//! Player flight model.
//!
//! The player is a free-flying test particle with a smoothed quaternion
//! orientation. Each tick reads the latest [`FlightInput`], turns the
//! orientation target, applies thrust along the local basis and integrates
//! under the gravity of every body.

use std::f64::consts::PI;

use bevy::math::{DQuat, DVec2, DVec3};
use bevy::prelude::Resource;

use crate::body::Body;
use crate::math::{Basis, compose, from_axis_angle, from_euler, slerp_clamped};
use crate::physics::gravity::net_acceleration;
use crate::physics::integrator::{ThrustMode, apply_thrust, drift, kick};
use crate::system::StarSystem;

/// Tunable flight constants.
#[derive(Resource, Clone, Debug)]
pub struct FlightConfig {
    /// Radians per unit of pointer motion per second
    pub look_sensitivity: f64,
    /// Radians per second at full roll input
    pub roll_speed: f64,
    /// Velocity change per tick at full thrust
    pub move_speed: f64,
    /// Slerp blend factor toward the target orientation each tick
    pub smoothing: f64,
    pub thrust_mode: ThrustMode,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.3,
            roll_speed: 0.5,
            move_speed: 0.2,
            smoothing: 0.3,
            thrust_mode: ThrustMode::Impulse,
        }
    }
}

/// Where the player starts each run.
#[derive(Resource, Clone, Debug)]
pub struct SpawnPoint {
    pub position: DVec3,
    pub velocity: DVec3,
    pub orientation: DQuat,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, -1300.0),
            velocity: DVec3::new(5.0, 0.0, 0.0),
            // facing +Z, toward the star
            orientation: from_euler(0.0, PI, 0.0),
        }
    }
}

/// Control state sampled from the input devices.
///
/// Axes are -1, 0 or +1. `look_delta` accumulates pointer motion between
/// physics ticks and is cleared when a tick consumes it.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct FlightInput {
    pub look_delta: DVec2,
    /// Roll axis (positive rolls clockwise around forward)
    pub roll: f64,
    /// Forward/backward thrust axis
    pub forward: f64,
    /// Right/left thrust axis
    pub strafe: f64,
    /// Up/down thrust axis
    pub lift: f64,
}

impl FlightInput {
    /// Difference of two opposing button states.
    pub fn axis(positive: bool, negative: bool) -> f64 {
        f64::from(u8::from(positive)) - f64::from(u8::from(negative))
    }

    /// Take the accumulated pointer motion, leaving zero behind.
    pub fn take_look_delta(&mut self) -> DVec2 {
        std::mem::take(&mut self.look_delta)
    }
}

/// Camera placement derived from the player state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    /// Look-at point one unit ahead
    pub target: DVec3,
    pub up: DVec3,
}

/// The free-flying player.
#[derive(Resource, Clone, Debug)]
pub struct Player {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Smoothed orientation used for the camera and thrust
    pub orientation: DQuat,
    /// Accumulated control target that `orientation` chases
    pub target_orientation: DQuat,
    pub camera: CameraPose,
}

impl Player {
    pub fn spawn(spawn: &SpawnPoint) -> Self {
        let mut player = Self {
            position: spawn.position,
            velocity: spawn.velocity,
            orientation: spawn.orientation,
            target_orientation: spawn.orientation,
            camera: CameraPose {
                position: spawn.position,
                target: spawn.position,
                up: DVec3::Y,
            },
        };
        player.sync_camera();
        player
    }

    /// Put the player back at the spawn point.
    pub fn reset(&mut self, spawn: &SpawnPoint) {
        *self = Self::spawn(spawn);
    }

    /// Local forward/up/right in world space.
    pub fn basis(&self) -> Basis {
        Basis::from_orientation(self.orientation)
    }

    /// Turn the target orientation by this tick's look and roll input, then
    /// blend the current orientation toward it.
    ///
    /// Rotations are taken about the current local axes, so pitching while
    /// rolled stays relative to the ship.
    pub fn handle_orientation_input(&mut self, look_delta: DVec2, roll: f64, config: &FlightConfig, dt: f64) {
        let basis = self.basis();
        let yaw = from_axis_angle(basis.up, -look_delta.x * config.look_sensitivity * dt);
        let pitch = from_axis_angle(basis.right, -look_delta.y * config.look_sensitivity * dt);
        let roll = from_axis_angle(basis.forward, roll * config.roll_speed * dt);

        let rotation = yaw * pitch * roll;
        self.target_orientation = compose(rotation, self.target_orientation);
        self.orientation = slerp_clamped(self.orientation, self.target_orientation, config.smoothing);
    }

    /// Add thrust along the local basis.
    pub fn handle_thrust_input(&mut self, input: &FlightInput, config: &FlightConfig, dt: f64) {
        let basis = self.basis();
        let thrust = (basis.forward * input.forward + basis.right * input.strafe + basis.up * input.lift)
            * config.move_speed;
        self.velocity = apply_thrust(self.velocity, thrust, config.thrust_mode, dt);
    }

    /// Accelerate under the gravity of `bodies` for `dt`.
    pub fn apply_gravity<'a>(&mut self, g: f64, dt: f64, bodies: impl IntoIterator<Item = &'a Body>) {
        let acc = net_acceleration(g, self.position, bodies);
        self.velocity = kick(self.velocity, acc, dt);
    }

    pub fn integrate(&mut self, dt: f64) {
        self.position = drift(self.position, self.velocity, dt);
    }

    /// Recompute the camera pose from position and orientation.
    pub fn sync_camera(&mut self) {
        let basis = self.basis();
        self.camera = CameraPose {
            position: self.position,
            target: self.position + basis.forward,
            up: basis.up,
        };
    }

    /// One full live step: orbits, gravity, orientation, thrust, integrate,
    /// camera sync.
    ///
    /// Orientation input is ignored while `map_open`.
    pub fn tick(
        &mut self,
        system: &mut StarSystem,
        input: &mut FlightInput,
        config: &FlightConfig,
        g: f64,
        dt: f64,
        map_open: bool,
    ) {
        system.update(g, dt);
        self.apply_gravity(g, dt, system.bodies());
        let look_delta = input.take_look_delta();
        if !map_open {
            self.handle_orientation_input(look_delta, input.roll, config, dt);
        }
        self.handle_thrust_input(input, config, dt);
        self.integrate(dt);
        self.sync_camera();
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::spawn(&SpawnPoint::default())
    }
}
