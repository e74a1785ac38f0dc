//! Spaze - Space Flight Simulation Core
//!
//! A library crate providing the orbit, gravity and flight simulation
//! components of the game, plus the Bevy plugins that drive them.

pub mod body;
pub mod camera;
pub mod generator;
pub mod input;
pub mod math;
pub mod physics;
pub mod player;
pub mod prediction;
pub mod render;
pub mod selection;
pub mod session;
pub mod system;
pub mod time;
pub mod types;

#[cfg(test)]
pub mod test_utils;
