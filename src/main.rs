//! Spaze - space flight through procedurally generated star systems
//!
//! A desktop game: fly a ship under the gravity of a star, its planets and
//! their moons, scan what you find and jump through the wormhole to the
//! next system.

use bevy::prelude::*;

use spaze::camera::CameraPlugin;
use spaze::input::InputPlugin;
use spaze::physics::PhysicsPlugin;
use spaze::prediction::PredictionPlugin;
use spaze::render::RenderPlugin;
use spaze::selection::SelectionPlugin;
use spaze::session::SessionPlugin;
use spaze::time::TimePlugin;
use spaze::types::SimulationConfig;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Spaze".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Insert resources before plugins that depend on them
        .insert_resource(SimulationConfig::default())
        // Add simulation plugins
        .add_plugins((TimePlugin, PhysicsPlugin, SessionPlugin, SelectionPlugin, PredictionPlugin))
        .add_plugins((InputPlugin, CameraPlugin, RenderPlugin))
        .run();
}
