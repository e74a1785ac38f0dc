//! Input handling for flight controls and simulation toggles.
//!
//! Keyboard and mouse state is sampled every frame into [`FlightInput`],
//! which the fixed physics tick consumes.
//!
//! | Input | Action |
//! |---|---|
//! | W / S | thrust forward / back |
//! | D / A | strafe right / left |
//! | Space / Left Ctrl | thrust up / down |
//! | E / Q | roll |
//! | Mouse motion | yaw and pitch |
//! | Left click | resume when paused, otherwise select the body under the crosshair |
//! | Escape | pause |
//! | ; | toggle the map overlay |

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::player::{FlightInput, Player};
use crate::prediction::MapOverlay;
use crate::selection::{SelectedBody, pick_body};
use crate::session::SessionState;
use crate::system::StarSystem;
use crate::time::SimulationClock;

/// Plugin providing keyboard and mouse handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .init_resource::<FlightInput>()
            .init_resource::<MapOverlay>()
            .init_resource::<SelectedBody>()
            .add_systems(Update, (keyboard_shortcuts, mouse_clicks, read_flight_controls).chain());
    }
}

/// Thrust and roll axes from the held keys: (forward, strafe, lift, roll).
pub fn flight_axes(keys: &ButtonInput<KeyCode>) -> (f64, f64, f64, f64) {
    (
        FlightInput::axis(keys.pressed(KeyCode::KeyW), keys.pressed(KeyCode::KeyS)),
        FlightInput::axis(keys.pressed(KeyCode::KeyD), keys.pressed(KeyCode::KeyA)),
        FlightInput::axis(keys.pressed(KeyCode::Space), keys.pressed(KeyCode::ControlLeft)),
        FlightInput::axis(keys.pressed(KeyCode::KeyE), keys.pressed(KeyCode::KeyQ)),
    )
}

/// Handle keyboard shortcuts for simulation control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut clock: ResMut<SimulationClock>,
    mut map: ResMut<MapOverlay>,
) {
    // Semicolon: toggle map overlay
    if keys.just_pressed(KeyCode::Semicolon) {
        let open = map.toggle();
        info!("Map overlay {}", if open { "opened" } else { "closed" });
    }

    // Escape: pause
    if keys.just_pressed(KeyCode::Escape) && !clock.paused {
        clock.paused = true;
        info!("Simulation paused");
    }
}

/// Left click resumes a paused game, or toggles the body under the crosshair.
fn mouse_clicks(
    buttons: Res<ButtonInput<MouseButton>>,
    mut clock: ResMut<SimulationClock>,
    mut selected: ResMut<SelectedBody>,
    session: Option<Res<SessionState>>,
    system: Option<Res<StarSystem>>,
    player: Option<Res<Player>>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    if clock.paused {
        // the death screen holds the pause until the session resets
        if session.is_none_or(|s| s.is_flying()) {
            clock.paused = false;
            info!("Simulation running");
        }
        return;
    }

    let (Some(system), Some(player)) = (system, player) else {
        return;
    };
    let hit = pick_body(&system, player.position, player.basis().forward);
    selected.toggle(hit);
    debug!("Selection: {:?}", selected.body);
}

fn read_flight_controls(
    keys: Res<ButtonInput<KeyCode>>,
    motion: Res<AccumulatedMouseMotion>,
    clock: Res<SimulationClock>,
    mut input: ResMut<FlightInput>,
) {
    if clock.paused {
        *input = FlightInput::default();
        return;
    }

    let (forward, strafe, lift, roll) = flight_axes(&keys);
    input.forward = forward;
    input.strafe = strafe;
    input.lift = lift;
    input.roll = roll;
    input.look_delta += motion.delta.as_dvec2();
}
