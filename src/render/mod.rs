//! Rendering systems for the space flight game.
//!
//! This module provides visual representation of bodies, the wormhole,
//! the starfield and the map overlay. It only reads simulation state.

mod background;
pub mod bodies;
mod overlay;

use bevy::prelude::*;

use self::background::BackgroundPlugin;
use self::bodies::BodyMeshPlugin;
use self::overlay::OverlayPlugin;

pub use self::background::STARFIELD_RADIUS;
pub use self::bodies::{BodyVisual, WormholeVisual, body_color};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((BackgroundPlugin, BodyMeshPlugin, OverlayPlugin));
    }
}
