//! Gizmo overlays: forecast path, orbit rings and the selection marker.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::prediction::{Forecast, MapOverlay, trajectory_color};
use crate::selection::SelectedBody;
use crate::system::StarSystem;

/// Plugin providing gizmo overlays.
pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                (draw_forecast, draw_orbit_rings).run_if(map_open),
                draw_selection,
            )
                .run_if(resource_exists::<StarSystem>),
        );
    }
}

fn map_open(map: Option<Res<MapOverlay>>) -> bool {
    map.is_some_and(|m| m.enabled)
}

/// Rotation taking the gizmo circle plane (XY) onto the orbital plane (XZ).
fn orbital_plane() -> Quat {
    Quat::from_rotation_x(FRAC_PI_2)
}

/// Draw the forecast as a fading polyline, with a marker at a predicted impact.
fn draw_forecast(forecast: Option<Res<Forecast>>, mut gizmos: Gizmos) {
    let Some(forecast) = forecast else {
        return;
    };
    if forecast.points.len() < 2 {
        return;
    }

    let total = forecast.points.len();
    gizmos.linestrip_gradient(forecast.points.iter().enumerate().map(|(i, p)| {
        let t = i as f32 / total as f32;
        (p.as_vec3(), trajectory_color(t, forecast.collided))
    }));

    if forecast.collided
        && let Some(last) = forecast.points.last()
    {
        gizmos.sphere(Isometry3d::from_translation(last.as_vec3()), 10.0, Color::srgb(1.0, 0.1, 0.1));
    }
}

/// Draw each orbit around its current center.
fn draw_orbit_rings(system: Res<StarSystem>, mut gizmos: Gizmos) {
    for body in system.planets() {
        let Some(center) = body.orbit_center().and_then(|id| system.body(id)) else {
            continue;
        };
        gizmos
            .circle(
                Isometry3d::new(center.position().as_vec3(), orbital_plane()),
                body.orbit_radius() as f32,
                Color::srgba(0.6, 0.6, 0.6, 0.3),
            )
            .resolution(128);
    }

    if let Some(wormhole) = system.wormhole() {
        gizmos.sphere(
            Isometry3d::from_translation(wormhole.position.as_vec3()),
            wormhole.radius as f32,
            Color::srgb(0.6, 0.3, 1.0),
        );
    }
}

/// Bracket the selected body.
fn draw_selection(system: Res<StarSystem>, selected: Option<Res<SelectedBody>>, mut gizmos: Gizmos) {
    let Some(body) = selected
        .and_then(|s| s.body)
        .and_then(|id| system.body(id))
    else {
        return;
    };
    gizmos.sphere(
        Isometry3d::from_translation(body.position().as_vec3()),
        body.radius() as f32 * 1.15,
        Color::srgba(1.0, 1.0, 1.0, 0.5),
    );
}
