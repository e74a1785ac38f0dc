//! Gravity acting on the player.
//!
//! The player is a massless test particle: it feels every body, and no
//! body feels it. Bodies do not attract each other here; their motion
//! comes from the circular orbit model.

use bevy::math::DVec3;

use crate::body::{Body, BodyId};

/// Separations below this are skipped to avoid an explosive acceleration.
pub const GRAVITY_EPSILON: f64 = 0.05;

/// Net gravitational acceleration at `point`.
///
/// Sums G m / d² toward each body, skipping bodies closer than
/// [`GRAVITY_EPSILON`].
///
/// # Arguments
/// * `g` - Gravitational constant
/// * `point` - Position of the test particle
/// * `bodies` - Attracting bodies
#[inline]
pub fn net_acceleration<'a>(g: f64, point: DVec3, bodies: impl IntoIterator<Item = &'a Body>) -> DVec3 {
    let mut acc = DVec3::ZERO;

    for body in bodies {
        let delta = body.position() - point;
        let distance = delta.length();
        if distance < GRAVITY_EPSILON {
            continue;
        }
        // delta / distance is the unit direction toward the body
        acc += delta * (g * body.mass() / (distance * distance * distance));
    }

    acc
}

/// Information about the body nearest to a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestBodyInfo {
    pub id: BodyId,
    /// Distance between the point and the body center
    pub distance: f64,
    /// Distance to the surface, negative inside the body
    pub altitude: f64,
}

/// Find the body whose center is nearest to `point`.
pub fn closest_body<'a>(
    point: DVec3,
    bodies: impl IntoIterator<Item = (BodyId, &'a Body)>,
) -> Option<ClosestBodyInfo> {
    let mut closest: Option<ClosestBodyInfo> = None;

    for (id, body) in bodies {
        let distance = point.distance(body.position());
        if closest.is_none_or(|c| distance < c.distance) {
            closest = Some(ClosestBodyInfo {
                id,
                distance,
                altitude: distance - body.radius(),
            });
        }
    }

    closest
}
