//! Test utilities for the orbit and flight simulation tests.
//!
//! Provides fixtures for small hand-built systems and assertions for
//! angles and orbital periods.

use bevy::math::DVec3;

use crate::body::{Body, BodyId};
use crate::system::StarSystem;

/// Fixtures for creating test systems and bodies.
pub mod fixtures {
    use super::*;

    /// Root body of exactly `mass` (up to rounding) and `radius`.
    pub fn body_with_mass(mass: f64, radius: f64, g: f64) -> Body {
        let surface_gravity = mass * g / (radius * radius);
        Body::star(radius, surface_gravity, g).expect("valid fixture body")
    }

    /// A lone massive body at `position`.
    pub fn single_mass(mass: f64, radius: f64, position: DVec3, g: f64) -> StarSystem {
        let root = body_with_mass(mass, radius, g).with_position(position);
        StarSystem::new(root).expect("valid fixture system")
    }

    /// Star (r=250, g_s=20), one planet at 500 (r=50, g_s=3) and its moon at 125 (r=15, g_s=1).
    pub fn sun_planet_moon(g: f64) -> StarSystem {
        let mut system = StarSystem::new(Body::star(250.0, 20.0, g).expect("valid star"))
            .expect("valid fixture system");
        let planet = system
            .add(Body::satellite(BodyId::ROOT, 500.0, 50.0, 3.0, g).expect("valid planet"))
            .expect("planet after star");
        system
            .add(Body::satellite(planet, 125.0, 15.0, 1.0, g).expect("valid moon"))
            .expect("moon after planet");
        system
    }
}

/// Assertions and helpers for orbital quantities.
pub mod assertions {
    use std::f64::consts::TAU;

    /// Shortest distance between two angles on the circle.
    pub fn angle_distance(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU);
        d.min(TAU - d)
    }

    /// Circular orbit period: T = 2π √(r³ / (G (M + m)))
    pub fn orbital_period(g: f64, total_mass: f64, orbit_radius: f64) -> f64 {
        TAU * (orbit_radius.powi(3) / (g * total_mass)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_body_with_mass() {
        let body = fixtures::body_with_mass(1000.0, 10.0, 1.0);
        assert_relative_eq!(body.mass(), 1000.0);
    }

    #[test]
    fn test_angle_distance_wraps() {
        let d = assertions::angle_distance(0.01, std::f64::consts::TAU - 0.01);
        assert_relative_eq!(d, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_fixture_is_ordered() {
        let system = fixtures::sun_planet_moon(5.0);
        assert_eq!(system.len(), 3);
        assert_eq!(system.body(BodyId(2)).unwrap().orbit_center(), Some(BodyId(1)));
    }
}
