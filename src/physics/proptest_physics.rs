//! Property-based tests for the orbit model, the gravity field and
//! orientation smoothing.

use bevy::math::{DQuat, DVec3};
use proptest::prelude::*;

use crate::body::{Body, BodyId, Kinematics, angular_speed};
use crate::math::{from_axis_angle, slerp_clamped};
use crate::physics::gravity::net_acceleration;
use crate::test_utils::{assertions, fixtures};

fn stationary(mass: f64) -> Kinematics {
    Kinematics {
        position: DVec3::ZERO,
        velocity: DVec3::ZERO,
        mass,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Doubling the distance quarters the acceleration.
    #[test]
    fn prop_inverse_square_law(
        distance in 1.0f64..5000.0,
        mass in 1.0f64..1e6,
        dir in (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0),
    ) {
        let dir = DVec3::new(dir.0, dir.1, dir.2);
        prop_assume!(dir.length() > 0.1);
        let dir = dir.normalize();

        let system = fixtures::single_mass(mass, 0.5, DVec3::ZERO, 5.0);
        let near = net_acceleration(5.0, dir * distance, system.bodies());
        let far = net_acceleration(5.0, dir * (2.0 * distance), system.bodies());

        let ratio = near.length() / far.length();
        prop_assert!((ratio - 4.0).abs() < 1e-9, "ratio = {}", ratio);
        // always pulls back toward the body
        prop_assert!(near.dot(dir) < 0.0);
    }

    /// A circular orbit returns to its start after one period.
    #[test]
    fn prop_orbit_periodic(
        orbit_radius in 100.0f64..3000.0,
        start_angle in 0.0f64..std::f64::consts::TAU,
        steps in 500usize..3000,
    ) {
        let g = 5.0;
        let center = stationary(250_000.0);
        let mut planet = Body::satellite(BodyId::ROOT, orbit_radius, 40.0, 3.0, g)
            .unwrap()
            .with_orbit_angle(start_angle);
        planet.advance_orbit(Some(center), g, 0.0);
        let start = planet.position();

        let period = assertions::orbital_period(g, center.mass + planet.mass(), orbit_radius);
        let dt = period / steps as f64;
        for _ in 0..steps {
            planet.advance_orbit(Some(center), g, dt);
        }

        let error = (planet.position() - start).length() / orbit_radius;
        prop_assert!(error < 1e-8, "relative drift {}", error);
    }

    /// Orbital velocity is tangential with magnitude ω r.
    #[test]
    fn prop_orbit_velocity_tangential(
        orbit_radius in 50.0f64..3000.0,
        angle in 0.0f64..std::f64::consts::TAU,
    ) {
        let g = 5.0;
        let center = stationary(10_000.0);
        let mut moon = Body::satellite(BodyId::ROOT, orbit_radius, 10.0, 1.0, g)
            .unwrap()
            .with_orbit_angle(angle);
        moon.advance_orbit(Some(center), g, 0.0);

        let omega = angular_speed(g, center.mass + moon.mass(), orbit_radius);
        let r = moon.position();
        let v = moon.velocity();
        prop_assert!((v.length() - omega * orbit_radius).abs() < 1e-9 * (1.0 + v.length()));
        prop_assert!(r.dot(v).abs() < 1e-9 * r.length() * v.length());
        prop_assert_eq!(r.y, 0.0);
    }

    /// Repeated slerp toward a fixed target closes the gap without overshoot.
    #[test]
    fn prop_slerp_smoothing_converges(
        axis in (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0),
        angle in 0.01f64..3.0,
    ) {
        let axis = DVec3::new(axis.0, axis.1, axis.2);
        prop_assume!(axis.length() > 0.1);

        let target = from_axis_angle(axis, angle);
        let mut orientation = DQuat::IDENTITY;
        let mut gap = orientation.angle_between(target);

        for _ in 0..30 {
            orientation = slerp_clamped(orientation, target, 0.3);
            let next = orientation.angle_between(target);
            prop_assert!(next <= gap + 1e-9, "gap grew from {} to {}", gap, next);
            gap = next;
        }
        prop_assert!(gap < 1e-3, "gap after 30 steps: {}", gap);
    }
}

#[cfg(test)]
mod deterministic_tests {
    use super::*;

    #[test]
    fn test_reference_planet_period() {
        // star r=250 g_s=20 -> M = 250000 with G = 5
        let g = 5.0;
        let planet = Body::satellite(BodyId::ROOT, 500.0, 50.0, 3.0, g).unwrap();
        let period = planet.orbital_period(250_000.0, g).unwrap();
        let expected = assertions::orbital_period(g, 250_000.0 + planet.mass(), 500.0);
        assert!((period - expected).abs() < 1e-9);
    }
}
