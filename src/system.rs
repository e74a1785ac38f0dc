//! The star system: a flat, topologically ordered list of bodies.
//!
//! Bodies are stored in insertion order with the star at index 0. Every
//! satellite's center must already be in the list when it is added, so a
//! single front-to-back pass updates centers before their satellites.

use bevy::math::{DMat4, DQuat, DVec3};
use bevy::prelude::Resource;
use rand::Rng;
use std::f64::consts::TAU;

use crate::body::{Body, BodyId, Orbit};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HierarchyError {
    #[error("the first body of a system must be a root, got a satellite of {center}")]
    RootIsSatellite { center: BodyId },

    #[error("a system has exactly one root body")]
    SecondRoot,

    #[error("orbit center {center} is not in the system yet ({len} bodies present)")]
    ForwardReference { center: BodyId, len: usize },

    #[error("unknown body {0}")]
    UnknownBody(BodyId),
}

/// Teleport trigger volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wormhole {
    pub position: DVec3,
    /// Activation radius
    pub radius: f64,
}

impl Wormhole {
    pub fn new(position: DVec3, radius: f64) -> Self {
        Self { position, radius }
    }

    /// Whether `point` is strictly inside the activation sphere.
    pub fn contains(&self, point: DVec3) -> bool {
        point.distance_squared(self.position) < self.radius * self.radius
    }

    /// Render transform: unit sphere scaled to the activation radius.
    pub fn transform(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(DVec3::splat(self.radius), DQuat::IDENTITY, self.position)
    }
}

/// A star with its planets and moons.
#[derive(Resource, Clone, Debug)]
pub struct StarSystem {
    bodies: Vec<Body>,
    wormhole: Option<Wormhole>,
}

impl StarSystem {
    /// Start a system from its root body.
    pub fn new(root: Body) -> Result<Self, HierarchyError> {
        if let Orbit::Around(link) = root.orbit() {
            return Err(HierarchyError::RootIsSatellite { center: link.center() });
        }
        Ok(Self {
            bodies: vec![root],
            wormhole: None,
        })
    }

    pub fn with_wormhole(mut self, wormhole: Wormhole) -> Self {
        self.wormhole = Some(wormhole);
        self
    }

    /// Append a satellite.
    ///
    /// Its center must already be present: planets before their moons,
    /// moons before moons of moons.
    pub fn add(&mut self, body: Body) -> Result<BodyId, HierarchyError> {
        match body.orbit() {
            Orbit::Root => return Err(HierarchyError::SecondRoot),
            Orbit::Around(link) => {
                if link.center().index() >= self.bodies.len() {
                    return Err(HierarchyError::ForwardReference {
                        center: link.center(),
                        len: self.bodies.len(),
                    });
                }
            }
        }
        let id = BodyId(self.bodies.len());
        self.bodies.push(body);
        Ok(id)
    }

    /// Advance every orbit by `dt` and refresh transforms, centers first.
    pub fn update(&mut self, g: f64, dt: f64) {
        for i in 0..self.bodies.len() {
            let center = self.bodies[i]
                .orbit_center()
                .map(|c| self.bodies[c.index()].kinematics());
            let body = &mut self.bodies[i];
            body.advance_orbit(center, g, dt);
            body.compute_transform();
        }
    }

    /// All bodies, star first.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Every body except the star.
    pub fn planets(&self) -> impl Iterator<Item = &Body> + Clone {
        self.bodies[1..].iter()
    }

    /// Bodies paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> + Clone {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i), b))
    }

    pub fn root(&self) -> &Body {
        &self.bodies[0]
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Checked lookup that reports unknown ids as an error.
    pub fn try_body(&self, id: BodyId) -> Result<&Body, HierarchyError> {
        self.body(id).ok_or(HierarchyError::UnknownBody(id))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false: a system holds at least its star.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn wormhole(&self) -> Option<&Wormhole> {
        self.wormhole.as_ref()
    }

    /// Independent copy for look-ahead simulation.
    ///
    /// Ids stay valid in the copy. Appearance payload is shared, all
    /// numeric state is duplicated.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// First body whose surface contains `point` (`distance² <= radius²`).
    pub fn colliding_body(&self, point: DVec3) -> Option<BodyId> {
        self.iter()
            .find(|(_, body)| point.distance_squared(body.position()) <= body.radius() * body.radius())
            .map(|(id, _)| id)
    }

    pub fn set_orbit_angle(&mut self, id: BodyId, angle: f64) -> Result<(), HierarchyError> {
        self.bodies
            .get_mut(id.index())
            .ok_or(HierarchyError::UnknownBody(id))?
            .set_orbit_angle(angle);
        Ok(())
    }

    /// Give every satellite a uniformly random orbit phase.
    pub fn randomize_orbit_phases<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for body in self.bodies.iter_mut().skip(1) {
            body.set_orbit_angle(rng.gen_range(0.0..TAU));
        }
    }

    pub fn mark_scanned(&mut self, id: BodyId) -> Result<(), HierarchyError> {
        self.bodies
            .get_mut(id.index())
            .ok_or(HierarchyError::UnknownBody(id))?
            .mark_scanned();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const G: f64 = 5.0;

    #[test]
    fn test_root_must_not_orbit() {
        let planet = Body::satellite(BodyId::ROOT, 500.0, 50.0, 3.0, G).unwrap();
        assert!(matches!(
            StarSystem::new(planet),
            Err(HierarchyError::RootIsSatellite { .. })
        ));
    }

    #[test]
    fn test_second_root_rejected() {
        let mut system = StarSystem::new(Body::star(250.0, 20.0, G).unwrap()).unwrap();
        let err = system.add(Body::star(10.0, 1.0, G).unwrap()).unwrap_err();
        assert_eq!(err, HierarchyError::SecondRoot);
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn test_forward_reference_rejected() {
        let mut system = StarSystem::new(Body::star(250.0, 20.0, G).unwrap()).unwrap();
        let moon = Body::satellite(BodyId(1), 125.0, 15.0, 1.0, G).unwrap();
        let err = system.add(moon).unwrap_err();
        assert_eq!(err, HierarchyError::ForwardReference { center: BodyId(1), len: 1 });
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn test_add_returns_sequential_ids() {
        let mut system = StarSystem::new(Body::star(250.0, 20.0, G).unwrap()).unwrap();
        let planet = system
            .add(Body::satellite(BodyId::ROOT, 500.0, 50.0, 3.0, G).unwrap())
            .unwrap();
        let moon = system.add(Body::satellite(planet, 125.0, 15.0, 1.0, G).unwrap()).unwrap();
        assert_eq!(planet, BodyId(1));
        assert_eq!(moon, BodyId(2));
    }

    #[test]
    fn test_planets_skips_star_and_is_restartable() {
        let system = fixtures::sun_planet_moon(G);
        let first: Vec<f64> = system.planets().map(Body::radius).collect();
        let second: Vec<f64> = system.planets().map(Body::radius).collect();
        assert_eq!(first.len(), system.len() - 1);
        assert_eq!(first, second);
        assert!(system.planets().all(|b| b.orbit_center().is_some()));
    }

    #[test]
    fn test_update_moves_moon_with_planet() {
        let mut system = fixtures::sun_planet_moon(G);
        system.update(G, 1.0);

        let planet = system.body(BodyId(1)).unwrap();
        let moon = system.body(BodyId(2)).unwrap();
        let offset = moon.position() - planet.position();
        assert_abs_diff_eq!(offset.length(), moon.orbit_radius(), epsilon = 1e-9);

        // moon velocity relative to its planet is purely tangential
        let rel_vel = moon.velocity() - planet.velocity();
        assert_abs_diff_eq!(rel_vel.dot(offset), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_colliding_body_uses_inclusive_radius() {
        let mut system = fixtures::sun_planet_moon(G);
        system.update(G, 0.0);
        let star_radius = system.root().radius();
        assert_eq!(system.colliding_body(DVec3::new(star_radius, 0.0, 0.0)), Some(BodyId::ROOT));
        assert_eq!(system.colliding_body(DVec3::new(0.0, star_radius + 1.0, 0.0)), None);
    }

    #[test]
    fn test_wormhole_contains_is_strict() {
        let wormhole = Wormhole::new(DVec3::new(100.0, 0.0, 0.0), 10.0);
        assert!(wormhole.contains(DVec3::new(105.0, 0.0, 0.0)));
        assert!(!wormhole.contains(DVec3::new(110.0, 0.0, 0.0)));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut live = fixtures::sun_planet_moon(G);
        live.update(G, 0.0);
        let before = live.body(BodyId(2)).unwrap().position();

        let mut copy = live.snapshot();
        copy.update(G, 10.0);

        assert_eq!(live.body(BodyId(2)).unwrap().position(), before);
        assert_ne!(copy.body(BodyId(2)).unwrap().position(), before);
        assert!(std::sync::Arc::ptr_eq(
            live.body(BodyId(1)).unwrap().appearance_handle(),
            copy.body(BodyId(1)).unwrap().appearance_handle(),
        ));
    }

    #[test]
    fn test_randomize_orbit_phases_leaves_star() {
        let mut system = fixtures::sun_planet_moon(G);
        let mut rng = StdRng::seed_from_u64(7);
        system.randomize_orbit_phases(&mut rng);
        assert_eq!(system.root().orbit_angle(), 0.0);
        assert!(system.planets().all(|b| (0.0..TAU).contains(&b.orbit_angle())));
    }

    #[test]
    fn test_unknown_body_lookups() {
        let mut system = fixtures::sun_planet_moon(G);
        assert_eq!(system.try_body(BodyId(99)).unwrap_err(), HierarchyError::UnknownBody(BodyId(99)));
        assert!(system.mark_scanned(BodyId(99)).is_err());
        system.mark_scanned(BodyId(1)).unwrap();
        assert!(system.body(BodyId(1)).unwrap().is_scanned());
    }
}
