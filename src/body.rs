//! Celestial bodies and circular orbit propagation.
//!
//! A body is either the root of its system (the star) or orbits a center
//! body on a circular path in the center's local XZ plane. The center is
//! referenced by [`BodyId`], an index into the owning
//! [`StarSystem`](crate::system::StarSystem), never by pointer.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;
use std::sync::Arc;

use bevy::math::{DMat4, DQuat, DVec3};

/// Default self-rotation speed (radians per second).
pub const DEFAULT_ROTATION_SPEED: f64 = 0.1;

/// Index of a body inside its system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    /// The root body (star) always sits at index 0.
    pub const ROOT: BodyId = BodyId(0);

    /// Position of this body in the system's body list.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BodyError {
    #[error("invalid body radius: {0} (must be positive and finite)")]
    InvalidRadius(f64),

    #[error("invalid surface gravity: {0} (must be non-negative and finite)")]
    InvalidSurfaceGravity(f64),

    #[error("invalid gravitational constant: {0} (must be positive and finite)")]
    InvalidGravitationalConstant(f64),

    #[error("invalid orbit radius {radius} around body {center} (must be positive and finite)")]
    InvalidOrbitRadius { center: BodyId, radius: f64 },
}

/// Link from a satellite to the body it orbits.
///
/// Can only be built with a positive, finite radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLink {
    center: BodyId,
    radius: f64,
}

impl OrbitLink {
    pub fn new(center: BodyId, radius: f64) -> Result<Self, BodyError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(BodyError::InvalidOrbitRadius { center, radius });
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> BodyId {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Whether a body anchors the system or orbits another body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orbit {
    /// Non-orbiting root of the hierarchy
    Root,
    /// Circular orbit around an earlier body
    Around(OrbitLink),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

/// RGBA color, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Environmental readings revealed by scanning a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Climate {
    /// Oxygen share of the atmosphere (percent, 0..=30)
    pub oxygen: u8,
    /// Surface temperature (°C, -150..=150)
    pub temperature: i32,
    /// Water coverage (percent, 0..=75)
    pub water: u8,
}

impl Climate {
    pub const MAX_OXYGEN: u8 = 30;
    pub const MIN_TEMPERATURE: i32 = -150;
    pub const MAX_TEMPERATURE: i32 = 150;
    pub const MAX_WATER: u8 = 75;

    /// Five surface color layers, from deep water to snow.
    ///
    /// Vegetation fades with oxygen, red scales with temperature and
    /// blue with water coverage.
    pub fn palette(&self) -> [Rgba; 5] {
        let oxygen = f64::from(self.oxygen) / f64::from(Self::MAX_OXYGEN);
        let vegetation = ((1.0 - oxygen) * 255.0).round() as u8;
        let mut layers: [Rgba; 5] = [
            [0, 20, 255, 255],
            [125, 125, 0, 255],
            [vegetation, vegetation, 10, 255],
            [175, 175, 175, 255],
            [255, 255, 255, 255],
        ];

        let heat = f64::from(self.temperature - Self::MIN_TEMPERATURE)
            / f64::from(Self::MAX_TEMPERATURE - Self::MIN_TEMPERATURE);
        let wet = f64::from(self.water) / f64::from(Self::MAX_WATER);
        for layer in &mut layers {
            layer[0] = (heat * f64::from(layer[0])).round() as u8;
            layer[2] = (wet * f64::from(layer[2])).round() as u8;
        }
        layers
    }
}

/// Render and UI payload carried by a body.
///
/// Shared read-only between a live system and its prediction snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct Appearance {
    pub kind: BodyKind,
    /// Seed for the procedural surface texture
    pub texture_seed: u32,
    pub palette: [Rgba; 5],
    /// `None` for stars
    pub climate: Option<Climate>,
}

impl Appearance {
    /// Uniform grey payload used when no generator is involved.
    pub fn plain(kind: BodyKind) -> Self {
        Self {
            kind,
            texture_seed: 0,
            palette: [[160, 160, 160, 255]; 5],
            climate: None,
        }
    }

    pub fn star(texture_seed: u32) -> Self {
        Self {
            kind: BodyKind::Star,
            texture_seed,
            palette: [[255, 200, 80, 255]; 5],
            climate: None,
        }
    }

    pub fn with_climate(kind: BodyKind, texture_seed: u32, climate: Climate) -> Self {
        Self {
            kind,
            texture_seed,
            palette: climate.palette(),
            climate: Some(climate),
        }
    }
}

/// Position, velocity and mass of a body, as read by its satellites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    pub position: DVec3,
    pub velocity: DVec3,
    pub mass: f64,
}

/// Mass giving `surface_gravity` at the surface of a sphere of `radius`.
///
/// m = r² g_s / G
pub fn mass_from_surface_gravity(radius: f64, surface_gravity: f64, g: f64) -> Result<f64, BodyError> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(BodyError::InvalidRadius(radius));
    }
    if !(surface_gravity.is_finite() && surface_gravity >= 0.0) {
        return Err(BodyError::InvalidSurfaceGravity(surface_gravity));
    }
    if !(g.is_finite() && g > 0.0) {
        return Err(BodyError::InvalidGravitationalConstant(g));
    }
    Ok(radius * radius * surface_gravity / g)
}

/// Angular speed of a circular two-body orbit: ω = √(G (M + m) / r³)
#[inline]
pub fn angular_speed(g: f64, total_mass: f64, orbit_radius: f64) -> f64 {
    (g * total_mass / orbit_radius.powi(3)).sqrt()
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// A gravitating body: star, planet or moon.
#[derive(Clone, Debug)]
pub struct Body {
    orbit: Orbit,
    position: DVec3,
    velocity: DVec3,
    orbit_angle: f64,
    mass: f64,
    radius: f64,
    rotation_angle: f64,
    rotation_speed: f64,
    transform: DMat4,
    appearance: Arc<Appearance>,
    scanned: bool,
}

impl Body {
    fn new(orbit: Orbit, radius: f64, surface_gravity: f64, g: f64, kind: BodyKind) -> Result<Self, BodyError> {
        let mass = mass_from_surface_gravity(radius, surface_gravity, g)?;
        Ok(Self {
            orbit,
            position: DVec3::ZERO,
            velocity: DVec3::ZERO,
            orbit_angle: 0.0,
            mass,
            radius,
            rotation_angle: 0.0,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            transform: DMat4::IDENTITY,
            appearance: Arc::new(Appearance::plain(kind)),
            scanned: false,
        })
    }

    /// Create a root body at the origin.
    pub fn star(radius: f64, surface_gravity: f64, g: f64) -> Result<Self, BodyError> {
        Self::new(Orbit::Root, radius, surface_gravity, g, BodyKind::Star)
    }

    /// Create a body orbiting `center` at `orbit_radius`.
    ///
    /// Bodies around the root are planets, anything deeper is a moon.
    pub fn satellite(
        center: BodyId,
        orbit_radius: f64,
        radius: f64,
        surface_gravity: f64,
        g: f64,
    ) -> Result<Self, BodyError> {
        let link = OrbitLink::new(center, orbit_radius)?;
        let kind = if center == BodyId::ROOT {
            BodyKind::Planet
        } else {
            BodyKind::Moon
        };
        Self::new(Orbit::Around(link), radius, surface_gravity, g, kind)
    }

    /// Place a root body somewhere other than the origin.
    ///
    /// Satellites recompute their position on every update, so this only
    /// matters before the first update.
    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_appearance(mut self, appearance: Arc<Appearance>) -> Self {
        self.appearance = appearance;
        self
    }

    pub fn with_rotation_speed(mut self, rotation_speed: f64) -> Self {
        self.rotation_speed = rotation_speed;
        self
    }

    pub fn with_orbit_angle(mut self, angle: f64) -> Self {
        self.orbit_angle = wrap_angle(angle);
        self
    }

    pub fn orbit(&self) -> Orbit {
        self.orbit
    }

    /// Center body, or `None` for the root.
    pub fn orbit_center(&self) -> Option<BodyId> {
        match self.orbit {
            Orbit::Root => None,
            Orbit::Around(link) => Some(link.center),
        }
    }

    /// Orbit radius, 0 for the root.
    pub fn orbit_radius(&self) -> f64 {
        match self.orbit {
            Orbit::Root => 0.0,
            Orbit::Around(link) => link.radius,
        }
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    pub fn set_orbit_angle(&mut self, angle: f64) {
        self.orbit_angle = wrap_angle(angle);
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    /// World transform computed by the last [`Body::compute_transform`].
    pub fn transform(&self) -> DMat4 {
        self.transform
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    /// Shared handle to the appearance payload.
    pub fn appearance_handle(&self) -> &Arc<Appearance> {
        &self.appearance
    }

    pub fn kind(&self) -> BodyKind {
        self.appearance.kind
    }

    pub fn is_scanned(&self) -> bool {
        self.scanned
    }

    pub(crate) fn mark_scanned(&mut self) {
        self.scanned = true;
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: self.position,
            velocity: self.velocity,
            mass: self.mass,
        }
    }

    /// Orbital period around a center of `center_mass`, `None` for the root.
    pub fn orbital_period(&self, center_mass: f64, g: f64) -> Option<f64> {
        match self.orbit {
            Orbit::Root => None,
            Orbit::Around(link) => Some(TAU / angular_speed(g, center_mass + self.mass, link.radius)),
        }
    }

    /// Advance self-rotation and, for satellites, the orbit by `dt`.
    ///
    /// `center` must hold the center's state for this tick, already updated.
    /// It is ignored for the root.
    pub fn advance_orbit(&mut self, center: Option<Kinematics>, g: f64, dt: f64) {
        self.rotation_angle = wrap_angle(self.rotation_angle + self.rotation_speed * dt);

        let (Orbit::Around(link), Some(center)) = (self.orbit, center) else {
            return;
        };

        // Two-body reduced problem: combined mass of center and satellite
        let omega = angular_speed(g, center.mass + self.mass, link.radius);
        self.orbit_angle = wrap_angle(self.orbit_angle + omega * dt);

        let (sin, cos) = self.orbit_angle.sin_cos();
        self.position = center.position + DVec3::new(cos, 0.0, sin) * link.radius;
        self.velocity = center.velocity + DVec3::new(-sin, 0.0, cos) * (omega * link.radius);
    }

    /// Recompute the world transform: scale, then spin, then translate.
    ///
    /// The spin tilts the mesh pole onto world Y and turns it by
    /// `rotation_angle`.
    pub fn compute_transform(&mut self) {
        let spin = DQuat::from_rotation_x(FRAC_PI_2) * DQuat::from_rotation_z(self.rotation_angle);
        self.transform =
            DMat4::from_scale_rotation_translation(DVec3::splat(self.radius), spin, self.position);
    }
}
