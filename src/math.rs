//! Vector and quaternion helpers for the flight and orbit code.
//!
//! Everything here works on the f64 glam types re-exported by `bevy::math`.
//! Quaternion composition follows the Hamilton product used by glam:
//! `a * b` applied to a vector rotates by `b` first, then by `a`.

use bevy::math::{DMat3, DQuat, DVec3};

/// Canonical forward direction in local space.
pub const FORWARD: DVec3 = DVec3::NEG_Z;

/// Canonical up direction in local space.
pub const UP: DVec3 = DVec3::Y;

/// Canonical right direction in local space.
pub const RIGHT: DVec3 = DVec3::X;

/// Normalize `v`, returning the zero vector when `v` has no length.
#[inline]
pub fn normalize_or_zero(v: DVec3) -> DVec3 {
    let len_sq = v.length_squared();
    if len_sq > 0.0 && len_sq.is_finite() {
        v / len_sq.sqrt()
    } else {
        DVec3::ZERO
    }
}

/// Rotation of `angle` radians around `axis`.
///
/// The axis is normalized first. A degenerate axis yields the identity
/// rotation instead of a NaN quaternion.
#[inline]
pub fn from_axis_angle(axis: DVec3, angle: f64) -> DQuat {
    let axis = normalize_or_zero(axis);
    if axis == DVec3::ZERO {
        return DQuat::IDENTITY;
    }
    DQuat::from_axis_angle(axis, angle)
}

/// Rotation from Euler angles (radians): pitch about X, yaw about Y, roll about Z.
///
/// Applied to a vector as roll(yaw(pitch(v))).
#[inline]
pub fn from_euler(pitch: f64, yaw: f64, roll: f64) -> DQuat {
    DQuat::from_rotation_z(roll) * DQuat::from_rotation_y(yaw) * DQuat::from_rotation_x(pitch)
}

/// Hamilton product `a * b`, renormalized to stay a unit rotation.
#[inline]
pub fn compose(a: DQuat, b: DQuat) -> DQuat {
    (a * b).normalize()
}

/// Spherical interpolation from `a` to `b` with `t` clamped to `[0, 1]`.
#[inline]
pub fn slerp_clamped(a: DQuat, b: DQuat, t: f64) -> DQuat {
    a.slerp(b, t.clamp(0.0, 1.0)).normalize()
}

/// Orthonormal rotation matrix for a unit quaternion.
#[inline]
pub fn rotation_matrix(q: DQuat) -> DMat3 {
    DMat3::from_quat(q)
}

/// Local frame of an oriented object, expressed in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    pub forward: DVec3,
    pub up: DVec3,
    pub right: DVec3,
}

impl Basis {
    /// Transform the canonical forward/up/right vectors by `orientation`.
    pub fn from_orientation(orientation: DQuat) -> Self {
        let m = rotation_matrix(orientation);
        Self {
            forward: m * FORWARD,
            up: m * UP,
            right: m * RIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_normalize_zero_vector_is_zero() {
        assert_eq!(normalize_or_zero(DVec3::ZERO), DVec3::ZERO);
    }

    #[test]
    fn test_normalize_unit_length() {
        let n = normalize_or_zero(DVec3::new(3.0, 4.0, 12.0));
        assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(n.x, 3.0 / 13.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axis_angle_degenerate_axis() {
        assert_eq!(from_axis_angle(DVec3::ZERO, 1.0), DQuat::IDENTITY);
    }

    #[test]
    fn test_axis_angle_unnormalized_axis() {
        let q = from_axis_angle(DVec3::new(0.0, 5.0, 0.0), FRAC_PI_2);
        let v = q * DVec3::X;
        assert_abs_diff_eq!(v.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_euler_yaw_half_turn_faces_positive_z() {
        let basis = Basis::from_orientation(from_euler(0.0, PI, 0.0));
        assert_abs_diff_eq!(basis.forward.z, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis.up.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(basis.right.x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compose_order_matters() {
        let a = from_axis_angle(DVec3::Y, FRAC_PI_2);
        let b = from_axis_angle(DVec3::X, FRAC_PI_2);
        let ab = compose(a, b) * DVec3::Z;
        let ba = compose(b, a) * DVec3::Z;
        // b first: Z -> -Y, then a leaves -Y alone
        assert_abs_diff_eq!(ab.y, -1.0, epsilon = 1e-12);
        assert!((ab - ba).length() > 0.5);
    }

    #[test]
    fn test_slerp_factor_is_clamped() {
        let a = DQuat::IDENTITY;
        let b = from_axis_angle(DVec3::Y, 1.0);
        assert_abs_diff_eq!(slerp_clamped(a, b, 2.0).angle_between(b), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(slerp_clamped(a, b, -1.0).angle_between(a), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let q = from_euler(0.3, -1.2, 2.0);
        let b = Basis::from_orientation(q);
        assert_abs_diff_eq!(b.forward.length(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.forward.dot(b.up), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.up.dot(b.right), 0.0, epsilon = 1e-12);
        // right-handed: right x up = -forward
        let back = b.right.cross(b.up);
        assert_abs_diff_eq!((back + b.forward).length(), 0.0, epsilon = 1e-12);
    }
}
