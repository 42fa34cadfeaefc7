// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::f32::consts::PI;

use crate::math::{deg_to_rad, rad_to_deg, Vec3, EPSILON};

/// Quaternion stored as `(x, y, z, w)` with deterministic float32 rounding.
///
/// * Axis/angle helpers use radians; Euler helpers use degrees to match the
///   conventions of the hosts that feed grab poses.
/// * `q` and `-q` encode the same rotation. Callers that difference successive
///   samples must keep a consistent sign (see [`Quat::dot`]).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// Creates a quaternion from components.
    ///
    /// Callers should provide finite components; use
    /// [`Quat::from_axis_angle`] for axis/angle construction.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the quaternion as an array.
    pub fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// X (vector) component.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y (vector) component.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z (vector) component.
    pub fn z(&self) -> f32 {
        self.data[2]
    }

    /// W (scalar) component.
    pub fn w(&self) -> f32 {
        self.data[3]
    }

    fn vector_part(&self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// Returns the identity quaternion when the axis length is ≤ `EPSILON` to avoid
    /// undefined orientations. No small-angle approximation is applied.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let len_sq = axis.length_squared();
        if len_sq <= EPSILON * EPSILON {
            return Self::identity();
        }
        let norm_axis = axis.scale(1.0 / len_sq.sqrt());
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let scaled = norm_axis.scale(sin_half);
        Self::new(scaled.x(), scaled.y(), scaled.z(), cos_half)
    }

    /// Decomposes the rotation into `(angle, axis)` with the angle in radians.
    ///
    /// The angle lies in `[0, 2π]`; a negative `w` yields an angle above π
    /// rather than flipping the axis. Rotations too close to identity to
    /// define an axis report `Vec3::UNIT_X`.
    pub fn to_axis_angle(&self) -> (f32, Vec3) {
        let q = self.normalize();
        let v = q.vector_part();
        let sin_half = v.length();
        // atan2 keeps small angles that acos(w) rounds to zero in f32.
        let angle = 2.0 * sin_half.atan2(q.w());
        if sin_half < EPSILON {
            return (angle, Vec3::UNIT_X);
        }
        (angle, v.scale(1.0 / sin_half))
    }

    /// Shortest-arc rotation taking direction `from` onto direction `to`.
    ///
    /// Inputs need not be normalized. A degenerate input yields identity;
    /// opposite directions yield a half turn about an axis orthogonal to `from`.
    pub fn from_to_rotation(from: Vec3, to: Vec3) -> Self {
        let f = from.normalize();
        let t = to.normalize();
        if f == Vec3::ZERO || t == Vec3::ZERO {
            return Self::identity();
        }
        let d = f.dot(&t);
        if d <= -1.0 + EPSILON {
            let mut axis = Vec3::UNIT_X.cross(&f);
            if axis.length_squared() <= EPSILON {
                axis = Vec3::UNIT_Y.cross(&f);
            }
            return Self::from_axis_angle(axis, PI);
        }
        let c = f.cross(&t);
        Self::new(c.x(), c.y(), c.z(), 1.0 + d).normalize()
    }

    /// Hamilton product of two quaternions (`self * other`).
    ///
    /// Applying the product to a vector rotates by `other` first and then by
    /// `self`. Quaternion multiplication is non‑commutative.
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use grasp_core::math::{Quat, Vec3};
    /// let yaw = Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2);
    /// let pitch = Quat::from_axis_angle(Vec3::UNIT_X, FRAC_PI_2);
    /// assert_ne!(yaw.multiply(&pitch).to_array(), pitch.multiply(&yaw).to_array());
    /// ```
    pub fn multiply(&self, other: &Self) -> Self {
        let (ax, ay, az, aw) = (self.x(), self.y(), self.z(), self.w());
        let (bx, by, bz, bw) = (other.x(), other.y(), other.z(), other.w());

        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Four-component dot product.
    ///
    /// A negative result means `other` lies on the opposite hemisphere and
    /// should be negated before interpolating or differencing.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z() + self.w() * other.w()
    }

    /// Negates every component (same rotation, opposite sign).
    pub fn negate(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), -self.w())
    }

    /// Conjugate `(-x, -y, -z, w)`.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), self.w())
    }

    /// Multiplicative inverse; returns identity when the norm is ~0.
    pub fn inverse(&self) -> Self {
        let norm_sq = self.dot(self);
        if norm_sq <= EPSILON * EPSILON {
            return Self::identity();
        }
        let c = self.conjugate();
        let inv = 1.0 / norm_sq;
        Self::new(c.x() * inv, c.y() * inv, c.z() * inv, c.w() * inv)
    }

    /// Normalises the quaternion; returns identity when norm is ~0.
    pub fn normalize(&self) -> Self {
        let len = self.dot(self).sqrt();
        if len <= EPSILON {
            return Self::identity();
        }
        let inv = 1.0 / len;
        Self::new(
            self.x() * inv,
            self.y() * inv,
            self.z() * inv,
            self.w() * inv,
        )
    }

    /// Spherical interpolation from `self` to `other` along the shortest arc.
    ///
    /// `t` is clamped to `[0, 1]`. Nearly parallel inputs fall back to a
    /// normalized linear blend.
    pub fn slerp(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut end = *other;
        let mut cos_theta = self.dot(other);
        if cos_theta < 0.0 {
            end = end.negate();
            cos_theta = -cos_theta;
        }

        let (wa, wb) = if cos_theta > 1.0 - EPSILON {
            (1.0 - t, t)
        } else {
            let theta = cos_theta.acos();
            let sin_theta = theta.sin();
            (
                ((1.0 - t) * theta).sin() / sin_theta,
                (t * theta).sin() / sin_theta,
            )
        };

        Self::new(
            self.x() * wa + end.x() * wb,
            self.y() * wa + end.y() * wb,
            self.z() * wa + end.z() * wb,
            self.w() * wa + end.w() * wb,
        )
        .normalize()
    }

    /// Rotates a vector by this (unit) quaternion.
    pub fn rotate(&self, v: &Vec3) -> Vec3 {
        // v' = v + 2w(u × v) + 2u × (u × v)
        let u = self.vector_part();
        let uv = u.cross(v);
        let uuv = u.cross(&uv);
        v.add(&uv.scale(2.0 * self.w())).add(&uuv.scale(2.0))
    }

    /// Builds a rotation from Euler angles in degrees.
    ///
    /// Rotations apply about Z first, then X, then Y (`q = qy * qx * qz`).
    pub fn from_euler_degrees(euler: Vec3) -> Self {
        let qx = Self::from_axis_angle(Vec3::UNIT_X, deg_to_rad(euler.x()));
        let qy = Self::from_axis_angle(Vec3::UNIT_Y, deg_to_rad(euler.y()));
        let qz = Self::from_axis_angle(Vec3::UNIT_Z, deg_to_rad(euler.z()));
        qy.multiply(&qx).multiply(&qz)
    }

    /// Extracts Euler angles in degrees, each wrapped to `[0, 360)`.
    ///
    /// Inverse of [`Quat::from_euler_degrees`]. At gimbal lock (pitch of ±90°)
    /// the Z angle is reported as zero and the whole yaw folds into Y.
    pub fn to_euler_degrees(&self) -> Vec3 {
        let q = self.normalize();
        let (x, y, z, w) = (q.x(), q.y(), q.z(), q.w());

        let r00 = 1.0 - 2.0 * (y * y + z * z);
        let r02 = 2.0 * (x * z + w * y);
        let r10 = 2.0 * (x * y + w * z);
        let r11 = 1.0 - 2.0 * (x * x + z * z);
        let r12 = 2.0 * (y * z - w * x);
        let r20 = 2.0 * (x * z - w * y);
        let r22 = 1.0 - 2.0 * (x * x + y * y);

        let sin_pitch = (-r12).clamp(-1.0, 1.0);
        let pitch = sin_pitch.asin();
        let (yaw, roll) = if sin_pitch.abs() < 1.0 - EPSILON {
            (r02.atan2(r22), r10.atan2(r11))
        } else {
            ((-r20).atan2(r00), 0.0)
        };

        let wrap = |rad: f32| {
            // rem_euclid can round tiny negatives up to exactly 360.
            let deg = rad_to_deg(rad).rem_euclid(360.0);
            if deg >= 360.0 {
                0.0
            } else {
                deg
            }
        };
        Vec3::new(wrap(pitch), wrap(yaw), wrap(roll))
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

/// Converts a 4‑element `[f32; 4]` array `(x, y, z, w)` into a `Quat`.
/// The components are taken verbatim; normalization is not enforced.
impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}

impl From<Quat> for [f32; 4] {
    fn from(value: Quat) -> Self {
        value.data
    }
}
