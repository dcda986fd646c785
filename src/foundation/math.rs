//! Matrix helpers over `glam::DMat4`.
//!
//! Matrices act on column vectors. A cumulative transform `top` maps local geometry with
//! `top * p`, and a new operation `m` folds into it as `top * m`, so it acts in the current
//! local frame.

use glam::{DMat4, DVec3};

/// Rotation axis selector for `rotate`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Rotate about +X.
    X,
    /// Rotate about +Y.
    Y,
    /// Rotate about +Z.
    #[default]
    Z,
}

impl Axis {
    /// Parse an axis tag (`x`, `y`, `z`, case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            _ => None,
        }
    }
}

/// The identity transform.
pub fn identity() -> DMat4 {
    DMat4::IDENTITY
}

/// Translation by `offset`.
pub fn translation(offset: DVec3) -> DMat4 {
    DMat4::from_translation(offset)
}

/// Non-uniform scale by `factors`.
pub fn scale(factors: DVec3) -> DMat4 {
    DMat4::from_scale(factors)
}

/// Right-handed rotation of `radians` about `axis`.
pub fn rotation(axis: Axis, radians: f64) -> DMat4 {
    match axis {
        Axis::X => DMat4::from_rotation_x(radians),
        Axis::Y => DMat4::from_rotation_y(radians),
        Axis::Z => DMat4::from_rotation_z(radians),
    }
}

/// Matrix product `a * b` (`b` is applied first).
pub fn multiply(a: &DMat4, b: &DMat4) -> DMat4 {
    *a * *b
}

/// Round and clamp a light intensity into an 8-bit channel.
pub(crate) fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}
