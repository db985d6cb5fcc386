//! Point, vector and texture coordinate types

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A texture coordinate stored as a pair of bytes.
///
/// `0` maps to `0.0` and `255` maps to `1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UvCoord {
    pub u: u8,
    pub v: u8,
}

impl UvCoord {
    /// Create a texture coordinate from raw bytes
    pub const fn new(u: u8, v: u8) -> Self {
        Self { u, v }
    }

    /// Convert a byte coordinate to the 0..1 range
    pub fn byte_to_unit(value: u8) -> f32 {
        f32::from(value) / 255.0
    }

    /// Convert a 0..1 coordinate to the nearest byte, clamping out-of-range input
    pub fn unit_to_byte(value: f32) -> u8 {
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    }
}
