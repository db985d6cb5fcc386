//! Conversion of relative options into absolute tolerances

use crate::ReductionOptions;
use vertexanim_core::{Aabb, AnimatedMesh};

/// Absolute tolerances for one mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Half the bounding-box diagonal over all frames, never below 1.0
    pub mesh_scale: f32,
    /// Max per-frame distance between welded tracks
    pub position_units: f32,
    /// Max interpolation error for a dropped frame
    pub frame_units: f32,
    /// Max per-axis UV byte difference between matched corners
    pub uv_bytes: u8,
    /// Min dot product between matched face normals; `None` accepts any pair
    pub cos_normal: Option<f32>,
}

impl Tolerances {
    pub fn new(mesh: &AnimatedMesh, options: &ReductionOptions) -> Self {
        let mesh_scale = mesh_scale(mesh);
        Self {
            mesh_scale,
            position_units: options.position_tolerance * mesh_scale,
            frame_units: options.frame_error_tolerance * mesh_scale,
            uv_bytes: uv_tolerance_bytes(options.uv_tolerance),
            cos_normal: cos_normal_tolerance(options.normal_angle_tolerance_deg),
        }
    }
}

/// Half the diagonal of the box around every position, floored to 1.0 so tiny
/// or degenerate meshes still get usable tolerances.
pub fn mesh_scale(mesh: &AnimatedMesh) -> f32 {
    Aabb::from_points(&mesh.positions)
        .map_or(1.0, |aabb| aabb.half_diagonal())
        .max(1.0)
}

fn uv_tolerance_bytes(uv_tolerance: f32) -> u8 {
    (uv_tolerance * 255.0).round().clamp(0.0, 255.0) as u8
}

// A non-positive cosine would accept every pair anyway.
fn cos_normal_tolerance(angle_deg: f32) -> Option<f32> {
    if angle_deg <= 0.0 {
        return None;
    }
    let cos = angle_deg.to_radians().cos();
    (cos > 0.0).then_some(cos)
}
