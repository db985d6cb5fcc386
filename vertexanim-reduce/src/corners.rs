//! Per-slot face-corner attributes used to decide whether two slots can be welded

use crate::tolerance::Tolerances;
use vertexanim_core::{AnimatedMesh, Point3f, UvCoord, Vector3f};

const DEGENERATE_NORMAL_EPSILON: f32 = 1e-8;

/// Attributes one triangle corner contributes to its vertex slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerAttributes {
    pub texture_index: u32,
    pub poly_flags: u32,
    pub uv: UvCoord,
    /// Unit face normal from frame 0, or zero for degenerate triangles
    pub normal: Vector3f,
}

/// Collect the corners of every triangle, grouped by the slot they reference.
///
/// Each slot's list is in triangle order. Corners pointing outside
/// `0..frame_vertex_count` are skipped.
pub fn extract_corners(mesh: &AnimatedMesh) -> Vec<Vec<CornerAttributes>> {
    let mut corners = vec![Vec::new(); mesh.frame_vertex_count];

    for tri in &mesh.triangles {
        let p = tri
            .vertex_index
            .map(|vi| mesh.position(0, vi).copied().unwrap_or_else(Point3f::origin));
        let normal = face_normal(&p[0], &p[1], &p[2]);

        for (corner, &vi) in tri.vertex_index.iter().enumerate() {
            if let Some(list) = corners.get_mut(vi) {
                list.push(CornerAttributes {
                    texture_index: tri.texture_index,
                    poly_flags: tri.poly_flags,
                    uv: tri.uv[corner],
                    normal,
                });
            }
        }
    }

    corners
}

fn face_normal(v0: &Point3f, v1: &Point3f, v2: &Point3f) -> Vector3f {
    let n = (v1 - v0).cross(&(v2 - v0));
    let len_sq = n.norm_squared();
    if len_sq > DEGENERATE_NORMAL_EPSILON {
        n / len_sq.sqrt()
    } else {
        Vector3f::zeros()
    }
}

/// Quantize corner UVs to multiples of `grid`. A non-positive grid leaves them untouched.
pub fn snap_uvs(corners: &mut [Vec<CornerAttributes>], grid: f32) {
    if grid <= 0.0 {
        return;
    }

    for corner in corners.iter_mut().flatten() {
        corner.uv.u = snap_byte(corner.uv.u, grid);
        corner.uv.v = snap_byte(corner.uv.v, grid);
    }
}

fn snap_byte(value: u8, grid: f32) -> u8 {
    let snapped = (UvCoord::byte_to_unit(value) / grid).round() * grid;
    UvCoord::unit_to_byte(snapped)
}

fn corners_match(a: &CornerAttributes, b: &CornerAttributes, tolerances: &Tolerances) -> bool {
    if a.texture_index != b.texture_index || a.poly_flags != b.poly_flags {
        return false;
    }
    if a.uv.u.abs_diff(b.uv.u) > tolerances.uv_bytes || a.uv.v.abs_diff(b.uv.v) > tolerances.uv_bytes {
        return false;
    }
    match tolerances.cos_normal {
        Some(cos) => a.normal.dot(&b.normal) >= cos,
        None => true,
    }
}

/// Greedy first-fit pairing of two corner lists.
///
/// Each corner of `a`, in order, claims the first unclaimed compatible corner
/// of `b`. This can reject lists that another pairing order would accept.
pub fn corner_sets_equivalent(
    a: &[CornerAttributes],
    b: &[CornerAttributes],
    tolerances: &Tolerances,
) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut used = vec![false; b.len()];
    for corner in a {
        let found = b
            .iter()
            .zip(used.iter())
            .position(|(candidate, &taken)| !taken && corners_match(corner, candidate, tolerances));
        match found {
            Some(j) => used[j] = true,
            None => return false,
        }
    }
    true
}
