//! Welding of equivalent vertex slots and removal of the duplicate triangles it leaves behind

use crate::corners::{corner_sets_equivalent, extract_corners, snap_uvs};
use crate::tolerance::Tolerances;
use std::collections::HashSet;
use tracing::debug;
use vertexanim_core::{AnimatedMesh, Point3f};

fn tracks_equivalent(a: &[Point3f], b: &[Point3f], position_units: f32) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let tolerance_sq = if position_units <= 0.0 {
        0.0
    } else {
        position_units * position_units
    };
    a.iter()
        .zip(b)
        .all(|(pa, pb)| (pa - pb).norm_squared() <= tolerance_sq)
}

/// Merge vertex slots whose whole animation track and corner attributes match.
///
/// The first slot of each group is kept verbatim as the exemplar; later slots
/// are redirected to it. Returns `true` if the slot count shrank.
pub fn weld_vertices(mesh: &mut AnimatedMesh, tolerances: &Tolerances, uv_snap_grid: f32) -> bool {
    if mesh.frame_vertex_count == 0 || mesh.anim_frame_count == 0 {
        return false;
    }

    let original_count = mesh.frame_vertex_count;
    let tracks: Vec<Vec<Point3f>> = (0..original_count).map(|v| mesh.track(v)).collect();
    let mut corners = extract_corners(mesh);
    snap_uvs(&mut corners, uv_snap_grid);

    // Slot index of each canonical exemplar, in creation order.
    let mut canonical: Vec<usize> = Vec::new();
    let mut remap = vec![0usize; original_count];

    for v in 0..original_count {
        let existing = canonical.iter().position(|&c| {
            tracks_equivalent(&tracks[v], &tracks[c], tolerances.position_units)
                && corner_sets_equivalent(&corners[v], &corners[c], tolerances)
        });
        remap[v] = existing.unwrap_or_else(|| {
            canonical.push(v);
            canonical.len() - 1
        });
    }

    let new_count = canonical.len();
    if new_count == original_count {
        return false;
    }

    let mut positions = Vec::with_capacity(new_count * mesh.anim_frame_count);
    for frame in 0..mesh.anim_frame_count {
        positions.extend(
            canonical
                .iter()
                .filter_map(|&slot| tracks[slot].get(frame).copied()),
        );
    }

    for tri in &mut mesh.triangles {
        for vi in &mut tri.vertex_index {
            if let Some(&mapped) = remap.get(*vi) {
                *vi = mapped;
            }
        }
    }

    debug!(
        mesh = %mesh.name,
        from = original_count,
        to = new_count,
        "welded vertex slots"
    );

    mesh.positions = positions;
    mesh.frame_vertex_count = new_count;
    true
}

/// Sort three indices with a fixed compare-and-swap network.
fn sorted_indices(mut v: [usize; 3]) -> [usize; 3] {
    if v[0] > v[1] {
        v.swap(0, 1);
    }
    if v[1] > v[2] {
        v.swap(1, 2);
    }
    if v[0] > v[1] {
        v.swap(0, 1);
    }
    v
}

/// Drop triangles that share vertex set, flags and texture with an earlier one.
///
/// Winding and UVs are not part of the key; the first occurrence wins.
/// Returns `true` if any triangle was removed.
pub fn remove_duplicate_triangles(mesh: &mut AnimatedMesh) -> bool {
    let original_count = mesh.triangles.len();
    if original_count == 0 {
        return false;
    }

    let mut seen: HashSet<([usize; 3], u32, u32)> = HashSet::with_capacity(original_count);
    mesh.triangles.retain(|tri| {
        seen.insert((
            sorted_indices(tri.vertex_index),
            tri.poly_flags,
            tri.texture_index,
        ))
    });

    let removed = original_count - mesh.triangles.len();
    if removed == 0 {
        return false;
    }

    debug!(mesh = %mesh.name, removed, "removed duplicate triangles");
    true
}
