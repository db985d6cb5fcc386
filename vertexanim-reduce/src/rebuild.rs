//! Rebuild derived mesh data after reduction

use vertexanim_core::{AnimatedMesh, Bounds, VertexConnectivity};

/// Recompute vertex-to-triangle adjacency from scratch.
pub fn rebuild_connectivity(mesh: &mut AnimatedMesh) {
    if mesh.frame_vertex_count == 0 {
        return;
    }
    mesh.connectivity = VertexConnectivity::build(mesh.frame_vertex_count, &mesh.triangles);
}

/// Recompute per-frame and overall bounds. Meshes without vertices or frames
/// keep their previous bounds.
pub fn rebuild_bounds(mesh: &mut AnimatedMesh) {
    if mesh.is_empty() {
        return;
    }

    mesh.frame_bounds = (0..mesh.anim_frame_count)
        .map(|f| {
            mesh.frame(f)
                .and_then(Bounds::from_points)
                .unwrap_or_default()
        })
        .collect();

    if let Some(bounds) = Bounds::from_points(&mesh.positions) {
        mesh.bounds = bounds;
    }
}
