//! Before/after statistics for one reduction call

use std::fmt;
use vertexanim_core::AnimatedMesh;

/// Result summary of reducing one mesh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReductionStats {
    pub mesh_name: String,
    pub original_vertices: usize,
    pub reduced_vertices: usize,
    pub original_triangles: usize,
    pub reduced_triangles: usize,
    pub original_frames: usize,
    pub reduced_frames: usize,
    pub original_bytes: usize,
    pub reduced_bytes: usize,
    pub changed: bool,
}

impl ReductionStats {
    /// Snapshot of `mesh` before any reduction; the reduced side starts equal.
    pub fn capture(mesh: &AnimatedMesh) -> Self {
        let bytes = mesh.estimated_storage_bytes();
        Self {
            mesh_name: mesh.name.clone(),
            original_vertices: mesh.frame_vertex_count,
            reduced_vertices: mesh.frame_vertex_count,
            original_triangles: mesh.triangles.len(),
            reduced_triangles: mesh.triangles.len(),
            original_frames: mesh.anim_frame_count,
            reduced_frames: mesh.anim_frame_count,
            original_bytes: bytes,
            reduced_bytes: bytes,
            changed: false,
        }
    }

    /// Record the state of `mesh` after reduction.
    pub fn finish(&mut self, mesh: &AnimatedMesh, changed: bool) {
        self.reduced_vertices = mesh.frame_vertex_count;
        self.reduced_triangles = mesh.triangles.len();
        self.reduced_frames = mesh.anim_frame_count;
        self.reduced_bytes = mesh.estimated_storage_bytes();
        self.changed = changed;
    }

    pub fn bytes_saved(&self) -> usize {
        self.original_bytes.saturating_sub(self.reduced_bytes)
    }

    /// Reduced / original vertex count (1.0 for an empty mesh)
    pub fn vertex_reduction_ratio(&self) -> f64 {
        ratio(self.reduced_vertices, self.original_vertices)
    }

    /// Reduced / original frame count (1.0 for an empty mesh)
    pub fn frame_reduction_ratio(&self) -> f64 {
        ratio(self.reduced_frames, self.original_frames)
    }
}

fn ratio(reduced: usize, original: usize) -> f64 {
    if original == 0 {
        1.0
    } else {
        reduced as f64 / original as f64
    }
}

impl fmt::Display for ReductionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.changed {
            write!(
                f,
                "{}: REDUCED {} -> {} verts, {} -> {} tris, {} -> {} frames ({} -> {} bytes)",
                self.mesh_name,
                self.original_vertices,
                self.reduced_vertices,
                self.original_triangles,
                self.reduced_triangles,
                self.original_frames,
                self.reduced_frames,
                self.original_bytes,
                self.reduced_bytes
            )
        } else {
            write!(
                f,
                "{}: {} verts, {} tris, {} frames ({} bytes) - no reduction needed",
                self.mesh_name,
                self.original_vertices,
                self.original_triangles,
                self.original_frames,
                self.original_bytes
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReductionStats {
        ReductionStats {
            mesh_name: "Soldier".to_string(),
            original_vertices: 100,
            reduced_vertices: 80,
            original_triangles: 150,
            reduced_triangles: 148,
            original_frames: 40,
            reduced_frames: 10,
            original_bytes: 19_000,
            reduced_bytes: 6_160,
            changed: true,
        }
    }

    #[test]
    fn test_ratios() {
        let stats = sample();
        assert!((stats.vertex_reduction_ratio() - 0.8).abs() < 1e-9);
        assert!((stats.frame_reduction_ratio() - 0.25).abs() < 1e-9);
        assert_eq!(stats.bytes_saved(), 12_840);
        assert_eq!(ReductionStats::default().frame_reduction_ratio(), 1.0);
    }

    #[test]
    fn test_display_reduced() {
        let display = format!("{}", sample());
        assert_eq!(
            display,
            "Soldier: REDUCED 100 -> 80 verts, 150 -> 148 tris, 40 -> 10 frames (19000 -> 6160 bytes)"
        );
    }

    #[test]
    fn test_display_unchanged() {
        let mut stats = sample();
        stats.changed = false;
        let display = format!("{stats}");
        assert!(display.ends_with("no reduction needed"));
        assert!(display.contains("100 verts"));
    }
}
