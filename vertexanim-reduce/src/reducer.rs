//! Reduction pipeline: tolerances, welding, motion profiling, decimation

use crate::keyframes::decimate_keyframes;
use crate::motion::{per_vertex_tolerance_sq, vertex_motion};
use crate::rebuild::{rebuild_bounds, rebuild_connectivity};
use crate::tolerance::Tolerances;
use crate::weld::{remove_duplicate_triangles, weld_vertices};
use crate::{MeshReducer, ReductionOptions, ReductionStats};
use tracing::{debug, info, warn};
use vertexanim_core::{AnimatedMesh, Result};

/// Vertex welding plus keyframe decimation.
///
/// Welding runs first so motion is profiled on the reduced vertex set.
/// Each stage can be switched off independently of the options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeReducer {
    pub options: ReductionOptions,
    /// Merge equivalent vertex slots
    pub weld_vertices: bool,
    /// Drop triangles made identical by welding
    pub remove_duplicate_triangles: bool,
}

impl Default for KeyframeReducer {
    fn default() -> Self {
        Self::new(ReductionOptions::default())
    }
}

impl KeyframeReducer {
    pub fn new(options: ReductionOptions) -> Self {
        Self {
            options,
            weld_vertices: true,
            remove_duplicate_triangles: true,
        }
    }

    /// Only decimate keyframes; vertices and triangles are left as they are.
    pub fn frames_only(options: ReductionOptions) -> Self {
        Self {
            options,
            weld_vertices: false,
            remove_duplicate_triangles: false,
        }
    }
}

impl MeshReducer for KeyframeReducer {
    fn reduce_mesh(&self, mesh: &mut AnimatedMesh) -> Result<ReductionStats> {
        self.options.validate()?;
        mesh.check_position_count()?;

        let mut stats = ReductionStats::capture(mesh);
        if mesh.is_empty() {
            stats.finish(mesh, false);
            return Ok(stats);
        }

        let tolerances = Tolerances::new(mesh, &self.options);
        debug!(mesh = %mesh.name, ?tolerances, "normalized tolerances");

        let welded =
            self.weld_vertices && weld_vertices(mesh, &tolerances, self.options.uv_snap_grid);
        let deduped = self.remove_duplicate_triangles && remove_duplicate_triangles(mesh);

        let per_vertex_sq = if self.options.motion_error_scale > 0.0 {
            per_vertex_tolerance_sq(
                &vertex_motion(mesh),
                tolerances.frame_units,
                self.options.motion_error_scale,
            )
        } else {
            None
        };
        let decimated = decimate_keyframes(mesh, tolerances.frame_units, per_vertex_sq.as_deref());

        if welded || deduped {
            rebuild_connectivity(mesh);
        }
        if welded || decimated {
            rebuild_bounds(mesh);
        }

        stats.finish(mesh, welded || deduped || decimated);
        info!(
            mesh = %stats.mesh_name,
            changed = stats.changed,
            bytes_saved = stats.bytes_saved(),
            "reduced mesh"
        );
        Ok(stats)
    }
}

/// Reduce `mesh` in place.
///
/// Returns whether anything changed, plus statistics. A missing mesh or
/// invalid options or a position array that does not match the declared
/// counts leave everything untouched and return `(false, None)`.
pub fn reduce(
    mesh: Option<&mut AnimatedMesh>,
    options: &ReductionOptions,
) -> (bool, Option<ReductionStats>) {
    let Some(mesh) = mesh else {
        return (false, None);
    };

    match KeyframeReducer::new(*options).reduce_mesh(mesh) {
        Ok(stats) => (stats.changed, Some(stats)),
        Err(e) => {
            warn!(mesh = %mesh.name, "skipping reduction: {e}");
            (false, None)
        }
    }
}
