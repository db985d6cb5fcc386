//! Per-vertex motion profiling for motion-adaptive frame tolerances

use vertexanim_core::AnimatedMesh;

/// Largest distance each slot moves between two consecutive frames.
///
/// Empty when the mesh has fewer than two frames.
pub fn vertex_motion(mesh: &AnimatedMesh) -> Vec<f32> {
    if mesh.anim_frame_count <= 1 || mesh.frame_vertex_count == 0 {
        return Vec::new();
    }

    let mut motion = vec![0.0f32; mesh.frame_vertex_count];
    for frame in 0..mesh.anim_frame_count - 1 {
        for (v, m) in motion.iter_mut().enumerate() {
            if let (Some(a), Some(b)) = (mesh.position(frame, v), mesh.position(frame + 1, v)) {
                *m = m.max((b - a).norm());
            }
        }
    }
    motion
}

/// Squared frame tolerance per slot: `(frame_units + motion_scale * motion)^2`.
///
/// Slots whose linear tolerance is not positive fall back to `frame_units^2`.
/// Returns `None` when `motion_scale` is not positive or there is no motion data.
pub fn per_vertex_tolerance_sq(
    motion: &[f32],
    frame_units: f32,
    motion_scale: f32,
) -> Option<Vec<f32>> {
    if motion.is_empty() || motion_scale <= 0.0 {
        return None;
    }

    let fallback_sq = frame_units * frame_units;
    Some(
        motion
            .iter()
            .map(|&m| {
                let tolerance = frame_units + motion_scale * m;
                if tolerance > 0.0 {
                    tolerance * tolerance
                } else {
                    fallback_sq
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vertexanim_core::Point3f;

    #[test]
    fn test_vertex_motion_takes_largest_step() {
        let mesh = AnimatedMesh::from_frames(
            "steps",
            vec![
                vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(5.0, 0.0, 0.0)],
                vec![Point3f::new(1.0, 0.0, 0.0), Point3f::new(5.0, 0.0, 0.0)],
                vec![Point3f::new(4.0, 0.0, 0.0), Point3f::new(5.0, 0.0, 0.0)],
                vec![Point3f::new(4.0, 4.0, 0.0), Point3f::new(5.0, 0.0, 0.0)],
            ],
            Vec::new(),
        )
        .unwrap();

        let motion = vertex_motion(&mesh);
        assert_eq!(motion.len(), 2);
        assert_relative_eq!(motion[0], 4.0);
        assert_relative_eq!(motion[1], 0.0);
    }

    #[test]
    fn test_single_frame_has_no_motion() {
        let mesh = AnimatedMesh::from_frames("still", vec![vec![Point3f::origin()]], Vec::new())
            .unwrap();
        assert!(vertex_motion(&mesh).is_empty());
    }

    #[test]
    fn test_per_vertex_tolerance() {
        let table = per_vertex_tolerance_sq(&[0.0, 2.0], 1.0, 0.5).unwrap();
        assert_relative_eq!(table[0], 1.0);
        assert_relative_eq!(table[1], 4.0);
    }

    #[test]
    fn test_per_vertex_tolerance_fallback() {
        let table = per_vertex_tolerance_sq(&[1.0], -3.0, 1.0).unwrap();
        assert_relative_eq!(table[0], 9.0);
    }

    #[test]
    fn test_per_vertex_tolerance_disabled() {
        assert!(per_vertex_tolerance_sq(&[1.0], 1.0, 0.0).is_none());
        assert!(per_vertex_tolerance_sq(&[], 1.0, 1.0).is_none());
    }
}
