//! Keyframe decimation
//!
//! Frames that linear interpolation between their neighbours reproduces
//! within tolerance are dropped. Each span between two anchor frames
//! (first/last frame, sequence boundaries) is reduced independently with a
//! Douglas-Peucker style search: the worst-approximated frame is kept and the
//! span is split there until every remaining frame is within tolerance.

use tracing::debug;
use vertexanim_core::AnimatedMesh;

const RATE_EPSILON: f32 = 1e-8;
const FALLBACK_RATE: f32 = 30.0;

/// Squared error allowed when a frame is reconstructed by interpolation
#[derive(Debug, Clone, Copy)]
pub struct FrameErrorBudget<'a> {
    pub uniform_sq: f32,
    pub per_vertex_sq: Option<&'a [f32]>,
}

impl FrameErrorBudget<'_> {
    fn allowance(&self, vertex: usize) -> f32 {
        self.per_vertex_sq
            .and_then(|table| table.get(vertex).copied())
            .unwrap_or(self.uniform_sq)
    }

    fn is_disabled(&self) -> bool {
        self.uniform_sq <= 0.0 && self.per_vertex_sq.is_none()
    }
}

/// Frames that must survive: first, last, and every sequence's first and last frame.
///
/// Sorted, deduplicated, and limited to frames the mesh actually stores.
pub fn anchor_frames(mesh: &AnimatedMesh) -> Vec<usize> {
    if mesh.anim_frame_count == 0 {
        return Vec::new();
    }

    let mut anchors = vec![0, mesh.anim_frame_count - 1];
    for seq in &mesh.anim_sequences {
        if let Some(end) = seq.end_frame() {
            anchors.push(seq.start_frame);
            anchors.push(end);
        }
    }
    anchors.retain(|&f| f < mesh.anim_frame_count);
    anchors.sort_unstable();
    anchors.dedup();
    anchors
}

/// Worst interpolation error of `frame` against the `start`..`end` lerp.
///
/// Scanning stops at the first vertex that exceeds its own allowance, so the
/// result can under-count the true worst case. Returns the error together
/// with the allowance of the vertex that produced it.
fn frame_error(
    mesh: &AnimatedMesh,
    start: usize,
    end: usize,
    frame: usize,
    budget: &FrameErrorBudget<'_>,
) -> (f32, f32) {
    let alpha = (frame - start) as f32 / (end - start) as f32;
    let mut worst = 0.0f32;
    let mut worst_allowance = budget.uniform_sq;

    for v in 0..mesh.frame_vertex_count {
        let (Some(a), Some(b), Some(actual)) = (
            mesh.position(start, v),
            mesh.position(end, v),
            mesh.position(frame, v),
        ) else {
            continue;
        };

        let expected = a + (b - a) * alpha;
        let error_sq = (actual - expected).norm_squared();
        let allowance = budget.allowance(v);
        if error_sq > allowance {
            return (error_sq, allowance);
        }
        if error_sq > worst {
            worst = error_sq;
            worst_allowance = allowance;
        }
    }

    (worst, worst_allowance)
}

/// Mark the frames strictly between `start` and `end` that must be kept.
fn reduce_between(
    mesh: &AnimatedMesh,
    start: usize,
    end: usize,
    budget: &FrameErrorBudget<'_>,
    keep: &mut [bool],
) {
    let mut segments = vec![(start, end)];

    while let Some((start, end)) = segments.pop() {
        if end <= start + 1 {
            continue;
        }

        if budget.is_disabled() {
            for flag in keep.iter_mut().take(end).skip(start + 1) {
                *flag = true;
            }
            continue;
        }

        let mut best: Option<(usize, f32)> = None;
        let mut max_error = 0.0f32;
        for frame in start + 1..end {
            let (error, allowance) = frame_error(mesh, start, end, frame, budget);
            if error > max_error {
                max_error = error;
                best = Some((frame, allowance));
            }
        }

        if let Some((frame, allowance)) = best {
            if max_error > allowance {
                if let Some(flag) = keep.get_mut(frame) {
                    *flag = true;
                }
                segments.push((frame, end));
                segments.push((start, frame));
            }
        }
    }
}

/// Drop keyframes that interpolation reproduces within `frame_units`.
///
/// `per_vertex_sq` optionally overrides the squared tolerance per slot.
/// Sequences are remapped onto the surviving frames and their rates rescaled
/// so each keeps its playback duration. Returns `true` if any frame was dropped.
pub fn decimate_keyframes(
    mesh: &mut AnimatedMesh,
    frame_units: f32,
    per_vertex_sq: Option<&[f32]>,
) -> bool {
    if mesh.anim_frame_count <= 2 || mesh.frame_vertex_count == 0 || frame_units <= 0.0 {
        return false;
    }

    let anchors = anchor_frames(mesh);
    if anchors.len() < 2 {
        return false;
    }

    let budget = FrameErrorBudget {
        uniform_sq: frame_units * frame_units,
        per_vertex_sq,
    };

    let mut keep = vec![false; mesh.anim_frame_count];
    for &frame in &anchors {
        keep[frame] = true;
    }
    for pair in anchors.windows(2) {
        reduce_between(mesh, pair[0], pair[1], &budget, &mut keep);
    }

    let mut next = 0;
    let frame_remap: Vec<Option<usize>> = keep
        .iter()
        .map(|&kept| {
            kept.then(|| {
                next += 1;
                next - 1
            })
        })
        .collect();
    let new_frame_count = next;

    if new_frame_count == mesh.anim_frame_count {
        return false;
    }

    let mut positions = Vec::with_capacity(new_frame_count * mesh.frame_vertex_count);
    for (frame, _) in frame_remap.iter().enumerate().filter(|(_, m)| m.is_some()) {
        if let Some(slice) = mesh.frame(frame) {
            positions.extend_from_slice(slice);
        }
    }

    for seq in &mut mesh.anim_sequences {
        if seq.frame_count == 0 {
            continue;
        }

        let old_start = seq.start_frame;
        let old_count = seq.frame_count;
        let old_rate = if seq.rate > RATE_EPSILON {
            seq.rate
        } else {
            FALLBACK_RATE
        };
        let old_duration = old_count as f32 / old_rate;

        let kept = frame_remap
            .iter()
            .skip(old_start)
            .take(old_count)
            .filter(|m| m.is_some())
            .count();

        seq.start_frame = frame_remap.get(old_start).copied().flatten().unwrap_or(0);
        seq.frame_count = kept.max(1);
        if old_duration > RATE_EPSILON {
            seq.rate = seq.frame_count as f32 / old_duration;
        }
    }

    debug!(
        mesh = %mesh.name,
        from = mesh.anim_frame_count,
        to = new_frame_count,
        anchors = anchors.len(),
        "decimated keyframes"
    );

    mesh.positions = positions;
    mesh.anim_frame_count = new_frame_count;
    true
}
