//! Integration tests for vertexanim-reduce
//!
//! These tests run the whole pipeline through the public entry points and
//! check the properties every reduction must keep.

use approx::assert_relative_eq;
use vertexanim_core::{AnimSequence, AnimatedMesh, MeshTriangle, Point3f, UvCoord};
use vertexanim_reduce::*;

/// Small deterministic generator so the tests need no RNG crate
struct Lcg(u64);

impl Lcg {
    fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / (1u64 << 24) as f32
    }
}

/// A strip of quads whose vertices wave along z, with repeated seam slots.
fn waving_strip(quads: usize, frames: usize, seed: u64) -> AnimatedMesh {
    let mut rng = Lcg(seed);
    let phases: Vec<f32> = (0..=quads).map(|_| rng.next_f32() * 6.0).collect();

    let frame_positions = (0..frames)
        .map(|f| {
            let t = f as f32 * 0.3;
            let mut frame = Vec::new();
            for (i, phase) in phases.iter().enumerate() {
                let z = (t + phase).sin();
                frame.push(Point3f::new(i as f32, 0.0, z));
                frame.push(Point3f::new(i as f32, 1.0, z));
            }
            // Seam copies of the first column.
            frame.push(frame[0]);
            frame.push(frame[1]);
            frame
        })
        .collect();

    let mut triangles = Vec::new();
    for i in 0..quads {
        let a = 2 * i;
        triangles.push(MeshTriangle::new([a, a + 2, a + 1], 0, 0));
        triangles.push(MeshTriangle::new([a + 1, a + 2, a + 3], 0, 0));
    }
    let seam = 2 * (quads + 1);
    triangles.push(MeshTriangle::new([seam, 2, seam + 1], 0, 0));

    AnimatedMesh::from_frames("strip", frame_positions, triangles)
        .unwrap()
        .with_sequence(AnimSequence::new("wave", 0, frames / 2, 20.0))
        .with_sequence(AnimSequence::new("settle", frames / 2, frames - frames / 2, 10.0))
}

/// Ten frames of a triangle sliding linearly from x=0 to x=9.
fn linear_slide() -> AnimatedMesh {
    AnimatedMesh::from_frames(
        "slide",
        (0..10)
            .map(|f| {
                let x = f as f32;
                vec![
                    Point3f::new(x, 0.0, 0.0),
                    Point3f::new(x + 1.0, 0.0, 0.0),
                    Point3f::new(x, 1.0, 0.0),
                ]
            })
            .collect(),
        vec![MeshTriangle::new([0, 1, 2], 0, 0)],
    )
    .unwrap()
    .with_sequence(AnimSequence::new("slide", 0, 10, 12.0))
}

#[test]
fn test_monotonic_shrink() {
    for seed in 1..6 {
        for options in [
            ReductionOptions::default(),
            ReductionOptions::lossless(),
            ReductionOptions::lossless().with_frame_error_tolerance(0.05),
        ] {
            let mut mesh = waving_strip(6, 24, seed);
            let (verts, frames) = (mesh.frame_vertex_count, mesh.anim_frame_count);

            reduce(Some(&mut mesh), &options);

            assert!(mesh.frame_vertex_count <= verts);
            assert!(mesh.anim_frame_count <= frames);
            assert!(mesh.validate().is_ok(), "{:?}", mesh.validate());
        }
    }
}

#[test]
fn test_anchor_frames_survive() {
    let mut presets: Vec<ReductionOptions> = [0.001, 0.05, 0.5, 5.0]
        .into_iter()
        .map(|tolerance| ReductionOptions::lossless().with_frame_error_tolerance(tolerance))
        .collect();
    // Per-vertex allowances grown from vertex motion drive the keep decisions here.
    presets.push(ReductionOptions::default());
    presets.push(
        ReductionOptions::lossless()
            .with_frame_error_tolerance(0.01)
            .with_motion_error_scale(2.0),
    );

    for options in presets {
        let original = waving_strip(4, 30, 7);
        let mut mesh = original.clone();
        KeyframeReducer::frames_only(options)
            .reduce_mesh(&mut mesh)
            .unwrap();

        for (before, after) in original.anim_sequences.iter().zip(&mesh.anim_sequences) {
            for (old, new) in [
                (before.start_frame, after.start_frame),
                (before.end_frame().unwrap(), after.end_frame().unwrap()),
            ] {
                assert_eq!(mesh.frame(new), original.frame(old));
            }
        }
        assert_eq!(mesh.frame(0), original.frame(0));
        assert_eq!(
            mesh.frame(mesh.anim_frame_count - 1),
            original.frame(original.anim_frame_count - 1)
        );
    }
}

#[test]
fn test_idempotent_on_reduced_mesh() {
    let options = ReductionOptions::lossless().with_frame_error_tolerance(0.01);

    let mut mesh = linear_slide();
    let (changed, _) = reduce(Some(&mut mesh), &options);
    assert!(changed);

    let (changed_again, stats) = reduce(Some(&mut mesh), &options);
    assert!(!changed_again);
    assert!(!stats.unwrap().changed);
}

#[test]
fn test_idempotent_after_weld() {
    let options = ReductionOptions::lossless();

    let mut mesh = waving_strip(3, 6, 11);
    let (changed, stats) = reduce(Some(&mut mesh), &options);
    assert!(changed);
    // Only the first seam slot welds; its partner has fewer corners.
    assert_eq!(stats.unwrap().reduced_vertices, 9);

    let (changed_again, _) = reduce(Some(&mut mesh), &options);
    assert!(!changed_again);
}

#[test]
fn test_texture_index_blocks_merge() {
    let frames = vec![
        vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(0.0, 0.0, 0.0)],
        vec![Point3f::new(0.0, 2.0, 0.0), Point3f::new(0.0, 2.0, 0.0)],
    ];
    // Each slot's only corner comes from a degenerate triangle with a
    // different texture.
    let triangles = vec![
        MeshTriangle::new([0, 0, 0], 1, 0),
        MeshTriangle::new([1, 1, 1], 2, 0),
    ];
    // Degenerate faces have no normal, so the normal check is switched off.
    let options = ReductionOptions::default().with_normal_angle_tolerance_deg(0.0);

    let mut split = AnimatedMesh::from_frames("split", frames.clone(), triangles).unwrap();
    reduce(Some(&mut split), &options);
    assert_eq!(split.frame_vertex_count, 2);

    let same = vec![
        MeshTriangle::new([0, 0, 0], 1, 0),
        MeshTriangle::new([1, 1, 1], 1, 0),
    ];
    let mut merged = AnimatedMesh::from_frames("merged", frames, same).unwrap();
    reduce(Some(&mut merged), &options);
    assert_eq!(merged.frame_vertex_count, 1);
    assert_eq!(merged.triangle_count(), 1);
}

#[test]
fn test_exact_linear_interpolation() {
    let mut mesh = linear_slide();
    let old = mesh.anim_sequences[0].clone();

    let options = ReductionOptions::lossless().with_frame_error_tolerance(1e-4);
    let (changed, stats) = reduce(Some(&mut mesh), &options);

    assert!(changed);
    assert_eq!(mesh.anim_frame_count, 2);
    assert_eq!(stats.unwrap().reduced_frames, 2);
    assert_eq!(mesh.position(1, 0), Some(&Point3f::new(9.0, 0.0, 0.0)));

    let seq = &mesh.anim_sequences[0];
    assert_eq!((seq.start_frame, seq.frame_count), (0, 2));
    let old_duration = old.frame_count as f32 / old.rate;
    let new_duration = seq.frame_count as f32 / seq.rate;
    assert_relative_eq!(old_duration, new_duration, epsilon = 1e-5);
}

#[test]
fn test_uv_snap_enables_weld() {
    let frames = vec![vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(0.0, 0.0, 0.0)]];
    let triangles = vec![
        MeshTriangle::new([0, 0, 0], 0, 0).with_uv([UvCoord::new(130, 0); 3]),
        MeshTriangle::new([1, 1, 1], 0, 0).with_uv([UvCoord::new(131, 0); 3]),
    ];
    let base = AnimatedMesh::from_frames("uv", frames, triangles).unwrap();

    let mut unsnapped = base.clone();
    reduce(Some(&mut unsnapped), &ReductionOptions::lossless());
    assert_eq!(unsnapped.frame_vertex_count, 2);

    let mut snapped = base;
    let options = ReductionOptions::lossless().with_uv_snap_grid(1.0 / 64.0);
    reduce(Some(&mut snapped), &options);
    assert_eq!(snapped.frame_vertex_count, 1);
    // Snapping only affects the comparison; stored UVs are untouched.
    assert_eq!(snapped.triangles[0].uv[0], UvCoord::new(130, 0));
}

#[test]
fn test_null_input() {
    let (changed, stats) = reduce(None, &ReductionOptions::default());
    assert!(!changed);
    assert!(stats.is_none());
}

#[test]
fn test_out_of_range_triangle_does_not_panic() {
    let mut mesh = linear_slide();
    mesh.triangles.push(MeshTriangle::new([0, 1, 42], 0, 0));
    let (changed, _) = reduce(Some(&mut mesh), &ReductionOptions::default());
    assert!(changed);
    assert_eq!(mesh.triangles.last().unwrap().vertex_index[2], 42);
}
