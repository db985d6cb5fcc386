//! Storage reduction for vertex-animated meshes
//!
//! This crate shrinks meshes that store a full set of vertex positions per
//! keyframe, without touching their topology:
//! - Vertex welding: slots whose whole animation track and face-corner
//!   attributes (texture, flags, UVs, face normal) match are merged
//! - Duplicate triangle removal after welding
//! - Keyframe decimation: frames that linear interpolation between anchor
//!   frames reproduces within a motion-adaptive tolerance are dropped
//!
//! ```
//! use vertexanim_core::{AnimatedMesh, Point3f};
//! use vertexanim_reduce::{reduce, ReductionOptions};
//!
//! let frames = (0..10)
//!     .map(|f| vec![Point3f::new(f as f32, 0.0, 0.0)])
//!     .collect();
//! let mut mesh = AnimatedMesh::from_frames("dot", frames, Vec::new()).unwrap();
//!
//! let options = ReductionOptions::lossless().with_frame_error_tolerance(0.01);
//! let (changed, stats) = reduce(Some(&mut mesh), &options);
//! assert!(changed);
//! assert_eq!(mesh.anim_frame_count, 2);
//! println!("{}", stats.unwrap());
//! ```

pub mod corners;
pub mod keyframes;
pub mod motion;
pub mod options;
pub mod rebuild;
pub mod reducer;
pub mod stats;
pub mod tolerance;
pub mod weld;

pub use options::ReductionOptions;
pub use reducer::{reduce, KeyframeReducer};
pub use stats::ReductionStats;
pub use tolerance::Tolerances;

use vertexanim_core::{AnimatedMesh, Result};

/// Reduce the storage of an animated mesh in place
pub trait MeshReducer {
    /// Reduce `mesh`, returning before/after statistics
    fn reduce_mesh(&self, mesh: &mut AnimatedMesh) -> Result<ReductionStats>;
}
