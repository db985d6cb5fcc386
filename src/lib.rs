//! # vertexanim
//!
//! Offline reduction of vertex-animated meshes for Rust.
//!
//! This is the umbrella crate that provides convenient access to all vertexanim functionality.
//! Use it to get everything in one place, or depend on the individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Mesh data model (frames of positions, triangles, sequences, bounds)
//! - **Reduce**: Vertex welding and keyframe decimation
//!
//! ## Quick Start
//!
//! ```rust
//! use vertexanim::prelude::*;
//!
//! // A single vertex sliding along x over five frames
//! let frames = (0..5)
//!     .map(|f| vec![Point3f::new(f as f32, 0.0, 0.0)])
//!     .collect();
//! let mut mesh = AnimatedMesh::from_frames("slide", frames, Vec::new())?
//!     .with_sequence(AnimSequence::new("move", 0, 5, 10.0));
//!
//! let (changed, stats) = reduce(Some(&mut mesh), &ReductionOptions::lossless().with_frame_error_tolerance(0.01));
//! assert!(changed);
//! assert_eq!(mesh.anim_frame_count, 2);
//! println!("{}", stats.unwrap());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core and reduce
//! - `core`: Mesh data model (always enabled)
//! - `reduce`: Welding and keyframe decimation

// Re-export core functionality
pub use vertexanim_core::*;

// Re-export sub-crates
#[cfg(feature = "reduce")]
pub use vertexanim_reduce as reduce;

/// Convenient imports for common use cases
pub mod prelude {
    pub use vertexanim_core::*;

    #[cfg(feature = "reduce")]
    pub use vertexanim_reduce::{
        reduce, KeyframeReducer, MeshReducer, ReductionOptions, ReductionStats, Tolerances,
    };
}
