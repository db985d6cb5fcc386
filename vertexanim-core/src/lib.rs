//! Core data structures and traits for vertexanim
//!
//! This crate provides the fundamental types for vertex-animated meshes:
//! keyframed positions, textured triangles, animation sequences, and the
//! derived adjacency and bounding volumes that tools rebuild after editing.

pub mod point;
pub mod mesh;
pub mod bounds;
pub mod connectivity;
pub mod traits;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use bounds::*;
pub use connectivity::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
