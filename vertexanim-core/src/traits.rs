//! Core traits for vertexanim

use crate::{bounds::Aabb, mesh::*, point::*};

/// Trait for objects with spatial extent
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f;
}

impl Drawable for AnimatedMesh {
    /// Box over every position of every frame; the origin for an empty mesh.
    fn bounding_box(&self) -> (Point3f, Point3f) {
        match Aabb::from_points(&self.positions) {
            Some(aabb) => (aabb.min, aabb.max),
            None => (Point3f::origin(), Point3f::origin()),
        }
    }

    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        Point3f::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }
}
