//! Axis-aligned boxes and bounding spheres for animation frames

use crate::point::*;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    /// Create a box from its corners
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty slice
    pub fn from_points(points: &[Point3f]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for p in rest {
            aabb.expand(p);
        }
        Some(aabb)
    }

    /// Grow the box to contain `p`
    pub fn expand(&mut self, p: &Point3f) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);

        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Centre of the box
    pub fn center(&self) -> Point3f {
        nalgebra::center(&self.min, &self.max)
    }

    /// Half the length of the box diagonal
    pub fn half_diagonal(&self) -> f32 {
        ((self.max - self.min) * 0.5).norm()
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Point3f::origin(), Point3f::origin())
    }
}

/// A bounding sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Point3f,
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere centred on the bounding box of `points`, reaching the farthest point.
    pub fn from_points(points: &[Point3f]) -> Option<Self> {
        let center = Aabb::from_points(points)?.center();
        let radius_sq = points
            .iter()
            .map(|p| (p - center).norm_squared())
            .fold(0.0f32, f32::max);
        Some(Self {
            center,
            radius: radius_sq.sqrt(),
        })
    }
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self {
            center: Point3f::origin(),
            radius: 0.0,
        }
    }
}

/// Box and sphere bounding the same point set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub aabb: Aabb,
    pub sphere: BoundingSphere,
}

impl Bounds {
    /// Bounds of a point set, or `None` for an empty slice
    pub fn from_points(points: &[Point3f]) -> Option<Self> {
        Some(Self {
            aabb: Aabb::from_points(points)?,
            sphere: BoundingSphere::from_points(points)?,
        })
    }
}
