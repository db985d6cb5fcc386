//! Vertex-animated mesh data structures
//!
//! An [`AnimatedMesh`] stores one full set of vertex positions per keyframe.
//! Vertex slot `v` at frame `f` lives at `positions[f * frame_vertex_count + v]`.

use crate::bounds::Bounds;
use crate::connectivity::VertexConnectivity;
use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Bytes used by one packed frame vertex (11/11/10-bit position)
pub const PACKED_VERTEX_BYTES: usize = 4;

/// Bytes used by one stored triangle record
pub const TRIANGLE_RECORD_BYTES: usize = 20;

/// A triangle referencing three vertex slots, with per-corner texture coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshTriangle {
    pub vertex_index: [usize; 3],
    pub texture_index: u32,
    pub poly_flags: u32,
    pub uv: [UvCoord; 3],
}

impl MeshTriangle {
    /// Create a triangle with zeroed texture coordinates
    pub fn new(vertex_index: [usize; 3], texture_index: u32, poly_flags: u32) -> Self {
        Self {
            vertex_index,
            texture_index,
            poly_flags,
            uv: [UvCoord::default(); 3],
        }
    }

    /// Set the per-corner texture coordinates
    pub fn with_uv(mut self, uv: [UvCoord; 3]) -> Self {
        self.uv = uv;
        self
    }
}

/// A named range of keyframes played back at `rate` frames per second.
///
/// Sequences only describe the frame axis; they can overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimSequence {
    pub name: String,
    pub start_frame: usize,
    pub frame_count: usize,
    pub rate: f32,
}

impl AnimSequence {
    pub fn new(name: impl Into<String>, start_frame: usize, frame_count: usize, rate: f32) -> Self {
        Self {
            name: name.into(),
            start_frame,
            frame_count,
            rate,
        }
    }

    /// Last frame of the sequence, or `None` when it is empty or ends past `usize::MAX`
    pub fn end_frame(&self) -> Option<usize> {
        self.frame_count
            .checked_sub(1)
            .and_then(|last| self.start_frame.checked_add(last))
    }
}

/// A mesh animated by storing every vertex position for every keyframe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimatedMesh {
    pub name: String,
    pub frame_vertex_count: usize,
    pub anim_frame_count: usize,
    pub positions: Vec<Point3f>,
    pub triangles: Vec<MeshTriangle>,
    #[serde(default)]
    pub anim_sequences: Vec<AnimSequence>,
    #[serde(default)]
    pub connectivity: VertexConnectivity,
    #[serde(default)]
    pub frame_bounds: Vec<Bounds>,
    #[serde(default)]
    pub bounds: Bounds,
}

impl AnimatedMesh {
    /// Create a new empty mesh
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a mesh from its frames. Every frame must hold the same number of vertices.
    pub fn from_frames(
        name: impl Into<String>,
        frames: Vec<Vec<Point3f>>,
        triangles: Vec<MeshTriangle>,
    ) -> Result<Self> {
        let frame_vertex_count = frames.first().map_or(0, Vec::len);
        if let Some((fi, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, f)| f.len() != frame_vertex_count)
        {
            return Err(Error::InvalidData(format!(
                "frame {} has {} vertices, expected {}",
                fi,
                frame.len(),
                frame_vertex_count
            )));
        }

        Ok(Self {
            name: name.into(),
            frame_vertex_count,
            anim_frame_count: frames.len(),
            positions: frames.into_iter().flatten().collect(),
            triangles,
            ..Self::default()
        })
    }

    /// Append a sequence, builder style
    pub fn with_sequence(mut self, sequence: AnimSequence) -> Self {
        self.anim_sequences.push(sequence);
        self
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no vertices or no frames
    pub fn is_empty(&self) -> bool {
        self.frame_vertex_count == 0 || self.anim_frame_count == 0
    }

    /// Position of `vertex` at `frame`
    pub fn position(&self, frame: usize, vertex: usize) -> Option<&Point3f> {
        if vertex >= self.frame_vertex_count {
            return None;
        }
        let index = frame
            .checked_mul(self.frame_vertex_count)?
            .checked_add(vertex)?;
        self.positions.get(index)
    }

    /// All positions of one frame
    pub fn frame(&self, frame: usize) -> Option<&[Point3f]> {
        if frame >= self.anim_frame_count {
            return None;
        }
        let start = frame.checked_mul(self.frame_vertex_count)?;
        let end = start.checked_add(self.frame_vertex_count)?;
        self.positions.get(start..end)
    }

    /// Positions of `vertex` across every frame, in frame order
    pub fn track(&self, vertex: usize) -> Vec<Point3f> {
        (0..self.anim_frame_count)
            .filter_map(|f| self.position(f, vertex).copied())
            .collect()
    }

    /// Estimated size of the vertex and triangle data once packed for storage
    pub fn estimated_storage_bytes(&self) -> usize {
        self.frame_vertex_count
            .saturating_mul(self.anim_frame_count)
            .saturating_mul(PACKED_VERTEX_BYTES)
            .saturating_add(self.triangles.len().saturating_mul(TRIANGLE_RECORD_BYTES))
    }

    /// Check that `positions` holds exactly one entry per vertex per frame.
    ///
    /// Declared counts whose product overflows are rejected too.
    pub fn check_position_count(&self) -> Result<()> {
        let expected = self.frame_vertex_count.checked_mul(self.anim_frame_count);
        if expected == Some(self.positions.len()) {
            return Ok(());
        }
        Err(Error::InvalidData(format!(
            "mesh '{}' stores {} positions, expected {} vertices x {} frames",
            self.name,
            self.positions.len(),
            self.frame_vertex_count,
            self.anim_frame_count
        )))
    }

    /// Check the structural invariants, reporting the first violation
    pub fn validate(&self) -> Result<()> {
        self.check_position_count()?;

        for (ti, tri) in self.triangles.iter().enumerate() {
            if let Some(&vi) = tri
                .vertex_index
                .iter()
                .find(|&&vi| vi >= self.frame_vertex_count)
            {
                return Err(Error::InvalidData(format!(
                    "mesh '{}' triangle {} references vertex {} of {}",
                    self.name, ti, vi, self.frame_vertex_count
                )));
            }
        }

        for seq in &self.anim_sequences {
            if seq.frame_count == 0 {
                continue;
            }
            match seq.end_frame() {
                Some(end) if end < self.anim_frame_count => {}
                _ => {
                    return Err(Error::InvalidData(format!(
                        "mesh '{}' sequence '{}' spans frames {}+{} of {}",
                        self.name, seq.name, seq.start_frame, seq.frame_count, self.anim_frame_count
                    )));
                }
            }
        }

        Ok(())
    }
}
