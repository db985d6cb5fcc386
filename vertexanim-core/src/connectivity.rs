//! Vertex-to-triangle adjacency in compressed sparse row form

use crate::mesh::MeshTriangle;
use serde::{Deserialize, Serialize};

/// Location of one vertex's triangle list inside [`VertexConnectivity::links`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexSpan {
    pub offset: usize,
    pub count: usize,
}

/// Triangles incident to each vertex slot.
///
/// A triangle that references the same slot from several corners is listed
/// once per corner. Within a slot, triangle indices are in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexConnectivity {
    pub links: Vec<usize>,
    pub spans: Vec<VertexSpan>,
}

impl VertexConnectivity {
    /// Build adjacency for `vertex_count` slots. Out-of-range corners are ignored.
    pub fn build(vertex_count: usize, triangles: &[MeshTriangle]) -> Self {
        let mut spans = vec![VertexSpan::default(); vertex_count];
        for tri in triangles {
            for &vi in &tri.vertex_index {
                if let Some(span) = spans.get_mut(vi) {
                    span.count += 1;
                }
            }
        }

        let mut offset = 0;
        for span in &mut spans {
            span.offset = offset;
            offset += span.count;
        }

        let mut links = vec![0; offset];
        let mut cursor: Vec<usize> = spans.iter().map(|s| s.offset).collect();
        for (ti, tri) in triangles.iter().enumerate() {
            for &vi in &tri.vertex_index {
                if let Some(slot) = cursor.get_mut(vi) {
                    links[*slot] = ti;
                    *slot += 1;
                }
            }
        }

        Self { links, spans }
    }

    /// Triangles touching vertex `vertex`; empty for unknown slots
    pub fn triangles_of(&self, vertex: usize) -> &[usize] {
        self.spans
            .get(vertex)
            .and_then(|s| self.links.get(s.offset..s.offset + s.count))
            .unwrap_or(&[])
    }

    /// Number of vertex slots covered
    pub fn vertex_count(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}
