//! Flat output buffers for the rendering layer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A warped triangle mesh as flat numeric arrays.
///
/// This is the read-only snapshot a refinement session hands to the
/// rendering layer: positions and UVs in vertex-index order, plus triangle
/// indices of the live triangles in creation order. All arrays are flat so
/// they can be uploaded to GPU buffers without reshaping.
///
/// # Layout
///
/// - `positions`: `2 * vertex_count` floats, projected-space `x, y` pairs
/// - `source_positions`: `2 * vertex_count` floats, source-space `x, y` pairs
/// - `uvs`: `2 * vertex_count` floats, `u, v` pairs
/// - `indices`: `3 * triangle_count` vertex indices
///
/// # Example
///
/// ```
/// use warp_types::WarpedMesh;
///
/// let mesh = WarpedMesh {
///     positions: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
///     source_positions: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
///     uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
///     indices: vec![0, 1, 2],
/// };
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// assert!(mesh.fits_u16_indices());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WarpedMesh {
    /// Projected-space vertex positions, `x, y` interleaved.
    pub positions: Vec<f64>,

    /// Source-space vertex positions, `x, y` interleaved, same order.
    pub source_positions: Vec<f64>,

    /// Texture coordinates, `u, v` interleaved, same order.
    pub uvs: Vec<f64>,

    /// Triangle vertex indices, three per triangle, creation order.
    pub indices: Vec<u32>,
}

impl WarpedMesh {
    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 2
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check whether the mesh can be drawn with a 16-bit index buffer.
    ///
    /// Refinement itself never enforces this ceiling; callers that feed
    /// renderers assuming 16-bit indices must check it and select a wider
    /// index type when it fails.
    #[inline]
    #[must_use]
    pub fn fits_u16_indices(&self) -> bool {
        self.vertex_count() <= u16::MAX as usize + 1
    }

    /// Projected position of vertex `index` as an `[x, y]` pair.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    #[must_use]
    pub fn position(&self, index: u32) -> Option<[f64; 2]> {
        let i = index as usize * 2;
        Some([*self.positions.get(i)?, *self.positions.get(i + 1)?])
    }

    /// Texture coordinate of vertex `index` as a `[u, v]` pair.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    #[must_use]
    pub fn uv(&self, index: u32) -> Option<[f64; 2]> {
        let i = index as usize * 2;
        Some([*self.uvs.get(i)?, *self.uvs.get(i + 1)?])
    }

    /// Iterate over triangles as `[v0, v1, v2]` index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangle_mesh() -> WarpedMesh {
        WarpedMesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0],
            source_positions: vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0],
            uvs: vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0],
            indices: vec![0, 1, 3, 0, 3, 2],
        }
    }

    #[test]
    fn counts() {
        let mesh = two_triangle_mesh();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn empty_mesh() {
        let mesh = WarpedMesh::default();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.is_empty());
    }

    #[test]
    fn u16_ceiling() {
        let mut mesh = WarpedMesh::default();
        assert!(mesh.fits_u16_indices());

        mesh.positions = vec![0.0; 65_536 * 2];
        assert!(mesh.fits_u16_indices());

        mesh.positions = vec![0.0; 65_537 * 2];
        assert!(!mesh.fits_u16_indices());
    }

    #[test]
    fn accessors() {
        let mesh = two_triangle_mesh();
        assert_eq!(mesh.position(1), Some([0.0, 1.0]));
        assert_eq!(mesh.uv(2), Some([1.0, 0.0]));
        assert_eq!(mesh.position(4), None);
        assert_eq!(mesh.uv(99), None);
    }

    #[test]
    fn triangle_iteration() {
        let mesh = two_triangle_mesh();
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 3], [0, 3, 2]]);
    }
}
