//! Mesh vertex with source, projected, and texture coordinates.

use nalgebra::{Point2, Vector2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh vertex tracked through a projection warp.
///
/// Every vertex carries three coordinates that stay in lockstep:
/// the position in the source reference system, its image under the
/// forward projection, and the texture coordinate used to sample the
/// raster being draped.
///
/// Vertices are identified by their index in the owning mesh and are
/// never deleted; refinement only appends.
///
/// # Example
///
/// ```
/// use warp_types::{Point2, Vector2, Vertex};
///
/// let v = Vertex::new(
///     Point2::new(10.0, 20.0),
///     Point2::new(0.25, 0.75),
///     Vector2::new(0.0, 1.0),
/// );
/// assert_eq!(v.source.x, 10.0);
/// assert_eq!(v.projected.y, 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in the source reference system.
    pub source: Point2<f64>,

    /// Image of `source` under the forward projection.
    pub projected: Point2<f64>,

    /// Texture coordinate in `[0, 1]²`.
    pub uv: Vector2<f64>,
}

impl Vertex {
    /// Create a vertex from its three coordinates.
    #[inline]
    #[must_use]
    pub const fn new(source: Point2<f64>, projected: Point2<f64>, uv: Vector2<f64>) -> Self {
        Self {
            source,
            projected,
            uv,
        }
    }

    /// Create a vertex from raw coordinate pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use warp_types::Vertex;
    ///
    /// let v = Vertex::from_coords([1.0, 2.0], [3.0, 4.0], [0.5, 0.5]);
    /// assert_eq!(v.source.y, 2.0);
    /// assert_eq!(v.uv.x, 0.5);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point2::new is not const in nalgebra
    pub fn from_coords(source: [f64; 2], projected: [f64; 2], uv: [f64; 2]) -> Self {
        Self::new(
            Point2::new(source[0], source[1]),
            Point2::new(projected[0], projected[1]),
            Vector2::new(uv[0], uv[1]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_new() {
        let v = Vertex::new(
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 4.0),
            Vector2::new(0.0, 1.0),
        );
        assert!((v.source.x - 1.0).abs() < f64::EPSILON);
        assert!((v.projected.y - 4.0).abs() < f64::EPSILON);
        assert!((v.uv.y - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn vertex_from_coords() {
        let v = Vertex::from_coords([1.0, 2.0], [3.0, 4.0], [0.5, 0.25]);
        assert_eq!(v.source, Point2::new(1.0, 2.0));
        assert_eq!(v.projected, Point2::new(3.0, 4.0));
        assert_eq!(v.uv, Vector2::new(0.5, 0.25));
    }
}
