//! Source-space quadrilateral with the fixed corner ordering.

use nalgebra::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A planar quadrilateral in the source reference system.
///
/// Corners are stored in the fixed order
/// **\[top-left, bottom-left, top-right, bottom-right\]**, paired
/// positionally with [`Quad::CORNER_UVS`] and triangulated by
/// [`Quad::INITIAL_TRIANGLES`]. "Top" and "left" refer to the raster being
/// draped: UV `(0, 0)` is the raster's top-left texel.
///
/// # Example
///
/// ```
/// use warp_types::{Point2, Quad};
///
/// let quad = Quad::new(
///     Point2::new(0.0, 0.0),
///     Point2::new(0.0, 1.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
/// );
/// assert_eq!(quad, Quad::unit());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quad {
    corners: [Point2<f64>; 4],
}

impl Quad {
    /// Texture coordinates paired positionally with the corners:
    /// top-left, bottom-left, top-right, bottom-right.
    pub const CORNER_UVS: [[f64; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];

    /// The two triangles covering the quad, as indices into the corners.
    ///
    /// Both share the top-left/bottom-right diagonal and wind the same way.
    pub const INITIAL_TRIANGLES: [[u32; 3]; 2] = [[0, 1, 3], [0, 3, 2]];

    /// Create a quad from its four corners in
    /// \[top-left, bottom-left, top-right, bottom-right\] order.
    #[inline]
    #[must_use]
    pub const fn new(
        top_left: Point2<f64>,
        bottom_left: Point2<f64>,
        top_right: Point2<f64>,
        bottom_right: Point2<f64>,
    ) -> Self {
        Self {
            corners: [top_left, bottom_left, top_right, bottom_right],
        }
    }

    /// Create a quad from a clockwise corner ring
    /// \[top-left, top-right, bottom-right, bottom-left\].
    ///
    /// This is the corner order GIS configuration layers usually hand over;
    /// it is reordered into the internal convention here.
    ///
    /// # Example
    ///
    /// ```
    /// use warp_types::{Point2, Quad};
    ///
    /// let ring = [
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(1.0, 0.0),
    ///     Point2::new(1.0, 1.0),
    ///     Point2::new(0.0, 1.0),
    /// ];
    /// assert_eq!(Quad::from_ring(ring), Quad::unit());
    /// ```
    #[inline]
    #[must_use]
    pub const fn from_ring(ring: [Point2<f64>; 4]) -> Self {
        Self::new(ring[0], ring[3], ring[1], ring[2])
    }

    /// The unit quad over `[0, 1]²` with y growing downward.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point2::new is not const in nalgebra
    pub fn unit() -> Self {
        Self::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        )
    }

    /// The corners in \[top-left, bottom-left, top-right, bottom-right\] order.
    #[inline]
    #[must_use]
    pub const fn corners(&self) -> &[Point2<f64>; 4] {
        &self.corners
    }

    /// The top-left corner.
    #[inline]
    #[must_use]
    pub const fn top_left(&self) -> &Point2<f64> {
        &self.corners[0]
    }

    /// The bottom-left corner.
    #[inline]
    #[must_use]
    pub const fn bottom_left(&self) -> &Point2<f64> {
        &self.corners[1]
    }

    /// The top-right corner.
    #[inline]
    #[must_use]
    pub const fn top_right(&self) -> &Point2<f64> {
        &self.corners[2]
    }

    /// The bottom-right corner.
    #[inline]
    #[must_use]
    pub const fn bottom_right(&self) -> &Point2<f64> {
        &self.corners[3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_accessors() {
        let quad = Quad::unit();
        assert_eq!(*quad.top_left(), Point2::new(0.0, 0.0));
        assert_eq!(*quad.bottom_left(), Point2::new(0.0, 1.0));
        assert_eq!(*quad.top_right(), Point2::new(1.0, 0.0));
        assert_eq!(*quad.bottom_right(), Point2::new(1.0, 1.0));
    }

    #[test]
    fn from_ring_reorders() {
        let ring = [
            Point2::new(10.0, 0.0), // top-left
            Point2::new(20.0, 0.0), // top-right
            Point2::new(20.0, 5.0), // bottom-right
            Point2::new(10.0, 5.0), // bottom-left
        ];
        let quad = Quad::from_ring(ring);
        assert_eq!(*quad.top_left(), ring[0]);
        assert_eq!(*quad.bottom_left(), ring[3]);
        assert_eq!(*quad.top_right(), ring[1]);
        assert_eq!(*quad.bottom_right(), ring[2]);
    }

    #[test]
    fn corner_uvs_pair_with_corners() {
        // Left corners have u = 0, top corners have v = 0.
        assert_eq!(Quad::CORNER_UVS[0], [0.0, 0.0]);
        assert_eq!(Quad::CORNER_UVS[1], [0.0, 1.0]);
        assert_eq!(Quad::CORNER_UVS[2], [1.0, 0.0]);
        assert_eq!(Quad::CORNER_UVS[3], [1.0, 1.0]);
    }

    #[test]
    fn initial_triangles_cover_all_corners() {
        let mut seen = [false; 4];
        for tri in Quad::INITIAL_TRIANGLES {
            for v in tri {
                seen[v as usize] = true;
            }
        }
        assert_eq!(seen, [true; 4]);
    }
}
