//! The forward coordinate-projection seam.

use nalgebra::Point2;

/// Half the extent of the spherical-mercator world, in meters.
///
/// The world square spans `[-HALF, HALF]` on both axes in EPSG:3857.
pub const WEB_MERCATOR_HALF_EXTENT: f64 = 20_037_508.342_789_244;

/// A forward coordinate projection from source space to projected space.
///
/// Implementations must be pure and deterministic for a fixed projection
/// definition; they may be arbitrarily nonlinear. There is no error
/// channel: a panicking projection propagates uncaught.
///
/// Any `Fn(Point2<f64>) -> Point2<f64>` closure is a projection:
///
/// ```
/// use warp_types::{Point2, Projection};
///
/// let flip = |p: Point2<f64>| Point2::new(p.y, p.x);
/// assert_eq!(flip.forward(Point2::new(1.0, 2.0)), Point2::new(2.0, 1.0));
/// ```
pub trait Projection {
    /// Project a source-space coordinate into projected space.
    fn forward(&self, source: Point2<f64>) -> Point2<f64>;
}

impl<F> Projection for F
where
    F: Fn(Point2<f64>) -> Point2<f64>,
{
    #[inline]
    fn forward(&self, source: Point2<f64>) -> Point2<f64> {
        self(source)
    }
}

/// A projection composed with normalization into the unit square.
///
/// Wraps an inner projection and an axis-aligned window (origin plus
/// extent) of its output space, rescaling projected coordinates so the
/// window maps onto `[0, 1]²`. Web-mapping renderers address the world
/// this way: the whole mercator square becomes the unit square with
/// `(0, 0)` at the top-left.
///
/// # Example
///
/// ```
/// use warp_types::{Point2, Projection, UnitSquareProjection};
///
/// let identity = |p: Point2<f64>| p;
/// let unit = UnitSquareProjection::new(identity, Point2::new(-2.0, 2.0), 4.0);
///
/// let p = unit.forward(Point2::new(0.0, 0.0));
/// assert_eq!(p, Point2::new(0.5, 0.5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UnitSquareProjection<P> {
    inner: P,
    origin: Point2<f64>,
    extent: f64,
}

impl<P> UnitSquareProjection<P> {
    /// Wrap `inner`, mapping the window starting at `origin` with side
    /// length `extent` onto the unit square.
    ///
    /// `origin` is the projected-space point that maps to `(0, 0)`;
    /// distances from it are normalized by `extent` on both axes.
    #[inline]
    #[must_use]
    pub const fn new(inner: P, origin: Point2<f64>, extent: f64) -> Self {
        Self {
            inner,
            origin,
            extent,
        }
    }

    /// Wrap a projection targeting EPSG:3857, normalizing the full
    /// mercator world square to `[0, 1]²` with `(0, 0)` at the top-left.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point2::new is not const in nalgebra
    pub fn web_mercator(inner: P) -> Self {
        Self::new(
            inner,
            Point2::new(-WEB_MERCATOR_HALF_EXTENT, WEB_MERCATOR_HALF_EXTENT),
            2.0 * WEB_MERCATOR_HALF_EXTENT,
        )
    }
}

impl<P: Projection> Projection for UnitSquareProjection<P> {
    #[inline]
    fn forward(&self, source: Point2<f64>) -> Point2<f64> {
        let p = self.inner.forward(source);
        Point2::new(
            ((p.x - self.origin.x) / self.extent).abs(),
            ((p.y - self.origin.y) / self.extent).abs(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn closures_are_projections() {
        let scale = |p: Point2<f64>| Point2::new(p.x * 2.0, p.y * 2.0);
        assert_eq!(
            scale.forward(Point2::new(1.5, -0.5)),
            Point2::new(3.0, -1.0)
        );
    }

    #[test]
    fn unit_square_normalizes_window() {
        let identity = |p: Point2<f64>| p;
        let unit = UnitSquareProjection::new(identity, Point2::new(10.0, 10.0), 20.0);

        assert_relative_eq!(unit.forward(Point2::new(10.0, 10.0)).x, 0.0);
        assert_relative_eq!(unit.forward(Point2::new(30.0, 30.0)).x, 1.0);
        assert_relative_eq!(unit.forward(Point2::new(20.0, 10.0)).x, 0.5);
    }

    #[test]
    fn web_mercator_window_corners() {
        let identity = |p: Point2<f64>| p;
        let unit = UnitSquareProjection::web_mercator(identity);

        // World top-left maps to (0, 0).
        let tl = unit.forward(Point2::new(
            -WEB_MERCATOR_HALF_EXTENT,
            WEB_MERCATOR_HALF_EXTENT,
        ));
        assert_relative_eq!(tl.x, 0.0);
        assert_relative_eq!(tl.y, 0.0);

        // World center maps to (0.5, 0.5).
        let center = unit.forward(Point2::new(0.0, 0.0));
        assert_relative_eq!(center.x, 0.5);
        assert_relative_eq!(center.y, 0.5);
    }
}
