//! Core types for adaptive projection-warp meshes.
//!
//! This crate provides the vocabulary shared by the warp crates:
//!
//! - [`Vertex`] - A mesh vertex with source, projected, and texture coordinates
//! - [`Quad`] - A source-space quadrilateral in the fixed corner order
//! - [`Projection`] - The forward coordinate-projection seam
//! - [`WarpedMesh`] - Flat vertex/index buffers ready for a rendering layer
//!
//! # Coordinate Spaces
//!
//! Three coordinate spaces appear throughout:
//!
//! - **Source space**: the coordinate reference system the raster is
//!   georeferenced in. All [`Quad`] corners live here.
//! - **Projected space**: the image of source space under a
//!   [`Projection::forward`] call. Output positions live here.
//! - **Texture (UV) space**: `[0, 1]²` with `(0, 0)` at the raster's
//!   top-left corner and `v` growing downward, matching the corner order of
//!   [`Quad`].
//!
//! # Winding
//!
//! Triangle winding is established by [`Quad::INITIAL_TRIANGLES`] and
//! preserved by refinement; downstream renderers rely on it for back-face
//! culling.
//!
//! # Example
//!
//! ```
//! use warp_types::{Point2, Projection, Quad};
//!
//! let quad = Quad::unit();
//! let shear = |p: Point2<f64>| Point2::new(p.x + 0.5 * p.y, p.y);
//!
//! let projected = shear.forward(*quad.bottom_left());
//! assert_eq!(projected, Point2::new(0.5, 1.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod mesh;
mod projection;
mod quad;
mod vertex;

pub use mesh::WarpedMesh;
pub use projection::{Projection, UnitSquareProjection, WEB_MERCATOR_HALF_EXTENT};
pub use quad::Quad;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};
