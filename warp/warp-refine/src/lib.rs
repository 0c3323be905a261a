//! Error-driven adaptive refinement of projected quadrilateral meshes.
//!
//! Draping a rectangular raster onto a different map projection by
//! rendering its quad as two flat triangles visibly distorts along curved
//! projection lines. This crate refines the quad into a triangle mesh
//! whose piecewise-linear interpolation error stays below a caller-chosen
//! tolerance, subdividing only where the projection actually bends.
//!
//! The engine consumes a [`warp_types::Projection`] and produces flat
//! position/UV/index arrays ([`warp_types::WarpedMesh`]); it never touches
//! a rendering API or a coordinate-reference-system database.
//!
//! # Example
//!
//! ```
//! use warp_refine::{refine_quad, RefineParams};
//! use warp_types::{Point2, Quad};
//!
//! // A strongly nonlinear projection.
//! let bend = |p: Point2<f64>| {
//!     Point2::new(p.x + 0.3 * (6.0 * p.y).sin(), p.y + 0.3 * (6.0 * p.x).sin())
//! };
//!
//! let params = RefineParams::new().with_tolerance(1e-6);
//! let result = refine_quad(bend, &Quad::unit(), &params)?;
//!
//! assert!(result.mesh.triangle_count() > 2);
//! assert!(result.mesh.fits_u16_indices());
//! # Ok::<(), warp_refine::RefineError>(())
//! ```
//!
//! # Sessions
//!
//! A [`QuadRefiner`] is one refinement session: construct, refine, read
//! the output. Sessions own all their state, are single-threaded by
//! construction (`&mut self` mutation), and cannot be rewound; start a
//! new session to refine again.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod params;
mod queue;
mod refine;
mod result;

pub use error::{RefineError, RefineResult};
pub use params::{RefineParams, DEFAULT_MAX_STEPS, DEFAULT_TOLERANCE};
pub use refine::{refine_quad, QuadRefiner};
pub use result::Refinement;
