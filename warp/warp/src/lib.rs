//! Adaptive mesh warping for draping rasters onto arbitrary map projections.
//!
//! This umbrella crate re-exports the warp crates, providing a unified API
//! for turning a georeferenced quad plus a forward projection into a
//! render-ready triangle mesh that follows the projection's curvature.
//!
//! # Quick Start
//!
//! ```
//! use warp::prelude::*;
//!
//! // The projection comes from the caller; any closure over Point2 works.
//! let bend = |p: Point2<f64>| {
//!     Point2::new(p.x + 0.2 * (4.0 * p.y).sin(), p.y + 0.2 * (4.0 * p.x).sin())
//! };
//!
//! let params = RefineParams::new().with_tolerance(1e-6);
//! let result = refine_quad(bend, &Quad::unit(), &params)?;
//!
//! // Flat buffers, ready for vertex/index upload.
//! assert_eq!(result.mesh.positions.len(), result.mesh.uvs.len());
//! assert!(result.mesh.fits_u16_indices());
//! # Ok::<(), warp::refine::RefineError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Vocabulary: [`Quad`](types::Quad),
//!   [`Projection`](types::Projection), [`Vertex`](types::Vertex),
//!   [`WarpedMesh`](types::WarpedMesh)
//! - [`refine`] - The engine: [`refine_quad`](refine::refine_quad),
//!   [`QuadRefiner`](refine::QuadRefiner), parameters and errors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use warp_refine as refine;
pub use warp_types as types;

/// Commonly used items, ready for glob import.
pub mod prelude {
    pub use warp_refine::{
        refine_quad, QuadRefiner, RefineError, RefineParams, RefineResult, Refinement,
    };
    pub use warp_types::{
        Point2, Projection, Quad, UnitSquareProjection, Vector2, Vertex, WarpedMesh,
    };
}
