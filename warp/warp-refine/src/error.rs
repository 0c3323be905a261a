//! Error types for refinement operations.

use thiserror::Error;

/// Errors that can occur during quad refinement.
///
/// [`NonManifoldEdge`](RefineError::NonManifoldEdge) and
/// [`TriangleMismatch`](RefineError::TriangleMismatch) report internal
/// consistency failures: the mesh bookkeeping itself is corrupt, the
/// session is unusable, and retrying cannot help. They are distinct from
/// the configuration errors, which the caller can correct and retry.
#[derive(Debug, Error)]
pub enum RefineError {
    /// Tolerance is negative or NaN.
    #[error("Tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),

    /// A live edge ended up owned by three or more triangles.
    #[error("Edge ({v1}, {v2}) is owned by {owners} triangles; a manifold edge allows at most 2")]
    NonManifoldEdge {
        /// First endpoint vertex index.
        v1: u32,
        /// Second endpoint vertex index.
        v2: u32,
        /// Number of owning triangles found.
        owners: usize,
    },

    /// A popped edge matches no orientation of a triangle recorded as owning it.
    #[error("Triangle {triangle} does not contain edge ({v1}, {v2}) in any orientation")]
    TriangleMismatch {
        /// Arena slot of the offending triangle.
        triangle: usize,
        /// First endpoint vertex index.
        v1: u32,
        /// Second endpoint vertex index.
        v2: u32,
    },

    /// The step ceiling was reached with edge error still above tolerance.
    #[error(
        "Refinement stopped after {steps} steps with worst edge error {worst_epsilon:.3e} \
         above tolerance {tolerance:.3e}"
    )]
    ToleranceUnreachable {
        /// Steps performed before giving up.
        steps: usize,
        /// Worst live edge error at the stop.
        worst_epsilon: f64,
        /// The tolerance that could not be reached.
        tolerance: f64,
    },
}

/// Result type for refinement operations.
pub type RefineResult<T> = std::result::Result<T, RefineError>;
