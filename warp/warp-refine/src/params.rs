//! Refinement parameters.

use crate::error::{RefineError, RefineResult};

/// Default target tolerance, in squared projected-space units.
///
/// Tuned for projected coordinates normalized to the unit square, where
/// this corresponds to sub-pixel deviation at any practical zoom level.
pub const DEFAULT_TOLERANCE: f64 = 1e-11;

/// Default ceiling on refinement steps.
///
/// Each step adds exactly one vertex, so this also bounds mesh growth.
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Parameters for quad refinement.
///
/// # Example
///
/// ```
/// use warp_refine::RefineParams;
///
/// let params = RefineParams::new()
///     .with_tolerance(1e-9)
///     .with_max_steps(10_000);
///
/// assert_eq!(params.tolerance, 1e-9);
/// assert_eq!(params.max_steps, 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefineParams {
    /// Target edge error, in squared projected-space units. Refinement
    /// stops once no live edge deviates from its true projected midpoint
    /// by more than this.
    pub tolerance: f64,

    /// Maximum number of refinement steps. A projection whose midpoint
    /// error never shrinks below `tolerance` (or that produces NaN
    /// coordinates) would otherwise refine forever; reaching this ceiling
    /// yields [`RefineError::ToleranceUnreachable`].
    pub max_steps: usize,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl RefineParams {
    /// Create parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the step ceiling.
    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Upper bound on the vertex count a session can reach.
    ///
    /// A session starts with the 4 quad corners and adds one vertex per
    /// step.
    #[must_use]
    pub const fn vertex_ceiling(&self) -> usize {
        4 + self.max_steps
    }

    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::InvalidTolerance`] if the tolerance is
    /// negative or NaN.
    pub fn validate(&self) -> RefineResult<()> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(RefineError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}
