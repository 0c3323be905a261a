//! Result types for refinement operations.

// Mesh counts stay far below f64 precision
#![allow(clippy::cast_precision_loss)]

use warp_types::WarpedMesh;

/// Result of refining a projected quad to tolerance.
#[derive(Debug, Clone)]
pub struct Refinement {
    /// The refined mesh, flattened for the rendering layer.
    pub mesh: WarpedMesh,

    /// Triangles in the initial quad triangulation (always 2).
    pub initial_triangles: usize,

    /// Live triangles after refinement.
    pub final_triangles: usize,

    /// Vertices after refinement.
    pub final_vertices: usize,

    /// Edge-split steps performed.
    pub steps: usize,

    /// Worst live edge error when refinement stopped.
    pub worst_epsilon: f64,

    /// The tolerance that was targeted.
    pub tolerance: f64,
}

impl Refinement {
    /// Triangle growth factor relative to the initial triangulation.
    #[must_use]
    pub fn triangle_ratio(&self) -> f64 {
        if self.initial_triangles == 0 {
            1.0
        } else {
            self.final_triangles as f64 / self.initial_triangles as f64
        }
    }

    /// Check if any subdivision occurred.
    #[must_use]
    pub const fn was_refined(&self) -> bool {
        self.steps > 0
    }
}

impl std::fmt::Display for Refinement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Refinement: {} → {} triangles, {} vertices, {} steps, \
             worst edge error {:.3e} (tolerance {:.3e})",
            self.initial_triangles,
            self.final_triangles,
            self.final_vertices,
            self.steps,
            self.worst_epsilon,
            self.tolerance
        )
    }
}
