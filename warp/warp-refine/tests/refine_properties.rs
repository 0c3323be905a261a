//! Property-based tests for quad refinement.
//!
//! These tests use proptest to generate random smooth projections and
//! verify the refinement invariants hold for all of them.
//!
//! Run with: cargo test -p warp-refine --test refine_properties

use std::collections::HashMap;

use proptest::prelude::*;
use warp_refine::{refine_quad, RefineParams};
use warp_types::{Point2, Quad, WarpedMesh};

// =============================================================================
// Strategies
// =============================================================================

/// Parameters of a smooth, Lipschitz-continuous test projection
/// `[x + a1*sin(f1*y + p1), y + a2*sin(f2*x + p2)]`.
#[derive(Debug, Clone, Copy)]
struct Wave {
    amplitude: f64,
    frequency: f64,
    phase: f64,
}

fn arb_wave() -> impl Strategy<Value = Wave> {
    (-0.2..0.2f64, 0.0..5.0f64, 0.0..std::f64::consts::PI).prop_map(
        |(amplitude, frequency, phase)| Wave {
            amplitude,
            frequency,
            phase,
        },
    )
}

fn wave_projection(wx: Wave, wy: Wave) -> impl Fn(Point2<f64>) -> Point2<f64> {
    move |p: Point2<f64>| {
        Point2::new(
            p.x + wx.amplitude * (wx.frequency * p.y + wx.phase).sin(),
            p.y + wy.amplitude * (wy.frequency * p.x + wy.phase).sin(),
        )
    }
}

// =============================================================================
// Invariant checks
// =============================================================================

fn center(a: Point2<f64>, b: Point2<f64>) -> Point2<f64> {
    Point2::new(f64::midpoint(a.x, b.x), f64::midpoint(a.y, b.y))
}

/// Every edge of the output mesh must be used by exactly 1 or 2 triangles.
fn assert_manifold(mesh: &WarpedMesh) {
    let mut edge_uses: HashMap<(u32, u32), u32> = HashMap::new();
    for tri in mesh.triangles() {
        for i in 0..3 {
            let a = tri[i];
            let b = tri[(i + 1) % 3];
            let key = if a <= b { (a, b) } else { (b, a) };
            *edge_uses.entry(key).or_insert(0) += 1;
        }
    }
    for (edge, uses) in edge_uses {
        assert!(
            uses == 1 || uses == 2,
            "edge {edge:?} used by {uses} triangles"
        );
    }
}

/// Recompute every edge's error from scratch and check it against the
/// tolerance: the deviation between the projected source midpoint and the
/// linear midpoint of the projected endpoints.
fn assert_converged<F>(mesh: &WarpedMesh, forward: F, tolerance: f64)
where
    F: Fn(Point2<f64>) -> Point2<f64>,
{
    let source = |i: u32| {
        Point2::new(
            mesh.source_positions[i as usize * 2],
            mesh.source_positions[i as usize * 2 + 1],
        )
    };
    let projected = |i: u32| {
        Point2::new(
            mesh.positions[i as usize * 2],
            mesh.positions[i as usize * 2 + 1],
        )
    };

    for tri in mesh.triangles() {
        for i in 0..3 {
            let a = tri[i];
            let b = tri[(i + 1) % 3];
            let mid = center(source(a), source(b));
            let true_mid = forward(mid);
            let linear_mid = center(projected(a), projected(b));
            let epsilon = (true_mid - linear_mid).norm_squared();
            assert!(
                epsilon <= tolerance * (1.0 + 1e-9) + f64::EPSILON,
                "edge ({a}, {b}) error {epsilon:e} above tolerance {tolerance:e}"
            );
        }
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn refinement_invariants_hold(wx in arb_wave(), wy in arb_wave()) {
        let tolerance = 1e-4;
        let params = RefineParams::new().with_tolerance(tolerance);
        let forward = wave_projection(wx, wy);

        let result = refine_quad(&forward, &Quad::unit(), &params).unwrap();
        let mesh = &result.mesh;

        // Growth bookkeeping: one vertex per step, arrays in lockstep.
        prop_assert_eq!(mesh.vertex_count(), 4 + result.steps);
        prop_assert_eq!(mesh.positions.len(), mesh.uvs.len());
        prop_assert_eq!(mesh.positions.len(), mesh.source_positions.len());

        // Index bound.
        let vertex_count = mesh.vertex_count() as u32;
        prop_assert!(mesh.indices.iter().all(|&i| i < vertex_count));

        // UVs stay in the unit square (they are midpoints of midpoints of
        // the corner UVs).
        prop_assert!(mesh.uvs.iter().all(|&t| (0.0..=1.0).contains(&t)));

        assert_manifold(mesh);
        assert_converged(mesh, &forward, tolerance);
    }

    #[test]
    fn affine_projections_never_subdivide(
        scale in 0.1..10.0f64,
        shear in -1.0..1.0f64,
        tx in -100.0..100.0f64,
        ty in -100.0..100.0f64,
    ) {
        let affine = move |p: Point2<f64>| {
            Point2::new(scale * p.x + shear * p.y + tx, scale * p.y + ty)
        };
        let result = refine_quad(affine, &Quad::unit(), &RefineParams::default()).unwrap();

        prop_assert_eq!(result.steps, 0);
        prop_assert_eq!(result.final_triangles, 2);
    }
}
