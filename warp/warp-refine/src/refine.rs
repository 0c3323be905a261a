//! Error-driven adaptive refinement of a projected quadrilateral.
//!
//! Rendering a projected quad as two flat triangles distorts wherever the
//! projection bends; uniform subdivision wastes triangles where it does
//! not. The refiner instead keeps every live edge in a priority queue
//! ordered by how far the edge's true projected midpoint deviates from
//! the midpoint of its projected endpoints, and repeatedly splits the
//! worst edge until that deviation is within tolerance everywhere.

// Mesh indices and counts don't overflow in practice
#![allow(clippy::cast_possible_truncation)]
// Algorithm uses standard mathematical variable names
#![allow(clippy::many_single_char_names)]

use std::cmp::Ordering;

use hashbrown::HashMap;
use nalgebra::{Point2, Vector2};
use tracing::{debug, trace};
use warp_types::{Projection, Quad, Vertex, WarpedMesh};

use crate::error::{RefineError, RefineResult};
use crate::params::RefineParams;
use crate::queue::BinaryQueue;
use crate::result::Refinement;

/// Canonical undirected edge key: smaller vertex index first, so
/// `(a, b)` and `(b, a)` resolve to the same segment.
type EdgeKey = (u32, u32);

const fn edge_key(v1: u32, v2: u32) -> EdgeKey {
    if v1 <= v2 { (v1, v2) } else { (v2, v1) }
}

/// A queued edge with its precomputed midpoint data.
///
/// `epsilon` is the squared distance between the projection of the edge's
/// source-space midpoint and the linear midpoint of the endpoints'
/// projected coordinates: the cost of rendering the edge straight.
#[derive(Debug, Clone)]
struct EdgeError {
    v1: u32,
    v2: u32,
    epsilon: f64,
    midpoint: Point2<f64>,
    projected_mid: Point2<f64>,
}

/// Worst edge first. NaN epsilons compare as equal rather than poisoning
/// the heap; the refinement loop stops on them separately.
fn worst_first(a: &EdgeError, b: &EdgeError) -> Ordering {
    b.epsilon.partial_cmp(&a.epsilon).unwrap_or(Ordering::Equal)
}

/// A slot in the growth-only triangle arena.
///
/// Split triangles are tombstoned in place and their children appended;
/// slots are never reused within a session, so triangle indices recorded
/// in segment owner sets stay valid for the session's lifetime.
#[derive(Debug, Clone, Copy)]
struct Triangle {
    vertices: [u32; 3],
    retired: bool,
}

/// One refinement session over a projected quad.
///
/// A session moves through construction, refinement, and output; there is
/// no way back. Start a new session for a new quad, projection, or
/// tolerance.
///
/// Most callers want the [`refine_quad`] convenience function instead of
/// driving a session by hand.
///
/// # Example
///
/// ```
/// use warp_refine::{QuadRefiner, RefineParams};
/// use warp_types::{Point2, Quad};
///
/// let bow = |p: Point2<f64>| Point2::new(p.x, p.y + 0.1 * (3.0 * p.x).sin());
/// let mut refiner = QuadRefiner::new(bow, &Quad::unit());
///
/// refiner.refine_to_tolerance(&RefineParams::new().with_tolerance(1e-6))?;
/// let mesh = refiner.output();
///
/// assert!(mesh.triangle_count() > 2);
/// # Ok::<(), warp_refine::RefineError>(())
/// ```
pub struct QuadRefiner<P: Projection> {
    projection: P,
    /// Growth-only; a vertex index is never reused.
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
    /// Live segments: canonical edge key to owning triangle slots (1 or 2).
    segments: HashMap<EdgeKey, Vec<u32>>,
    queue: BinaryQueue<EdgeError, fn(&EdgeError, &EdgeError) -> Ordering>,
    steps: usize,
}

impl<P: Projection> QuadRefiner<P> {
    /// Start a session: project the quad's corners, seed the two-triangle
    /// fan, and queue its six edges (the shared diagonal deduplicated).
    #[must_use]
    pub fn new(projection: P, quad: &Quad) -> Self {
        let mut refiner = Self {
            projection,
            vertices: Vec::with_capacity(8),
            triangles: Vec::with_capacity(4),
            segments: HashMap::new(),
            queue: BinaryQueue::new(worst_first),
            steps: 0,
        };

        for (corner, uv) in quad.corners().iter().zip(Quad::CORNER_UVS) {
            let projected = refiner.projection.forward(*corner);
            refiner
                .vertices
                .push(Vertex::new(*corner, projected, Vector2::new(uv[0], uv[1])));
        }

        let mut seed = Vec::with_capacity(6);
        for vertices in Quad::INITIAL_TRIANGLES {
            let slot = refiner.triangles.len() as u32;
            refiner.triangles.push(Triangle {
                vertices,
                retired: false,
            });
            for i in 0..3 {
                let entry = refiner.claim_segment(vertices[i], vertices[(i + 1) % 3], slot);
                seed.extend(entry);
            }
        }
        refiner.queue = BinaryQueue::from_vec(seed, worst_first);
        refiner
    }

    /// Split worst edges until no live edge error exceeds the tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::ToleranceUnreachable`] if the step ceiling
    /// is reached first, and passes through the internal-consistency
    /// errors of [`step`](Self::step).
    pub fn refine_to_tolerance(&mut self, params: &RefineParams) -> RefineResult<()> {
        while let Some(worst) = self.worst_epsilon() {
            if worst.is_nan() || worst <= params.tolerance {
                break;
            }
            if self.steps >= params.max_steps {
                return Err(RefineError::ToleranceUnreachable {
                    steps: self.steps,
                    worst_epsilon: worst,
                    tolerance: params.tolerance,
                });
            }
            self.step()?;
        }
        Ok(())
    }

    /// Split the edge with the worst error.
    ///
    /// Retires the edge's segment, allocates the midpoint vertex (UV is
    /// the exact mean of the endpoint UVs), and splits every owning
    /// triangle. Returns `false` if no live edge remains.
    ///
    /// # Errors
    ///
    /// Returns [`RefineError::NonManifoldEdge`] if the edge is owned by
    /// three or more triangles, or [`RefineError::TriangleMismatch`] if
    /// an owner does not contain the edge. Both mean the bookkeeping is
    /// corrupt and the session must be abandoned.
    pub fn step(&mut self) -> RefineResult<bool> {
        let Some((entry, owners)) = self.pop_live() else {
            return Ok(false);
        };
        if owners.len() >= 3 {
            return Err(RefineError::NonManifoldEdge {
                v1: entry.v1,
                v2: entry.v2,
                owners: owners.len(),
            });
        }

        let vm = self.vertices.len() as u32;
        let a = self.vertices[entry.v1 as usize];
        let b = self.vertices[entry.v2 as usize];
        self.vertices.push(Vertex::new(
            entry.midpoint,
            entry.projected_mid,
            (a.uv + b.uv) / 2.0,
        ));
        trace!(
            v1 = entry.v1,
            v2 = entry.v2,
            vm,
            epsilon = entry.epsilon,
            "Splitting edge"
        );

        for t in owners {
            self.split_triangle(entry.v1, entry.v2, vm, t)?;
        }
        self.steps += 1;
        Ok(true)
    }

    /// The refined mesh, flattened for the rendering layer.
    ///
    /// Positions, source positions, and UVs are in vertex-index order;
    /// indices cover the live (non-retired) triangles in creation order.
    #[must_use]
    pub fn output(&self) -> WarpedMesh {
        let mut positions = Vec::with_capacity(self.vertices.len() * 2);
        let mut source_positions = Vec::with_capacity(self.vertices.len() * 2);
        let mut uvs = Vec::with_capacity(self.vertices.len() * 2);
        for v in &self.vertices {
            positions.extend_from_slice(&[v.projected.x, v.projected.y]);
            source_positions.extend_from_slice(&[v.source.x, v.source.y]);
            uvs.extend_from_slice(&[v.uv.x, v.uv.y]);
        }

        let mut indices = Vec::with_capacity(self.triangles.len() * 3);
        for tri in &self.triangles {
            if !tri.retired {
                indices.extend_from_slice(&tri.vertices);
            }
        }

        WarpedMesh {
            positions,
            source_positions,
            uvs,
            indices,
        }
    }

    /// Worst live edge error, discarding stale queue entries on the way.
    ///
    /// `None` once no live edges remain.
    pub fn worst_epsilon(&mut self) -> Option<f64> {
        while let Some(entry) = self.queue.peek() {
            if self.segments.contains_key(&edge_key(entry.v1, entry.v2)) {
                return Some(entry.epsilon);
            }
            self.queue.pop();
        }
        None
    }

    /// Number of vertices registered so far.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live (non-retired) triangles.
    #[must_use]
    pub fn live_triangle_count(&self) -> usize {
        self.triangles.iter().filter(|t| !t.retired).count()
    }

    /// Number of edge-split steps performed.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Vertex by index, or `None` if out of bounds.
    #[must_use]
    pub fn vertex(&self, index: u32) -> Option<&Vertex> {
        self.vertices.get(index as usize)
    }

    /// Pop the worst live edge and retire its segment, discarding stale
    /// entries (edges retired behind the queue's back) along the way.
    fn pop_live(&mut self) -> Option<(EdgeError, Vec<u32>)> {
        while let Some(entry) = self.queue.pop() {
            let key = edge_key(entry.v1, entry.v2);
            if let Some(owners) = self.segments.remove(&key) {
                return Some((entry, owners));
            }
            trace!(v1 = entry.v1, v2 = entry.v2, "Discarding stale queue entry");
        }
        None
    }

    /// Record `owner` on the canonical edge `(v1, v2)`, creating the
    /// segment with its midpoint data on first reference. Repeat owners
    /// are ignored. Returns the queue entry for a newly created segment.
    fn claim_segment(&mut self, v1: u32, v2: u32, owner: u32) -> Option<EdgeError> {
        let key = edge_key(v1, v2);
        if let Some(owners) = self.segments.get_mut(&key) {
            if !owners.contains(&owner) {
                owners.push(owner);
            }
            return None;
        }

        let a = self.vertices[v1 as usize];
        let b = self.vertices[v2 as usize];
        let midpoint = Point2::new(
            f64::midpoint(a.source.x, b.source.x),
            f64::midpoint(a.source.y, b.source.y),
        );
        let projected_mid = self.projection.forward(midpoint);
        let linear_mid = Point2::new(
            f64::midpoint(a.projected.x, b.projected.x),
            f64::midpoint(a.projected.y, b.projected.y),
        );
        let epsilon = (projected_mid - linear_mid).norm_squared();

        self.segments.insert(key, vec![owner]);
        Some(EdgeError {
            v1,
            v2,
            epsilon,
            midpoint,
            projected_mid,
        })
    }

    /// Like [`claim_segment`](Self::claim_segment), but pushes a newly
    /// created segment straight into the queue (the split-time path).
    fn register_segment(&mut self, v1: u32, v2: u32, owner: u32) {
        if let Some(entry) = self.claim_segment(v1, v2, owner) {
            self.queue.push(entry);
        }
    }

    /// Replace triangle `t` by two children sharing the new vertex `vm`
    /// on edge `(v1, v2)`, preserving the parent's winding.
    fn split_triangle(&mut self, v1: u32, v2: u32, vm: u32, t: u32) -> RefineResult<()> {
        let tri = self.triangles[t as usize].vertices;

        // Scan the three cyclic rotations in both directions for the
        // split edge; exactly one must match.
        let mut matched = None;
        for i in 0..3 {
            let a = tri[i];
            let b = tri[(i + 1) % 3];
            let c = tri[(i + 2) % 3];
            if a == v1 && b == v2 {
                matched = Some((c, true));
                break;
            }
            if a == v2 && b == v1 {
                matched = Some((c, false));
                break;
            }
        }
        let Some((v3, forward)) = matched else {
            return Err(RefineError::TriangleMismatch {
                triangle: t as usize,
                v1,
                v2,
            });
        };

        self.triangles[t as usize].retired = true;
        let children = if forward {
            [[v1, vm, v3], [vm, v2, v3]]
        } else {
            [[vm, v1, v3], [v2, vm, v3]]
        };

        // The split edge itself is already retired; the two surviving
        // edges of the parent drop it from their owner sets.
        self.release_segment(v2, v3, t);
        self.release_segment(v3, v1, t);

        for vertices in children {
            let slot = self.triangles.len() as u32;
            self.triangles.push(Triangle {
                vertices,
                retired: false,
            });
            for i in 0..3 {
                self.register_segment(vertices[i], vertices[(i + 1) % 3], slot);
            }
        }
        Ok(())
    }

    /// Drop triangle `t` from the owner set of edge `(v1, v2)`, leaving
    /// any other owner in place.
    fn release_segment(&mut self, v1: u32, v2: u32, t: u32) {
        if let Some(owners) = self.segments.get_mut(&edge_key(v1, v2)) {
            owners.retain(|&owner| owner != t);
        }
    }
}

/// Refine a projected quad to tolerance in one call.
///
/// Validates `params`, runs a whole session, and returns the flattened
/// mesh together with refinement statistics.
///
/// # Errors
///
/// Returns [`RefineError::InvalidTolerance`] for a negative or NaN
/// tolerance, [`RefineError::ToleranceUnreachable`] if the step ceiling
/// is hit, or an internal-consistency error from the session itself.
///
/// # Example
///
/// ```
/// use warp_refine::{refine_quad, RefineParams};
/// use warp_types::{Point2, Quad};
///
/// let bend = |p: Point2<f64>| {
///     Point2::new(p.x + 0.3 * (6.0 * p.y).sin(), p.y + 0.3 * (6.0 * p.x).sin())
/// };
///
/// let params = RefineParams::new().with_tolerance(1e-6);
/// let result = refine_quad(bend, &Quad::unit(), &params)?;
///
/// assert!(result.mesh.triangle_count() > 2);
/// println!("{result}");
/// # Ok::<(), warp_refine::RefineError>(())
/// ```
pub fn refine_quad<P: Projection>(
    projection: P,
    quad: &Quad,
    params: &RefineParams,
) -> RefineResult<Refinement> {
    params.validate()?;

    debug!(
        tolerance = params.tolerance,
        max_steps = params.max_steps,
        "Refining projected quad"
    );
    let mut refiner = QuadRefiner::new(projection, quad);
    refiner.refine_to_tolerance(params)?;

    let worst_epsilon = refiner.worst_epsilon().unwrap_or(0.0);
    let mesh = refiner.output();
    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        steps = refiner.steps(),
        "Refinement converged"
    );

    Ok(Refinement {
        initial_triangles: Quad::INITIAL_TRIANGLES.len(),
        final_triangles: mesh.triangle_count(),
        final_vertices: mesh.vertex_count(),
        steps: refiner.steps(),
        worst_epsilon,
        tolerance: params.tolerance,
        mesh,
    })
}
