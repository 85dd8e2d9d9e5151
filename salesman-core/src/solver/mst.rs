//! Prim's minimum spanning tree walked in preorder.
//!
//! Vertex 0 seeds the tree. Every other vertex starts on the fringe heap with
//! an unset weight. Each round extracts the lightest fringe vertex, adds it to
//! the tree and relaxes the edges to its still-unvisited neighbours. The tour
//! is the depth-first preorder of the finished tree (children visited in
//! ascending id order) closed back to vertex 0, so its length is at most twice
//! the optimum.

use tracing::{debug, info, instrument};

use super::{Algorithm, Solution, Solver};
use crate::{
    distance::Distance,
    error::{Result, TspError},
    graph::WeightedGraph,
    heap::{FringeHeap, FringeNode, FringeWeight},
    scratch::ScratchArena,
    tour::Tour,
};

/// How the fringe heap is put back in order after a round of relaxations.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FringePolicy {
    /// Rewrite every improved entry in place, then rebuild the heap once.
    #[default]
    BatchedHeapify,
    /// Swim each improved entry into place as soon as it changes.
    DecreaseKey,
}

/// Builds a tour from a Prim spanning tree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MstSolver {
    policy: FringePolicy,
}

impl MstSolver {
    /// Creates a solver using `policy` to maintain the fringe.
    #[must_use]
    pub const fn new(policy: FringePolicy) -> Self {
        Self { policy }
    }
}

/// The spanning tree and the tour walked from it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MstSolution {
    tour: Tour,
    parents: Vec<Option<usize>>,
    tree_weight: Distance,
    extraction_order: Vec<usize>,
}

impl MstSolution {
    /// Returns each vertex's parent in the tree; the root has none.
    #[must_use]
    #[rustfmt::skip]
    pub fn parents(&self) -> &[Option<usize>] { &self.parents }

    /// Returns the total weight of the tree edges.
    #[must_use]
    #[rustfmt::skip]
    pub const fn tree_weight(&self) -> Distance { self.tree_weight }

    /// Returns the vertices in the order they joined the tree.
    #[must_use]
    #[rustfmt::skip]
    pub fn extraction_order(&self) -> &[usize] { &self.extraction_order }

    /// Iterates over the tree edges as `(child, parent)` pairs.
    pub fn tree_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(child, parent)| parent.map(|parent| (child, parent)))
    }
}

impl Solution for MstSolution {
    fn tour(&self) -> &Tour {
        &self.tour
    }
}

impl Solver for MstSolver {
    type Solution = MstSolution;
    const ALGORITHM: Algorithm = Algorithm::Mst;

    #[instrument(name = "solver.mst", skip_all, fields(points = graph.vertex_count(), policy = ?self.policy))]
    fn solve(&self, graph: &WeightedGraph) -> Result<MstSolution> {
        let count = graph.vertex_count();
        if count <= 1 {
            return Ok(MstSolution {
                tour: Tour::single(),
                parents: vec![None; count],
                tree_weight: Distance::ZERO,
                extraction_order: vec![0],
            });
        }

        let mut scratch = ScratchArena::new(count);
        let mut heap = FringeHeap::with_capacity(count);
        for vertex in 1..count {
            heap.insert(FringeNode::unset(vertex));
        }

        let mut parents = vec![None; count];
        let mut extraction_order = Vec::with_capacity(count);
        let mut tree_weight = Distance::ZERO;

        extraction_order.push(0);
        scratch.mark(0)?;
        self.relax(graph, 0, &mut scratch, &mut heap)?;

        while !heap.is_empty() {
            let node = heap.extract_min()?;
            let vertex = node.vertex();
            let weight = node.weight().known().ok_or(TspError::IncompleteTour {
                visited: extraction_order.len(),
                expected: count,
            })?;
            debug!(vertex, parent = ?node.parent(), %weight, "vertex joined tree");
            parents[vertex] = node.parent();
            tree_weight += weight;
            extraction_order.push(vertex);
            scratch.mark(vertex)?;
            self.relax(graph, vertex, &mut scratch, &mut heap)?;
        }

        let stops = preorder(&parents, &mut scratch)?;
        let tour = Tour::from_stops(stops, graph.weights());
        info!(%tree_weight, distance = %tour.distance(), "mst tour built");
        Ok(MstSolution {
            tour,
            parents,
            tree_weight,
            extraction_order,
        })
    }
}

impl MstSolver {
    /// Offers every edge from `from` to an unvisited neighbour as a cheaper
    /// connection for that neighbour.
    fn relax(
        &self,
        graph: &WeightedGraph,
        from: usize,
        scratch: &mut ScratchArena,
        heap: &mut FringeHeap,
    ) -> Result<()> {
        for (_, edge) in graph.incident_edges(from) {
            let to = edge.other(from)?;
            if scratch.is_visited(to)? || !scratch.best_weight(to)?.improved_by(edge.weight()) {
                continue;
            }
            let weight = FringeWeight::Known(edge.weight());
            scratch.set_best_weight(to, weight)?;
            match self.policy {
                FringePolicy::BatchedHeapify => {
                    heap.set_entry(to, weight, Some(from));
                }
                FringePolicy::DecreaseKey => {
                    heap.decrease_key(to, weight, Some(from));
                }
            }
        }
        if self.policy == FringePolicy::BatchedHeapify {
            heap.heapify();
        }
        Ok(())
    }
}

/// Walks the tree depth-first from vertex 0 and closes the walk.
///
/// Children are pushed in descending id order so they pop ascending.
fn preorder(parents: &[Option<usize>], scratch: &mut ScratchArena) -> Result<Vec<usize>> {
    let count = parents.len();
    let mut children = vec![Vec::new(); count];
    for child in (0..count).rev() {
        if let Some(parent) = parents[child] {
            children[parent].push(child);
        }
    }

    scratch.reset();
    let mut stops = Vec::with_capacity(count + 1);
    let mut stack = vec![0];
    while let Some(vertex) = stack.pop() {
        if scratch.is_visited(vertex)? {
            continue;
        }
        scratch.mark(vertex)?;
        stops.push(vertex);
        stack.extend(children[vertex].iter().copied());
    }

    if stops.len() != count {
        return Err(TspError::IncompleteTour {
            visited: stops.len(),
            expected: count,
        });
    }
    stops.push(0);
    Ok(stops)
}
