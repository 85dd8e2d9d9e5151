//! Greedy edge tour: admit the cheapest edges that keep every fragment a path.
//!
//! Edges are shuffled with a seeded generator and then sorted by weight, with
//! ties broken by endpoint ids. An edge is admitted when both endpoints still
//! have degree below two and it either joins two different fragments (while
//! fewer than `n - 1` edges are chosen) or closes the single remaining path
//! into a cycle (as the `n`-th edge). Fragments are tracked with the
//! union-find links of a [`ScratchArena`].

use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{debug, info, instrument};

use super::{Algorithm, Solution, Solver};
use crate::{
    distance::Distance,
    error::{Result, TspError},
    graph::{Edge, WeightedGraph},
    scratch::ScratchArena,
    tour::Tour,
};

/// Maximum degree of a vertex in a tour.
const MAX_DEGREE: u8 = 2;

/// Builds a tour from the cheapest admissible edges.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GreedySolver {
    shuffle_seed: u64,
}

impl GreedySolver {
    /// Creates a solver whose pre-sort shuffle is driven by `shuffle_seed`.
    #[must_use]
    pub const fn with_seed(shuffle_seed: u64) -> Self {
        Self { shuffle_seed }
    }
}

/// Selected edges and the tour that traverses them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GreedySolution {
    tour: Tour,
    edges: Vec<Edge>,
}

impl GreedySolution {
    /// Returns the selected edges in admission order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the summed weight of the selected edges.
    #[must_use]
    pub fn edge_weight(&self) -> Distance {
        self.edges.iter().map(Edge::weight).sum()
    }
}

impl Solution for GreedySolution {
    fn tour(&self) -> &Tour {
        &self.tour
    }
}

impl Solver for GreedySolver {
    type Solution = GreedySolution;
    const ALGORITHM: Algorithm = Algorithm::Greedy;

    #[instrument(
        name = "solver.greedy",
        skip_all,
        fields(points = graph.vertex_count(), shuffle_seed = self.shuffle_seed),
    )]
    fn solve(&self, graph: &WeightedGraph) -> Result<GreedySolution> {
        let count = graph.vertex_count();
        let candidates = self.sorted_edges(graph);

        match count {
            0 | 1 => {
                return Ok(GreedySolution {
                    tour: Tour::single(),
                    edges: Vec::new(),
                });
            }
            2 => {
                // The only edge is travelled out and back, so it is selected twice.
                let edges: Vec<Edge> = candidates
                    .iter()
                    .take(1)
                    .flat_map(|&edge| [edge, edge])
                    .collect();
                let distance: Distance = edges.iter().map(Edge::weight).sum();
                debug!(edges = edges.len(), "single edge doubled");
                return Ok(GreedySolution {
                    tour: Tour::with_distance(vec![0, 1, 0], distance),
                    edges,
                });
            }
            _ => {}
        }

        let mut scratch = ScratchArena::new(count);
        let edges = select_edges(&candidates, count, &mut scratch)?;
        let stops = traverse(graph, &edges, &mut scratch)?;
        let distance: Distance = edges.iter().map(Edge::weight).sum();
        info!(%distance, edges = edges.len(), "greedy tour built");
        Ok(GreedySolution {
            tour: Tour::with_distance(stops, distance),
            edges,
        })
    }
}

impl GreedySolver {
    fn sorted_edges(&self, graph: &WeightedGraph) -> Vec<Edge> {
        let mut edges = graph.edges().to_vec();
        let mut rng = SmallRng::seed_from_u64(self.shuffle_seed);
        edges.shuffle(&mut rng);
        edges.sort();
        edges
    }
}

fn select_edges(candidates: &[Edge], count: usize, scratch: &mut ScratchArena) -> Result<Vec<Edge>> {
    let mut degree = vec![0_u8; count];
    let mut chosen = Vec::with_capacity(count);

    for edge in candidates {
        if chosen.len() == count {
            break;
        }
        let (row, col) = (edge.row(), edge.col());
        if degree[row] >= MAX_DEGREE || degree[col] >= MAX_DEGREE {
            continue;
        }
        let joined = scratch.same_component(row, col)?;
        let admissible = if chosen.len() + 1 < count {
            !joined
        } else {
            joined
        };
        if !admissible {
            continue;
        }
        if !joined {
            merge(scratch, row, col)?;
        }
        degree[row] += 1;
        degree[col] += 1;
        debug!(row, col, weight = %edge.weight(), "edge admitted");
        chosen.push(*edge);
    }

    if chosen.len() != count {
        return Err(TspError::IncompleteTour {
            visited: chosen.len(),
            expected: count,
        });
    }
    Ok(chosen)
}

/// Joins the fragments of `row` and `col` by re-parenting one root.
fn merge(scratch: &mut ScratchArena, row: usize, col: usize) -> Result<()> {
    match (scratch.is_root(row)?, scratch.is_root(col)?) {
        (true, true) => scratch.set_parent(row, Some(col)),
        (true, false) => {
            let root = scratch.find_root(col)?;
            scratch.set_parent(row, Some(root))
        }
        (false, true) => {
            let root = scratch.find_root(row)?;
            scratch.set_parent(col, Some(root))
        }
        (false, false) => {
            let row_root = scratch.find_root(row)?;
            let col_root = scratch.find_root(col)?;
            scratch.set_parent(row_root, Some(col_root))
        }
    }
}

/// Walks the selected edges from vertex 0 until the walk returns to 0.
///
/// At each vertex the first unused selected edge in adjacency order is
/// followed.
fn traverse(graph: &WeightedGraph, edges: &[Edge], scratch: &mut ScratchArena) -> Result<Vec<usize>> {
    let count = graph.vertex_count();
    let mut incident = vec![Vec::with_capacity(2); count];
    for (index, edge) in edges.iter().enumerate() {
        incident[edge.row()].push(index);
        incident[edge.col()].push(index);
    }
    for slots in &mut incident {
        // Adjacency order of the graph is the order edges were created in,
        // which is row-major over the upper triangle.
        slots.sort_by_key(|&index| (edges[index].row(), edges[index].col()));
    }

    scratch.reset();
    let mut used = vec![false; edges.len()];
    let mut stops = Vec::with_capacity(count + 1);
    let mut current = 0;
    loop {
        stops.push(current);
        if stops.len() > count {
            break;
        }
        let Some(&next_edge) = incident[current].iter().find(|&&index| !used[index]) else {
            break;
        };
        used[next_edge] = true;
        current = edges[next_edge].follow(current, scratch)?;
        if current == 0 {
            stops.push(0);
            break;
        }
    }

    let tour = Tour::with_distance(stops, Distance::ZERO);
    if !tour.is_hamiltonian_cycle(count) {
        let visited = tour.stops().len().saturating_sub(1);
        return Err(TspError::IncompleteTour {
            visited,
            expected: count,
        });
    }
    Ok(tour.stops().to_vec())
}
