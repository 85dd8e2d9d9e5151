//! Exhaustive search over every tour that starts and ends at vertex 0.

use tracing::{info, instrument};

use super::{Algorithm, Solution, Solver};
use crate::{distance::Distance, error::Result, graph::WeightedGraph, tour::Tour};

/// Enumerates the `(n - 1)!` orderings of vertices `1..n` in lexicographic
/// order and keeps the first shortest one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExactSolver;

/// Optimal tour plus the number of candidate tours measured.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExactSolution {
    tour: Tour,
    permutations: u64,
}

impl ExactSolution {
    /// Returns how many candidate tours were measured.
    #[must_use]
    #[rustfmt::skip]
    pub const fn permutations(&self) -> u64 { self.permutations }
}

impl Solution for ExactSolution {
    fn tour(&self) -> &Tour {
        &self.tour
    }
}

impl Solver for ExactSolver {
    type Solution = ExactSolution;
    const ALGORITHM: Algorithm = Algorithm::Exact;

    fn solve(&self, graph: &WeightedGraph) -> Result<ExactSolution> {
        Ok(self.solve_with_trace(graph, |_, _| {}))
    }
}

impl ExactSolver {
    /// Runs the search, calling `trace` with every candidate tour and its
    /// length in enumeration order.
    ///
    /// # Examples
    /// ```
    /// use salesman_core::{ExactSolver, WeightedGraph};
    ///
    /// let graph = WeightedGraph::generate(4, 3)?;
    /// let mut seen = Vec::new();
    /// let solution = ExactSolver.solve_with_trace(&graph, |path, _| seen.push(path.to_vec()));
    /// assert_eq!(seen.len(), 6);
    /// assert_eq!(seen[0], vec![0, 1, 2, 3, 0]);
    /// assert_eq!(seen[5], vec![0, 3, 2, 1, 0]);
    /// assert_eq!(solution.permutations(), 6);
    /// # Ok::<(), salesman_core::TspError>(())
    /// ```
    #[instrument(name = "solver.exact", skip_all, fields(points = graph.vertex_count()))]
    pub fn solve_with_trace(
        &self,
        graph: &WeightedGraph,
        mut trace: impl FnMut(&[usize], Distance),
    ) -> ExactSolution {
        let count = graph.vertex_count();
        if count <= 1 {
            return ExactSolution {
                tour: Tour::single(),
                permutations: 1,
            };
        }

        let weights = graph.weights();
        let mut path: Vec<usize> = (0..count).chain(core::iter::once(0)).collect();
        let mut best: Option<(Distance, Vec<usize>)> = None;
        let mut permutations = 0_u64;

        loop {
            let length = weights.path_length(&path);
            permutations += 1;
            trace(path.as_slice(), length);
            if best.as_ref().is_none_or(|(shortest, _)| length < *shortest) {
                best = Some((length, path.clone()));
            }
            if !next_permutation(&mut path[1..count]) {
                break;
            }
        }

        let (distance, stops) = best.unwrap_or_else(|| (Distance::ZERO, vec![0]));
        info!(permutations, %distance, "exact search finished");
        ExactSolution {
            tour: Tour::with_distance(stops, distance),
            permutations,
        }
    }
}

/// Rearranges `items` into the next lexicographically greater ordering.
///
/// Returns `false`, leaving `items` untouched, when it is already the last.
fn next_permutation(items: &mut [usize]) -> bool {
    let Some(pivot) = items.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };
    // The suffix after `pivot` is non-increasing, so the rightmost larger
    // element is the smallest one.
    let Some(successor) = items.iter().rposition(|&item| item > items[pivot]) else {
        return false;
    };
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}
