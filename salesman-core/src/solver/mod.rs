//! Tour construction strategies over a [`WeightedGraph`].
//!
//! Each solver is a small configuration struct implementing [`Solver`]. A run
//! owns all of its mutable state, so the same graph can be handed to several
//! solvers in sequence (or in parallel by the caller) without interference.
//! [`solve`] dispatches on an [`Algorithm`] tag for callers that pick the
//! strategy at runtime.

mod bitonic;
mod exact;
mod greedy;
mod mst;

use core::fmt;

pub use bitonic::{BitonicSolution, BitonicSolver, DpTable};
pub use exact::{ExactSolution, ExactSolver};
pub use greedy::{GreedySolution, GreedySolver};
pub use mst::{FringePolicy, MstSolution, MstSolver};

use crate::{error::Result, graph::WeightedGraph, tour::Tour};

/// A tour construction strategy.
pub trait Solver {
    /// Everything the strategy reports beyond the tour itself.
    type Solution: Solution;

    /// Which algorithm this solver implements.
    const ALGORITHM: Algorithm;

    /// Builds a closed tour over every vertex of `graph`.
    ///
    /// # Errors
    /// Returns [`crate::TspError`] when an internal invariant breaks.
    fn solve(&self, graph: &WeightedGraph) -> Result<Self::Solution>;
}

/// Common view over solver results.
pub trait Solution {
    /// Returns the tour the solver produced.
    fn tour(&self) -> &Tour;
}

/// Names the four solving strategies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Algorithm {
    /// Exhaustive search over every tour starting at vertex 0.
    Exact,
    /// Preorder walk of a Prim minimum spanning tree.
    Mst,
    /// Cheapest-edge-first tour assembly.
    Greedy,
    /// Optimal bitonic tour by dynamic programming.
    Bitonic,
}

impl Algorithm {
    /// Every algorithm, in reporting order.
    pub const ALL: [Self; 4] = [Self::Exact, Self::Mst, Self::Greedy, Self::Bitonic];

    /// Returns the lowercase label used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Mst => "mst",
            Self::Greedy => "greedy",
            Self::Bitonic => "bitonic",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables for [`solve`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SolveOptions {
    /// Seed for the greedy solver's pre-sort shuffle.
    pub shuffle_seed: u64,
    /// How the MST solver restores fringe order.
    pub fringe_policy: FringePolicy,
}

/// The result of running one algorithm picked at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverOutcome {
    /// Result of [`ExactSolver`].
    Exact(ExactSolution),
    /// Result of [`MstSolver`].
    Mst(MstSolution),
    /// Result of [`GreedySolver`].
    Greedy(GreedySolution),
    /// Result of [`BitonicSolver`].
    Bitonic(BitonicSolution),
}

impl SolverOutcome {
    /// Returns which algorithm produced this outcome.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Exact(_) => Algorithm::Exact,
            Self::Mst(_) => Algorithm::Mst,
            Self::Greedy(_) => Algorithm::Greedy,
            Self::Bitonic(_) => Algorithm::Bitonic,
        }
    }

    /// Returns the tour regardless of algorithm.
    #[must_use]
    pub fn tour(&self) -> &Tour {
        match self {
            Self::Exact(solution) => solution.tour(),
            Self::Mst(solution) => solution.tour(),
            Self::Greedy(solution) => solution.tour(),
            Self::Bitonic(solution) => solution.tour(),
        }
    }
}

/// Runs `algorithm` over `graph`.
///
/// # Errors
/// Propagates the selected solver's error.
///
/// # Examples
/// ```
/// use salesman_core::{Algorithm, SolveOptions, WeightedGraph, solve};
///
/// let graph = WeightedGraph::generate(6, 7)?;
/// let exact = solve(Algorithm::Exact, &graph, &SolveOptions::default())?;
/// for algorithm in Algorithm::ALL {
///     let outcome = solve(algorithm, &graph, &SolveOptions::default())?;
///     assert!(exact.tour().distance() <= outcome.tour().distance());
/// }
/// # Ok::<(), salesman_core::TspError>(())
/// ```
pub fn solve(
    algorithm: Algorithm,
    graph: &WeightedGraph,
    options: &SolveOptions,
) -> Result<SolverOutcome> {
    Ok(match algorithm {
        Algorithm::Exact => SolverOutcome::Exact(ExactSolver.solve(graph)?),
        Algorithm::Mst => SolverOutcome::Mst(MstSolver::new(options.fringe_policy).solve(graph)?),
        Algorithm::Greedy => {
            SolverOutcome::Greedy(GreedySolver::with_seed(options.shuffle_seed).solve(graph)?)
        }
        Algorithm::Bitonic => SolverOutcome::Bitonic(BitonicSolver.solve(graph)?),
    })
}

#[cfg(test)]
mod tests;
