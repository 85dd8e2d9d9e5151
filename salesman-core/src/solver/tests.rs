//! Tests for runtime dispatch across solvers.

use rstest::rstest;

use super::{Algorithm, FringePolicy, SolveOptions, Solver, solve};
use crate::{BitonicSolver, ExactSolver, GreedySolver, MstSolver, WeightedGraph};

#[rstest]
#[case(Algorithm::Exact, "exact")]
#[case(Algorithm::Mst, "mst")]
#[case(Algorithm::Greedy, "greedy")]
#[case(Algorithm::Bitonic, "bitonic")]
fn algorithm_labels_are_stable(#[case] algorithm: Algorithm, #[case] label: &str) {
    assert_eq!(algorithm.as_str(), label);
    assert_eq!(algorithm.to_string(), label);
}

#[test]
fn solver_constants_match_their_algorithms() {
    assert_eq!(ExactSolver::ALGORITHM, Algorithm::Exact);
    assert_eq!(MstSolver::ALGORITHM, Algorithm::Mst);
    assert_eq!(GreedySolver::ALGORITHM, Algorithm::Greedy);
    assert_eq!(BitonicSolver::ALGORITHM, Algorithm::Bitonic);
}

#[rstest]
fn dispatch_tags_each_outcome(
    #[values(Algorithm::Exact, Algorithm::Mst, Algorithm::Greedy, Algorithm::Bitonic)]
    algorithm: Algorithm,
) {
    let graph = WeightedGraph::generate(6, 42).expect("valid count");
    let options = SolveOptions {
        shuffle_seed: 9,
        fringe_policy: FringePolicy::DecreaseKey,
    };
    let outcome = solve(algorithm, &graph, &options).expect("solver succeeds");
    assert_eq!(outcome.algorithm(), algorithm);
    assert!(outcome.tour().is_hamiltonian_cycle(6));
}

#[test]
fn exact_is_never_beaten() {
    let graph = WeightedGraph::generate(8, 1234).expect("valid count");
    let options = SolveOptions::default();
    let best = solve(Algorithm::Exact, &graph, &options)
        .expect("exact succeeds")
        .tour()
        .distance();
    for algorithm in Algorithm::ALL {
        let outcome = solve(algorithm, &graph, &options).expect("solver succeeds");
        assert!(best <= outcome.tour().distance(), "{algorithm} beat exact");
    }
}
