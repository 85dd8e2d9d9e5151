//! Instrumentation emitted by the solvers.

use rstest::rstest;
use salesman_core::{
    BitonicSolver, ExactSolver, GreedySolver, MstSolver, Solver, TspError, WeightedGraph,
};
use salesman_test_support::tracing::CaptureLayer;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn capture<T>(run: impl FnOnce() -> T) -> (T, CaptureLayer) {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let value = tracing::subscriber::with_default(subscriber, run);
    (value, layer)
}

#[rstest]
#[case("solver.exact", "exact search finished")]
#[case("solver.mst", "mst tour built")]
#[case("solver.greedy", "greedy tour built")]
#[case("solver.bitonic", "bitonic tour built")]
fn each_solver_opens_a_span_and_reports_completion(#[case] span: &str, #[case] message: &str) {
    let graph = WeightedGraph::generate(6, 5).expect("valid count");
    let (result, layer) = capture(|| -> Result<(), TspError> {
        match span {
            "solver.exact" => ExactSolver.solve(&graph).map(drop),
            "solver.mst" => MstSolver::default().solve(&graph).map(drop),
            "solver.greedy" => GreedySolver::with_seed(5).solve(&graph).map(drop),
            _ => BitonicSolver.solve(&graph).map(drop),
        }
    });
    result.expect("solver succeeds");

    let record = layer.span(span).expect("solver span closes");
    assert_eq!(record.field("points"), Some("6"));
    assert!(layer.has_event(Level::INFO, message));
}

#[test]
fn greedy_logs_each_admitted_edge() {
    let graph = WeightedGraph::generate(7, 2).expect("valid count");
    let (solution, layer) = capture(|| GreedySolver::with_seed(2).solve(&graph));
    let solution = solution.expect("greedy succeeds");

    let admitted = layer
        .events()
        .iter()
        .filter(|event| event.level == Level::DEBUG && event.message() == Some("edge admitted"))
        .count();
    assert_eq!(admitted, solution.edges().len());
    let record = layer.span("solver.greedy").expect("greedy span closes");
    assert_eq!(record.field("shuffle_seed"), Some("2"));
}
