//! Unit tests for graph construction and edge traversal.

use rstest::rstest;

use crate::{Distance, PointSet, ScratchArena, TspError};

use super::{Edge, WeightedGraph};

fn graph_from(coordinates: &[(i32, i32)]) -> WeightedGraph {
    WeightedGraph::new(PointSet::from_coordinates(coordinates).expect("non-empty coordinates"))
}

#[rstest]
#[case(1, 0)]
#[case(2, 1)]
#[case(5, 10)]
#[case(9, 36)]
fn builds_one_edge_per_unordered_pair(#[case] count: usize, #[case] expected: usize) {
    let graph = WeightedGraph::generate(count, 3).expect("generation must succeed");
    assert_eq!(graph.edges().len(), expected);
    for edge in graph.edges() {
        assert!(edge.row() < edge.col());
    }
    for vertex in 0..count {
        assert_eq!(graph.incident(vertex).len(), count - 1);
    }
}

#[test]
fn matrix_is_symmetric_with_zero_diagonal() {
    let graph = WeightedGraph::generate(8, 21).expect("generation must succeed");
    let weights = graph.weights();
    for row in 0..8 {
        assert_eq!(weights.weight(row, row), Distance::ZERO);
        for col in 0..8 {
            assert_eq!(weights.weight(row, col), weights.weight(col, row));
        }
    }
}

#[test]
fn edge_weights_match_matrix() {
    let graph = WeightedGraph::generate(7, 5).expect("generation must succeed");
    for edge in graph.edges() {
        assert_eq!(edge.weight(), graph.weights().weight(edge.row(), edge.col()));
    }
}

#[test]
fn construction_is_deterministic() {
    let first = WeightedGraph::generate(12, 77).expect("generation must succeed");
    let second = WeightedGraph::generate(12, 77).expect("generation must succeed");
    assert_eq!(first, second);
}

#[test]
fn edges_are_created_in_row_major_order() {
    let graph = graph_from(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
    let pairs: Vec<(usize, usize)> = graph.edges().iter().map(|e| (e.row(), e.col())).collect();
    assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    assert_eq!(graph.incident(2), &[1, 3, 5]);
}

#[test]
fn edges_order_by_weight_then_row_then_col() {
    let w = Distance::from_hundredths;
    let mut edges = vec![
        Edge::new(2, 3, w(100)),
        Edge::new(0, 4, w(100)),
        Edge::new(0, 1, w(50)),
        Edge::new(0, 3, w(100)),
    ];
    edges.sort();
    let ordered: Vec<(usize, usize)> = edges.iter().map(|e| (e.row(), e.col())).collect();
    assert_eq!(ordered, vec![(0, 1), (0, 3), (0, 4), (2, 3)]);
}

#[test]
fn follow_records_parent_of_reached_vertex() {
    let edge = Edge::new(1, 3, Distance::from_hundredths(10));
    let mut scratch = ScratchArena::new(4);

    assert_eq!(edge.follow(3, &mut scratch), Ok(1));
    assert_eq!(scratch.parent(1), Ok(Some(3)));
    assert_eq!(edge.follow(1, &mut scratch), Ok(3));
    assert_eq!(scratch.parent(3), Ok(Some(1)));
}

#[test]
fn follow_rejects_vertex_off_the_edge() {
    let edge = Edge::new(0, 2, Distance::from_hundredths(10));
    let mut scratch = ScratchArena::new(3);
    assert_eq!(
        edge.follow(1, &mut scratch),
        Err(TspError::BadVertex {
            vertex: 1,
            row: 0,
            col: 2
        })
    );
    assert_eq!(scratch.parent(0), Ok(None));
    assert_eq!(scratch.parent(2), Ok(None));
}

#[test]
fn path_length_sums_consecutive_weights() {
    let graph = graph_from(&[(0, 0), (3, 4), (6, 0)]);
    let length = graph.weights().path_length(&[0, 1, 2, 0]);
    assert_eq!(length, Distance::from_hundredths(500 + 500 + 600));
}
