//! Shared helpers for the core integration tests.

use salesman_core::{Tour, WeightedGraph};

/// Returns `true` when `tour`, read as a cycle from its leftmost point, moves
/// strictly right until the rightmost point and strictly left afterwards.
#[must_use]
pub fn is_bitonic(graph: &WeightedGraph, tour: &Tour) -> bool {
    let stops = tour.stops();
    if stops.len() <= 2 {
        return true;
    }
    let cycle = &stops[..stops.len() - 1];
    let x_of = |id: usize| graph.points().get(id).map_or(i32::MIN, |point| point.x());
    let Some(start) = (0..cycle.len()).min_by_key(|&slot| x_of(cycle[slot])) else {
        return true;
    };
    let xs: Vec<i32> = (0..cycle.len())
        .map(|offset| x_of(cycle[(start + offset) % cycle.len()]))
        .collect();

    let peak = xs
        .iter()
        .enumerate()
        .max_by_key(|&(_, x)| *x)
        .map_or(0, |(slot, _)| slot);
    let rising = xs[..=peak].windows(2).all(|pair| pair[0] < pair[1]);
    let falling = xs[peak..].windows(2).all(|pair| pair[0] > pair[1]);
    rising && falling
}

/// Returns the degree of every vertex in a set of undirected edges.
#[must_use]
pub fn degrees(vertex_count: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Vec<usize> {
    let mut degree = vec![0; vertex_count];
    for (row, col) in edges {
        degree[row] += 1;
        degree[col] += 1;
    }
    degree
}
