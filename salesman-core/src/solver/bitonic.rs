//! Shortest bitonic tour by dynamic programming.
//!
//! Points are ordered by x (ties keep id order). `L[i][j]` for `i < j` is the
//! length of the shortest pair of disjoint x-monotone paths that start at the
//! leftmost point and end at positions `i` and `j`, covering every position up
//! to `j`. `N[i][j]` records the position that precedes `j` on its path. The
//! tour closes the state `(n - 2, n - 1)` with the edge between those two
//! positions.

use tracing::{debug, info, instrument};

use super::{Algorithm, Solution, Solver};
use crate::{
    distance::Distance,
    error::{Result, TspError},
    graph::WeightedGraph,
    point::Point,
    scratch::ScratchArena,
    tour::Tour,
};

/// Square table indexed by sorted position pairs; only `i < j` cells are
/// meaningful.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DpTable<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> DpTable<T> {
    fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![T::default(); size * size],
        }
    }
}

impl<T> DpTable<T> {
    /// Returns the number of rows (and columns).
    #[must_use]
    #[rustfmt::skip]
    pub const fn size(&self) -> usize { self.size }

    /// Returns the cell at `(row, col)`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col)
    }

    /// Iterates over the rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.size.max(1))
    }

    fn cell(&self, row: usize, col: usize) -> &T {
        &self.cells[row * self.size + col]
    }

    fn set(&mut self, row: usize, col: usize, value: T) {
        self.cells[row * self.size + col] = value;
    }
}

/// Solves for the shortest bitonic tour.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BitonicSolver;

/// The bitonic tour plus the tables it was read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BitonicSolution {
    tour: Tour,
    order: Vec<usize>,
    lengths: DpTable<Distance>,
    predecessors: DpTable<Option<usize>>,
}

impl BitonicSolution {
    /// Returns point ids sorted by x; table indices are positions in this list.
    #[must_use]
    #[rustfmt::skip]
    pub fn order(&self) -> &[usize] { &self.order }

    /// Returns the path length table `L`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn lengths(&self) -> &DpTable<Distance> { &self.lengths }

    /// Returns the predecessor table `N`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn predecessors(&self) -> &DpTable<Option<usize>> { &self.predecessors }
}

impl Solution for BitonicSolution {
    fn tour(&self) -> &Tour {
        &self.tour
    }
}

impl Solver for BitonicSolver {
    type Solution = BitonicSolution;
    const ALGORITHM: Algorithm = Algorithm::Bitonic;

    #[instrument(name = "solver.bitonic", skip_all, fields(points = graph.vertex_count()))]
    fn solve(&self, graph: &WeightedGraph) -> Result<BitonicSolution> {
        let count = graph.vertex_count();
        let xs: Vec<i32> = graph.points().iter().map(Point::x).collect();
        let mut order: Vec<usize> = (0..count).collect();
        order.sort_by_key(|&id| xs[id]);

        let mut lengths = DpTable::new(count);
        let mut predecessors = DpTable::new(count);
        if count <= 1 {
            return Ok(BitonicSolution {
                tour: Tour::single(),
                order,
                lengths,
                predecessors,
            });
        }

        let weights = graph.weights();
        let leg = |from: usize, to: usize| weights.weight(order[from], order[to]);

        lengths.set(0, 1, leg(0, 1));
        predecessors.set(0, 1, Some(0));
        for j in 2..count {
            for i in 0..j {
                if i + 1 < j {
                    let extended = *lengths.cell(i, j - 1) + leg(j - 1, j);
                    lengths.set(i, j, extended);
                    predecessors.set(i, j, Some(j - 1));
                } else {
                    let mut best: Option<(Distance, usize)> = None;
                    for k in 0..i {
                        let candidate = *lengths.cell(k, i) + leg(k, j);
                        if best.is_none_or(|(shortest, _)| candidate < shortest) {
                            best = Some((candidate, k));
                        }
                    }
                    if let Some((length, k)) = best {
                        lengths.set(i, j, length);
                        predecessors.set(i, j, Some(k));
                    }
                }
            }
        }

        let distance = *lengths.cell(count - 2, count - 1) + leg(count - 2, count - 1);
        let mut scratch = ScratchArena::new(count);
        mark_upper_chain(&order, &predecessors, &mut scratch)?;
        let stops = close_cycle(&order, &scratch)?;
        debug!(stops = ?stops, "bitonic cycle assembled");
        info!(%distance, "bitonic tour built");

        Ok(BitonicSolution {
            tour: Tour::with_distance(stops, distance),
            order,
            lengths,
            predecessors,
        })
    }
}

/// Walks `N` back from `(n - 2, n - 1)`, marking every point that lies on the
/// chain ending at the rightmost position.
fn mark_upper_chain(
    order: &[usize],
    predecessors: &DpTable<Option<usize>>,
    scratch: &mut ScratchArena,
) -> Result<()> {
    let count = order.len();
    let (mut i, mut j) = (count - 2, count - 1);
    let mut j_on_upper = true;
    scratch.mark(order[j])?;

    while j > 1 {
        let previous = if j > i + 1 {
            j - 1
        } else {
            predecessors
                .get(i, j)
                .copied()
                .flatten()
                .ok_or(TspError::IncompleteTour {
                    visited: count - j,
                    expected: count,
                })?
        };
        if j_on_upper {
            scratch.mark(order[previous])?;
        }
        if j > i + 1 {
            j -= 1;
        } else {
            (i, j) = (previous, i);
            j_on_upper = !j_on_upper;
        }
    }
    Ok(())
}

/// Emits the leftmost point, the lower chain left to right, the rightmost
/// point and the upper chain right to left, rotated to start and end at
/// point 0.
fn close_cycle(order: &[usize], scratch: &ScratchArena) -> Result<Vec<usize>> {
    let count = order.len();
    let inner = &order[1..count - 1];

    let mut stops = Vec::with_capacity(count + 1);
    stops.push(order[0]);
    for &id in inner {
        if !scratch.is_visited(id)? {
            stops.push(id);
        }
    }
    stops.push(order[count - 1]);
    for &id in inner.iter().rev() {
        if scratch.is_visited(id)? {
            stops.push(id);
        }
    }

    let start = stops
        .iter()
        .position(|&id| id == 0)
        .ok_or(TspError::IncompleteTour {
            visited: stops.len(),
            expected: count,
        })?;
    stops.rotate_left(start);
    stops.push(0);
    Ok(stops)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{BitonicSolver, DpTable};
    use crate::{Distance, ExactSolver, PointSet, Solution, Solver, WeightedGraph};

    fn graph_of(coordinates: &[(i32, i32)]) -> WeightedGraph {
        WeightedGraph::new(PointSet::from_coordinates(coordinates).expect("non-empty"))
    }

    #[test]
    fn collinear_points_go_out_and_back() {
        let graph = graph_of(&[(0, 0), (1, 0), (2, 0)]);
        let solution = BitonicSolver.solve(&graph).expect("bitonic succeeds");
        assert_eq!(solution.tour().stops(), &[0, 1, 2, 0]);
        assert_eq!(solution.tour().distance(), Distance::from_hundredths(400));
        assert_eq!(solution.predecessors().get(0, 1), Some(&Some(0)));
        assert_eq!(solution.predecessors().get(0, 2), Some(&Some(1)));
        assert_eq!(solution.predecessors().get(1, 2), Some(&Some(0)));
        assert_eq!(solution.lengths().get(1, 2), Some(&Distance::from_hundredths(300)));
    }

    #[test]
    fn convex_quadrilateral_matches_exact() {
        let graph = graph_of(&[(0, 2), (1, 0), (3, 4), (4, 1)]);
        let bitonic = BitonicSolver.solve(&graph).expect("bitonic succeeds");
        let exact = ExactSolver.solve(&graph).expect("exact succeeds");
        assert_eq!(bitonic.tour().distance(), exact.tour().distance());
        // Same cycle as the exact tour, walked the other way round.
        assert_eq!(bitonic.tour().stops(), &[0, 2, 3, 1, 0]);
        assert_eq!(exact.tour().stops(), &[0, 1, 3, 2, 0]);
        assert_eq!(bitonic.tour().distance(), Distance::from_hundredths(1_217));
    }

    #[test]
    fn order_breaks_x_ties_by_id() {
        let graph = graph_of(&[(2, 0), (1, 5), (2, 3), (0, 1)]);
        let solution = BitonicSolver.solve(&graph).expect("bitonic succeeds");
        assert_eq!(solution.order(), &[3, 1, 0, 2]);
        assert!(solution.tour().is_hamiltonian_cycle(4));
    }

    #[rstest]
    #[case(2)]
    #[case(5)]
    #[case(9)]
    #[case(30)]
    fn table_total_matches_walked_tour(#[case] count: usize) {
        let graph = WeightedGraph::generate(count, 13).expect("valid count");
        let solution = BitonicSolver.solve(&graph).expect("bitonic succeeds");
        assert!(solution.tour().is_hamiltonian_cycle(count));
        assert_eq!(
            graph.weights().path_length(solution.tour().stops()),
            solution.tour().distance()
        );
    }

    #[test]
    fn single_point_has_empty_tables() {
        let graph = graph_of(&[(7, 7)]);
        let solution = BitonicSolver.solve(&graph).expect("bitonic succeeds");
        assert_eq!(solution.tour().stops(), &[0]);
        assert_eq!(solution.lengths().size(), 1);
        assert_eq!(solution.predecessors().get(0, 0), Some(&None));
    }

    #[test]
    fn table_lookups_outside_bounds_are_none() {
        let table: DpTable<Distance> = DpTable::new(3);
        assert_eq!(table.get(3, 0), None);
        assert_eq!(table.get(0, 3), None);
        assert_eq!(table.rows().count(), 3);
    }
}
