//! The complete weighted graph over a point set.
//!
//! Built once in `O(n²)` and read-only afterwards: an `n × n` symmetric weight
//! matrix, one [`Edge`] per unordered pair, and per-vertex adjacency lists
//! holding indices into the edge list.

use core::cmp::Ordering;

use tracing::{debug, instrument};

use crate::{
    distance::Distance,
    error::{Result, TspError},
    point::PointSet,
    scratch::ScratchArena,
};

/// Dense row-major matrix of rounded distances with a zero diagonal.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeightMatrix {
    size: usize,
    weights: Vec<Distance>,
}

impl WeightMatrix {
    fn from_points(points: &PointSet) -> Self {
        let size = points.len();
        let mut weights = Vec::with_capacity(size * size);
        for row in points.iter() {
            for col in points.iter() {
                weights.push(Distance::between(row, col));
            }
        }
        Self { size, weights }
    }

    /// Returns the number of rows (and columns).
    #[must_use]
    #[rustfmt::skip]
    pub fn size(&self) -> usize { self.size }

    /// Returns the weight between vertices `row` and `col`.
    ///
    /// # Panics
    /// Panics when either index is `>= size()`; indices come from the graph
    /// that owns the matrix.
    #[must_use]
    pub fn weight(&self, row: usize, col: usize) -> Distance {
        assert!(
            row < self.size && col < self.size,
            "weight ({row}, {col}) is outside a {size}x{size} matrix",
            size = self.size,
        );
        self.weights[row * self.size + col]
    }

    /// Sums the weights of consecutive stops along `path`.
    #[must_use]
    pub fn path_length(&self, path: &[usize]) -> Distance {
        path.windows(2)
            .map(|pair| self.weight(pair[0], pair[1]))
            .sum()
    }
}

/// An undirected edge `{row, col}` with `row < col`.
///
/// Edges order by weight, then row, then column, which is a total order
/// because every unordered pair appears exactly once.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    row: usize,
    col: usize,
    weight: Distance,
}

impl Edge {
    /// Creates an edge, normalising the endpoints so that `row <= col`.
    #[must_use]
    pub fn new(left: usize, right: usize, weight: Distance) -> Self {
        let (row, col) = if left <= right {
            (left, right)
        } else {
            (right, left)
        };
        Self { row, col, weight }
    }

    /// Returns the smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn row(&self) -> usize { self.row }

    /// Returns the larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn col(&self) -> usize { self.col }

    /// Returns the rounded edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> Distance { self.weight }

    /// Returns `true` when `vertex` is one of the endpoints.
    #[must_use]
    pub const fn touches(&self, vertex: usize) -> bool {
        self.row == vertex || self.col == vertex
    }

    /// Returns the endpoint opposite `vertex`.
    ///
    /// # Errors
    /// Returns [`TspError::BadVertex`] when `vertex` is not an endpoint.
    pub const fn other(&self, vertex: usize) -> Result<usize> {
        if vertex == self.row {
            Ok(self.col)
        } else if vertex == self.col {
            Ok(self.row)
        } else {
            Err(TspError::BadVertex {
                vertex,
                row: self.row,
                col: self.col,
            })
        }
    }

    /// Follows the edge away from `from`, recording `from` as the parent of
    /// the vertex reached.
    ///
    /// # Errors
    /// Returns [`TspError::BadVertex`] when `from` is not an endpoint and
    /// [`TspError::VertexOutOfRange`] when the reached vertex is outside
    /// `scratch`.
    pub fn follow(&self, from: usize, scratch: &mut ScratchArena) -> Result<usize> {
        let to = self.other(from)?;
        scratch.set_parent(to, Some(from))?;
        Ok(to)
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.row.cmp(&other.row))
            .then_with(|| self.col.cmp(&other.col))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Complete graph over a [`PointSet`] using rounded Euclidean weights.
///
/// # Examples
/// ```
/// use salesman_core::{Distance, PointSet, WeightedGraph};
///
/// let points = PointSet::from_coordinates(&[(0, 0), (3, 4), (6, 0)]).expect("non-empty");
/// let graph = WeightedGraph::new(points);
/// assert_eq!(graph.edges().len(), 3);
/// assert_eq!(graph.weights().weight(0, 1), Distance::from_hundredths(500));
/// assert_eq!(graph.weights().weight(1, 0), Distance::from_hundredths(500));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeightedGraph {
    points: PointSet,
    weights: WeightMatrix,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}

impl WeightedGraph {
    /// Builds the complete graph, creating edges in row-major order of the
    /// upper triangle and appending each to both endpoints' adjacency lists.
    #[must_use]
    #[instrument(name = "graph.build", level = "debug", skip(points), fields(points = points.len()))]
    pub fn new(points: PointSet) -> Self {
        let weights = WeightMatrix::from_points(&points);
        let size = points.len();
        let mut edges = Vec::with_capacity(size * size.saturating_sub(1) / 2);
        let mut adjacency = vec![Vec::with_capacity(size.saturating_sub(1)); size];

        for row in 0..size {
            for col in (row + 1)..size {
                let index = edges.len();
                edges.push(Edge::new(row, col, weights.weight(row, col)));
                adjacency[row].push(index);
                adjacency[col].push(index);
            }
        }

        debug!(edges = edges.len(), "built complete graph");
        Self {
            points,
            weights,
            edges,
            adjacency,
        }
    }

    /// Generates `count` points from `seed` and builds their graph.
    ///
    /// # Errors
    /// Propagates [`PointSet::generate`] failures.
    pub fn generate(count: usize, seed: u64) -> Result<Self> {
        PointSet::generate(count, seed).map(Self::new)
    }

    /// Returns the number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.points.len() }

    /// Returns the underlying point set.
    #[must_use]
    #[rustfmt::skip]
    pub fn points(&self) -> &PointSet { &self.points }

    /// Returns the weight matrix.
    #[must_use]
    #[rustfmt::skip]
    pub fn weights(&self) -> &WeightMatrix { &self.weights }

    /// Returns every edge, one per unordered pair.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Returns the indices (into [`Self::edges`]) of edges incident to `vertex`.
    #[must_use]
    pub fn incident(&self, vertex: usize) -> &[usize] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Iterates over the edges incident to `vertex` in creation order.
    pub fn incident_edges(&self, vertex: usize) -> impl Iterator<Item = (usize, &Edge)> + '_ {
        self.incident(vertex)
            .iter()
            .filter_map(|&index| self.edges.get(index).map(|edge| (index, edge)))
    }
}

#[cfg(test)]
mod tests;
