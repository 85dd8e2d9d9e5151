//! Closed tours and their rounded lengths.

use core::fmt;

use crate::{distance::Distance, graph::WeightMatrix};

/// A closed tour: the first and last stop are equal and every other vertex
/// appears exactly once in between.
///
/// # Examples
/// ```
/// use salesman_core::{PointSet, Tour, WeightedGraph};
///
/// let graph = WeightedGraph::new(PointSet::from_coordinates(&[(0, 0), (0, 3), (4, 0)])?);
/// let tour = Tour::from_stops(vec![0, 1, 2, 0], graph.weights());
/// assert_eq!(tour.distance().to_string(), "12.00");
/// assert_eq!(tour.to_string(), "0 1 2 0");
/// # Ok::<(), salesman_core::TspError>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Tour {
    stops: Vec<usize>,
    distance: Distance,
}

impl Tour {
    /// Builds a tour from `stops`, summing consecutive weights from `weights`.
    #[must_use]
    pub fn from_stops(stops: Vec<usize>, weights: &WeightMatrix) -> Self {
        let distance = weights.path_length(&stops);
        Self { stops, distance }
    }

    pub(crate) const fn with_distance(stops: Vec<usize>, distance: Distance) -> Self {
        Self { stops, distance }
    }

    /// The tour of a single-point set: just vertex 0, with zero length.
    #[must_use]
    pub fn single() -> Self {
        Self::with_distance(vec![0], Distance::ZERO)
    }

    /// Returns the stops in visiting order.
    #[must_use]
    #[rustfmt::skip]
    pub fn stops(&self) -> &[usize] { &self.stops }

    /// Returns the total rounded length.
    #[must_use]
    #[rustfmt::skip]
    pub const fn distance(&self) -> Distance { self.distance }

    /// Returns `true` when the tour starts and ends at the same vertex and
    /// visits each of `vertex_count` vertices exactly once in between.
    #[must_use]
    pub fn is_hamiltonian_cycle(&self, vertex_count: usize) -> bool {
        if vertex_count == 1 {
            return self.stops == [0];
        }
        if self.stops.len() != vertex_count + 1 || self.stops.first() != self.stops.last() {
            return false;
        }
        let mut seen = vec![false; vertex_count];
        for &stop in &self.stops[..vertex_count] {
            match seen.get_mut(stop) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stops = self.stops.iter();
        if let Some(first) = stops.next() {
            write!(f, "{first}")?;
        }
        for stop in stops {
            write!(f, " {stop}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Tour;
    use crate::Distance;

    #[rstest]
    #[case(vec![0], 1, true)]
    #[case(vec![0, 1, 0], 2, true)]
    #[case(vec![0, 2, 1, 3, 0], 4, true)]
    #[case(vec![0, 2, 2, 3, 0], 4, false)]
    #[case(vec![0, 1, 2, 3], 4, false)]
    #[case(vec![0, 1, 2, 1], 3, false)]
    #[case(vec![0, 1, 5, 0], 3, false)]
    fn recognises_hamiltonian_cycles(
        #[case] stops: Vec<usize>,
        #[case] vertex_count: usize,
        #[case] expected: bool,
    ) {
        let tour = Tour::with_distance(stops, Distance::ZERO);
        assert_eq!(tour.is_hamiltonian_cycle(vertex_count), expected);
    }

    #[test]
    fn single_tour_is_vertex_zero() {
        let tour = Tour::single();
        assert_eq!(tour.stops(), &[0]);
        assert_eq!(tour.distance(), Distance::ZERO);
        assert_eq!(tour.to_string(), "0");
    }
}
