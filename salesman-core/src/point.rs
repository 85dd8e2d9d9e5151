//! Point set model.
//!
//! Points are immutable once placed. Anything an algorithm needs to mutate per
//! vertex lives in [`crate::ScratchArena`], created fresh for every solver run.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::error::{Result, TspError};

/// A point on the integer plane with a stable identity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Point {
    id: usize,
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a point with identity `id` at `(x, y)`.
    #[must_use]
    pub const fn new(id: usize, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }

    /// Returns the point's stable identity in `0..n`.
    #[must_use]
    #[rustfmt::skip]
    pub const fn id(&self) -> usize { self.id }

    /// Returns the x coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn x(&self) -> i32 { self.x }

    /// Returns the y coordinate.
    #[must_use]
    #[rustfmt::skip]
    pub const fn y(&self) -> i32 { self.y }
}

/// An ordered, non-empty collection of points whose ids match their indices.
///
/// # Examples
/// ```
/// use salesman_core::PointSet;
///
/// let points = PointSet::generate(6, 42).expect("six points fit the plane");
/// assert_eq!(points.len(), 6);
/// let mut xs: Vec<i32> = points.iter().map(|point| point.x()).collect();
/// xs.sort_unstable();
/// assert_eq!(xs, vec![0, 1, 2, 3, 4, 5]);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Largest number of points [`Self::generate`] can place.
    pub const MAX_POINTS: usize = i32::MAX as usize;

    /// Places `count` points with distinct x coordinates using `seed`.
    ///
    /// Both coordinates are drawn from `0..count`: x from a generator seeded
    /// with `seed` and y from one seeded with `seed * 2`. A draw whose x has
    /// already been used is discarded, so the x coordinates end up being a
    /// permutation of `0..count`. The same `(count, seed)` pair always yields
    /// the same set.
    ///
    /// # Errors
    /// Returns [`TspError::EmptyPointSet`] when `count == 0` and
    /// [`TspError::TooManyPoints`] when `count` exceeds [`Self::MAX_POINTS`].
    #[instrument(name = "points.generate", level = "debug", err)]
    pub fn generate(count: usize, seed: u64) -> Result<Self> {
        if count == 0 {
            return Err(TspError::EmptyPointSet);
        }
        let bound = i32::try_from(count).map_err(|_| TspError::TooManyPoints {
            requested: count,
            limit: Self::MAX_POINTS,
        })?;

        let mut x_rng = SmallRng::seed_from_u64(seed);
        let mut y_rng = SmallRng::seed_from_u64(seed.wrapping_mul(2));
        let mut used_x = vec![false; count];
        let mut points = Vec::with_capacity(count);
        let mut rejected = 0_usize;

        while points.len() < count {
            let x = x_rng.gen_range(0..bound);
            let y = y_rng.gen_range(0..bound);
            let slot = &mut used_x[x as usize];
            if *slot {
                rejected += 1;
                continue;
            }
            *slot = true;
            points.push(Point::new(points.len(), x, y));
        }

        debug!(count, rejected, "placed points");
        Ok(Self { points })
    }

    /// Builds a point set from explicit coordinates, assigning ids in order.
    ///
    /// Coordinates are taken as given; callers wanting the bitonic solver's
    /// monotone chains should supply distinct x values.
    ///
    /// # Errors
    /// Returns [`TspError::EmptyPointSet`] when `coordinates` is empty.
    ///
    /// # Examples
    /// ```
    /// use salesman_core::PointSet;
    ///
    /// let square = PointSet::from_coordinates(&[(0, 0), (1, 4), (3, 0), (4, 4)])
    ///     .expect("non-empty");
    /// assert_eq!(square.get(2).map(|p| (p.x(), p.y())), Some((3, 0)));
    /// ```
    pub fn from_coordinates(coordinates: &[(i32, i32)]) -> Result<Self> {
        if coordinates.is_empty() {
            return Err(TspError::EmptyPointSet);
        }
        let points = coordinates
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Point::new(id, x, y))
            .collect();
        Ok(Self { points })
    }

    /// Returns the number of points.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.points.len() }

    /// Always `false`: point sets are never empty.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Returns the point with identity `id`.
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Point> {
        self.points.get(id)
    }

    /// Iterates over the points in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}
