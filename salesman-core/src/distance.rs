//! Rounded Euclidean distances.
//!
//! Every distance is rounded to two decimal places at the point of
//! computation and all later accumulation works on the rounded value. Storing
//! the value as whole hundredths makes that rule exact: sums, comparisons and
//! tie-breaks never see floating-point noise.

use core::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
};

use crate::point::Point;

/// Number of hundredths in one distance unit.
const SCALE: u64 = 100;

/// A non-negative distance rounded to two decimal places.
///
/// # Examples
/// ```
/// use salesman_core::Distance;
///
/// let leg = Distance::from_raw(1.414_213_5);
/// assert_eq!(leg.hundredths(), 141);
/// assert_eq!(leg.to_string(), "1.41");
/// assert_eq!((leg + leg).to_string(), "2.82");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Distance(u64);

impl Distance {
    /// The zero distance.
    pub const ZERO: Self = Self(0);

    /// Builds a distance from a whole number of hundredths.
    #[must_use]
    #[rustfmt::skip]
    pub const fn from_hundredths(hundredths: u64) -> Self { Self(hundredths) }

    /// Rounds a raw, non-negative length to two decimal places.
    ///
    /// Negative or non-finite inputs clamp to zero; lengths computed from
    /// integer coordinates are always finite and non-negative.
    #[must_use]
    pub fn from_raw(raw: f64) -> Self {
        if !raw.is_finite() || raw <= 0.0 {
            return Self::ZERO;
        }
        Self((raw * SCALE as f64).round() as u64)
    }

    /// Computes the rounded Euclidean distance between two points.
    ///
    /// # Examples
    /// ```
    /// use salesman_core::{Distance, Point};
    ///
    /// let a = Point::new(0, 0, 0);
    /// let b = Point::new(1, 3, 4);
    /// assert_eq!(Distance::between(&a, &b), Distance::from_hundredths(500));
    /// ```
    #[must_use]
    pub fn between(left: &Point, right: &Point) -> Self {
        let dx = i64::from(left.x()) - i64::from(right.x());
        let dy = i64::from(left.y()) - i64::from(right.y());
        let squared = (dx * dx + dy * dy) as f64;
        Self::from_raw(squared.sqrt())
    }

    /// Returns the distance as whole hundredths.
    #[must_use]
    #[rustfmt::skip]
    pub const fn hundredths(self) -> u64 { self.0 }
}

impl Add for Distance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Distance> for Distance {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / SCALE, self.0 % SCALE)
    }
}
