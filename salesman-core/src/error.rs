//! Error types for the salesman core library.
//!
//! Every failure mode of the solvers is an invariant violation rather than a
//! transient condition, so none of these errors are retried. Each variant
//! carries a stable code that callers can log without matching on messages.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced while building point sets or running a solver.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TspError {
    /// A point set must contain at least one point.
    #[error("point set must contain at least one point")]
    EmptyPointSet,
    /// The requested point count does not fit the integer coordinate domain.
    #[error("cannot place {requested} points; at most {limit} are supported")]
    TooManyPoints {
        /// Number of points requested by the caller.
        requested: usize,
        /// Largest supported point count.
        limit: usize,
    },
    /// An edge was followed from a vertex that is not one of its endpoints.
    #[error("vertex {vertex} does not connect to edge ({row}, {col})")]
    BadVertex {
        /// Vertex the edge was followed from.
        vertex: usize,
        /// Lower endpoint of the edge.
        row: usize,
        /// Higher endpoint of the edge.
        col: usize,
    },
    /// The fringe heap was asked for its minimum while empty.
    #[error("cannot extract the minimum of an empty fringe heap")]
    EmptyHeap,
    /// A vertex id fell outside the per-run scratch arena.
    #[error("vertex {vertex} is out of range for {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending vertex id.
        vertex: usize,
        /// Number of vertices in the arena.
        vertex_count: usize,
    },
    /// Tour reconstruction stopped before every vertex was visited.
    #[error("tour reconstruction visited {visited} of {expected} vertices")]
    IncompleteTour {
        /// Number of vertices placed on the tour.
        visited: usize,
        /// Number of vertices the tour must contain.
        expected: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`TspError`] variants.
    enum TspErrorCode for TspError {
        /// A point set must contain at least one point.
        EmptyPointSet => EmptyPointSet => "TSP_EMPTY_POINT_SET",
        /// The requested point count does not fit the coordinate domain.
        TooManyPoints => TooManyPoints { .. } => "TSP_TOO_MANY_POINTS",
        /// An edge was followed from a vertex that is not one of its endpoints.
        BadVertex => BadVertex { .. } => "TSP_BAD_VERTEX",
        /// The fringe heap was empty on extraction.
        EmptyHeap => EmptyHeap => "TSP_EMPTY_HEAP",
        /// A vertex id fell outside the scratch arena.
        VertexOutOfRange => VertexOutOfRange { .. } => "TSP_VERTEX_OUT_OF_RANGE",
        /// Tour reconstruction stopped early.
        IncompleteTour => IncompleteTour { .. } => "TSP_INCOMPLETE_TOUR",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T, E = TspError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{TspError, TspErrorCode};

    #[rstest]
    #[case(TspError::EmptyPointSet, TspErrorCode::EmptyPointSet, "TSP_EMPTY_POINT_SET")]
    #[case(TspError::EmptyHeap, TspErrorCode::EmptyHeap, "TSP_EMPTY_HEAP")]
    #[case(
        TspError::BadVertex { vertex: 4, row: 0, col: 1 },
        TspErrorCode::BadVertex,
        "TSP_BAD_VERTEX"
    )]
    #[case(
        TspError::IncompleteTour { visited: 2, expected: 5 },
        TspErrorCode::IncompleteTour,
        "TSP_INCOMPLETE_TOUR"
    )]
    fn codes_are_stable(
        #[case] error: TspError,
        #[case] code: TspErrorCode,
        #[case] label: &str,
    ) {
        assert_eq!(error.code(), code);
        assert_eq!(code.as_str(), label);
        assert_eq!(code.to_string(), label);
    }

    #[test]
    fn bad_vertex_message_names_the_edge() {
        let error = TspError::BadVertex {
            vertex: 7,
            row: 2,
            col: 3,
        };
        assert_eq!(error.to_string(), "vertex 7 does not connect to edge (2, 3)");
    }
}
