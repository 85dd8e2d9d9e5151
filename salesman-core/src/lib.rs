//! Salesman core library: heuristic and exact tours over random planar points.
//!
//! A [`PointSet`] becomes a complete [`WeightedGraph`] whose weights are
//! Euclidean distances rounded to hundredths. Four solvers build closed tours
//! over it: [`ExactSolver`], [`MstSolver`], [`GreedySolver`] and
//! [`BitonicSolver`]. Solvers read the graph only; per-run vertex state lives
//! in a [`ScratchArena`].
#![cfg_attr(docsrs, feature(doc_cfg))]

mod distance;
mod error;
mod graph;
mod heap;
mod point;
mod scratch;
mod solver;
mod tour;
mod union_find;

pub use crate::{
    distance::Distance,
    error::{Result, TspError, TspErrorCode},
    graph::{Edge, WeightMatrix, WeightedGraph},
    heap::{FringeHeap, FringeNode, FringeWeight},
    point::{Point, PointSet},
    scratch::ScratchArena,
    solver::{
        Algorithm, BitonicSolution, BitonicSolver, DpTable, ExactSolution, ExactSolver,
        FringePolicy, GreedySolution, GreedySolver, MstSolution, MstSolver, Solution,
        SolveOptions, Solver, SolverOutcome, solve,
    },
    tour::Tour,
};
