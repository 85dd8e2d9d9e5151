//! Per-run mutable vertex state.
//!
//! Solvers never mutate the graph. Whatever they need to remember about a
//! vertex (a parent link, a visited mark, the best connecting weight seen so
//! far) lives in a [`ScratchArena`] indexed by point id. Each solver run
//! builds its own arena, so no state leaks from one algorithm to the next.

use crate::{
    error::{Result, TspError},
    heap::FringeWeight,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct VertexRecord {
    parent: Option<usize>,
    visited: bool,
    best_weight: FringeWeight,
}

/// Arena of scratch records, one per vertex.
///
/// # Examples
/// ```
/// use salesman_core::ScratchArena;
///
/// let mut scratch = ScratchArena::new(3);
/// scratch.mark(1).expect("vertex 1 exists");
/// assert_eq!(scratch.is_visited(1), Ok(true));
/// scratch.reset();
/// assert_eq!(scratch.is_visited(1), Ok(false));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScratchArena {
    records: Vec<VertexRecord>,
}

impl ScratchArena {
    /// Creates an arena of `vertex_count` neutral records.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            records: vec![VertexRecord::default(); vertex_count],
        }
    }

    /// Returns the number of records.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.records.len() }

    /// Returns `true` when the arena holds no records.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Returns every record to its neutral state: no parent, unvisited, and
    /// no best weight.
    pub fn reset(&mut self) {
        self.records.fill(VertexRecord::default());
    }

    fn record(&self, vertex: usize) -> Result<&VertexRecord> {
        self.records.get(vertex).ok_or(TspError::VertexOutOfRange {
            vertex,
            vertex_count: self.records.len(),
        })
    }

    fn record_mut(&mut self, vertex: usize) -> Result<&mut VertexRecord> {
        let vertex_count = self.records.len();
        self.records
            .get_mut(vertex)
            .ok_or(TspError::VertexOutOfRange {
                vertex,
                vertex_count,
            })
    }

    /// Returns the parent link of `vertex`; `None` marks a root.
    ///
    /// # Errors
    /// Returns [`TspError::VertexOutOfRange`] for an unknown vertex.
    pub fn parent(&self, vertex: usize) -> Result<Option<usize>> {
        self.record(vertex).map(|record| record.parent)
    }

    /// Overwrites the parent link of `vertex`.
    ///
    /// # Errors
    /// Returns [`TspError::VertexOutOfRange`] when either `vertex` or the new
    /// parent is outside the arena.
    pub fn set_parent(&mut self, vertex: usize, parent: Option<usize>) -> Result<()> {
        if let Some(parent) = parent {
            self.record(parent)?;
        }
        self.record_mut(vertex)?.parent = parent;
        Ok(())
    }

    /// Returns whether `vertex` has been marked.
    ///
    /// # Errors
    /// Returns [`TspError::VertexOutOfRange`] for an unknown vertex.
    pub fn is_visited(&self, vertex: usize) -> Result<bool> {
        self.record(vertex).map(|record| record.visited)
    }

    /// Marks `vertex` as visited.
    ///
    /// # Errors
    /// Returns [`TspError::VertexOutOfRange`] for an unknown vertex.
    pub fn mark(&mut self, vertex: usize) -> Result<()> {
        self.record_mut(vertex)?.visited = true;
        Ok(())
    }

    /// Returns the best known connecting weight of `vertex`.
    ///
    /// # Errors
    /// Returns [`TspError::VertexOutOfRange`] for an unknown vertex.
    pub fn best_weight(&self, vertex: usize) -> Result<FringeWeight> {
        self.record(vertex).map(|record| record.best_weight)
    }

    /// Records a new best connecting weight for `vertex`.
    ///
    /// # Errors
    /// Returns [`TspError::VertexOutOfRange`] for an unknown vertex.
    pub fn set_best_weight(&mut self, vertex: usize, weight: FringeWeight) -> Result<()> {
        self.record_mut(vertex)?.best_weight = weight;
        Ok(())
    }
}
