//! Indexed binary min-heap used as Prim's fringe.
//!
//! Slots are numbered from 1: the root lives in slot 1 and the children of
//! slot `i` are `2i` and `2i + 1`. A position index maps each vertex to its
//! current slot so callers can find and rewrite a node's weight in place, then
//! restore order with [`FringeHeap::heapify`] (batched) or
//! [`FringeHeap::decrease_key`] (single node).

use core::cmp::Ordering;

use crate::{
    distance::Distance,
    error::{Result, TspError},
};

/// Initial number of node slots.
const INITIAL_CAPACITY: usize = 10;

/// Best known connecting weight of a fringe vertex.
///
/// `Unset` means no connecting edge has been seen yet. It orders after every
/// known weight, so an unset node behaves as infinitely far away.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FringeWeight {
    /// A connecting edge of this weight is known.
    Known(Distance),
    /// No connecting edge is known yet.
    #[default]
    Unset,
}

impl FringeWeight {
    /// Returns the known weight, if any.
    #[must_use]
    pub const fn known(self) -> Option<Distance> {
        match self {
            Self::Known(weight) => Some(weight),
            Self::Unset => None,
        }
    }

    /// Returns `true` when `candidate` is strictly better than this weight.
    #[must_use]
    pub fn improved_by(self, candidate: Distance) -> bool {
        Self::Known(candidate) < self
    }
}

impl Ord for FringeWeight {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Known(left), Self::Known(right)) => left.cmp(right),
            (Self::Known(_), Self::Unset) => Ordering::Less,
            (Self::Unset, Self::Known(_)) => Ordering::Greater,
            (Self::Unset, Self::Unset) => Ordering::Equal,
        }
    }
}

impl PartialOrd for FringeWeight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Distance> for FringeWeight {
    fn from(weight: Distance) -> Self {
        Self::Known(weight)
    }
}

/// A tree vertex waiting on the fringe: its id, the weight of its best known
/// connecting edge, and the tree vertex at the other end of that edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FringeNode {
    vertex: usize,
    weight: FringeWeight,
    parent: Option<usize>,
}

impl FringeNode {
    /// Creates a node with no known connection.
    #[must_use]
    pub const fn unset(vertex: usize) -> Self {
        Self {
            vertex,
            weight: FringeWeight::Unset,
            parent: None,
        }
    }

    /// Creates a node with an explicit weight and parent.
    #[must_use]
    pub const fn new(vertex: usize, weight: FringeWeight, parent: Option<usize>) -> Self {
        Self {
            vertex,
            weight,
            parent,
        }
    }

    /// Returns the vertex id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex(&self) -> usize { self.vertex }

    /// Returns the best known connecting weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> FringeWeight { self.weight }

    /// Returns the tree vertex this node would attach to.
    #[must_use]
    #[rustfmt::skip]
    pub const fn parent(&self) -> Option<usize> { self.parent }
}

/// Array-backed binary min-heap of [`FringeNode`]s keyed by weight.
///
/// # Examples
/// ```
/// use salesman_core::{Distance, FringeHeap, FringeNode, FringeWeight};
///
/// let mut heap = FringeHeap::new();
/// heap.insert(FringeNode::unset(1));
/// heap.insert(FringeNode::new(2, FringeWeight::Known(Distance::from_hundredths(30)), Some(0)));
/// heap.insert(FringeNode::new(3, FringeWeight::Known(Distance::from_hundredths(10)), Some(0)));
///
/// let order: Vec<usize> = std::iter::from_fn(|| heap.extract_min().ok())
///     .map(|node| node.vertex())
///     .collect();
/// assert_eq!(order, vec![3, 2, 1]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FringeHeap {
    nodes: Vec<FringeNode>,
    positions: Vec<Option<usize>>,
}

impl FringeHeap {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty heap with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            positions: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes in the heap.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.nodes.len() }

    /// Returns `true` when the heap holds no nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Returns the slot (1-based) currently holding `vertex`.
    #[must_use]
    pub fn slot_of(&self, vertex: usize) -> Option<usize> {
        self.positions.get(vertex).copied().flatten()
    }

    /// Returns the node for `vertex` if it is still on the heap.
    #[must_use]
    pub fn get(&self, vertex: usize) -> Option<&FringeNode> {
        self.slot_of(vertex).map(|slot| self.node(slot))
    }

    /// Returns the nodes in slot order, root first.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[FringeNode] { &self.nodes }

    /// Appends `node` at the next free slot and swims it up.
    ///
    /// A node whose vertex is already on the heap replaces nothing; callers
    /// insert each vertex once.
    pub fn insert(&mut self, node: FringeNode) {
        if self.nodes.len() == self.nodes.capacity() {
            // Grow by doubling.
            let additional = self.nodes.capacity().max(1);
            self.nodes.reserve_exact(additional);
        }
        if self.positions.len() <= node.vertex {
            self.positions.resize(node.vertex + 1, None);
        }
        self.nodes.push(node);
        let slot = self.nodes.len();
        self.positions[node.vertex] = Some(slot);
        self.swim(slot);
    }

    /// Returns the minimum node without removing it.
    ///
    /// # Errors
    /// Returns [`TspError::EmptyHeap`] when the heap is empty.
    pub fn peek(&self) -> Result<&FringeNode> {
        self.nodes.first().ok_or(TspError::EmptyHeap)
    }

    /// Removes and returns the minimum node.
    ///
    /// The last node takes the root's place and sinks until its children are
    /// no lighter than it.
    ///
    /// # Errors
    /// Returns [`TspError::EmptyHeap`] when the heap is empty.
    pub fn extract_min(&mut self) -> Result<FringeNode> {
        if self.nodes.is_empty() {
            return Err(TspError::EmptyHeap);
        }
        let root = self.nodes.swap_remove(0);
        self.positions[root.vertex] = None;
        if let Some(moved) = self.nodes.first() {
            self.positions[moved.vertex] = Some(1);
            self.sink(1);
        }
        Ok(root)
    }

    /// Rewrites the weight and parent of `vertex` without restoring heap
    /// order. Call [`Self::heapify`] once all rewrites are done.
    ///
    /// Returns `false` when `vertex` is not on the heap.
    pub fn set_entry(&mut self, vertex: usize, weight: FringeWeight, parent: Option<usize>) -> bool {
        let Some(slot) = self.slot_of(vertex) else {
            return false;
        };
        let node = &mut self.nodes[slot - 1];
        node.weight = weight;
        node.parent = parent;
        true
    }

    /// Lowers the weight of `vertex` and swims just that node back into place.
    ///
    /// Returns `false` when `vertex` is not on the heap or `weight` is not an
    /// improvement.
    pub fn decrease_key(&mut self, vertex: usize, weight: FringeWeight, parent: Option<usize>) -> bool {
        let Some(slot) = self.slot_of(vertex) else {
            return false;
        };
        if weight >= self.node(slot).weight {
            return false;
        }
        let node = &mut self.nodes[slot - 1];
        node.weight = weight;
        node.parent = parent;
        self.swim(slot);
        true
    }

    /// Restores heap order over the whole array by sinking every non-leaf
    /// slot, deepest first.
    pub fn heapify(&mut self) {
        for slot in (1..=self.nodes.len() / 2).rev() {
            self.sink(slot);
        }
    }

    /// Returns `true` when every node is no heavier than its children.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        (2..=self.nodes.len()).all(|slot| self.weight(slot / 2) <= self.weight(slot))
    }

    fn node(&self, slot: usize) -> &FringeNode {
        &self.nodes[slot - 1]
    }

    fn weight(&self, slot: usize) -> FringeWeight {
        self.node(slot).weight
    }

    fn swap(&mut self, left: usize, right: usize) {
        self.nodes.swap(left - 1, right - 1);
        self.positions[self.nodes[left - 1].vertex] = Some(left);
        self.positions[self.nodes[right - 1].vertex] = Some(right);
    }

    fn swim(&mut self, mut slot: usize) {
        // Unset orders last, so a known weight always rises past an unset
        // parent and an unset node never rises.
        while slot > 1 && self.weight(slot / 2) > self.weight(slot) {
            self.swap(slot, slot / 2);
            slot /= 2;
        }
    }

    fn sink(&mut self, mut slot: usize) {
        let len = self.nodes.len();
        while 2 * slot <= len {
            let left = 2 * slot;
            let right = left + 1;
            let smaller = if right <= len && self.weight(right) < self.weight(left) {
                right
            } else {
                left
            };
            if self.weight(slot) > self.weight(smaller) {
                self.swap(slot, smaller);
                slot = smaller;
            } else {
                break;
            }
        }
    }
}
