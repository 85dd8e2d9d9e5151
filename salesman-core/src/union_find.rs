//! Union-find over the parent links of a [`ScratchArena`].
//!
//! A vertex with no parent is a root. Finding a root compresses the path so
//! that every vertex visited on the way points straight at the root
//! afterwards. There is no union-by-rank and no dedicated union operation:
//! callers merge components by re-parenting a root with
//! [`ScratchArena::set_parent`].

use crate::{error::Result, scratch::ScratchArena};

impl ScratchArena {
    /// Returns `true` when `vertex` has no parent.
    ///
    /// # Errors
    /// Returns [`crate::TspError::VertexOutOfRange`] for an unknown vertex.
    pub fn is_root(&self, vertex: usize) -> Result<bool> {
        self.parent(vertex).map(|parent| parent.is_none())
    }

    /// Finds the root of `vertex`'s component, compressing the path to it.
    ///
    /// # Errors
    /// Returns [`crate::TspError::VertexOutOfRange`] for an unknown vertex.
    ///
    /// # Examples
    /// ```
    /// use salesman_core::ScratchArena;
    ///
    /// let mut scratch = ScratchArena::new(4);
    /// scratch.set_parent(0, Some(1))?;
    /// scratch.set_parent(1, Some(2))?;
    /// scratch.set_parent(2, Some(3))?;
    /// assert_eq!(scratch.find_root(0)?, 3);
    /// assert_eq!(scratch.parent(0)?, Some(3));
    /// # Ok::<(), salesman_core::TspError>(())
    /// ```
    pub fn find_root(&mut self, vertex: usize) -> Result<usize> {
        let mut root = vertex;
        while let Some(parent) = self.parent(root)? {
            root = parent;
        }

        let mut node = vertex;
        while let Some(parent) = self.parent(node)? {
            if parent != root {
                self.set_parent(node, Some(root))?;
            }
            node = parent;
        }

        Ok(root)
    }

    /// Returns `true` when `left` and `right` share a root.
    ///
    /// # Errors
    /// Returns [`crate::TspError::VertexOutOfRange`] for an unknown vertex.
    pub fn same_component(&mut self, left: usize, right: usize) -> Result<bool> {
        Ok(self.find_root(left)? == self.find_root(right)?)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    use crate::{ScratchArena, TspError};

    fn chain(len: usize) -> ScratchArena {
        let mut scratch = ScratchArena::new(len);
        for vertex in 0..len.saturating_sub(1) {
            scratch
                .set_parent(vertex, Some(vertex + 1))
                .expect("chain stays in range");
        }
        scratch
    }

    #[test]
    fn lone_vertex_is_its_own_root() {
        let mut scratch = ScratchArena::new(3);
        assert_eq!(scratch.is_root(1), Ok(true));
        assert_eq!(scratch.find_root(1), Ok(1));
    }

    #[test]
    fn find_root_compresses_every_visited_vertex() {
        let mut scratch = chain(5);
        assert_eq!(scratch.find_root(0), Ok(4));
        for vertex in 0..4 {
            assert_eq!(scratch.parent(vertex), Ok(Some(4)));
        }
        assert_eq!(scratch.is_root(4), Ok(true));
    }

    #[test]
    fn second_find_is_idempotent() {
        let mut scratch = chain(6);
        let first = scratch.find_root(1).expect("in range");
        let after_first = scratch.clone();
        let second = scratch.find_root(1).expect("in range");
        assert_eq!(first, second);
        assert_eq!(scratch, after_first);
    }

    #[test]
    fn same_component_follows_reparented_roots() {
        let mut scratch = ScratchArena::new(4);
        scratch.set_parent(0, Some(1)).expect("in range");
        scratch.set_parent(2, Some(3)).expect("in range");
        assert_eq!(scratch.same_component(0, 2), Ok(false));
        scratch.set_parent(1, Some(3)).expect("in range");
        assert_eq!(scratch.same_component(0, 2), Ok(true));
    }

    #[test]
    fn unknown_vertex_is_reported() {
        let mut scratch = ScratchArena::new(2);
        assert_eq!(
            scratch.find_root(2),
            Err(TspError::VertexOutOfRange {
                vertex: 2,
                vertex_count: 2
            })
        );
    }

    proptest! {
        #[test]
        fn compression_never_changes_roots(seed in any::<u64>(), len in 1_usize..64) {
            // Random forest: each vertex may point at a strictly larger id.
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut scratch = ScratchArena::new(len);
            for vertex in 0..len.saturating_sub(1) {
                if rng.gen_bool(0.7) {
                    let parent = rng.gen_range(vertex + 1..len);
                    scratch.set_parent(vertex, Some(parent)).expect("in range");
                }
            }
            let reference = scratch.clone();
            let expected: Vec<usize> = (0..len)
                .map(|vertex| {
                    let mut node = vertex;
                    while let Ok(Some(parent)) = reference.parent(node) {
                        node = parent;
                    }
                    node
                })
                .collect();

            for vertex in 0..len {
                let root = scratch.find_root(vertex).expect("in range");
                prop_assert_eq!(root, expected[vertex]);
                prop_assert_eq!(scratch.find_root(vertex).expect("in range"), root);
                let parent = scratch.parent(vertex).expect("in range");
                prop_assert!(parent.is_none() || parent == Some(root));
            }
        }
    }
}
