//! Arena-backed red-black tree.
//!
//! Nodes live in a generational arena and refer to each other by [`Index`],
//! so the child/parent cycle never turns into shared ownership.

use std::borrow::Borrow;
use std::cmp::Ordering;

use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Colour, Node, Side};

/// Ordered set of unique elements kept balanced by red-black colouring.
///
/// Supports insertion without duplicates, membership tests and a pre-order
/// dump. Elements are never removed.
#[derive(Debug)]
pub struct OrderedTree<E> {
    /// Arena storage for all nodes
    pub(super) arena: Arena<Node<E>>,
    /// Index of the root node, None for an empty tree
    pub(super) root: Option<Index>,
    /// Number of stored elements
    pub(super) len: usize,
}

impl<E> Default for OrderedTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> OrderedTree<E> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Element held by the root node.
    pub fn root_element(&self) -> Option<&E> {
        self.root.map(|idx| &self.arena[idx].element)
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.arena[idx];
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Black nodes on the leftmost path from the root to an absent child.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            let node = &self.arena[idx];
            if node.colour.is_black() {
                count += 1;
            }
            cursor = node.left;
        }
        count
    }

    pub(super) fn child(&self, idx: Index, side: Side) -> Option<Index> {
        let node = &self.arena[idx];
        match side {
            Side::Left => node.left,
            Side::Right => node.right,
        }
    }

    /// Which slot of `parent` holds `child`.
    pub(super) fn side_of(&self, child: Index, parent: Index) -> Side {
        if self.arena[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Put `child` into `parent`'s slot and point the child back at `parent`.
    pub(super) fn set_child(&mut self, parent: Index, side: Side, child: Option<Index>) {
        let node = &mut self.arena[parent];
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
        if let Some(c) = child {
            self.arena[c].parent = Some(parent);
        }
    }

    /// Hang `new` where `old` is attached (its parent's slot or the root).
    pub(super) fn replace_in_parent(&mut self, old: Index, new: Index) {
        let owner = self.arena[old].parent;
        self.arena[new].parent = owner;
        match owner {
            Some(owner) => {
                let side = self.side_of(old, owner);
                let node = &mut self.arena[owner];
                match side {
                    Side::Left => node.left = Some(new),
                    Side::Right => node.right = Some(new),
                }
            }
            None => self.root = Some(new),
        }
    }
}

impl<E: Ord> OrderedTree<E> {
    /// Membership test by iterative descent from the root.
    pub fn contains<Q>(&self, probe: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            let node = &self.arena[idx];
            cursor = match probe.cmp(node.element.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Like [`contains`](Self::contains); an absent probe is never found.
    pub fn contains_opt<Q>(&self, probe: Option<&Q>) -> bool
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        probe.is_some_and(|p| self.contains(p))
    }

    /// Insert an element that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] for `None`; the tree is left
    /// untouched in that case.
    pub fn try_insert(&mut self, element: Option<E>) -> DomainResult<bool> {
        match element {
            Some(element) => Ok(self.insert(element)),
            None => Err(DomainError::InvalidArgument(
                "cannot insert an absent element",
            )),
        }
    }

    /// Insert `element` unless an equal one is already stored.
    ///
    /// Returns `true` if a node was added, `false` for a duplicate.
    #[instrument(level = "trace", skip_all, fields(len = self.len))]
    pub fn insert(&mut self, element: E) -> bool {
        let Some(mut current) = self.root else {
            let mut node = Node::leaf(element, None);
            node.colour = Colour::Black;
            self.root = Some(self.arena.insert(node));
            self.len = 1;
            trace!("inserted root");
            return true;
        };

        let side = loop {
            let node = &self.arena[current];
            let (side, next) = match element.cmp(&node.element) {
                Ordering::Less => (Side::Left, node.left),
                Ordering::Greater => (Side::Right, node.right),
                Ordering::Equal => {
                    trace!("duplicate rejected");
                    return false;
                }
            };
            match next {
                Some(next) => current = next,
                None => break side,
            }
        };

        let idx = self.arena.insert(Node::leaf(element, Some(current)));
        self.set_child(current, side, Some(idx));
        self.len += 1;
        self.rebalance(idx);
        true
    }
}
