//! Structural self-check used by tests and the driver's verify mode.

use std::cmp::Ordering;
use std::fmt::Debug;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::error::InvariantViolation;
use crate::domain::tree::OrderedTree;

/// Exclusive bounds inherited from the ancestors of a subtree.
struct Bounds<'a, E> {
    lower: Option<&'a E>,
    upper: Option<&'a E>,
}

impl<E: Ord + Debug> OrderedTree<E> {
    /// Verify search order, uniqueness, colour rules, black-height,
    /// parent links and the recorded length.
    #[instrument(level = "debug", skip(self), fields(len = self.len))]
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.root else {
            return self.check_len(0);
        };
        let root_node = self.arena.get(root).ok_or(InvariantViolation::DanglingHandle)?;
        if root_node.is_red() {
            return Err(InvariantViolation::RedRoot);
        }
        if root_node.parent.is_some() {
            return Err(InvariantViolation::ParentLink {
                element: format!("{:?}", root_node.element),
            });
        }

        let mut reachable = 0;
        let bounds = Bounds {
            lower: None,
            upper: None,
        };
        let black_height = self.check_subtree(root, bounds, &mut reachable)?;
        debug!(black_height, reachable, "invariants hold");
        self.check_len(reachable)
    }

    fn check_len(&self, reachable: usize) -> Result<(), InvariantViolation> {
        if self.len == reachable {
            Ok(())
        } else {
            Err(InvariantViolation::Length {
                recorded: self.len,
                reachable,
            })
        }
    }

    /// Returns the black-height of the subtree rooted at `idx`, counting
    /// the node itself.
    fn check_subtree<'a>(
        &'a self,
        idx: Index,
        bounds: Bounds<'a, E>,
        reachable: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        let node = self.arena.get(idx).ok_or(InvariantViolation::DanglingHandle)?;
        *reachable += 1;
        let describe = || format!("{:?}", node.element);

        for (bound, expected) in [
            (bounds.lower, Ordering::Greater),
            (bounds.upper, Ordering::Less),
        ] {
            if let Some(bound) = bound {
                match node.element.cmp(bound) {
                    Ordering::Equal => {
                        return Err(InvariantViolation::Duplicate { element: describe() })
                    }
                    ord if ord != expected => {
                        return Err(InvariantViolation::Order { element: describe() })
                    }
                    _ => {}
                }
            }
        }

        let mut heights = [0usize; 2];
        for (slot, child) in [node.left, node.right].into_iter().enumerate() {
            let Some(child) = child else {
                continue;
            };
            let child_node = self.arena.get(child).ok_or(InvariantViolation::DanglingHandle)?;
            if child_node.parent != Some(idx) {
                return Err(InvariantViolation::ParentLink {
                    element: format!("{:?}", child_node.element),
                });
            }
            if node.is_red() && child_node.is_red() {
                return Err(InvariantViolation::RedRed { element: describe() });
            }
            let child_bounds = if slot == 0 {
                Bounds {
                    lower: bounds.lower,
                    upper: Some(&node.element),
                }
            } else {
                Bounds {
                    lower: Some(&node.element),
                    upper: bounds.upper,
                }
            };
            heights[slot] = self.check_subtree(child, child_bounds, reachable)?;
        }

        let [left, right] = heights;
        if left != right {
            return Err(InvariantViolation::BlackHeight {
                element: describe(),
                left,
                right,
            });
        }
        Ok(left + usize::from(node.colour.is_black()))
    }
}
