//! Insert fix-up: recolouring and rotations.
//!
//! After a red leaf is attached the only rule that can break is "no red node
//! has a red child". Recolouring pushes the violation two levels up; a
//! rotation resolves it for good, so the loop ends after the first one.

use generational_arena::Index;
use tracing::trace;

use crate::domain::node::{Colour, Side};
use crate::domain::tree::OrderedTree;

impl<E> OrderedTree<E> {
    /// Restore the colour rules upward from the freshly inserted red node.
    pub(super) fn rebalance(&mut self, inserted: Index) {
        let mut x = inserted;

        while let Some(parent) = self.arena[x].parent {
            if !self.arena[parent].is_red() {
                return;
            }
            // a red parent is never the root, so the grandparent exists
            let Some(grand) = self.arena[parent].parent else {
                return;
            };
            let parent_side = self.side_of(parent, grand);

            match self.child(grand, parent_side.opposite()) {
                Some(uncle) if self.arena[uncle].is_red() => {
                    trace!("recolour");
                    self.recolour(parent, uncle, grand);
                    x = grand;
                }
                // absent uncle counts as black
                _ => {
                    if self.side_of(x, parent) == parent_side {
                        self.rotate_single(grand, parent_side);
                    } else {
                        self.rotate_double(grand, parent_side);
                    }
                    return;
                }
            }
        }
    }

    fn recolour(&mut self, parent: Index, uncle: Index, grand: Index) {
        self.arena[parent].colour = Colour::Black;
        self.arena[uncle].colour = Colour::Black;
        if self.root != Some(grand) {
            self.arena[grand].colour = Colour::Red;
        }
    }

    /// LL / RR case: lift the red child on `side` of `grand` above it.
    ///
    /// The child's inner subtree moves across to `grand`.
    fn rotate_single(&mut self, grand: Index, side: Side) {
        trace!(?side, "single rotation");
        let Some(pivot) = self.child(grand, side) else {
            return;
        };
        let inner = self.child(pivot, side.opposite());

        self.replace_in_parent(grand, pivot);
        self.set_child(grand, side, inner);
        self.set_child(pivot, side.opposite(), Some(grand));

        self.arena[pivot].colour = Colour::Black;
        self.arena[grand].colour = Colour::Red;
    }

    /// LR / RL case: the red grandchild zig-zagging below `grand` becomes
    /// the top, with the former parent and `grand` as its children.
    ///
    /// `side` is the slot of `grand` holding the red parent.
    fn rotate_double(&mut self, grand: Index, side: Side) {
        trace!(?side, "double rotation");
        let Some(parent) = self.child(grand, side) else {
            return;
        };
        let Some(middle) = self.child(parent, side.opposite()) else {
            return;
        };
        let toward_grand = self.child(middle, side.opposite());
        let toward_parent = self.child(middle, side);

        self.replace_in_parent(grand, middle);
        self.set_child(grand, side, toward_grand);
        self.set_child(parent, side.opposite(), toward_parent);
        self.set_child(middle, side.opposite(), Some(grand));
        self.set_child(middle, side, Some(parent));

        self.arena[middle].colour = Colour::Black;
        self.arena[grand].colour = Colour::Red;
    }
}
