use generational_arena::Index;

/// Node colour used by the balancing discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    Red,
    Black,
}

impl Colour {
    pub fn is_red(self) -> bool {
        matches!(self, Colour::Red)
    }

    pub fn is_black(self) -> bool {
        matches!(self, Colour::Black)
    }
}

/// Tree node stored in the arena.
///
/// Children and parent are arena handles; the tree owns every node and
/// nodes never own each other.
#[derive(Debug)]
pub struct Node<E> {
    /// Stored element, fixed for the node's lifetime
    pub element: E,
    pub colour: Colour,
    /// Left child, None for an absent child
    pub left: Option<Index>,
    /// Right child, None for an absent child
    pub right: Option<Index>,
    /// Owning node, None only for the root
    pub parent: Option<Index>,
}

impl<E> Node<E> {
    /// New red leaf hanging below `parent`.
    pub fn leaf(element: E, parent: Option<Index>) -> Self {
        Self {
            element,
            colour: Colour::Red,
            left: None,
            right: None,
            parent,
        }
    }

    pub fn is_red(&self) -> bool {
        self.colour.is_red()
    }
}

/// Which child slot of its parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_leaf_when_created_then_is_red_without_children() {
        let node = Node::leaf(7, None);
        assert!(node.is_red());
        assert!(node.left.is_none());
        assert!(node.right.is_none());
        assert!(node.parent.is_none());
    }

    #[test]
    fn given_colour_when_queried_then_exactly_one_predicate_holds() {
        assert!(Colour::Red.is_red() && !Colour::Red.is_black());
        assert!(Colour::Black.is_black() && !Colour::Black.is_red());
    }

    #[test]
    fn given_side_when_flipped_then_returns_other_side() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }
}
