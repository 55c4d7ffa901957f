//! Pre-order walks: iterator, textual dump and termtree rendering.

use std::fmt;

use generational_arena::Index;
use itertools::Itertools;
use termtree::Tree;

use crate::domain::node::Colour;
use crate::domain::tree::OrderedTree;

/// How a dump marks red nodes and separates elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpStyle {
    /// Prefix put in front of every red element
    pub red_marker: String,
    /// Text placed between consecutive elements
    pub separator: String,
}

impl Default for DumpStyle {
    fn default() -> Self {
        Self {
            red_marker: "*".into(),
            separator: " ".into(),
        }
    }
}

impl DumpStyle {
    fn label<E: fmt::Display>(&self, element: &E, colour: Colour) -> String {
        match colour {
            Colour::Red => format!("{}{}", self.red_marker, element),
            Colour::Black => element.to_string(),
        }
    }
}

/// Pre-order iterator: node, then its left subtree, then its right subtree.
pub struct PreOrder<'a, E> {
    tree: &'a OrderedTree<E>,
    stack: Vec<Index>,
}

impl<'a, E> PreOrder<'a, E> {
    fn new(tree: &'a OrderedTree<E>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a, E> Iterator for PreOrder<'a, E> {
    type Item = (&'a E, Colour);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = &self.tree.arena[idx];
        // right first so the left subtree is emitted first
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some((&node.element, node.colour))
    }
}

impl<E> OrderedTree<E> {
    pub fn iter(&self) -> PreOrder<'_, E> {
        PreOrder::new(self)
    }
}

impl<E: fmt::Display> OrderedTree<E> {
    /// Pre-order listing with red elements prefixed by `*`, space separated.
    pub fn dump(&self) -> String {
        self.dump_with(&DumpStyle::default())
    }

    pub fn dump_with(&self, style: &DumpStyle) -> String {
        self.iter()
            .map(|(element, colour)| style.label(element, colour))
            .join(&style.separator)
    }

    /// Render the tree shape; children appear left before right.
    pub fn to_termtree(&self, style: &DumpStyle) -> Tree<String> {
        fn build<E: fmt::Display>(
            tree: &OrderedTree<E>,
            idx: Index,
            style: &DumpStyle,
        ) -> Tree<String> {
            let node = &tree.arena[idx];
            let leaves: Vec<_> = [node.left, node.right]
                .into_iter()
                .flatten()
                .map(|child| build(tree, child, style))
                .collect();
            Tree::new(style.label(&node.element, node.colour)).with_leaves(leaves)
        }

        match self.root {
            Some(root) => build(self, root, style),
            None => Tree::new("(empty)".to_string()),
        }
    }
}

impl<E: fmt::Display> fmt::Display for OrderedTree<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}
