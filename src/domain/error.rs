//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent contract violations by the caller of the tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Structural defects found by [`crate::domain::OrderedTree::check_invariants`].
///
/// A correctly implemented tree never produces one of these; they exist so
/// tests and the `--verify` mode can say which rule broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("search order broken below node holding {element}")]
    Order { element: String },

    #[error("duplicate element {element}")]
    Duplicate { element: String },

    #[error("root is red")]
    RedRoot,

    #[error("red node {element} has a red child")]
    RedRed { element: String },

    #[error("black height differs below node holding {element}: {left} vs {right}")]
    BlackHeight {
        element: String,
        left: usize,
        right: usize,
    },

    #[error("parent link of node holding {element} does not match its owner")]
    ParentLink { element: String },

    #[error("dangling node handle in arena")]
    DanglingHandle,

    #[error("length mismatch: recorded {recorded}, reachable {reachable}")]
    Length { recorded: usize, reachable: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
