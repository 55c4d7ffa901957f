//! Domain layer: the red-black tree
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

mod balance;
pub mod error;
mod invariants;
pub mod node;
pub mod traversal;
pub mod tree;

pub use error::{DomainError, DomainResult, InvariantViolation};
pub use node::Colour;
pub use traversal::{DumpStyle, PreOrder};
pub use tree::OrderedTree;
