//! Red-black ordered set with a command-script driver.
//!
//! [`domain::OrderedTree`] is the core: duplicate-free insertion, membership
//! tests and a colour-marked pre-order dump. The remaining layers read
//! command scripts, apply them to a tree and report one line per command.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{Colour, DomainError, DumpStyle, OrderedTree};
