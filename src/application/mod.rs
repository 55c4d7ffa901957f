//! Application layer: command scripts and the services that run them
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod command;
pub mod element;
pub mod error;
pub mod services;

pub use command::{Command, Outcome};
pub use element::{ElementKind, ScriptElement};
pub use error::{ApplicationError, ApplicationResult};
