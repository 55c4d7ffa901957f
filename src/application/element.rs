//! Element types a script can build trees over.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// First token of every script: selects the element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Integer,
    String,
}

impl ElementKind {
    /// Case-insensitive match against `Integer` / `String`.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("integer") {
            Some(ElementKind::Integer)
        } else if token.eq_ignore_ascii_case("string") {
            Some(ElementKind::String)
        } else {
            None
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Integer => write!(f, "Integer"),
            ElementKind::String => write!(f, "String"),
        }
    }
}

/// A value that can be stored in a script-driven tree.
pub trait ScriptElement: Ord + fmt::Display + fmt::Debug + Sized {
    /// Parse the value part of a `command:value` token.
    ///
    /// `None` turns the whole token into an error line.
    fn parse_token(raw: &str) -> Option<Self>;
}

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?\d+$").expect("integer pattern is valid"))
}

impl ScriptElement for i32 {
    /// Optional minus followed by ASCII digits, within `i32` range.
    fn parse_token(raw: &str) -> Option<Self> {
        if !integer_pattern().is_match(raw) {
            return None;
        }
        raw.parse().ok()
    }
}

impl ScriptElement for String {
    fn parse_token(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}
