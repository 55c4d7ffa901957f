//! Script tokens and their results.
//!
//! A token is `command` or `command:value`; command names are
//! case-insensitive.

use std::fmt;

use crate::application::element::ScriptElement;

/// One parsed script request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<E> {
    Insert(E),
    Contains(E),
    PrintTree,
}

/// Split on `:` and drop trailing empty pieces (`"insert:"` has one piece).
fn pieces(token: &str) -> Vec<&str> {
    let mut pieces: Vec<&str> = token.split(':').collect();
    while pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }
    pieces
}

impl<E: ScriptElement> Command<E> {
    /// Parse a token; `None` means it must be reported as an error line.
    ///
    /// Pieces after the value are ignored. The value is parsed before the
    /// command name is looked at, so an unparsable value makes any token
    /// an error.
    pub fn parse(token: &str) -> Option<Self> {
        match pieces(token).as_slice() {
            [] => None,
            [name] => name
                .eq_ignore_ascii_case("printtree")
                .then_some(Command::PrintTree),
            [name, value, ..] => {
                let value = E::parse_token(value)?;
                if name.eq_ignore_ascii_case("insert") {
                    Some(Command::Insert(value))
                } else if name.eq_ignore_ascii_case("contains") {
                    Some(Command::Contains(value))
                } else {
                    None
                }
            }
        }
    }
}

/// Result of executing one token, rendered as one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Bool(bool),
    Dump(String),
    Error(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Bool(true) => write!(f, "True"),
            Outcome::Bool(false) => write!(f, "False"),
            Outcome::Dump(text) => write!(f, "{}", text),
            Outcome::Error(token) => write!(f, "Error in Line: {}", token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("insert:5", Some(Command::Insert(5)))]
    #[case("INSERT:-3", Some(Command::Insert(-3)))]
    #[case("Contains:12", Some(Command::Contains(12)))]
    #[case("printTree", Some(Command::PrintTree))]
    #[case("printtree:", Some(Command::PrintTree))]
    #[case("insert:5:9", Some(Command::Insert(5)))]
    #[case("insert:x", None)]
    #[case("insert:", None)]
    #[case("insert", None)]
    #[case("remove:5", None)]
    #[case("printtree:5", None)]
    #[case(":", None)]
    #[case(":5", None)]
    fn given_integer_token_when_parsed_then_expected_command(
        #[case] token: &str,
        #[case] expected: Option<Command<i32>>,
    ) {
        assert_eq!(Command::<i32>::parse(token), expected);
    }

    #[rstest]
    #[case("insert:apple", Some(Command::Insert("apple".to_string())))]
    #[case("contains:Apple", Some(Command::Contains("Apple".to_string())))]
    #[case("PRINTTREE", Some(Command::PrintTree))]
    #[case("printtree:apple", None)]
    #[case("delete:apple", None)]
    fn given_string_token_when_parsed_then_expected_command(
        #[case] token: &str,
        #[case] expected: Option<Command<String>>,
    ) {
        assert_eq!(Command::<String>::parse(token), expected);
    }

    #[test]
    fn given_outcomes_when_displayed_then_driver_text() {
        assert_eq!(Outcome::Bool(true).to_string(), "True");
        assert_eq!(Outcome::Bool(false).to_string(), "False");
        assert_eq!(Outcome::Dump("20 *10".into()).to_string(), "20 *10");
        assert_eq!(
            Outcome::Error("bogus".into()).to_string(),
            "Error in Line: bogus"
        );
    }
}
