//! Script execution service
//!
//! Runs a whitespace-separated command script against a freshly created
//! tree and collects one output line per command.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use termtree::Tree;
use tracing::{debug, instrument, warn};

use crate::application::command::{Command, Outcome};
use crate::application::element::{ElementKind, ScriptElement};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DumpStyle, OrderedTree};
use crate::infrastructure::traits::FileSystem;

/// Line written when the type token is neither `Integer` nor `String`.
pub const UNSUPPORTED_KIND: &str = "Only works for objects Integers and Strings";

/// A tree plus the rendering options commands need.
#[derive(Debug)]
pub struct Session<E> {
    tree: OrderedTree<E>,
    style: DumpStyle,
    verify: bool,
}

impl<E: ScriptElement> Session<E> {
    pub fn new(style: DumpStyle, verify: bool) -> Self {
        Self {
            tree: OrderedTree::new(),
            style,
            verify,
        }
    }

    /// Execute one token.
    ///
    /// Unparsable tokens are a normal [`Outcome::Error`]; only a failed
    /// invariant check in verify mode is an `Err`.
    pub fn execute(&mut self, token: &str) -> ApplicationResult<Outcome> {
        let Some(command) = Command::<E>::parse(token) else {
            debug!(token, "rejected token");
            return Ok(Outcome::Error(token.to_string()));
        };
        let outcome = match command {
            Command::Insert(value) => {
                let added = self.tree.insert(value);
                if self.verify {
                    self.tree.check_invariants()?;
                }
                Outcome::Bool(added)
            }
            Command::Contains(value) => Outcome::Bool(self.tree.contains(&value)),
            Command::PrintTree => Outcome::Dump(self.tree.dump_with(&self.style)),
        };
        Ok(outcome)
    }

    pub fn tree(&self) -> &OrderedTree<E> {
        &self.tree
    }
}

/// Everything a finished script produced.
#[derive(Debug, Default)]
pub struct ScriptReport {
    /// Element type chosen by the script, None if missing or unsupported
    pub kind: Option<ElementKind>,
    /// One entry per processed token
    pub lines: Vec<String>,
    /// Shape of the final tree
    pub shape: Option<Tree<String>>,
}

impl ScriptReport {
    /// Output text: every line newline-terminated.
    pub fn render(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

/// Service for running command scripts.
pub struct ScriptService {
    fs: Arc<dyn FileSystem>,
    style: DumpStyle,
    verify: bool,
}

impl ScriptService {
    pub fn new(fs: Arc<dyn FileSystem>, style: DumpStyle, verify: bool) -> Self {
        Self { fs, style, verify }
    }

    /// Read and run the script stored at `path`.
    ///
    /// Bytes that are not valid UTF-8 decode to U+FFFD; the tokens holding
    /// them still run.
    #[instrument(level = "debug", skip(self))]
    pub fn run_file(&self, path: &Path) -> ApplicationResult<ScriptReport> {
        let bytes = self
            .fs
            .read(path)
            .map_err(|source| ApplicationError::ScriptUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let script = String::from_utf8_lossy(&bytes);
        if matches!(script, Cow::Owned(_)) {
            warn!(path = %path.display(), "script is not valid UTF-8, decoded lossily");
        }
        self.run(&script)
    }

    /// Run a script held in memory.
    pub fn run(&self, script: &str) -> ApplicationResult<ScriptReport> {
        let mut tokens = script.split_whitespace();
        let Some(first) = tokens.next() else {
            debug!("empty script");
            return Ok(ScriptReport::default());
        };

        match ElementKind::from_token(first) {
            Some(kind @ ElementKind::Integer) => self.run_typed::<i32, _>(kind, tokens),
            Some(kind @ ElementKind::String) => self.run_typed::<String, _>(kind, tokens),
            None => {
                warn!(first, "unsupported element type");
                Ok(ScriptReport {
                    kind: None,
                    lines: vec![UNSUPPORTED_KIND.to_string()],
                    shape: None,
                })
            }
        }
    }

    fn run_typed<'a, E, I>(&self, kind: ElementKind, tokens: I) -> ApplicationResult<ScriptReport>
    where
        E: ScriptElement,
        I: Iterator<Item = &'a str>,
    {
        let mut session = Session::<E>::new(self.style.clone(), self.verify);
        let lines = tokens
            .map(|token| session.execute(token).map(|outcome| outcome.to_string()))
            .collect::<ApplicationResult<Vec<_>>>()?;
        debug!(%kind, commands = lines.len(), elements = session.tree().len(), "script done");

        Ok(ScriptReport {
            kind: Some(kind),
            lines,
            shape: Some(session.tree().to_termtree(&self.style)),
        })
    }
}
