//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Red-black ordered set driven by command scripts
#[derive(Parser, Debug)]
#[command(name = "rbset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a command script and write one result line per command
    Run {
        /// Script: type token (Integer|String) followed by commands
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Result file (default: stdout)
        #[arg(value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Check tree invariants after every insert
        #[arg(long)]
        verify: bool,
    },

    /// Execute a script and show the final tree shape
    Show {
        /// Script file
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_run_with_flags_when_parsed_then_fields_set() {
        let cli = Cli::try_parse_from(["rbset", "-dd", "run", "in.txt", "out.txt", "--verify"])
            .expect("parse");
        assert_eq!(cli.debug, 2);
        match cli.command {
            Commands::Run {
                input,
                output,
                verify,
            } => {
                assert_eq!(input, PathBuf::from("in.txt"));
                assert_eq!(output, Some(PathBuf::from("out.txt")));
                assert!(verify);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_missing_input_when_parsed_then_error() {
        assert!(Cli::try_parse_from(["rbset", "run"]).is_err());
    }
}
