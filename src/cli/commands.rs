//! Command dispatch: maps parsed arguments onto services.

use std::io;
use std::path::Path;

use clap::{Command, CommandFactory};
use clap_complete::{generate, Generator};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Commands::Completion { shell } = &cli.command {
        print_completions(*shell, &mut Cli::command());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Commands::Run {
            input,
            output,
            verify,
        } => run(&container, input, output.as_deref(), *verify),
        Commands::Show { input } => show(&container, input),
        Commands::Config { command } => config(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

#[instrument(level = "debug", skip(container))]
fn run(
    container: &ServiceContainer,
    input: &Path,
    output: Option<&Path>,
    verify: bool,
) -> CliResult<()> {
    if output == Some(input) {
        return Err(CliError::InvalidArgs(format!(
            "input and output are the same file: {}",
            input.display()
        )));
    }

    let report = container.script_service(verify).run_file(input)?;

    match output {
        Some(path) => {
            container
                .fs
                .write(path, &report.render())
                .map_err(|source| InfraError::Output {
                    path: path.to_path_buf(),
                    source,
                })?;
            debug!(lines = report.lines.len(), path = %path.display(), "results written");
        }
        None => {
            for line in &report.lines {
                output::info(line);
            }
        }
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn show(container: &ServiceContainer, input: &Path) -> CliResult<()> {
    let report = container.script_service(false).run_file(input)?;
    match (report.kind, report.shape) {
        (Some(kind), Some(shape)) => {
            output::header(&format!("{} tree: {}", kind, input.display()));
            output::info(&shape);
        }
        _ => output::warning(&format!("no tree built from {}", input.display())),
    }
    Ok(())
}

fn config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(no config directory)".into());
            output::action("global", &global);
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|()| container.fs.write(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}
