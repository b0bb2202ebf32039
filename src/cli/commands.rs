//! Command dispatch

use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::EditOutcome;
use crate::application::{SeedFile, Session, SessionReply};
use crate::cli::args::{AmountArgs, Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::render::{format_amount, format_variance, render_tree};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{AllocationTree, EditMode};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = resolve_project_dir(cli.project_dir.as_deref())?;
    let settings = Settings::load(Some(project_dir.as_path()))?;
    if !settings.display.color {
        colored::control::set_override(false);
    }
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Show) | None => cmd_show(&container, cli.seed.as_deref()),
        Some(Commands::Edit { id, amount }) => {
            cmd_edit(&container, cli.seed.as_deref(), id, amount)
        }
        Some(Commands::Variance { id }) => cmd_variance(&container, cli.seed.as_deref(), id),
        Some(Commands::Total) => cmd_total(&container, cli.seed.as_deref()),
        Some(Commands::Check) => cmd_check(&container, cli.seed.as_deref()),
        Some(Commands::Session) => cmd_session(&container, cli.seed.as_deref()),
        Some(Commands::Sample) => cmd_sample(),
        Some(Commands::Config { command }) => cmd_config(&container, &project_dir, command),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

fn resolve_project_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    match project_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir()
            .map_err(|e| CliError::from(InfraError::io("get current directory", e))),
    }
}

/// `--seed` wins over the configured seed.
fn load_tree(container: &ServiceContainer, seed: Option<&Path>) -> CliResult<AllocationTree> {
    let seed = seed.or(container.settings.seed.as_deref());
    debug!("seed: {:?}", seed);
    Ok(container.allocation.load(seed)?)
}

fn print_tree(container: &ServiceContainer, tree: &AllocationTree) {
    print!("{}", render_tree(tree, &container.settings.display));
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, seed: Option<&Path>) -> CliResult<()> {
    let tree = load_tree(container, seed)?;
    print_tree(container, &tree);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_edit(
    container: &ServiceContainer,
    seed: Option<&Path>,
    id: &str,
    amount: &AmountArgs,
) -> CliResult<()> {
    let (mode, raw) = match (&amount.percent, &amount.value) {
        (Some(p), None) => (EditMode::Percent, p.as_str()),
        (None, Some(v)) => (EditMode::Value, v.as_str()),
        _ => {
            return Err(CliError::Usage(
                "exactly one of --percent or --value is required".to_string(),
            ))
        }
    };

    let tree = load_tree(container, seed)?;
    let outcome = container.allocation.edit(&tree, id, mode, raw)?;
    match &outcome {
        EditOutcome::Applied { edit, .. } => output::success(&format!("{} {}", id, edit)),
        EditOutcome::NotFound { .. } => {
            output::warning(&format!("node not found: {} (tree unchanged)", id))
        }
    }
    let tree = outcome.into_tree();
    print_tree(container, &tree);
    report_inconsistencies(&tree);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_variance(container: &ServiceContainer, seed: Option<&Path>, id: &str) -> CliResult<()> {
    let tree = load_tree(container, seed)?;
    let node = tree
        .find(id)
        .ok_or_else(|| CliError::NodeNotFound(id.to_string()))?;
    output::action(
        node.label(),
        &format_variance(node.variance(), container.settings.display.color),
    );
    Ok(())
}

#[instrument(skip(container))]
fn cmd_total(container: &ServiceContainer, seed: Option<&Path>) -> CliResult<()> {
    let tree = load_tree(container, seed)?;
    output::info(&format_amount(tree.grand_total()));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer, seed: Option<&Path>) -> CliResult<()> {
    let tree = load_tree(container, seed)?;
    let count = report_inconsistencies(&tree);
    if count > 0 {
        return Err(CliError::Inconsistent { count });
    }
    output::success("every parent matches the sum of its children");
    Ok(())
}

/// Print one failure line per inconsistent parent; returns how many.
fn report_inconsistencies(tree: &AllocationTree) -> usize {
    let issues = tree.inconsistencies();
    for issue in &issues {
        output::failure(&format!(
            "{}: value {} but children sum to {}",
            issue.id,
            format_amount(issue.value),
            format_amount(issue.children_sum)
        ));
    }
    issues.len()
}

#[instrument(skip(container))]
fn cmd_session(container: &ServiceContainer, seed: Option<&Path>) -> CliResult<()> {
    let tree = load_tree(container, seed)?;
    let mut session = Session::new(container.allocation.clone(), tree);
    let interactive = io::stdin().is_terminal();

    if interactive {
        print_tree(container, session.tree());
        output::info("type 'help' for commands");
        output::prompt(">");
    }

    for line in io::stdin().lock().lines() {
        let line = line.map_err(|e| CliError::from(InfraError::io("read stdin", e)))?;
        match session.execute(&line) {
            Ok(SessionReply::Quit) => break,
            Ok(reply) => show_reply(container, &session, reply),
            // Rejected input never touches the tree; report and keep going
            Err(e) if e.is_recoverable() => output::error(&e),
            Err(e) => return Err(e.into()),
        }
        if interactive {
            output::prompt(">");
        }
    }

    if !interactive {
        print_tree(container, session.tree());
    }
    debug!(edits = session.edits(), "session finished");
    Ok(())
}

fn show_reply(container: &ServiceContainer, session: &Session, reply: SessionReply) {
    match reply {
        SessionReply::Updated { id } => output::success(&format!("updated {}", id)),
        SessionReply::NotFound { id } => {
            output::warning(&format!("node not found: {} (tree unchanged)", id))
        }
        SessionReply::Variance {
            label, variance, ..
        } => output::action(
            &label,
            &format_variance(variance, container.settings.display.color),
        ),
        SessionReply::Show => print_tree(container, session.tree()),
        SessionReply::Total(total) => output::info(&format_amount(total)),
        SessionReply::Inconsistencies(issues) if issues.is_empty() => {
            output::success("every parent matches the sum of its children")
        }
        SessionReply::Inconsistencies(_) => {
            report_inconsistencies(session.tree());
        }
        SessionReply::Help => output::info(crate::application::session::HELP),
        SessionReply::Quit | SessionReply::Nothing => {}
    }
}

fn cmd_sample() -> CliResult<()> {
    print!("{}", SeedFile::sample().to_toml()?);
    Ok(())
}

fn cmd_config(
    container: &ServiceContainer,
    project_dir: &Path,
    command: &ConfigCommands,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", container.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no global config directory on this platform"),
            }
            output::action("local", &local_config_path(project_dir).display());
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("no global config directory on this platform".to_string())
                })?
            } else {
                local_config_path(project_dir)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                container
                    .fs
                    .create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            container
                .fs
                .write(&path, &Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::action("Created", &path.display());
            Ok(())
        }
    }
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
