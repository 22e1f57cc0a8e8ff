//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::TreeSession;
use crate::application::{Click, ForestRenderer};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, DisplayConfig, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".to_string()));
    };

    match command {
        Commands::Completion { shell } => cmd_completion(*shell),
        Commands::Config { command } => cmd_config(command, &load_settings(cli)?),
        Commands::Tree { all, no_ids } => cmd_tree(cli, *all, *no_ids),
        Commands::Flatten => cmd_flatten(cli),
        Commands::Select { clicks, all } => cmd_select(cli, clicks, *all),
        Commands::Check => cmd_check(cli),
    }
}

/// Layered settings with the `--catalog` flag applied on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let cwd = std::env::current_dir().map_err(|e| InfraError::io("resolve working directory", e))?;
    let mut settings = Settings::load(Some(&cwd))?;
    if let Some(catalog) = &cli.catalog {
        settings.catalog = Some(catalog.clone());
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn open_session(cli: &Cli) -> CliResult<(TreeSession, DisplayConfig)> {
    let settings = load_settings(cli)?;
    let display = settings.display.clone();
    let container = ServiceContainer::new(settings);
    let session = container.session(cli.sample)?;
    Ok((session, display))
}

fn print_forest(session: &TreeSession, display: &DisplayConfig) {
    let rendered =
        ForestRenderer::new(session.forest(), session.selection_state(), display).render_to_string();
    output::info(rendered.trim_end());
}

#[instrument(skip(cli))]
fn cmd_tree(cli: &Cli, all: bool, no_ids: bool) -> CliResult<()> {
    let (session, mut display) = open_session(cli)?;
    display.expand_all |= all;
    display.show_ids &= !no_ids;
    print_forest(&session, &display);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_flatten(cli: &Cli) -> CliResult<()> {
    let (session, _) = open_session(cli)?;
    let forest = session.forest();
    for (_, level, node) in forest.iter_with_level() {
        output::info(&format!("{}\t{}\t{}", level, node.id(), node.name()));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_select(cli: &Cli, clicks: &[String], all: bool) -> CliResult<()> {
    let clicks = clicks
        .iter()
        .map(|c| c.parse::<Click>())
        .collect::<Result<Vec<_>, _>>()?;

    let (mut session, mut display) = open_session(cli)?;
    display.expand_all |= all;

    for click in clicks {
        debug!("click: {}", click);
        session.apply(click);
    }

    match session.selection() {
        Some(entry) => output::action("selected", &entry),
        None => output::action("selected", "none"),
    }
    print_forest(&session, &display);
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_check(cli: &Cli) -> CliResult<()> {
    let (session, _) = open_session(cli)?;
    let forest = session.forest();

    let orphaned = forest.orphaned_groups();
    let unattached = forest.unattached_types();

    output::header(&format!(
        "{} group(s) in {} tree(s), depth {}",
        forest.len(),
        forest.roots().len(),
        forest.depth()
    ));
    for id in orphaned {
        output::failure(&format!("group #{id} has no reachable root"));
    }
    for id in unattached {
        output::failure(&format!("type #{id} references an unknown group"));
    }

    let problems = orphaned.len() + unattached.len();
    if problems > 0 {
        return Err(CliError::CheckFailed(problems));
    }
    output::success("catalog is consistent");
    Ok(())
}

fn cmd_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(settings.to_toml()?.trim_end()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no config directory available on this platform"),
            }
            let cwd = std::env::current_dir()
                .map_err(|e| InfraError::io("resolve working directory", e))?;
            output::action("local", &local_config_path(&cwd).display());
        }
        ConfigCommands::Template => output::info(Settings::template().trim_end()),
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
