//! Command dispatch: settings → classifier → output

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::Classifier;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::Level;
use crate::infrastructure::DataProvider;

/// Run the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see 'isic4 --help'".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = effective_settings(cli)?;
    debug!("effective settings: {:?}", settings);
    dispatch(command, &settings)
}

/// Run one subcommand against already resolved settings.
pub fn dispatch(command: &Commands, settings: &Settings) -> CliResult<()> {
    match command {
        Commands::Config { template } => _config(settings, *template),
        Commands::Languages => _languages(settings),
        Commands::Section { code } => _show(settings, Level::Section, code),
        Commands::Division { code } => _show(settings, Level::Division, code),
        Commands::Group { code } => _show(settings, Level::Group, code),
        Commands::Class { code } => _show(settings, Level::Class, code),
        Commands::Get { code } => _get(settings, code),
        Commands::Search { query, tree } => _search(settings, query, *tree),
        Commands::Completion { .. } => Ok(()),
    }
}

/// Layered settings with command line flags applied last.
pub fn effective_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load(cli.config.as_deref())?;
    Ok(apply_cli_overrides(settings, cli))
}

/// Overlay the global command line flags on loaded settings.
pub fn apply_cli_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(language) = &cli.language {
        settings.language = language.to_lowercase();
    }
    if cli.case_sensitive {
        settings.case_sensitive = true;
    }
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = Some(dir.clone());
    }
    settings
}

fn not_found(level: Level, code: &str) -> CliError {
    CliError::NotFound {
        level: level.to_string(),
        code: code.to_string(),
    }
}

#[instrument(skip(settings))]
fn _config(settings: &Settings, template: bool) -> CliResult<()> {
    if template {
        output::info(&Settings::template());
    } else {
        output::info(&settings.to_toml()?);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _languages(settings: &Settings) -> CliResult<()> {
    let provider = Classifier::provider_for(settings)?;
    for language in provider.supported_languages() {
        if language == settings.language {
            output::info(&format!("{language} *"));
        } else {
            output::info(&language);
        }
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _show(settings: &Settings, level: Level, code: &str) -> CliResult<()> {
    let classifier = Classifier::from_settings(settings)?;
    let shown = match level {
        Level::Section => classifier.get_section(code).map(output::node_tree),
        Level::Division => classifier.get_division(code).map(output::node_tree),
        Level::Group => classifier.get_group(code).map(output::node_tree),
        Level::Class => classifier.get_class(code).map(output::node_tree),
    };
    shown.ok_or_else(|| not_found(level, code))
}

#[instrument(skip(settings))]
fn _get(settings: &Settings, code: &str) -> CliResult<()> {
    let Some(level) = Level::of_code(code) else {
        return Err(CliError::InvalidArgs(format!(
            "'{code}' is not a section letter or a 2-4 digit code"
        )));
    };
    let classifier = Classifier::from_settings(settings)?;
    let hit = classifier.lookup(code).ok_or_else(|| not_found(level, code))?;
    output::header(&hit.hierarchy);
    print!("{}", hit.hierarchy.to_tree());
    Ok(())
}

#[instrument(skip(settings))]
fn _search(settings: &Settings, query: &str, tree: bool) -> CliResult<()> {
    let classifier = Classifier::from_settings(settings)?;
    let results = classifier.search(query);
    if results.is_empty() {
        output::warning(&format!("no matches for '{query}'"));
        return Ok(());
    }
    output::header(&format!("{} match(es) for '{}'", results.len(), query));
    output::search_results(&results, tree);
    Ok(())
}
