// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use bookshelf_config::{
    apply_overrides, ColorChoice, Config, ConfigError, ConfigManager, MalformedPolicy,
    ValidationError,
};
use bookshelf_core::{AppError, ErrorSeverity};
use bookshelf_library::Catalog;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod menu;

use menu::Menu;

fn build_cli() -> Command {
    Command::new("bookshelf")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Bookshelf Contributors")
        .about("Keep a small catalog of books from the terminal")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("PATH")
                .help("Text file of id,title,author lines to load at startup")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("on-malformed")
                .long("on-malformed")
                .value_name("POLICY")
                .help("What to do with unreadable lines in the source file")
                .value_parser(["abort", "skip"])
                .global(true),
        )
        .subcommand(Command::new("menu").about("Run the interactive menu (default)"))
        .subcommand(
            Command::new("list")
                .about("Load the source file and print every book")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the books as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage the configuration file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("init").about("Create a default config file").arg(
                        Arg::new("force")
                            .long("force")
                            .help("Overwrite an existing config file")
                            .action(ArgAction::SetTrue),
                    ),
                )
                .subcommand(Command::new("show").about("Print the effective configuration"))
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(Command::new("validate").about("Check the config file for problems")),
        )
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<PathBuf>("config-dir") {
        Some(dir) => ConfigManager::with_directory(dir.clone()),
        None => ConfigManager::new(),
    }
    .context("Failed to locate configuration directory")
}

/// File config, then `BOOKSHELF_*` variables, then command-line flags
///
/// Nothing is logged here; the logger's level depends on the result. Every
/// problem met on the way is returned for [`report_config_problems`].
fn effective_config(manager: &ConfigManager, matches: &ArgMatches) -> (Config, Vec<AppError>) {
    let mut problems = Vec::new();

    let mut config = manager.load().unwrap_or_else(|err| {
        problems.push(load_problem(err, manager));
        Config::default()
    });
    let rejected = apply_overrides(&mut config, |name| std::env::var(name).ok());
    problems.extend(rejected.into_iter().map(invalid_setting));

    if let Some(path) = matches.get_one::<PathBuf>("file") {
        config.catalog.source_path = Some(path.clone());
    }
    if let Some(policy) = matches.get_one::<String>("on-malformed") {
        // clap already restricted the value
        config.catalog.on_malformed = policy.parse().unwrap_or(MalformedPolicy::Abort);
    }

    if let Err(invalid) = config.validate() {
        problems.extend(invalid.into_iter().map(invalid_setting));
    }

    (config, problems)
}

fn load_problem(err: ConfigError, manager: &ConfigManager) -> AppError {
    match err {
        ConfigError::ReadError { path, source }
            if source.kind() == io::ErrorKind::PermissionDenied =>
        {
            AppError::PermissionDenied {
                operation: "read configuration".to_string(),
                path,
            }
        }
        ConfigError::ReadError { path, source } => AppError::ConfigurationCorrupted {
            path,
            reason: source.to_string(),
        },
        ConfigError::ParseError { path, source } => AppError::ConfigurationCorrupted {
            path,
            reason: source.message().to_string(),
        },
        other => AppError::ConfigurationCorrupted {
            path: manager.config_path(),
            reason: other.to_string(),
        },
    }
}

fn invalid_setting(err: ValidationError) -> AppError {
    AppError::InvalidConfiguration {
        setting: err.field,
        value: err.value.unwrap_or_default(),
        reason: err.message,
    }
}

fn report_config_problems(problems: &[AppError]) {
    for problem in problems {
        match problem.severity() {
            ErrorSeverity::Fatal => log::error!(
                "Failed to load config: {}; {}",
                problem,
                problem.recovery_action()
            ),
            _ => log::warn!("{}", problem),
        }
    }
}

fn init_logging(config: &Config) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.app.log_level.as_filter()),
    )
    .target(env_logger::Target::Stderr)
    .init();
}

fn use_color(config: &Config) -> bool {
    match config.app.color {
        ColorChoice::Always => {
            console::set_colors_enabled(true);
            true
        }
        ColorChoice::Never => {
            console::set_colors_enabled(false);
            false
        }
        ColorChoice::Auto => console::Term::stdout().features().colors_supported(),
    }
}

fn run_menu(config: &Config) -> Result<()> {
    let mut catalog = Catalog::new();
    commands::load_source(&mut catalog, config, true);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&mut catalog, stdin.lock(), stdout.lock())
        .styled(use_color(config))
        .run()
        .context("Menu I/O failed")
}

fn run_list(config: &Config, json: bool) -> Result<()> {
    let mut catalog = Catalog::new();
    commands::load_source(&mut catalog, config, false);
    commands::list_books(&catalog, json, &mut io::stdout().lock())
}

fn run_config(manager: &ConfigManager, config: &Config, matches: &ArgMatches) -> Result<ExitCode> {
    match matches.subcommand() {
        Some(("init", sub)) => commands::config_init(manager, sub.get_flag("force"))?,
        Some(("show", _)) => commands::config_show(config, &mut io::stdout().lock())?,
        Some(("path", _)) => commands::config_path(manager),
        Some(("validate", _)) => {
            if !commands::config_validate(manager)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        _ => build_cli().print_help()?,
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;
    let (config, problems) = effective_config(&manager, &matches);
    init_logging(&config);
    report_config_problems(&problems);
    log::debug!("Effective configuration: {:?}", config);

    match matches.subcommand() {
        Some(("list", sub)) => run_list(&config, sub.get_flag("json"))?,
        Some(("config", sub)) => return run_config(&manager, &config, sub),
        Some(("menu", _)) | None => run_menu(&config)?,
        Some((other, _)) => anyhow::bail!("Unknown command: {}", other),
    }

    Ok(ExitCode::SUCCESS)
}
