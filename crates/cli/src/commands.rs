// FILE: crates/cli/src/commands.rs

use anyhow::{Context, Result};
use bookshelf_config::{Config, ConfigManager};
use bookshelf_core::{AppError, Book, ErrorSeverity};
use bookshelf_library::{Catalog, LoadReport};
use console::style;
use serde::Serialize;
use std::io::Write;

/// Loads the configured source file into `catalog`
///
/// Failures are printed and logged; the caller always gets a usable catalog.
/// With `announce` the outcome line goes to stdout, otherwise only to the log.
pub fn load_source(catalog: &mut Catalog, config: &Config, announce: bool) -> Option<LoadReport> {
    let Some(path) = config.catalog.source_path.as_ref() else {
        log::debug!("No catalog source configured; starting empty");
        return None;
    };

    match catalog.bulk_load(path, config.catalog.on_malformed) {
        Ok(report) => {
            if announce {
                println!("{}", report);
            } else {
                log::info!("{}", report);
            }
            for skipped in &report.skipped {
                eprintln!("{} Skipped {}", style("!").yellow().bold(), skipped);
            }
            Some(report)
        }
        Err(err) => {
            let err: AppError = err.into();
            match err.severity() {
                ErrorSeverity::Fatal => log::error!("Catalog load failed: {}", err),
                _ => log::warn!("Catalog load failed: {}", err),
            }
            eprintln!("{}", err.user_message());
            None
        }
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    count: usize,
    books: Vec<&'a Book>,
}

/// Prints every book, as text or as a JSON document
pub fn list_books(catalog: &Catalog, json: bool, out: &mut impl Write) -> Result<()> {
    let listing = catalog.list_all();

    if json {
        let books: Vec<&Book> = listing.iter().collect();
        let output = ListOutput {
            count: books.len(),
            books,
        };
        serde_json::to_writer_pretty(&mut *out, &output)
            .context("Failed to serialize book list")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", listing)?;
    }

    Ok(())
}

/// Writes a default config file
pub fn config_init(manager: &ConfigManager, force: bool) -> Result<()> {
    let path = manager.config_path();

    if force {
        manager.reset().context("Failed to reset configuration")?;
        println!(
            "{} Wrote default config to {}",
            style("✓").green().bold(),
            path.display()
        );
    } else if manager.initialize().context("Failed to create configuration")? {
        println!(
            "{} Created config at {}",
            style("✓").green().bold(),
            path.display()
        );
    } else {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Ok(())
}

/// Prints the effective configuration as TOML
pub fn config_show(config: &Config, out: &mut impl Write) -> Result<()> {
    let text = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    write!(out, "{}", text)?;
    Ok(())
}

pub fn config_path(manager: &ConfigManager) {
    println!("{}", manager.config_path().display());
}

/// Checks the config file; returns false when it has problems
pub fn config_validate(manager: &ConfigManager) -> Result<bool> {
    let problems = manager
        .validate()
        .with_context(|| format!("Failed to read {}", manager.config_path().display()))?;

    if problems.is_empty() {
        println!("{} Configuration is valid", style("✓").green().bold());
        return Ok(true);
    }

    println!(
        "{} {} problem(s) in {}",
        style("✗").red().bold(),
        style(problems.len()).bold(),
        manager.config_path().display()
    );
    for problem in problems {
        println!("  - {}", problem);
    }
    Ok(false)
}
