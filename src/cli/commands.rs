//! Implementação dos comandos CLI do numflags.

use std::path::{Path, PathBuf};

use crate::checks::PredicateRegistry;
use crate::classify::PredicateEngine;
use crate::types::config::{Config, CONFIG_FILE_NAME};
use crate::types::requests::{EvaluateOptions, OutputFormat};
use crate::NumflagsResult;

/// Evaluates one number and prints the report.
pub fn check(
    number: &str,
    json: bool,
    show_errors: bool,
    only: Vec<String>,
    config: &Config,
) -> NumflagsResult<()> {
    let options = check_options(json, show_errors, only, config);
    tracing::debug!(
        "Avaliando '{}' (formato={}, diagnósticos={})",
        number,
        options.format,
        options.report_errors
    );

    let engine = PredicateEngine::new(config);
    let report = engine.evaluate(number, &options)?;

    println!("{}", report.render()?);

    if let Some(structured) = report.as_structured() {
        if options.report_errors {
            for skipped in &structured.skipped {
                eprintln!("warning: '{}' skipped: {}", skipped.predicate, skipped.reason);
            }
        }
    }

    Ok(())
}

/// Builds evaluation options: CLI flags take precedence over config.
fn check_options(
    json: bool,
    show_errors: bool,
    only: Vec<String>,
    config: &Config,
) -> EvaluateOptions {
    let format = if json {
        OutputFormat::Structured
    } else {
        config.output.format
    };

    let mut options = EvaluateOptions::new()
        .with_format(format)
        .with_report_errors(show_errors || config.output.show_errors);

    if !only.is_empty() {
        options = options.with_only(only);
    }
    options
}

/// Lists registered predicates in evaluation order.
pub fn list() {
    let registry = PredicateRegistry::builtin();
    let width = registry.iter().map(|p| p.name.len()).max().unwrap_or(0);

    println!("Registered predicates ({}):\n", registry.len());
    for predicate in registry.iter() {
        println!("  {:width$}  {}", predicate.name, predicate.description, width = width);
    }
}

/// Initializes configuration in the specified directory.
pub fn init(path: Option<PathBuf>) -> NumflagsResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    // Create directory if it doesn't exist
    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    write_default_config(&config_path)?;

    println!("numflags initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. See available predicates: numflags list");
    println!("  2. Classify a number: numflags check 1234");

    Ok(())
}

fn write_default_config(config_path: &Path) -> NumflagsResult<()> {
    let config = Config::default_config();
    config.save(config_path)?;
    tracing::debug!("Default configuration written to {}", config_path.display());
    Ok(())
}

/// Shows version.
pub fn version() {
    println!("numflags {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Classificação de números por predicados");
}
