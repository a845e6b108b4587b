use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use numflags::cli::{Cli, Commands};
use numflags::types::config::{Config, CONFIG_FILE_NAME};
use numflags::NumflagsResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let (config, load_error) = match &cli.config {
        Some(path) => match Config::load_explicit(path) {
            Ok(config) => (config, None),
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::from(e.exit_code());
            }
        },
        None if Path::new(CONFIG_FILE_NAME).exists() => match Config::load(CONFIG_FILE_NAME) {
            Ok(config) => (config, None),
            Err(e) => (Config::default_config(), Some(e)),
        },
        None => (Config::load_or_default(), None),
    };

    init_logging(&cli, &config);

    if let Some(e) = load_error {
        tracing::warn!("Ignoring {}: {} (using defaults)", CONFIG_FILE_NAME, e);
    }
    match &cli.config {
        Some(path) => tracing::debug!("Configuration loaded from: {}", path.display()),
        None => tracing::debug!("Configuration resolved from default locations"),
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(command: Commands, config: &Config) -> NumflagsResult<()> {
    match command {
        Commands::Check {
            number,
            json,
            show_errors,
            only,
        } => numflags::cli::commands::check(&number, json, show_errors, only, config),
        Commands::List => {
            numflags::cli::commands::list();
            Ok(())
        }
        Commands::Init { path } => numflags::cli::commands::init(path),
        Commands::Version => {
            numflags::cli::commands::version();
            Ok(())
        }
    }
}

fn init_logging(cli: &Cli, config: &Config) {
    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("numflags={}", log_level)
            .parse()
            .unwrap_or_else(|_| "numflags=warn".parse().expect("fallback directive is valid")),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
