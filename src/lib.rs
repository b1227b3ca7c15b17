//! Cepstra - labeled audio to MFCC datasets and spectral images.
//!
//! Walks a dataset root with one folder per class, slices every track into
//! fixed-length segments and writes their MFCC matrices with integer labels
//! to a single JSON file. The same analysis can be drawn as one JPEG per file.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod features;
pub mod progress;
pub mod render;

use clap::Parser;
use cli::{Cli, Command, ConfigAction};
use config::{Config, load_config, resolve_config_path, save_config};
use std::path::Path;

pub use error::{Error, Result};

/// Main entry point for the cepstra CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet);

    let show_progress = cli.global.show_progress();
    let config_path = cli.global.config.as_deref();

    match cli.command {
        Command::Extract(args) => {
            cli::extract::execute(&args, load_config(config_path)?, show_progress)
        }
        Command::Render(args) => {
            cli::render::execute(&args, load_config(config_path)?, show_progress)
        }
        Command::Config { action } => handle_config_command(action, config_path),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = resolve_config_path(path)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(path)?;
            let contents = toml::to_string_pretty(&config)
                .map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", resolve_config_path(path)?.display());
            Ok(())
        }
    }
}
