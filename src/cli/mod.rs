//! Command-line interface for cppfmt
//!
//! Parses arguments with clap, layers them over the loaded configuration,
//! runs the dispatcher and prints the collected results.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{CppfmtConfig, SettingsOverrides};
use crate::dispatch;

pub mod output;

#[derive(Parser, Debug)]
#[command(
    name = "cppfmt",
    version,
    about = "Format .cpp and .hpp files with clang-format, one worker per directory",
    long_about = "Recursively finds C++ sources under each DIRECTORY and runs the formatter \
                  in place on every file, using the nearest .clang-format style file. \
                  Directories are processed in parallel; results are printed in argument \
                  order once every directory has finished.\n\n\
                  Configuration precedence: CLI > CPPFMT_* env > cppfmt.toml > \
                  ~/.config/cppfmt/config.toml > defaults."
)]
pub struct Cli {
    /// Directories to search for source files
    #[arg(value_name = "DIRECTORY", required = true)]
    pub directories: Vec<PathBuf>,

    /// Only list the files that would be formatted
    #[arg(long)]
    pub dry_run: bool,

    /// Worker threads, one directory per worker (0 = one per CPU)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// File name suffix to format; replaces the configured list (repeatable or comma-separated)
    #[arg(short, long = "extension", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Formatter program name or path
    #[arg(long, value_name = "PROGRAM")]
    pub formatter: Option<String>,

    /// Follow symbolic links to directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        // Set up logging based on verbosity
        setup_logging(self.verbose, self.quiet);

        let settings = CppfmtConfig::load_with_custom_config(self.config.as_deref())?
            .with_overrides(&self.overrides())
            .settings()?;
        debug!(?settings, "Resolved settings");

        let results = dispatch::run(&self.directories, &settings)?;
        output::results(&results)?;
        Ok(())
    }

    /// Values given on the command line, ready to layer over the config
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            formatter: self.formatter.clone(),
            jobs: self.jobs,
            ..Default::default()
        }
        .with_extensions(self.extensions.clone())
        .with_flags(self.dry_run, self.follow_symlinks)
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"), // -vvv shows everything including the walker
        }
    });

    // stdout carries results only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
