//! Command-line interface for rqc-step
//!
//! Runs the filter step from a shell or a pipeline driver, and inspects the
//! layered configuration it would run with.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

pub mod commands;
mod output;

pub use output::Output;

/// rqc-step - RQCFilter read filtering step for metagenome assembly
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter a reads file, or pass it through gzipped with --skip-rqcfilter
    Run(commands::run::RunArgs),
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Show version information
    Version(commands::version::VersionArgs),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration
    Show {
        /// Print JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Check that the merged configuration is complete
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Commands::Run(args) => commands::run::execute(args, self.config.as_deref(), &output),
            Commands::Config(cmd) => commands::config::execute(cmd, self.config.as_deref(), &output),
            Commands::Version(args) => commands::version::execute(args, self.config.as_deref()),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug,reqwest=info,hyper=info"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // stdout carries results, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
