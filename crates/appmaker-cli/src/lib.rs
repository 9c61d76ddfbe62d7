//! appmaker CLI library

pub mod commands;
pub mod error;

pub use error::{Error, Result};

use appmaker_common::telemetry::{LogConfig, LogFormat};
use clap::{Parser, Subcommand, ValueEnum};

/// appmaker - Render app descriptions into Kubernetes manifests
#[derive(Parser, Debug)]
#[command(name = "appmaker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value = "text", env = "APPMAKER_LOG_FORMAT", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile an app and print the resulting List
    Render(commands::CompileArgs),
    /// Print the resolved components of an app without compiling objects
    Resolve(commands::CompileArgs),
}

/// Log line format
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable lines (default)
    #[default]
    Text,
    /// JSON lines
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    /// Logging configuration selected on the command line
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            format: self.log_format.into(),
            ..Default::default()
        }
    }

    /// Run the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Render(args) => commands::render::run(args),
            Commands::Resolve(args) => commands::resolve::run(args),
        }
    }
}
