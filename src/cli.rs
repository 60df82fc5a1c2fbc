//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, validate, plugins), and their associated argument
//! structs. Flags used by `run` have environment variable equivalents
//! for container deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "plugchain",
    version,
    about = "HTTP server with a plugin-composed handler chain",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        plugchain run                        Start with ./plugchain.yaml\n  \
        plugchain run -c service.json        Start with a specific config\n  \
        plugchain validate service.json      Show which plugins would load\n\n  \
        Docs: https://github.com/julienandreu/plugchain"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the server
    Run(Box<RunArgs>),

    /// Validate a config file and show the plugin plan without starting
    Validate(ValidateArgs),

    /// List the built-in handler plugins
    Plugins(PluginsArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        plugchain run                                  Auto-detect config\n  \
        plugchain run -c service.json                  Specific config file\n  \
        plugchain run -c service.yaml -p 8080 --pretty Local dev mode")]
pub struct RunArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Listen port (overrides the config file)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Listen address (overrides the config file)
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(default_value = "plugchain.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,

    /// Fail when a configured plugin cannot be resolved
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct PluginsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
