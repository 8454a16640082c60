// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_RULE_FILE;
use crate::types::EnvPolicy;

/// Command-line arguments for `wf`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wf",
    version,
    about = "Run a named rule from the nearest workflow file.",
    long_about = None,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Rule to run. Without one, the available rules are listed.
    #[arg(value_name = "RULE")]
    pub rule: Option<String>,

    /// Name of the workflow file, searched for in the current directory and
    /// then each parent directory.
    #[arg(short = 'f', long, value_name = "NAME", default_value = DEFAULT_RULE_FILE)]
    pub file: String,

    /// List rule names and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Print the workflow file as-is and exit.
    #[arg(short, long)]
    pub dump: bool,

    /// Expand and resolve the rule's commands, print them, run nothing.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Report how long the rule took, in microseconds.
    #[arg(short, long)]
    pub time: bool,

    /// Print the version and exit.
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Shorthand for `--log-level debug`.
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Environment for spawned commands: `isolated` (overlay only) or
    /// `inherit` (wf's environment plus overlay). Overrides the file's
    /// `config.env_policy`.
    #[arg(long, value_name = "POLICY")]
    pub env_policy: Option<EnvPolicy>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `--verbose`, then `WF_LOG`, then `warn` is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Line printed for `-v/--version`.
pub fn version_line() -> String {
    format!("wf version {}", env!("CARGO_PKG_VERSION"))
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
