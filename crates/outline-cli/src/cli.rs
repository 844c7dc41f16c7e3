//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "outline",
    version,
    about = "Inspect legacy binary story outline files",
    long_about = "Decode legacy binary story outline files.\n\n\
                  Prints the decoded elements, the outline and narrative trees,\n\
                  or the raw record trace, and lists the known record layouts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode an outline file and report what it contains.
    Decode(DecodeArgs),

    /// Print every record of an outline file as it was dispatched.
    Records(RecordsArgs),

    /// List the fixed record layouts for every format version.
    Layouts,
}

#[derive(Parser)]
pub struct DecodeArgs {
    /// Legacy outline file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// What to print.
    #[arg(long = "format", value_enum, default_value = "summary")]
    pub format: OutputFormatArg,

    /// Stop at the first recoverable diagnostic.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Keep at most N diagnostics; the rest are only counted.
    #[arg(long = "max-diagnostics", value_name = "N")]
    pub max_diagnostics: Option<usize>,
}

#[derive(Parser)]
pub struct RecordsArgs {
    /// Legacy outline file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    /// Element counts and diagnostics tables.
    Summary,
    /// Outline and narrative trees.
    Tree,
    /// Full model and diagnostics as JSON.
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
