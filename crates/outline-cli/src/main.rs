//! Legacy story outline inspector.

use clap::{ColorChoice, Parser};
use outline_cli::logging::{LogConfig, LogFormat, init_logging};
use outline_cli::render::{render_json, render_trees};
use outline_cli::types::DecodeReport;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg};
use crate::commands::{run_decode, run_layouts, run_records};
use crate::summary::{print_records, print_stop, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Decode(args) => match run_decode(&args) {
            Ok(report) => print_decoded(&report, args.format),
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Records(args) => match run_records(&args) {
            Ok(report) => {
                print_records(&report);
                exit_code_for(&report)
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Layouts => match run_layouts() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn print_decoded(report: &DecodeReport, format: OutputFormatArg) -> i32 {
    match format {
        OutputFormatArg::Summary => print_summary(report),
        OutputFormatArg::Tree => {
            print!("{}", render_trees(&report.decoded.outline));
            print_stop(report);
        }
        OutputFormatArg::Json => match render_json(report) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("error: failed to serialize report: {error}");
                return 1;
            }
        },
    }
    exit_code_for(report)
}

fn exit_code_for(report: &DecodeReport) -> i32 {
    if report.has_errors() { 1 } else { 0 }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level(cli.verbosity.tracing_level_filter());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config = config.with_level(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    }
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_log_file(cli.log_file.clone())
        .with_ansi(ansi)
}
