//! `date-prefix`: rename files so that a date in the name becomes a leading
//! `yyyy-mm-dd` prefix.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use date_prefix::logging::{LogConfig, LogFormat, init_logging};
use date_prefix::{Extractor, RunOptions, run};
use tracing::level_filters::LevelFilter;
use tracing::{debug, warn};

mod cli;
mod summary;

use crate::cli::{Cli, LogFormatArg, LogLevelArg};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match execute(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn execute(cli: &Cli) -> Result<()> {
    let dirs = if cli.dirs.is_empty() {
        vec![std::env::current_dir().context("cannot determine the current directory")?]
    } else {
        cli.dirs.clone()
    };
    let extractor = cli.today.map_or_else(Extractor::now, Extractor::new);
    let options = RunOptions {
        execute: cli.execute,
    };

    debug!(
        reference_date = %extractor.reference_date(),
        execute = options.execute,
        "starting run"
    );

    let report = run(&dirs, &options, &extractor);
    if report.has_errors() {
        warn!(errors = report.totals.errors, "some files could not be handled");
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
    } else {
        print_summary(&report);
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_ansi = io::stderr().is_terminal();
    config
}
