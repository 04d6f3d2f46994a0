//! `unify` command-line entry point.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use unify_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use unify_cli::commands::{
    run_field, run_generate, run_iface, run_resolve, run_unify_input, run_unify_output,
    run_validate,
};
use unify_cli::logging::{LogConfig, LogFormat, init_logging};
use unify_cli::summary::{print_generate_summary, print_json, print_resolutions, print_validate};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: &Command) -> Result<i32> {
    let code = match command {
        Command::Generate(args) => {
            let result = run_generate(args)?;
            print_generate_summary(&result);
            i32::from(!result.conflicts.is_empty())
        }
        Command::Validate(args) => {
            let result = run_validate(args)?;
            print_validate(&result);
            i32::from(result.has_errors())
        }
        Command::Field(args) => i32::from(!run_field(args)?),
        Command::Iface(args) => i32::from(!run_iface(args)?),
        Command::Resolve(args) => {
            print_resolutions(&run_resolve(args)?);
            0
        }
        Command::UnifyInput(args) => {
            print_json(&run_unify_input(args)?)?;
            0
        }
        Command::UnifyOutput(args) => {
            print_json(&run_unify_output(args)?)?;
            0
        }
    };
    Ok(code)
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
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
