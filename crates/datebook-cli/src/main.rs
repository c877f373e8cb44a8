use clap::Parser;
use datebook_core::error::CoreError;
use owo_colors::{OwoColorize, Style};
use std::process::ExitCode;
use tracing::warn;

use crate::cli::Mode;
use crate::parser::CommandError;

mod cli;
mod commands;
mod config;
mod logging;
mod parser;
mod runner;
mod timezone;
mod views;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let (config, config_error) = match config::Config::new() {
        Ok(config) => (config, None),
        Err(e) => (config::Config::default(), Some(e)),
    };
    logging::init(&config.log_level);
    if let Some(e) = config_error {
        warn!(error = %e, "Could not load configuration, using defaults");
    }

    let mut session = match commands::Session::new(&config) {
        Ok(session) => session,
        Err(e) => {
            handle_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let result = match (cli.mode, cli.file) {
        (Mode::Headless, Some(path)) => runner::run_headless(&mut session, &path),
        (Mode::Headless, None) => Err(anyhow::anyhow!("Headless mode needs a script file")),
        (Mode::Interactive, _) => runner::run_interactive(&mut session),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            handle_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn core_error(err: &anyhow::Error) -> Option<&CoreError> {
    err.downcast_ref::<CoreError>()
        .or_else(|| match err.downcast_ref::<CommandError>() {
            Some(CommandError::Core(core)) => Some(core),
            _ => None,
        })
}

pub(crate) fn handle_error(err: &anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = core_error(err) {
        match core_error {
            CoreError::InvalidTimezone(s) => {
                eprintln!("{} Invalid timezone: {}", "Error:".style(error_style), s);
                let suggestions = timezone::suggest_timezone(s);
                if !suggestions.is_empty() {
                    eprintln!("Did you mean one of these?");
                    for tz in suggestions {
                        eprintln!("  {}", tz.yellow());
                    }
                }
            }
            CoreError::DuplicateEvent(s) => {
                eprintln!(
                    "{} Conflicts with an existing event: {}",
                    "Error:".style(error_style),
                    s.yellow()
                );
            }
            CoreError::InvalidProperty(s) => {
                eprintln!(
                    "{} Unknown property '{}'",
                    "Error:".style(error_style),
                    s.yellow()
                );
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), core_error),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
