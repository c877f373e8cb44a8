use anyhow::{Context, Result};
use dialoguer::Input;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::commands::{execute, Flow, Session};
use crate::handle_error;
use crate::parser::{parse_command, CommandError};

pub fn run_interactive(session: &mut Session) -> Result<()> {
    println!("Welcome to Datebook");
    println!("Type 'help' to see available commands");

    loop {
        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read command")?;

        if run_line(session, &line) == Flow::Exit {
            return Ok(());
        }
    }
}

/// Runs each line of a script. The script has to end with `exit`; lines
/// after it are ignored.
pub fn run_headless(session: &mut Session, path: &Path) -> Result<()> {
    let script = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script '{}'", path.display()))?;

    for (index, line) in script.lines().enumerate() {
        debug!(line = index + 1, command = line.trim(), "Running script line");
        if run_line(session, line) == Flow::Exit {
            return Ok(());
        }
    }

    Err(CommandError::MissingExit.into())
}

// Blank lines and '#' comments are skipped; errors are reported and the
// run continues.
fn run_line(session: &mut Session, line: &str) -> Flow {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Flow::Continue;
    }

    let result = parse_command(line)
        .map_err(anyhow::Error::from)
        .and_then(|command| execute(session, command));

    match result {
        Ok(flow) => flow,
        Err(e) => {
            handle_error(&e);
            Flow::Continue
        }
    }
}
