use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// A calendar with recurring events, scoped edits and timezone-aware copying
#[derive(Parser, Debug)]
#[command(name = "datebook", author, version, about, long_about = None)]
pub struct Cli {
    /// How commands are read
    #[arg(long, value_enum, default_value_t = Mode::Interactive)]
    pub mode: Mode,

    /// Command script, one command per line (headless mode)
    #[arg(required_if_eq("mode", "headless"))]
    pub file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Prompt for commands until 'exit'
    Interactive,
    /// Run a script that must end with 'exit'
    Headless,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_requires_file() {
        assert!(Cli::try_parse_from(["datebook", "--mode", "headless"]).is_err());

        let cli = Cli::try_parse_from(["datebook", "--mode", "headless", "script.txt"]).unwrap();
        assert_eq!(cli.mode, Mode::Headless);
        assert_eq!(cli.file, Some(PathBuf::from("script.txt")));
    }

    #[test]
    fn test_interactive_is_default() {
        let cli = Cli::try_parse_from(["datebook"]).unwrap();
        assert_eq!(cli.mode, Mode::Interactive);
        assert!(cli.file.is_none());
    }
}
