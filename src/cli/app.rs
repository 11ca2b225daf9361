use clap::{Parser, Subcommand};

use crate::logging::LogLevel;

/// qrgen: create QR codes from your terminal
#[derive(Parser, Debug)]
#[command(name = "qrgen")]
#[command(version)]
#[command(about = "Create beautiful QR codes from your terminal")]
#[command(
    long_about = "qrgen walks you through building a QR code for a link, WiFi network, contact card, email, SMS or plain text, and saves it as PNG or SVG."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Set log level (overridden by QRGEN_LOG)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,
}

impl Cli {
    /// The subcommand to run; no subcommand means the interactive wizard
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive wizard (default)
    Run,

    /// List previously generated QR codes
    History {
        /// Delete all history entries
        #[arg(long)]
        clear: bool,
    },

    /// Re-generate a QR code from a history entry
    Regen {
        /// Entry number as shown by `qrgen history`
        id: u32,
    },

    /// Download and install the latest release
    Update,

    /// Check whether a newer release is available
    CheckUpdate,
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Run => "run",
            Commands::History { .. } => "history",
            Commands::Regen { .. } => "regen",
            Commands::Update => "update",
            Commands::CheckUpdate => "check-update",
        }
    }

    /// Whether the command takes over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self, Commands::Run)
    }
}

/// Process exit code for a failed parse: help and version output are not
/// errors, every usage error exits with 1 like a failed command.
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_runs_wizard() {
        let cli = Cli::try_parse_from(["qrgen"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.command(), Commands::Run);
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_history_clear() {
        let cli = Cli::try_parse_from(["qrgen", "history", "--clear"]).unwrap();
        assert_eq!(cli.command(), Commands::History { clear: true });
    }

    #[test]
    fn test_regen_requires_numeric_id() {
        let cli = Cli::try_parse_from(["qrgen", "regen", "3"]).unwrap();
        assert_eq!(cli.command(), Commands::Regen { id: 3 });

        assert!(Cli::try_parse_from(["qrgen", "regen", "abc"]).is_err());
        assert!(Cli::try_parse_from(["qrgen", "regen"]).is_err());
    }

    #[test]
    fn test_update_commands() {
        let cli = Cli::try_parse_from(["qrgen", "check-update"]).unwrap();
        assert_eq!(cli.command(), Commands::CheckUpdate);

        let cli = Cli::try_parse_from(["qrgen", "update"]).unwrap();
        assert_eq!(cli.command().name(), "update");
    }

    #[test]
    fn test_global_log_level() {
        let cli = Cli::try_parse_from(["qrgen", "history", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["qrgen", "bogus"]).is_err());
    }

    #[test]
    fn test_usage_errors_exit_with_one() {
        for args in [
            vec!["qrgen", "regen"],
            vec!["qrgen", "regen", "abc"],
            vec!["qrgen", "bogus"],
        ] {
            let err = Cli::try_parse_from(args.clone()).unwrap_err();
            assert_eq!(parse_exit_code(&err), 1, "{:?}", args);
        }
    }

    #[test]
    fn test_help_and_version_exit_cleanly() {
        for flag in ["--help", "--version"] {
            let err = Cli::try_parse_from(["qrgen", flag]).unwrap_err();
            assert_eq!(parse_exit_code(&err), 0, "{}", flag);
        }
    }
}
