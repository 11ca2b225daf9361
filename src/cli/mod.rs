pub mod app;
pub mod commands;
#[cfg(feature = "tui")]
pub mod tui;

pub use app::{parse_exit_code, Cli, Commands};
