pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod history;
pub mod io;
pub mod logging;
pub mod templates;
pub mod updater;

pub use error::{QrgenError, Result};
