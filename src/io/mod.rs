//! Filesystem locations

pub mod paths;

pub use paths::QrgenPaths;
