//! azlevel CLI library
//!
//! Command-line interface for the azlevel reading level classifier:
//! argument parsing, configuration files, input discovery, progress
//! reporting and the output formatters.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
