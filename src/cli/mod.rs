//! CLI module for relleno
//!
//! This module contains all CLI command handlers and utilities.

mod args;
mod commands;
mod logging;

pub use args::{Cli, Command, InfoArgs, PrepareArgs, TrainArgs, ValidateArgs};
pub use commands::run_command;
pub use logging::LogLevel;
