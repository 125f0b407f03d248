//! fxdesk CLI library.
//!
//! This library provides the core functionality for the fxdesk command-line
//! interface: reading chats and assistant replies, running them through the
//! extractors, configuration management and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
