//! Command implementations.

pub mod config;
pub mod hedge;
pub mod trade;

pub use self::config::execute_config;
pub use self::hedge::execute_hedge;
pub use self::trade::execute_trade;

use crate::error::{CliError, Result};
use std::fs;
use std::io::{self, Read};

/// Read command input from the inline argument, a file, or stdin.
pub(crate) fn read_input(text: Option<String>, file: Option<&str>, stdin: bool) -> Result<String> {
    let input = if let Some(text) = text {
        text
    } else if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = file {
        fs::read_to_string(file_path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify text, --file or --stdin".to_string(),
        ));
    };

    if input.trim().is_empty() {
        return Err(CliError::InvalidInput("Input is empty".to_string()));
    }
    Ok(input)
}
