//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => println!("{}", config.to_toml()?),
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Init { force } => println!("{}", init_config(path, force, formatter)?),
    }
    Ok(())
}

/// Write a default configuration file unless one exists.
fn init_config(path: &Path, force: bool, formatter: &Formatter) -> Result<String> {
    if path.exists() && !force {
        return Ok(formatter.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save_to(path)?;
    Ok(formatter.success(&format!("Wrote default config to {}", path.display())))
}
