//! fxdesk CLI - Command-line interface for the FX desk extractors.

use clap::Parser;
use fxdesk_cli::commands;
use fxdesk_cli::repl;
use fxdesk_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> fxdesk_cli::Result<()> {
    // Load config, falling back to defaults when the file is absent
    let config_path = Config::resolve_path(cli.config.as_deref())?;
    let mut config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut config, &formatter)?;
        }
        Some(Command::Trade(args)) => {
            commands::execute_trade(args, &config.extractor, &formatter)?;
        }
        Some(Command::Hedge(args)) => {
            commands::execute_hedge(args, &formatter)?;
        }
        Some(Command::Config(args)) => {
            commands::execute_config(args, &config, &config_path, &formatter)?;
        }
    }

    Ok(())
}
