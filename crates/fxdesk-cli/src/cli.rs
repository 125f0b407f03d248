//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// fxdesk - Read FX desk chats and assistant replies into structured data.
#[derive(Debug, Parser)]
#[command(name = "fxdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FXDESK_CONFIG")]
    pub config: Option<String>,

    /// Log extraction details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one-line summary)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a trade chat transcript
    Trade(TradeArgs),

    /// Extract the hedge request from an assistant reply
    Hedge(HedgeArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the trade command.
#[derive(Debug, Parser)]
pub struct TradeArgs {
    /// Chat text (alternative to --file or --stdin)
    pub text: Option<String>,

    /// Read the chat from a file
    #[arg(short = 'F', long)]
    pub file: Option<String>,

    /// Read the chat from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Counterparty to attach to the record
    #[arg(long)]
    pub counterparty: Option<String>,

    /// Take each structure leg's direction from its own wording
    #[arg(long)]
    pub local_legs: bool,
}

/// Arguments for the hedge command.
#[derive(Debug, Parser)]
pub struct HedgeArgs {
    /// Reply text (alternative to --file or --stdin)
    pub text: Option<String>,

    /// Read the reply from a file
    #[arg(short = 'F', long)]
    pub file: Option<String>,

    /// Read the reply from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for config management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config management actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
