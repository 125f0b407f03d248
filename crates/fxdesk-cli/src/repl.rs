//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Chats and replies span several lines, so `trade` and `hedge` switch the
//! prompt into a paste buffer that ends at the first empty line.

use crate::commands::hedge::render_hedge;
use crate::commands::trade::parse_chat;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use fxdesk_extractor::LegDirectionScope;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl(config: &mut Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("fxdesk REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    // Initialize readline editor
    let mut editor = new_editor(config.settings.history_size)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("fxdesk> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut editor, config, formatter) {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Trade { counterparty: Option<String> },
    Hedge,
    Config,
    Legs(Option<LegDirectionScope>),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "trade" => Ok(ReplCommand::Trade {
            counterparty: (parts.len() > 1).then(|| parts[1..].join(" ")),
        }),
        "hedge" => Ok(ReplCommand::Hedge),
        "config" => Ok(ReplCommand::Config),
        "legs" => parse_legs_command(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

fn parse_legs_command(args: &[&str]) -> Result<ReplCommand> {
    let scope = match args.first().map(|s| s.to_lowercase()) {
        None => None,
        Some(s) if s == "global" => Some(LegDirectionScope::Global),
        Some(s) if s == "local" => Some(LegDirectionScope::Local),
        Some(s) => {
            return Err(CliError::InvalidInput(format!(
                "Unknown leg scope: {}. Usage: legs [global|local]",
                s
            )))
        }
    };
    Ok(ReplCommand::Legs(scope))
}

/// Execute a REPL command.
fn execute_repl_command(
    cmd: ReplCommand,
    editor: &mut DefaultEditor,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Exit => {}
        ReplCommand::Help => print_help(formatter),
        ReplCommand::Trade { counterparty } => {
            let Some(chat) = read_paste(editor, formatter)? else {
                return Ok(());
            };
            let record = parse_chat(&chat, counterparty, config.extractor.clone())?;
            println!("{}", formatter.format_trade(&record)?);
        }
        ReplCommand::Hedge => {
            let Some(reply) = read_paste(editor, formatter)? else {
                return Ok(());
            };
            println!("{}", render_hedge(&reply, formatter)?);
        }
        ReplCommand::Config => println!("{}", config.to_toml()?),
        ReplCommand::Legs(None) => {
            println!(
                "{}",
                formatter.info(&format!("Leg direction scope: {:?}", config.extractor.leg_direction))
            );
        }
        ReplCommand::Legs(Some(scope)) => {
            config.extractor.leg_direction = scope;
            println!(
                "{}",
                formatter.success(&format!("Leg direction scope set to {:?}", scope))
            );
        }
    }

    Ok(())
}

/// Collect pasted lines until an empty line; `None` when nothing was pasted.
fn read_paste(editor: &mut DefaultEditor, formatter: &Formatter) -> Result<Option<String>> {
    println!("{}", formatter.info("Paste text, finish with an empty line"));

    let mut lines: Vec<String> = Vec::new();
    loop {
        match editor.readline("... ") {
            Ok(line) if line.trim().is_empty() => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Interrupted) => return Ok(None),
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(editor_error(err)),
        }
    }

    Ok(join_paste(lines))
}

fn join_paste(lines: Vec<String>) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn new_editor(history_size: usize) -> Result<DefaultEditor> {
    let editor_config = EditorConfig::builder()
        .max_history_size(history_size)
        .map_err(editor_error)?
        .auto_add_history(false)
        .build();
    DefaultEditor::with_config(editor_config).map_err(editor_error)
}

fn editor_error(err: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Line editor error: {}", err),
    ))
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let fxdesk_dir = home.join(".fxdesk");
    std::fs::create_dir_all(&fxdesk_dir)?;
    Ok(fxdesk_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  trade [counterparty]   - Paste a chat and parse it");
    println!("  hedge                  - Paste an assistant reply and extract its hedge request");
    println!("  legs [global|local]    - Show or set the leg direction scope");
    println!("  config                 - Show the effective configuration");
    println!("  help, ?                - Show this help");
    println!("  exit, quit, q          - Exit REPL");
    println!();
}
