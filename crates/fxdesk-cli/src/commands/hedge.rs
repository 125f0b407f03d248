//! Hedge command implementation.

use crate::cli::HedgeArgs;
use crate::commands::read_input;
use crate::error::Result;
use crate::output::Formatter;
use fxdesk_extractor::parse_fx_hedge_block;

/// Execute the hedge command.
pub fn execute_hedge(args: HedgeArgs, formatter: &Formatter) -> Result<()> {
    let reply = read_input(args.text, args.file.as_deref(), args.stdin)?;
    println!("{}", render_hedge(&reply, formatter)?);
    Ok(())
}

/// Extract and format the hedge request in `reply`.
pub fn render_hedge(reply: &str, formatter: &Formatter) -> Result<String> {
    let extraction = parse_fx_hedge_block(reply);
    formatter.format_hedge(&extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    const REPLY: &str = "Understood.\nFX_DATA:{\"amount\":750000,\"currency\":\"GBP\",\
                         \"direction\":\"pay\",\"maturity\":0.25,\"baseCurrency\":\"EUR\"}";

    #[test]
    fn test_render_hedge_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = render_hedge(REPLY, &formatter).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["data"]["currency"], "GBP");
        assert_eq!(value["cleanContent"], "Understood.");
    }

    #[test]
    fn test_render_hedge_quiet_strips_block() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(render_hedge(REPLY, &formatter).unwrap(), "Understood.");
    }

    #[test]
    fn test_render_hedge_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = render_hedge(REPLY, &formatter).unwrap();
        assert!(output.contains("750K GBP"));
        assert!(output.contains("To pay"));
        assert!(output.contains("3 months"));
    }
}
