//! Trade command implementation.

use crate::cli::TradeArgs;
use crate::commands::read_input;
use crate::error::Result;
use crate::output::Formatter;
use fxdesk_domain::TradeRecord;
use fxdesk_extractor::{ExtractorConfig, LegDirectionScope, TradeExtractor};
use tracing::debug;

/// Execute the trade command.
pub fn execute_trade(
    args: TradeArgs,
    extractor_config: &ExtractorConfig,
    formatter: &Formatter,
) -> Result<()> {
    let chat = read_input(args.text, args.file.as_deref(), args.stdin)?;

    let mut config = extractor_config.clone();
    if args.local_legs {
        config.leg_direction = LegDirectionScope::Local;
    }

    let record = parse_chat(&chat, args.counterparty, config)?;
    println!("{}", formatter.format_trade(&record)?);

    Ok(())
}

/// Parse a chat with the given extractor settings.
pub fn parse_chat(
    chat: &str,
    counterparty: Option<String>,
    config: ExtractorConfig,
) -> Result<TradeRecord> {
    debug!(scope = ?config.leg_direction, "Parsing trade chat");
    let record = TradeExtractor::new(config)?.parse(chat);

    Ok(match counterparty {
        Some(name) => record.with_counterparty(name),
        None => record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxdesk_domain::{ProductType, Side};

    #[test]
    fn test_parse_chat_with_counterparty() {
        let record = parse_chat(
            "spot eurusd 1.0870, done",
            Some("ACME".to_string()),
            ExtractorConfig::default(),
        )
        .unwrap();
        assert_eq!(record.product_type, ProductType::Spot);
        assert_eq!(record.counterparty.as_deref(), Some("ACME"));
    }

    #[test]
    fn test_parse_chat_local_legs() {
        let record = parse_chat(
            "buy put 1.05\nsell put 1.00",
            None,
            ExtractorConfig::scoped_legs(),
        )
        .unwrap();
        assert_eq!(record.structure_legs[0].direction, Side::Buy);
        assert_eq!(record.structure_legs[1].direction, Side::Sell);
    }

    #[test]
    fn test_parse_chat_rejects_invalid_config() {
        let config = ExtractorConfig {
            common_tenors: Vec::new(),
            ..ExtractorConfig::default()
        };
        assert!(parse_chat("spot", None, config).is_err());
    }
}
