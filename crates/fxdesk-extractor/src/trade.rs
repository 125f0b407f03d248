//! Core trade chat extractor

use crate::classify;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::fields;
use crate::legs::structure_legs;
use chrono::{DateTime, Utc};
use fxdesk_domain::{ProductType, TradeRecord};
use tracing::{debug, info};

/// The TradeExtractor turns a pasted desk chat into a [`TradeRecord`]
///
/// Parsing never fails: a field the chat does not mention is left empty.
/// The extractor holds only its configuration and can be shared freely
/// between threads.
#[derive(Debug, Clone, Default)]
pub struct TradeExtractor {
    config: ExtractorConfig,
}

impl TradeExtractor {
    /// Create a new TradeExtractor
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parse a chat, stamping the record with the current time
    pub fn parse(&self, chat: &str) -> TradeRecord {
        self.parse_at(chat, Utc::now())
    }

    /// Parse a chat captured at `trade_time`
    pub fn parse_at(&self, chat: &str, trade_time: DateTime<Utc>) -> TradeRecord {
        let lower = chat.to_lowercase();

        let product_type = classify::product_type(&lower);
        let notional = fields::notional(chat);
        let premium = fields::premium(chat);
        let rate = fields::rate(chat);

        let mut record = TradeRecord::empty(chat, trade_time);
        record.product_type = product_type;
        record.currency_pair = fields::currency_pair(chat, &self.config.currency_pairs);
        record.notional_currency = notional.as_ref().and_then(|n| n.currency.clone());
        record.notional = notional.map(|n| n.amount);
        record.direction = classify::direction(&lower);

        record.outright_rate = if product_type == ProductType::Forward {
            rate.clone()
        } else {
            None
        };
        record.spot_rate = rate;
        record.forward_points = fields::forward_points(chat);
        record.tenor = fields::tenor(chat, &self.config.common_tenors);

        record.option_type = classify::option_type(&lower);
        record.strike = fields::strike(chat);
        record.premium_currency = premium.as_ref().and_then(|p| p.currency.clone());
        record.premium = premium.map(|p| p.amount);
        record.volatility = fields::volatility(chat);
        record.delta = fields::delta(chat);

        record.structure_legs = structure_legs(chat, self.config.leg_direction);
        record.status = classify::status(&lower);

        debug!(
            pair = ?record.currency_pair,
            notional = ?record.notional,
            rate = ?record.spot_rate,
            tenor = ?record.tenor,
            legs = record.structure_legs.len(),
            "Extracted trade fields"
        );
        info!(
            "Parsed {} chat ({} chars): status {}",
            record.product_type,
            chat.len(),
            record.status
        );

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LegDirectionScope;
    use chrono::TimeZone;
    use fxdesk_domain::{OptionType, Side, TradeStatus};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_vanilla_option_chat() {
        let extractor = TradeExtractor::default();
        let record = extractor.parse_at(
            "Buy 10 mio EUR vs USD, call @ 1.10, vol 8%, premium EUR 50k",
            fixed_time(),
        );

        assert_eq!(record.product_type, ProductType::Option);
        assert_eq!(record.notional.as_deref(), Some("10 mio"));
        assert_eq!(record.notional_currency.as_deref(), Some("EUR"));
        assert_eq!(record.option_type, Some(OptionType::Call));
        assert_eq!(record.strike.as_deref(), Some("1.10"));
        assert_eq!(record.volatility.as_deref(), Some("8%"));
        assert!(record.premium.as_deref().unwrap().contains("50k"));
        assert_eq!(record.premium_currency.as_deref(), Some("EUR"));
        assert_eq!(record.direction, Some(Side::Buy));
        assert_eq!(record.status, TradeStatus::Quoted);
        assert_eq!(record.outright_rate, None);
        assert_eq!(record.trade_time, fixed_time());
    }

    #[test]
    fn test_outright_rate_only_for_forwards() {
        let extractor = TradeExtractor::default();

        let forward = extractor.parse_at("EURUSD 6M outright 1.0950", fixed_time());
        assert_eq!(forward.product_type, ProductType::Forward);
        assert_eq!(forward.spot_rate.as_deref(), Some("1.0950"));
        assert_eq!(forward.outright_rate.as_deref(), Some("1.0950"));
        assert_eq!(forward.tenor.as_deref(), Some("6M"));

        let spot = extractor.parse_at("spot EURUSD 1.0870", fixed_time());
        assert_eq!(spot.product_type, ProductType::Spot);
        assert_eq!(spot.spot_rate.as_deref(), Some("1.0870"));
        assert_eq!(spot.outright_rate, None);
    }

    #[test]
    fn test_raw_chat_is_kept_verbatim() {
        let chat = "  Hi,\n price in  GBPUSD?\t";
        let record = TradeExtractor::default().parse_at(chat, fixed_time());
        assert_eq!(record.raw_chat, chat);
        assert_eq!(record.currency_pair.as_deref(), Some("GBP/USD"));
        assert_eq!(record.counterparty, None);
        assert_eq!(record.value_date, None);
    }

    #[test]
    fn test_empty_chat_yields_empty_record() {
        let record = TradeExtractor::default().parse_at("", fixed_time());
        assert_eq!(record, TradeRecord::empty("", fixed_time()));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ExtractorConfig::default();
        config.currency_pairs = vec!["EURO".to_string()];
        assert!(TradeExtractor::new(config).is_err());
    }

    #[test]
    fn test_custom_allow_list() {
        let mut config = ExtractorConfig::default();
        config.currency_pairs = vec!["EUR/SEK".to_string()];
        let extractor = TradeExtractor::new(config).unwrap();

        let record = extractor.parse_at("need eursek 3m", fixed_time());
        assert_eq!(record.currency_pair.as_deref(), Some("EUR/SEK"));
    }

    #[test]
    fn test_leg_scope_follows_config() {
        let chat = "buy put 1.05\nsell put 1.00";
        let global = TradeExtractor::default().parse_at(chat, fixed_time());
        let local = TradeExtractor::new(ExtractorConfig::scoped_legs())
            .unwrap()
            .parse_at(chat, fixed_time());

        assert_eq!(global.structure_legs[0].direction, Side::Sell);
        assert_eq!(local.structure_legs[0].direction, Side::Buy);
        assert_eq!(local.structure_legs[1].direction, Side::Sell);
        assert_eq!(
            TradeExtractor::new(ExtractorConfig::scoped_legs())
                .unwrap()
                .config()
                .leg_direction,
            LegDirectionScope::Local
        );
    }

    #[test]
    fn test_extractor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TradeExtractor>();
    }
}
