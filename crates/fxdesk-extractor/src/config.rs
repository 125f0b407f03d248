//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};

/// Pairs recognized by plain substring search, checked in order
pub const DEFAULT_CURRENCY_PAIRS: [&str; 18] = [
    "EUR/USD", "USD/JPY", "GBP/USD", "USD/CHF", "AUD/USD", "USD/CAD",
    "EUR/GBP", "EUR/JPY", "GBP/JPY", "EUR/CHF", "USD/MXN", "USD/BRL",
    "EURUSD", "USDJPY", "GBPUSD", "USDCHF", "AUDUSD", "USDCAD",
];

/// Canonical tenor tokens, checked in order when no numeric tenor is found
pub const DEFAULT_COMMON_TENORS: [&str; 14] = [
    "O/N", "T/N", "S/N", "1W", "2W", "1M", "2M", "3M", "6M", "9M", "1Y", "2Y", "3Y", "5Y",
];

/// How the direction of a structure leg is decided
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegDirectionScope {
    /// A leg is sold when "sell <type>" appears anywhere in the chat
    #[default]
    Global,
    /// A leg takes the buy/sell word written in front of it on its own line
    Local,
}

/// Configuration for the trade extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Allow-listed currency pairs, slashed or unslashed
    #[serde(default = "default_currency_pairs")]
    pub currency_pairs: Vec<String>,

    /// Fallback tenor tokens
    #[serde(default = "default_common_tenors")]
    pub common_tenors: Vec<String>,

    /// Structure leg direction policy
    #[serde(default)]
    pub leg_direction: LegDirectionScope,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.currency_pairs.is_empty() {
            return Err(ExtractorError::Config(
                "currency_pairs must not be empty".to_string(),
            ));
        }
        for pair in &self.currency_pairs {
            if !is_well_formed_pair(pair) {
                return Err(ExtractorError::Config(format!(
                    "invalid currency pair '{}': expected XXX/YYY or XXXYYY",
                    pair
                )));
            }
        }
        if self.common_tenors.is_empty() {
            return Err(ExtractorError::Config(
                "common_tenors must not be empty".to_string(),
            ));
        }
        if self.common_tenors.iter().any(|t| t.trim().is_empty()) {
            return Err(ExtractorError::Config(
                "common_tenors must not contain blank entries".to_string(),
            ));
        }
        Ok(())
    }

    /// Preset that scopes leg direction to each leg's own wording
    pub fn scoped_legs() -> Self {
        Self {
            leg_direction: LegDirectionScope::Local,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: ExtractorConfig = toml::from_str(toml_str)?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            currency_pairs: default_currency_pairs(),
            common_tenors: default_common_tenors(),
            leg_direction: LegDirectionScope::Global,
        }
    }
}

fn default_currency_pairs() -> Vec<String> {
    DEFAULT_CURRENCY_PAIRS.iter().map(|p| p.to_string()).collect()
}

fn default_common_tenors() -> Vec<String> {
    DEFAULT_COMMON_TENORS.iter().map(|t| t.to_string()).collect()
}

fn is_well_formed_pair(pair: &str) -> bool {
    let letters = |s: &str| s.len() == 3 && s.chars().all(|c| c.is_ascii_alphabetic());
    match pair.split_once('/') {
        Some((base, quote)) => letters(base) && letters(quote),
        None => pair.len() == 6 && pair.chars().all(|c| c.is_ascii_alphabetic()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.leg_direction, LegDirectionScope::Global);
        assert_eq!(LegDirectionScope::default(), LegDirectionScope::Global);
    }

    #[test]
    fn test_scoped_legs_config_is_valid() {
        let config = ExtractorConfig::scoped_legs();
        assert!(config.validate().is_ok());
        assert_eq!(config.leg_direction, LegDirectionScope::Local);
    }

    #[test]
    fn test_empty_pairs_rejected() {
        let mut config = ExtractorConfig::default();
        config.currency_pairs.clear();
        assert!(matches!(config.validate(), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_malformed_pair_rejected() {
        let mut config = ExtractorConfig::default();
        config.currency_pairs.push("EUR-USD".to_string());
        assert!(config.validate().is_err());

        config.currency_pairs.pop();
        config.currency_pairs.push("EU/USD".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_tenor_rejected() {
        let mut config = ExtractorConfig::default();
        config.common_tenors.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::scoped_legs();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml(r#"leg_direction = "local""#).unwrap();
        assert_eq!(parsed.leg_direction, LegDirectionScope::Local);
        assert_eq!(parsed.currency_pairs.len(), DEFAULT_CURRENCY_PAIRS.len());
        assert_eq!(parsed.common_tenors[0], "O/N");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = ExtractorConfig::from_toml("leg_direction = 3");
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }
}
