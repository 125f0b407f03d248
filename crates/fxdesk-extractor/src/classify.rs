//! Keyword classifiers
//!
//! All classifiers take the lowercased chat and decide by keyword priority.

use crate::rules::compile;
use fxdesk_domain::{OptionType, ProductType, Side, TradeStatus};
use once_cell::sync::Lazy;
use regex::Regex;

/// A two-way price such as "1.0872 / 1.0874"
static TWO_WAY_PRICE: Lazy<Regex> = Lazy::new(|| compile(r"\d+\.\d+\s*/\s*\d+\.\d+"));

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Product type, most structured product first
pub(crate) fn product_type(lower: &str) -> ProductType {
    if lower.contains("seagull") {
        return ProductType::Seagull;
    }
    if contains_any(lower, &["risk reversal", "rr "]) {
        return ProductType::RiskReversal;
    }
    // A collar keyword alone is not enough: both legs must be named.
    if contains_any(lower, &["collar", "zero cost", "zc"])
        && lower.contains("call")
        && lower.contains("put")
    {
        return ProductType::Collar;
    }
    if contains_any(lower, &["call", "put", "option", "vol"]) {
        return ProductType::Option;
    }
    if contains_any(lower, &["forward", "fwd", "outright", "pts"]) {
        return ProductType::Forward;
    }
    if lower.contains("spot") {
        return ProductType::Spot;
    }
    ProductType::Other
}

/// Negotiation status: done > passed > quoted > inquiry
pub(crate) fn status(lower: &str) -> TradeStatus {
    if contains_any(lower, &["done", "deal"]) {
        return TradeStatus::Done;
    }
    if contains_any(lower, &["pass", "will come back", "wait"]) {
        return TradeStatus::Passed;
    }
    if TWO_WAY_PRICE.is_match(lower) || lower.contains("premium") {
        return TradeStatus::Quoted;
    }
    TradeStatus::Inquiry
}

/// Client direction, buy wording first
pub(crate) fn direction(lower: &str) -> Option<Side> {
    if contains_any(lower, &["bought", "buy"]) {
        Some(Side::Buy)
    } else if contains_any(lower, &["sold", "sell"]) {
        Some(Side::Sell)
    } else {
        None
    }
}

/// Option type, call wording first
pub(crate) fn option_type(lower: &str) -> Option<OptionType> {
    if lower.contains("call") {
        Some(OptionType::Call)
    } else if lower.contains("put") {
        Some(OptionType::Put)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_priority() {
        assert_eq!(product_type("seagull with a call and put, fwd pts"), ProductType::Seagull);
        assert_eq!(product_type("3m risk reversal 25d"), ProductType::RiskReversal);
        assert_eq!(product_type("rr 1y please"), ProductType::RiskReversal);
        assert_eq!(product_type("zero cost collar buy put sell call"), ProductType::Collar);
        assert_eq!(product_type("eur call 1.10"), ProductType::Option);
        assert_eq!(product_type("6m outright"), ProductType::Forward);
        assert_eq!(product_type("spot eurusd"), ProductType::Spot);
        assert_eq!(product_type("hello"), ProductType::Other);
    }

    #[test]
    fn test_collar_needs_both_legs() {
        // Only a put is mentioned: falls through to option.
        assert_eq!(product_type("collar, buy put 1.05"), ProductType::Option);
    }

    #[test]
    fn test_vol_keyword_means_option() {
        assert_eq!(product_type("where is 3m vol"), ProductType::Option);
    }

    #[test]
    fn test_status_priority() {
        assert_eq!(status("done, thanks. premium eur 50k"), TradeStatus::Done);
        assert_eq!(status("deal"), TradeStatus::Done);
        assert_eq!(status("i'll pass for now"), TradeStatus::Passed);
        assert_eq!(status("let me wait"), TradeStatus::Passed);
        assert_eq!(status("will come back to you"), TradeStatus::Passed);
        assert_eq!(status("1.0872 / 1.0874"), TradeStatus::Quoted);
        assert_eq!(status("premium is 0.8%"), TradeStatus::Quoted);
        assert_eq!(status("price in eurusd?"), TradeStatus::Inquiry);
    }

    #[test]
    fn test_direction() {
        assert_eq!(direction("we bought it"), Some(Side::Buy));
        assert_eq!(direction("client wants to buy"), Some(Side::Buy));
        assert_eq!(direction("sold at 1.08"), Some(Side::Sell));
        assert_eq!(direction("buy or sell?"), Some(Side::Buy));
        assert_eq!(direction("price?"), None);
    }

    #[test]
    fn test_option_type() {
        assert_eq!(option_type("eur call / usd put"), Some(OptionType::Call));
        assert_eq!(option_type("usd put"), Some(OptionType::Put));
        assert_eq!(option_type("forward"), None);
    }
}
