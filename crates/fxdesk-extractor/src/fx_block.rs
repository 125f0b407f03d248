//! Hedge request extraction from assistant replies
//!
//! The assistant is asked to append its reading of the client's exposure as
//! a small JSON object. Replies are not always disciplined about the format,
//! so three spellings are accepted, tried in this order:
//!
//! 1. `FX_DATA:{...}` inline marker
//! 2. a fenced ```` ```json ```` block
//! 3. a bare object that starts with `"amount"` and ends with
//!    `"hedgeDirection"`
//!
//! The first candidate carrying all required keys wins and is cut out of
//! the reply. A candidate that is not valid JSON stops the search.

use crate::error::ExtractorError;
use crate::rules::compile;
use fxdesk_domain::{FxBlockExtraction, FxHedgeRequest};
use once_cell::sync::Lazy;
use regex::{Match, Regex};
use serde_json::Value;
use tracing::{debug, warn};

/// Ways a hedge request can be embedded in a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxBlockStrategy {
    /// `FX_DATA:{...}` marker, with the newline before it
    Marker,
    /// Markdown code fence tagged `json`
    Fence,
    /// Bare object in `amount ... hedgeDirection` key order
    BareObject,
}

impl FxBlockStrategy {
    /// All strategies in priority order
    pub const ALL: [FxBlockStrategy; 3] = [
        FxBlockStrategy::Marker,
        FxBlockStrategy::Fence,
        FxBlockStrategy::BareObject,
    ];

    /// Strategy name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            FxBlockStrategy::Marker => "marker",
            FxBlockStrategy::Fence => "fence",
            FxBlockStrategy::BareObject => "bare_object",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            FxBlockStrategy::Marker => &MARKER,
            FxBlockStrategy::Fence => &FENCE,
            FxBlockStrategy::BareObject => &BARE_OBJECT,
        }
    }

    /// Locate this strategy's fragment: (text to strip, JSON to parse)
    fn locate<'t>(&self, text: &'t str) -> Option<(Match<'t>, &'t str)> {
        let caps = self.pattern().captures(text)?;
        let whole = caps.get(0)?;
        let json = match self {
            FxBlockStrategy::Marker | FxBlockStrategy::Fence => caps.get(1)?.as_str(),
            FxBlockStrategy::BareObject => whole.as_str(),
        };
        Some((whole, json))
    }
}

static MARKER: Lazy<Regex> = Lazy::new(|| compile(r"\n?FX_DATA:\s*(\{[^{}]*\})"));

static FENCE: Lazy<Regex> = Lazy::new(|| compile(r"(?s)```json\s*(.*?)\s*```"));

static BARE_OBJECT: Lazy<Regex> = Lazy::new(|| {
    compile(r#"\{\s*"amount"\s*:\s*\d+[^{}]*?"hedgeDirection"\s*:\s*(?:"[^"]*"|null)\s*\}"#)
});

/// Outcome of decoding one candidate
enum Candidate {
    Accepted(FxHedgeRequest),
    Rejected(ExtractorError),
}

/// Extracts a hedge request embedded in an assistant reply
#[derive(Debug, Clone, Copy, Default)]
pub struct FxBlockExtractor;

impl FxBlockExtractor {
    /// Create a new FxBlockExtractor
    pub fn new() -> Self {
        Self
    }

    /// Find, decode and strip the hedge request in `content`
    ///
    /// Returns the reply untouched, with no data, when no strategy yields a
    /// complete request or when a located fragment is not valid JSON.
    pub fn extract(&self, content: &str) -> FxBlockExtraction {
        for strategy in FxBlockStrategy::ALL {
            let Some((fragment, json)) = strategy.locate(content) else {
                continue;
            };

            match decode(json) {
                Ok(Candidate::Accepted(request)) => {
                    debug!(strategy = strategy.as_str(), "Hedge request extracted");
                    let clean = strip(content, &fragment);
                    return FxBlockExtraction::found(request, clean);
                }
                Ok(Candidate::Rejected(reason)) => {
                    debug!(strategy = strategy.as_str(), %reason, "Candidate rejected");
                }
                Err(e) => {
                    warn!(strategy = strategy.as_str(), "Malformed hedge request: {}", e);
                    return FxBlockExtraction::not_found(content);
                }
            }
        }
        FxBlockExtraction::not_found(content)
    }
}

/// Parse a fragment; `Err` only when it is not JSON at all
fn decode(json: &str) -> Result<Candidate, ExtractorError> {
    let value: Value = serde_json::from_str(json)?;

    let Some(object) = value.as_object() else {
        return Ok(Candidate::Rejected(ExtractorError::InvalidFormat(
            "expected a JSON object".to_string(),
        )));
    };
    if let Some(missing) = FxHedgeRequest::REQUIRED_KEYS
        .iter()
        .find(|key| !object.contains_key(**key))
    {
        return Ok(Candidate::Rejected(ExtractorError::MissingField(
            missing.to_string(),
        )));
    }

    Ok(match serde_json::from_value::<FxHedgeRequest>(value) {
        Ok(request) => Candidate::Accepted(request),
        Err(e) => Candidate::Rejected(ExtractorError::InvalidFormat(e.to_string())),
    })
}

fn strip(content: &str, fragment: &Match<'_>) -> String {
    let mut clean = String::with_capacity(content.len());
    clean.push_str(&content[..fragment.start()]);
    clean.push_str(&content[fragment.end()..]);
    clean.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxdesk_domain::{FlowDirection, HedgeDirection};

    const FULL_OBJECT: &str = r#"{"amount":1000000,"currency":"USD","direction":"receive","maturity":0.5,"baseCurrency":"EUR","currentRate":0.92,"Barriere":null,"hedgeDirection":"downside"}"#;

    #[test]
    fn test_marker_round_trip() {
        let content = format!("some text\nFX_DATA:{}", FULL_OBJECT);
        let result = FxBlockExtractor::new().extract(&content);

        let data = result.data.expect("request should be extracted");
        assert_eq!(data.amount, 1_000_000.0);
        assert_eq!(data.currency, "USD");
        assert_eq!(data.direction, FlowDirection::Receive);
        assert_eq!(data.hedge_direction, Some(HedgeDirection::Downside));
        assert_eq!(result.clean_content, "some text");
    }

    #[test]
    fn test_marker_in_middle_of_reply() {
        let content = format!("Intro.\nFX_DATA: {}\n\nA forward is a good fit.", FULL_OBJECT);
        let result = FxBlockExtractor::new().extract(&content);
        assert!(result.is_found());
        assert_eq!(result.clean_content, "Intro.\n\nA forward is a good fit.");
    }

    #[test]
    fn test_fenced_block() {
        let content = format!("Here is the summary:\n```json\n{}\n```\nThanks.", FULL_OBJECT);
        let result = FxBlockExtractor::new().extract(&content);
        assert_eq!(result.data.unwrap().base_currency, "EUR");
        assert_eq!(result.clean_content, "Here is the summary:\n\nThanks.");
    }

    #[test]
    fn test_fenced_block_any_key_order() {
        let content = "```json\n{\"baseCurrency\":\"CHF\",\"maturity\":1,\"direction\":\"pay\",\"currency\":\"EUR\",\"amount\":250000}\n```";
        let result = FxBlockExtractor::new().extract(content);
        let data = result.data.unwrap();
        assert_eq!(data.direction, FlowDirection::Pay);
        assert_eq!(data.hedge_direction, None);
        assert_eq!(result.clean_content, "");
    }

    #[test]
    fn test_bare_object() {
        let content = format!("Summary {} end", FULL_OBJECT);
        let result = FxBlockExtractor::new().extract(&content);
        assert!(result.is_found());
        assert_eq!(result.clean_content, "Summary  end");
    }

    #[test]
    fn test_bare_object_requires_key_order() {
        let content = r#"{"hedgeDirection":null,"amount":1000,"currency":"USD","direction":"pay","maturity":1,"baseCurrency":"EUR"}"#;
        let result = FxBlockExtractor::new().extract(content);
        assert!(!result.is_found());
        assert_eq!(result.clean_content, content);
    }

    #[test]
    fn test_missing_required_key_leaves_content_untouched() {
        let object = FULL_OBJECT.replace(r#""baseCurrency":"EUR","#, "");
        let content = format!("some text\nFX_DATA:{}", object);
        let result = FxBlockExtractor::new().extract(&content);
        assert_eq!(result.data, None);
        assert_eq!(result.clean_content, content);
    }

    #[test]
    fn test_rejected_marker_falls_back_to_fence() {
        let content = format!(
            "FX_DATA:{{\"amount\":5}}\n```json\n{}\n```",
            FULL_OBJECT
        );
        let result = FxBlockExtractor::new().extract(&content);
        assert!(result.is_found());
        assert_eq!(result.clean_content, "FX_DATA:{\"amount\":5}");
    }

    #[test]
    fn test_malformed_json_stops_search() {
        let content = format!(
            "FX_DATA:{{\"amount\": 1000000, \"currency\": }}\n```json\n{}\n```",
            FULL_OBJECT
        );
        let result = FxBlockExtractor::new().extract(&content);
        assert!(!result.is_found());
        assert_eq!(result.clean_content, content);
    }

    #[test]
    fn test_wrong_value_type_rejected() {
        let content = r#"FX_DATA:{"amount":"lots","currency":"USD","direction":"receive","maturity":0.5,"baseCurrency":"EUR"}"#;
        let result = FxBlockExtractor::new().extract(content);
        assert!(!result.is_found());
        assert_eq!(result.clean_content, content);
    }

    #[test]
    fn test_unreadable_optional_keys_do_not_reject() {
        let content = "ok\nFX_DATA:{\"amount\":1000000,\"currency\":\"USD\",\"direction\":\"receive\",\
                       \"maturity\":0.5,\"baseCurrency\":\"EUR\",\"currentRate\":\"0.92\",\
                       \"Barriere\":\"none\",\"hedgeDirection\":\"none\"}";
        let result = FxBlockExtractor::new().extract(content);

        let data = result.data.expect("request should be extracted");
        assert_eq!(data.current_rate, Some(0.92));
        assert_eq!(data.barrier, None);
        assert_eq!(data.hedge_direction, None);
        assert_eq!(result.clean_content, "ok");
    }

    #[test]
    fn test_plain_reply() {
        let content = "A collar caps your cost at the put strike.";
        let result = FxBlockExtractor::new().extract(content);
        assert_eq!(result, FxBlockExtraction::not_found(content));
    }

    #[test]
    fn test_decode_reports_missing_key() {
        match decode(r#"{"amount":1}"#) {
            Ok(Candidate::Rejected(ExtractorError::MissingField(key))) => assert_eq!(key, "currency"),
            _ => panic!("expected a missing field rejection"),
        }
        assert!(matches!(decode("{nope"), Err(ExtractorError::JsonParse(_))));
        assert!(matches!(
            decode("[1, 2]"),
            Ok(Candidate::Rejected(ExtractorError::InvalidFormat(_)))
        ));
    }
}
