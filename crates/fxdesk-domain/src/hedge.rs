//! Hedge module - hedge requests embedded in assistant replies

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Whether the client receives or pays the foreign currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    /// Incoming flow (exporter)
    Receive,
    /// Outgoing flow (importer)
    Pay,
}

impl FlowDirection {
    /// Get the direction name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowDirection::Receive => "receive",
            FlowDirection::Pay => "pay",
        }
    }

    /// Summary label
    pub fn label(&self) -> &'static str {
        match self {
            FlowDirection::Receive => "To receive",
            FlowDirection::Pay => "To pay",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rate move the hedge protects against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HedgeDirection {
    /// Protection against the rate rising
    Upside,
    /// Protection against the rate falling
    Downside,
}

impl HedgeDirection {
    /// Get the hedge direction name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            HedgeDirection::Upside => "upside",
            HedgeDirection::Downside => "downside",
        }
    }

    /// Summary label
    pub fn label(&self) -> &'static str {
        match self {
            HedgeDirection::Upside => "Upside protection",
            HedgeDirection::Downside => "Downside protection",
        }
    }
}

impl fmt::Display for HedgeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hedge request described by the assistant
///
/// The five non-optional fields must all be present in the source object;
/// an object missing any of them is not a hedge request. Optional fields
/// that cannot be read are left empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxHedgeRequest {
    /// Exposure amount in `currency`
    pub amount: f64,

    /// Exposure currency code
    pub currency: String,

    /// Receive or pay
    pub direction: FlowDirection,

    /// Horizon as a year fraction (0.5 = six months)
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub maturity: f64,

    /// Accounting currency of the client
    pub base_currency: String,

    /// Spot rate at the time of the request
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_rate: Option<f64>,

    /// Barrier level for barrier-style structures
    #[serde(default, rename = "Barriere", deserialize_with = "lenient_number")]
    pub barrier: Option<f64>,

    /// Protection sought
    #[serde(default, deserialize_with = "lenient")]
    pub hedge_direction: Option<HedgeDirection>,
}

impl FxHedgeRequest {
    /// Keys that must be present in the source object
    pub const REQUIRED_KEYS: [&'static str; 5] =
        ["amount", "currency", "direction", "maturity", "baseCurrency"];

    /// Exposure amount for display
    pub fn display_amount(&self) -> String {
        format!("{} {}", format_amount(self.amount), self.currency)
    }

    /// Horizon for display
    pub fn display_maturity(&self) -> String {
        format_maturity(self.maturity)
    }
}

/// Outcome of scanning an assistant reply for a hedge request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxBlockExtraction {
    /// The request, when a complete one was found
    pub data: Option<FxHedgeRequest>,

    /// Reply text with the request fragment removed
    pub clean_content: String,
}

impl FxBlockExtraction {
    /// A request was found and stripped from the reply
    pub fn found(data: FxHedgeRequest, clean_content: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            clean_content: clean_content.into(),
        }
    }

    /// Nothing usable was found; the reply is returned untouched
    pub fn not_found(original: impl Into<String>) -> Self {
        Self {
            data: None,
            clean_content: original.into(),
        }
    }

    /// Whether a request was extracted
    pub fn is_found(&self) -> bool {
        self.data.is_some()
    }
}

/// Compact amount: `1.50M`, `250K`, or the plain number
pub fn format_amount(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("{:.2}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("{:.0}K", amount / 1_000.0)
    } else {
        format!("{}", amount)
    }
}

/// Year fraction as months below one year, years otherwise
pub fn format_maturity(maturity: f64) -> String {
    if maturity < 1.0 {
        let months = (maturity * 12.0).round() as i64;
        format!("{} months", months)
    } else {
        let plural = if maturity > 1.0 { "s" } else { "" };
        format!("{:.2} year{}", maturity, plural)
    }
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid maturity '{}': {}", s, e))),
    }
}

/// Optional number: numeric strings are read, anything else is dropped
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LenientNumber {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match LenientNumber::deserialize(deserializer)? {
        LenientNumber::Number(n) => Some(n),
        LenientNumber::Text(s) => s.trim().parse::<f64>().ok(),
        LenientNumber::Other(_) => None,
    })
}

/// Optional value: anything that does not read as `T` is dropped
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Value(T),
        Other(IgnoredAny),
    }

    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(value) => Some(value),
        Lenient::Other(_) => None,
    })
}
