//! Trade module - the structured reading of a desk chat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product classification of a chat
///
/// Exactly one product type is assigned per record. When several keywords
/// are present the most structured product wins:
/// seagull > risk reversal > collar > option > forward > spot > other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Spot FX
    Spot,

    /// Outright forward
    Forward,

    /// Vanilla option
    Option,

    /// Zero-cost collar (bought and sold option pair)
    Collar,

    /// Risk reversal
    RiskReversal,

    /// Three-leg seagull structure
    Seagull,

    /// Nothing recognizable
    Other,
}

impl ProductType {
    /// Get the product type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Spot => "spot",
            ProductType::Forward => "forward",
            ProductType::Option => "option",
            ProductType::Collar => "collar",
            ProductType::RiskReversal => "risk_reversal",
            ProductType::Seagull => "seagull",
            ProductType::Other => "other",
        }
    }

    /// Display label used on confirmations and summaries
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Spot => "FX Spot",
            ProductType::Forward => "FX Forward",
            ProductType::Option => "FX Vanilla Option",
            ProductType::Collar => "Zero-Cost Collar",
            ProductType::RiskReversal => "Risk Reversal",
            ProductType::Seagull => "Seagull",
            ProductType::Other => "Other",
        }
    }

    /// Parse a product type from its name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spot" => Some(ProductType::Spot),
            "forward" => Some(ProductType::Forward),
            "option" => Some(ProductType::Option),
            "collar" => Some(ProductType::Collar),
            "risk_reversal" => Some(ProductType::RiskReversal),
            "seagull" => Some(ProductType::Seagull),
            "other" => Some(ProductType::Other),
            _ => None,
        }
    }

    /// Whether the product is built from several option legs
    pub fn is_structure(&self) -> bool {
        matches!(
            self,
            ProductType::Collar | ProductType::RiskReversal | ProductType::Seagull
        )
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid product type: {}", s))
    }
}

/// Negotiation state of the chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    /// Client asked for a price
    Inquiry,

    /// Dealer showed a price or premium
    Quoted,

    /// Trade agreed
    Done,

    /// Client declined or deferred
    Passed,
}

impl TradeStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Inquiry => "inquiry",
            TradeStatus::Quoted => "quoted",
            TradeStatus::Done => "done",
            TradeStatus::Passed => "passed",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buy or sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy
    Buy,
    /// Sell
    Sell,
}

impl Side {
    /// Get the side name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Call or put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option
    Call,
    /// Put option
    Put,
}

impl OptionType {
    /// Get the option type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }

    /// Parse an option type, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "call" => Some(OptionType::Call),
            "put" => Some(OptionType::Put),
            _ => None,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One option component of a structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureLeg {
    /// Call or put
    #[serde(rename = "type")]
    pub option_type: OptionType,

    /// Whether the client buys or sells this leg
    pub direction: Side,

    /// Strike as written in the chat
    pub strike: String,
}

/// Structured reading of a pasted trading-desk chat
///
/// Every extracted field is independently optional. A record is built in one
/// go by the extractor and never mutated afterwards; `counterparty` is the
/// only field a caller is expected to fill in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Counterparty name (never read from the chat)
    pub counterparty: Option<String>,

    /// Product classification
    pub product_type: ProductType,

    /// Currency pair as `XXX/YYY`
    pub currency_pair: Option<String>,

    /// Notional magnitude, e.g. "10 mio"
    pub notional: Option<String>,

    /// Notional currency code
    pub notional_currency: Option<String>,

    /// Client direction
    pub direction: Option<Side>,

    // Spot / forward
    /// Spot rate or bid / offer
    pub spot_rate: Option<String>,

    /// Forward points, e.g. "-12 / -10"
    pub forward_points: Option<String>,

    /// All-in forward rate (forwards only)
    pub outright_rate: Option<String>,

    /// Value date (not extracted)
    pub value_date: Option<String>,

    /// Tenor label, e.g. "3M"
    pub tenor: Option<String>,

    // Options
    /// Call or put
    pub option_type: Option<OptionType>,

    /// Strike
    pub strike: Option<String>,

    /// Premium amount with unit, e.g. "50k"
    pub premium: Option<String>,

    /// Premium currency code
    pub premium_currency: Option<String>,

    /// Implied volatility, e.g. "8%"
    pub volatility: Option<String>,

    /// Delta
    pub delta: Option<String>,

    /// Option legs for collars, risk reversals and seagulls
    pub structure_legs: Vec<StructureLeg>,

    /// Negotiation state
    pub status: TradeStatus,

    /// When the chat was parsed
    pub trade_time: DateTime<Utc>,

    /// The chat exactly as pasted
    pub raw_chat: String,
}

impl TradeRecord {
    /// Create an empty record for a chat captured at `trade_time`
    pub fn empty(raw_chat: impl Into<String>, trade_time: DateTime<Utc>) -> Self {
        Self {
            counterparty: None,
            product_type: ProductType::Other,
            currency_pair: None,
            notional: None,
            notional_currency: None,
            direction: None,
            spot_rate: None,
            forward_points: None,
            outright_rate: None,
            value_date: None,
            tenor: None,
            option_type: None,
            strike: None,
            premium: None,
            premium_currency: None,
            volatility: None,
            delta: None,
            structure_legs: Vec::new(),
            status: TradeStatus::Inquiry,
            trade_time,
            raw_chat: raw_chat.into(),
        }
    }

    /// Attach a counterparty name
    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    /// Field-for-field comparison that ignores the capture time
    pub fn same_content(&self, other: &TradeRecord) -> bool {
        let mut aligned = other.clone();
        aligned.trade_time = self.trade_time;
        *self == aligned
    }
}
