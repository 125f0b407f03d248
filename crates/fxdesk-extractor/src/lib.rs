//! fxdesk Extractor
//!
//! Turns free text from an FX sales desk into structured records.
//!
//! # Overview
//!
//! Two independent pipelines live here:
//!
//! - **Trade chat extraction**: a pasted Bloomberg-style chat between a
//!   salesperson and a client becomes a [`TradeRecord`] with product type,
//!   pair, notional, rates, option details, structure legs and status.
//! - **Hedge request extraction**: an assistant reply carrying an embedded
//!   JSON hedge request is split into the decoded [`FxHedgeRequest`] and the
//!   reply text with the fragment removed.
//!
//! # Architecture
//!
//! ```text
//! chat  → TradeExtractor   → rule chains per field → TradeRecord
//! reply → FxBlockExtractor → marker | fence | bare  → FxBlockExtraction
//! ```
//!
//! Each field is read by an ordered chain of named patterns; the first rule
//! that yields a value wins. Extraction never fails: a field the text does
//! not mention stays empty.
//!
//! # Example Usage
//!
//! ```
//! use fxdesk_extractor::{parse_fx_hedge_block, parse_trade_chat};
//!
//! let record = parse_trade_chat("EURUSD 3M fwd, client buys 5 mio EUR, done");
//! assert_eq!(record.currency_pair.as_deref(), Some("EUR/USD"));
//!
//! let reply = "Noted.\nFX_DATA:{\"amount\":1000000,\"currency\":\"USD\",\
//!     \"direction\":\"receive\",\"maturity\":0.5,\"baseCurrency\":\"EUR\"}";
//! let extraction = parse_fx_hedge_block(reply);
//! assert!(extraction.is_found());
//! assert_eq!(extraction.clean_content, "Noted.");
//! ```
//!
//! [`TradeRecord`]: fxdesk_domain::TradeRecord
//! [`FxHedgeRequest`]: fxdesk_domain::FxHedgeRequest

#![warn(missing_docs)]

mod error;
mod config;
mod rules;
mod fields;
mod classify;
mod legs;
mod trade;
mod fx_block;


pub use error::ExtractorError;
pub use config::{
    ExtractorConfig, LegDirectionScope, DEFAULT_COMMON_TENORS, DEFAULT_CURRENCY_PAIRS,
};
pub use trade::TradeExtractor;
pub use fx_block::{FxBlockExtractor, FxBlockStrategy};

use fxdesk_domain::{FxBlockExtraction, TradeRecord};
use once_cell::sync::Lazy;

static DEFAULT_EXTRACTOR: Lazy<TradeExtractor> = Lazy::new(TradeExtractor::default);

/// Parse a trade chat with the default configuration
pub fn parse_trade_chat(chat: &str) -> TradeRecord {
    DEFAULT_EXTRACTOR.parse(chat)
}

/// Extract the hedge request embedded in an assistant reply
pub fn parse_fx_hedge_block(content: &str) -> FxBlockExtraction {
    FxBlockExtractor::new().extract(content)
}
