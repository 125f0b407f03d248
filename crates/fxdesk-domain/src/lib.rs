//! fxdesk Domain Layer
//!
//! This crate contains the value types shared by the extraction pipelines
//! and their callers. It carries no parsing logic of its own: records are
//! plain data, created fresh by an extractor and handed to the caller.
//!
//! ## Key Concepts
//!
//! - **TradeRecord**: The structured reading of a pasted desk chat
//! - **StructureLeg**: One call or put of a multi-option structure
//! - **FxHedgeRequest**: A hedge request embedded in an assistant reply
//! - **Currency pair**: Always normalized to `XXX/YYY`
//!
//! ## Architecture
//!
//! - Serde-friendly types with the wire key names used by the front end
//! - Every extracted field is independently optional
//! - Display helpers live next to the types they render

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod hedge;
pub mod pair;
pub mod trade;

// Re-exports for convenience
pub use hedge::{
    format_amount, format_maturity, FlowDirection, FxBlockExtraction, FxHedgeRequest,
    HedgeDirection,
};
pub use pair::{normalize_pair, pair_from_codes};
pub use trade::{OptionType, ProductType, Side, StructureLeg, TradeRecord, TradeStatus};
