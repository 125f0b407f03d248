//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while configuring an extractor or decoding a
/// candidate fragment
///
/// The public parse entry points never return these: a failed candidate is
/// reported as "nothing found". They surface only from configuration.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// A required key is absent from a hedge request object
    #[error("Missing required key: {0}")]
    MissingField(String),

    /// A fragment parsed as JSON but has the wrong shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

impl From<toml::de::Error> for ExtractorError {
    fn from(e: toml::de::Error) -> Self {
        ExtractorError::Config(format!("Failed to parse TOML: {}", e))
    }
}
