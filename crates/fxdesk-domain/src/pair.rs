//! Currency pair normalization

/// Normalize a currency pair to its `XXX/YYY` display form
///
/// The input is uppercased and stripped of all whitespace. A six-character
/// result without a slash is split into base and quote; anything else is
/// returned as cleaned.
///
/// # Examples
///
/// ```
/// use fxdesk_domain::normalize_pair;
///
/// assert_eq!(normalize_pair("eurusd"), "EUR/USD");
/// assert_eq!(normalize_pair("GBP / JPY"), "GBP/JPY");
/// ```
pub fn normalize_pair(pair: &str) -> String {
    let clean: String = pair
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if clean.chars().count() == 6 && !clean.contains('/') {
        let split = clean
            .char_indices()
            .nth(3)
            .map(|(idx, _)| idx)
            .unwrap_or(clean.len());
        return format!("{}/{}", &clean[..split], &clean[split..]);
    }
    clean
}

/// Join two currency codes into a normalized pair
pub fn pair_from_codes(base: &str, quote: &str) -> String {
    format!("{}/{}", base.to_uppercase(), quote.to_uppercase())
}
