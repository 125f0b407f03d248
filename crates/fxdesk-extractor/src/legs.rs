//! Structure leg extraction
//!
//! Legs are found by two patterns: one with a buy/sell verb in front of the
//! option ("sell 3M EUR call @ 1.12") and one for the bare option
//! ("put 1.05"). All verb matches are collected first, then all bare
//! matches, and a leg is kept only the first time its (type, strike) pair
//! is seen.

use crate::config::LegDirectionScope;
use crate::rules::{compile, group};
use fxdesk_domain::{OptionType, Side, StructureLeg};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Verb, optional tenor and currency, option type and strike
static VERB_LEG: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)(buy|sell)\s*(?:\d+[YM])?\s*(?:EUR|USD)?\s*(call|put)\s*[@\s]*(\d+\.\d+)")
});

/// Option type and strike
static BARE_LEG: Lazy<Regex> = Lazy::new(|| compile(r"(?i)(call|put)\s*[@\s]*(\d+\.\d+)"));

/// A standalone buy/sell word
static SIDE_WORD: Lazy<Regex> = Lazy::new(|| compile(r"(?i)\b(buy|sell)\b"));

/// A leg as matched, before its direction is settled
struct LegMatch<'t> {
    option_type: OptionType,
    strike: &'t str,
    verb: Option<Side>,
    start: usize,
}

fn side(word: &str) -> Option<Side> {
    match word.to_lowercase().as_str() {
        "buy" => Some(Side::Buy),
        "sell" => Some(Side::Sell),
        _ => None,
    }
}

fn verb_match<'t>(caps: &Captures<'t>) -> Option<LegMatch<'t>> {
    Some(LegMatch {
        verb: side(group(caps, 1)?),
        option_type: OptionType::parse(group(caps, 2)?)?,
        strike: group(caps, 3)?,
        start: caps.get(0)?.start(),
    })
}

fn bare_match<'t>(caps: &Captures<'t>) -> Option<LegMatch<'t>> {
    Some(LegMatch {
        verb: None,
        option_type: OptionType::parse(group(caps, 1)?)?,
        strike: group(caps, 2)?,
        start: caps.get(0)?.start(),
    })
}

/// Whole-chat heuristic: a leg is sold when "sell <type>" appears anywhere
fn global_direction(lower: &str, option_type: OptionType) -> Side {
    if lower.contains(&format!("sell {}", option_type.as_str())) {
        Side::Sell
    } else {
        Side::Buy
    }
}

/// Leg-scoped direction: the captured verb, else the last buy/sell word
/// before the leg on the same line
fn local_direction(text: &str, leg: &LegMatch<'_>) -> Side {
    if let Some(verb) = leg.verb {
        return verb;
    }
    let line_start = text[..leg.start].rfind('\n').map_or(0, |idx| idx + 1);
    SIDE_WORD
        .captures_iter(&text[line_start..leg.start])
        .last()
        .and_then(|caps| side(group(&caps, 1)?))
        .unwrap_or(Side::Buy)
}

/// Extract the option legs of a structure
pub(crate) fn structure_legs(text: &str, scope: LegDirectionScope) -> Vec<StructureLeg> {
    let lower = text.to_lowercase();
    let matches = VERB_LEG
        .captures_iter(text)
        .filter_map(|caps| verb_match(&caps))
        .chain(BARE_LEG.captures_iter(text).filter_map(|caps| bare_match(&caps)));

    let mut legs: Vec<StructureLeg> = Vec::new();
    for leg in matches {
        let seen = legs
            .iter()
            .any(|l| l.option_type == leg.option_type && l.strike == leg.strike);
        if seen {
            continue;
        }
        let direction = match scope {
            LegDirectionScope::Global => global_direction(&lower, leg.option_type),
            LegDirectionScope::Local => local_direction(text, &leg),
        };
        legs.push(StructureLeg {
            option_type: leg.option_type,
            direction,
            strike: leg.strike.to_string(),
        });
    }
    legs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(option_type: OptionType, direction: Side, strike: &str) -> StructureLeg {
        StructureLeg {
            option_type,
            direction,
            strike: strike.to_string(),
        }
    }

    #[test]
    fn test_collar_legs_global() {
        let legs = structure_legs("Buy EUR put @ 1.05, sell call @ 1.12", LegDirectionScope::Global);
        assert_eq!(
            legs,
            vec![
                leg(OptionType::Put, Side::Buy, "1.05"),
                leg(OptionType::Call, Side::Sell, "1.12"),
            ]
        );
    }

    #[test]
    fn test_same_leg_twice_is_deduplicated() {
        let legs = structure_legs("buy call @1.10 ... confirm call @1.10", LegDirectionScope::Global);
        assert_eq!(legs, vec![leg(OptionType::Call, Side::Buy, "1.10")]);
    }

    #[test]
    fn test_verb_matches_come_before_bare_matches() {
        let legs = structure_legs("call 1.20 first, then buy put 1.05", LegDirectionScope::Global);
        assert_eq!(
            legs,
            vec![
                leg(OptionType::Put, Side::Buy, "1.05"),
                leg(OptionType::Call, Side::Buy, "1.20"),
            ]
        );
    }

    #[test]
    fn test_verb_with_tenor_and_currency() {
        let text = "SELL 6M USD PUT @ 1.0450";
        let legs = structure_legs(text, LegDirectionScope::Local);
        assert_eq!(legs, vec![leg(OptionType::Put, Side::Sell, "1.0450")]);

        // The global check looks for the literal "sell put", which the
        // tenor and currency break up.
        let legs = structure_legs(text, LegDirectionScope::Global);
        assert_eq!(legs, vec![leg(OptionType::Put, Side::Buy, "1.0450")]);
    }

    #[test]
    fn test_global_heuristic_misattributes_mixed_directions() {
        // Two puts with different directions: the global check sees
        // "sell put" somewhere and marks both as sold.
        let text = "buy put 1.05\nsell put 1.00";
        let legs = structure_legs(text, LegDirectionScope::Global);
        assert_eq!(
            legs,
            vec![
                leg(OptionType::Put, Side::Sell, "1.05"),
                leg(OptionType::Put, Side::Sell, "1.00"),
            ]
        );
    }

    #[test]
    fn test_local_scope_uses_each_legs_verb() {
        let text = "buy put 1.05\nsell put 1.00";
        let legs = structure_legs(text, LegDirectionScope::Local);
        assert_eq!(
            legs,
            vec![
                leg(OptionType::Put, Side::Buy, "1.05"),
                leg(OptionType::Put, Side::Sell, "1.00"),
            ]
        );
    }

    #[test]
    fn test_local_scope_bare_leg_looks_back_on_its_line() {
        let text = "we sell the topside: 25d call @ 1.15\nand the put @ 1.02";
        let legs = structure_legs(text, LegDirectionScope::Local);
        assert_eq!(
            legs,
            vec![
                leg(OptionType::Call, Side::Sell, "1.15"),
                leg(OptionType::Put, Side::Buy, "1.02"),
            ]
        );
    }

    #[test]
    fn test_no_legs() {
        assert!(structure_legs("spot eurusd 1.0870", LegDirectionScope::Global).is_empty());
        assert!(structure_legs("call me back", LegDirectionScope::Global).is_empty());
    }
}
