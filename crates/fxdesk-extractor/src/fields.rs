//! Single-field extractors for desk chats
//!
//! Each function looks for one field and returns `None` when the chat does
//! not mention it. Fields never depend on each other.

use crate::rules::{compile, group, Rule, RuleChain};
use fxdesk_domain::{normalize_pair, pair_from_codes};
use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// STATIC PATTERNS - Compiled once per process
// =============================================================================

/// Currencies recognized next to a notional
const NOTIONAL_CCY: &str = "EUR|USD|GBP|CHF|JPY|AUD|CAD";

/// Notional size units, all rendered as "mio"
const NOTIONAL_UNIT: &str = "mio|million|m|mn";

/// Any two letter triplets, optionally slashed
static GENERIC_PAIR: Lazy<Regex> = Lazy::new(|| compile(r"(?i)([A-Z]{3})\s*/?\s*([A-Z]{3})"));

/// Words stripped from a loose forward points match
static POINTS_WORDS: Lazy<Regex> = Lazy::new(|| compile(r"(?i)fwd|forward|pts|points"));

/// Notional amount and currency
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Notional {
    pub amount: String,
    pub currency: Option<String>,
}

impl Notional {
    fn from_groups(amount: Option<&str>, currency: Option<&str>) -> Option<Self> {
        Some(Self {
            amount: format!("{} mio", amount?),
            currency: currency.map(str::to_uppercase),
        })
    }
}

/// Premium amount and currency
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Premium {
    pub amount: String,
    pub currency: Option<String>,
}

static NOTIONAL_RULES: Lazy<RuleChain<Notional>> = Lazy::new(|| {
    RuleChain::new(
        "notional",
        vec![
            Rule::new(
                "amount_unit_ccy",
                &format!(r"(?i)(\d+(?:\.\d+)?)\s*({})\s*({})?", NOTIONAL_UNIT, NOTIONAL_CCY),
                |c| Notional::from_groups(group(c, 1), group(c, 3)),
            ),
            Rule::new(
                "ccy_amount_unit",
                &format!(r"(?i)({})\s*(\d+(?:\.\d+)?)\s*({})?", NOTIONAL_CCY, NOTIONAL_UNIT),
                |c| Notional::from_groups(group(c, 2), group(c, 1)),
            ),
            Rule::new(
                "labelled",
                &format!(
                    r"(?i)notional\s*[:\s]*(\d+(?:\.\d+)?)\s*({})?\s*({})?",
                    NOTIONAL_UNIT, NOTIONAL_CCY
                ),
                |c| Notional::from_groups(group(c, 1), group(c, 3)),
            ),
        ],
    )
});

static RATE_RULES: Lazy<RuleChain<String>> = Lazy::new(|| {
    RuleChain::new(
        "rate",
        vec![Rule::new(
            "rate_or_two_way",
            r"(?:@|at)?\s*(\d+\.\d{2,5})\s*(?:/\s*(\d+\.\d{2,5}))?",
            |c| match (group(c, 1), group(c, 2)) {
                (Some(bid), Some(offer)) => Some(format!("{} / {}", bid, offer)),
                (Some(rate), None) => Some(rate.to_string()),
                _ => None,
            },
        )],
    )
});

static FORWARD_POINTS_RULES: Lazy<RuleChain<String>> = Lazy::new(|| {
    RuleChain::new(
        "forward_points",
        vec![
            Rule::new(
                "loose",
                r"(?i)(?:fwd|forward)?\s*(?:pts|points)?\s*[+\-]?\d+\s*/\s*[+\-]?\d+",
                |c| {
                    let stripped = POINTS_WORDS.replace_all(c.get(0)?.as_str(), "");
                    Some(stripped.trim().to_string())
                },
            ),
            Rule::new(
                "suffixed",
                r"(?i)([+\-]?\d+)\s*/\s*([+\-]?\d+)\s*(?:pts|points)",
                |c| Some(format!("{} / {}", group(c, 1)?, group(c, 2)?)),
            ),
        ],
    )
});

static TENOR_RULES: Lazy<RuleChain<String>> = Lazy::new(|| {
    RuleChain::new(
        "tenor",
        vec![Rule::new(
            "numeric",
            r"(?i)(\d+)\s*(Y|M|W|D|year|month|week|day)s?",
            |c| {
                let unit = group(c, 2)?.chars().next()?.to_ascii_uppercase();
                Some(format!("{}{}", group(c, 1)?, unit))
            },
        )],
    )
});

static VOLATILITY_RULES: Lazy<RuleChain<String>> = Lazy::new(|| {
    RuleChain::new(
        "volatility",
        vec![Rule::new(
            "labelled",
            r"(?i)vol(?:atility)?\s*[:\s]*(\d+(?:\.\d+)?)\s*%?",
            |c| Some(format!("{}%", group(c, 1)?)),
        )],
    )
});

static PREMIUM_RULES: Lazy<RuleChain<Premium>> = Lazy::new(|| {
    RuleChain::new(
        "premium",
        vec![
            Rule::new(
                "labelled",
                r"(?i)premium\s*[:\s~≈]*\s*(EUR|USD|GBP|CHF)?\s*(\d+(?:\.\d+)?)\s*(k|K|mio|%)?",
                |c| {
                    let unit = group(c, 3).unwrap_or("").to_lowercase();
                    Some(Premium {
                        amount: format!("{}{}", group(c, 2)?, unit),
                        currency: group(c, 1).map(str::to_uppercase),
                    })
                },
            ),
            Rule::new("percent", r"(?i)(\d+(?:\.\d+)?)\s*%\s*(?:premium)?", |c| {
                Some(Premium {
                    amount: format!("{}%", group(c, 1)?),
                    currency: None,
                })
            }),
        ],
    )
});

static STRIKE_RULES: Lazy<RuleChain<String>> = Lazy::new(|| {
    RuleChain::new(
        "strike",
        vec![
            Rule::new("labelled", r"(?i)strike\s*[:\s@]*(\d+(?:\.\d+)?)", |c| {
                group(c, 1).map(str::to_string)
            }),
            Rule::new("option_at", r"(?i)(?:call|put)\s*[@\s]*(\d+\.\d+)", |c| {
                group(c, 1).map(str::to_string)
            }),
        ],
    )
});

static DELTA_RULES: Lazy<RuleChain<String>> = Lazy::new(|| {
    RuleChain::new(
        "delta",
        vec![
            Rule::new("labelled", r"(?i)(?:delta|Δ)\s*[:\s~≈]*\s*([+\-]?\d+)", |c| {
                group(c, 1).map(str::to_string)
            }),
            Rule::new("approx", r"(?i)approx\s*([+\-]?\d+)\s*delta", |c| {
                group(c, 1).map(str::to_string)
            }),
        ],
    )
});

// =============================================================================
// FIELD EXTRACTORS
// =============================================================================

/// Currency pair: allow-list first, then any two letter triplets
pub(crate) fn currency_pair(text: &str, allow_list: &[String]) -> Option<String> {
    let upper = text.to_uppercase();
    let listed = allow_list.iter().find(|pair| {
        let pair = pair.to_uppercase();
        upper.contains(&pair.replace('/', "")) || upper.contains(&pair)
    });
    if let Some(pair) = listed {
        return Some(normalize_pair(pair));
    }

    GENERIC_PAIR
        .captures(text)
        .and_then(|c| Some(pair_from_codes(group(&c, 1)?, group(&c, 2)?)))
}

/// Notional amount and currency
pub(crate) fn notional(text: &str) -> Option<Notional> {
    NOTIONAL_RULES.first_match(text)
}

/// Rate or two-way price
pub(crate) fn rate(text: &str) -> Option<String> {
    RATE_RULES.first_match(text)
}

/// Forward points
pub(crate) fn forward_points(text: &str) -> Option<String> {
    FORWARD_POINTS_RULES.first_match(text)
}

/// Tenor: numeric form first, then the canonical token list
pub(crate) fn tenor(text: &str, common_tenors: &[String]) -> Option<String> {
    if let Some(tenor) = TENOR_RULES.first_match(text) {
        return Some(tenor);
    }
    let upper = text.to_uppercase();
    common_tenors
        .iter()
        .find(|tenor| upper.contains(&tenor.to_uppercase()))
        .cloned()
}

/// Implied volatility
pub(crate) fn volatility(text: &str) -> Option<String> {
    VOLATILITY_RULES.first_match(text)
}

/// Option premium
pub(crate) fn premium(text: &str) -> Option<Premium> {
    PREMIUM_RULES.first_match(text)
}

/// Option strike
pub(crate) fn strike(text: &str) -> Option<String> {
    STRIKE_RULES.first_match(text)
}

/// Option delta
pub(crate) fn delta(text: &str) -> Option<String> {
    DELTA_RULES.first_match(text)
}
