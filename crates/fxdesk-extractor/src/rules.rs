//! Ordered "first match wins" rule chains
//!
//! Every field with fallbacks is described as a list of named rules. A rule
//! pairs a compiled pattern with a transform from its captures to a value;
//! the chain returns the value of the first rule that produces one. Each
//! lookup runs a fresh search over the input, so no match position is ever
//! carried from one call to the next.

use regex::{Captures, Regex};
use tracing::trace;

/// Transform from the captures of a matching rule to a field value
pub(crate) type Transform<T> = fn(&Captures<'_>) -> Option<T>;

/// A named pattern and its transform
pub(crate) struct Rule<T> {
    name: &'static str,
    pattern: Regex,
    transform: Transform<T>,
}

impl<T> Rule<T> {
    /// Build a rule from a pattern literal
    ///
    /// Patterns are source constants; a pattern that fails to compile is a
    /// programming error caught by the unit tests of each chain.
    pub(crate) fn new(name: &'static str, pattern: &str, transform: Transform<T>) -> Self {
        Self {
            name,
            pattern: compile(pattern),
            transform,
        }
    }

    /// Rule name, used in trace output
    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// Apply this rule to `text`
    pub(crate) fn apply(&self, text: &str) -> Option<T> {
        self.pattern
            .captures(text)
            .and_then(|caps| (self.transform)(&caps))
    }
}

/// Rules evaluated in order until one yields a value
pub(crate) struct RuleChain<T> {
    field: &'static str,
    rules: Vec<Rule<T>>,
}

impl<T> RuleChain<T> {
    /// Create a chain for the named field
    pub(crate) fn new(field: &'static str, rules: Vec<Rule<T>>) -> Self {
        Self { field, rules }
    }

    /// Value of the first rule that matches, if any
    pub(crate) fn first_match(&self, text: &str) -> Option<T> {
        self.rules.iter().find_map(|rule| {
            let value = rule.apply(text)?;
            trace!(field = self.field, rule = rule.name(), "rule matched");
            Some(value)
        })
    }

    /// Rules in priority order
    #[cfg(test)]
    pub(crate) fn rules(&self) -> &[Rule<T>] {
        &self.rules
    }

    /// Name of the first rule that matches, if any
    #[cfg(test)]
    pub(crate) fn winning_rule(&self, text: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.apply(text).is_some())
            .map(|rule| rule.name())
    }
}

/// Compile a pattern literal
pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {:?}: {}", pattern, e))
}

/// Text of capture group `idx`, if it participated in the match
pub(crate) fn group<'t>(caps: &Captures<'t>, idx: usize) -> Option<&'t str> {
    caps.get(idx).map(|m| m.as_str())
}
