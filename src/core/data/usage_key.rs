use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Marker standing for one run of unknown characters in a usage key.
pub const WILDCARD: char = '*';

/// One piece of a key recovered from a concatenation or template literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPart {
    /// Text known at scan time (string literal, template chunk).
    Literal(String),
    /// Any non-literal sub-expression.
    Dynamic,
}

/// A translation key recovered from a usage site.
///
/// Exact keys contain no `*`. Keys built from runtime expressions carry one `*` per run of
/// dynamic parts, e.g. `'link_' + ctrl.name` becomes `link_*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageKey(String);

impl UsageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Build a key from literal and dynamic parts.
    ///
    /// Consecutive dynamic parts (ignoring empty literals between them) collapse into a single
    /// wildcard, so `a + b` yields `*` and not `**`.
    pub fn from_parts(parts: &[KeyPart]) -> Self {
        let mut key = String::new();
        let mut last_was_wildcard = false;
        for part in parts {
            match part {
                KeyPart::Literal(text) if text.is_empty() => {}
                KeyPart::Literal(text) => {
                    key.push_str(text);
                    last_was_wildcard = false;
                }
                KeyPart::Dynamic => {
                    if !last_was_wildcard {
                        key.push(WILDCARD);
                    }
                    last_was_wildcard = true;
                }
            }
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_pattern(&self) -> bool {
        self.0.contains(WILDCARD)
    }

    /// Literal text before the first wildcard (the whole key when exact).
    pub fn leading_literal(&self) -> &str {
        self.0.split(WILDCARD).next().unwrap_or_default()
    }

    pub fn with_prefix(&self, prefix: &str) -> Self {
        Self(format!("{}{}", prefix, self.0))
    }

    pub fn matcher(&self) -> KeyMatcher {
        KeyMatcher::new(self)
    }
}

impl fmt::Display for UsageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UsageKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for UsageKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl AsRef<str> for UsageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Compiled matching rule for one usage key against exact catalog keys.
///
/// A key matches a catalog key when both are equal, or when the usage key has wildcards and
/// the anchored pattern (literal text escaped, each `*` replaced by `.+`) matches.
#[derive(Debug, Clone)]
pub struct KeyMatcher {
    key: String,
    pattern: Option<Regex>,
}

impl KeyMatcher {
    pub fn new(key: &UsageKey) -> Self {
        let pattern = if key.is_pattern() {
            let body = key
                .as_str()
                .split(WILDCARD)
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".+");
            Regex::new(&format!("^{}$", body)).ok()
        } else {
            None
        };
        Self {
            key: key.as_str().to_string(),
            pattern,
        }
    }

    pub fn matches(&self, catalog_key: &str) -> bool {
        if self.key == catalog_key {
            return true;
        }
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(catalog_key))
    }
}
