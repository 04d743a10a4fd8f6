//! Wildcard-aware comparison of used keys against a catalog.

use serde::Serialize;

use crate::core::data::{Catalog, KeyMatcher, UsageKey};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Used keys with no matching catalog key, in input order.
    pub missing: Vec<UsageKey>,
    /// Catalog entries matched by at least one used key, in catalog order.
    pub compatible: Catalog,
}

/// Split `used` against `declared`.
///
/// A used key matches a catalog key when they are equal or when the used key is a pattern
/// matching it. A bare `*` therefore matches every catalog key.
pub fn reconcile(used: &[UsageKey], declared: &Catalog) -> Reconciliation {
    let matchers: Vec<KeyMatcher> = used
        .iter()
        .filter(|key| !key.is_empty())
        .map(UsageKey::matcher)
        .collect();

    let missing = used
        .iter()
        .filter(|key| !key.is_empty())
        .zip(matchers.iter())
        .filter(|(_, matcher)| !declared.keys().any(|k| matcher.matches(k)))
        .map(|(key, _)| key.clone())
        .collect();

    let compatible = declared
        .iter()
        .filter(|(k, _)| matchers.iter().any(|matcher| matcher.matches(k)))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Reconciliation {
        missing,
        compatible,
    }
}
