//! Pipeline configuration.
//!
//! All tunables travel as an explicit [`SearchConfig`] value handed to the
//! orchestrator and the flag ledger, so tests can vary keyword sets and
//! retention windows without touching globals.

use chrono::Duration;

/// Keyword list for the text strategy, ordered by how Belgian night shops
/// actually name themselves. Each keyword becomes one provider query.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "night shop",
    "nachtwinkel",
    "alimentation",
    "alimentation générale",
    "épicerie de nuit",
    "tabac",
    "convenience store",
    "late night shop",
];

/// Place categories for the nearby fallback strategy.
pub const DEFAULT_NEARBY_CATEGORIES: &[&str] =
    &["convenience_store", "grocery_store", "liquor_store", "store"];

/// Storage namespace for the flag ledger mapping.
pub const DEFAULT_FLAG_STORAGE_KEY: &str = "nightshop_flagged";

/// Configuration for one search pipeline instance.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Text-strategy keywords, issued in order.
    pub keywords: Vec<String>,
    /// Category identifiers for the single nearby fallback query.
    pub nearby_categories: Vec<String>,
    /// Radius used when the caller does not supply one.
    pub default_radius_meters: f64,
    /// How long a "reported closed" flag stays observable.
    pub flag_retention: Duration,
    /// Key under which the flag mapping is persisted.
    pub flag_storage_key: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|s| (*s).to_string()).collect(),
            nearby_categories: DEFAULT_NEARBY_CATEGORIES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            default_radius_meters: 2_000.0,
            flag_retention: Duration::hours(2),
            flag_storage_key: DEFAULT_FLAG_STORAGE_KEY.to_string(),
        }
    }
}
