//! Enumerates the provider queries for one search invocation.
//!
//! Two strategies: free-text keyword queries (precise for locale-specific
//! shop naming, issued first, in fixed order) and a single category-based
//! nearby query used only as a recall backstop when no keyword matches.

use crate::config::SearchConfig;

/// One free-text provider query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextQuery<'a> {
    pub keyword: &'a str,
}

/// The single category-restricted fallback query.
#[derive(Debug, Clone, Copy)]
pub struct NearbyQuery<'a> {
    pub categories: &'a [String],
}

/// Produces query descriptors from the configured strategies. Never executes
/// anything itself.
pub struct QueryPlanner<'a> {
    config: &'a SearchConfig,
}

impl<'a> QueryPlanner<'a> {
    #[must_use]
    pub fn new(config: &'a SearchConfig) -> Self {
        Self { config }
    }

    /// Text-strategy queries in configured order.
    pub fn text_queries(&self) -> impl Iterator<Item = TextQuery<'a>> + '_ {
        self.config
            .keywords
            .iter()
            .map(|keyword| TextQuery { keyword })
    }

    /// The fallback query over the configured category set.
    #[must_use]
    pub fn nearby_query(&self) -> NearbyQuery<'a> {
        NearbyQuery {
            categories: &self.config.nearby_categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_queries_preserve_configured_order() {
        let config = SearchConfig {
            keywords: vec!["aaa".to_string(), "bbb".to_string(), "ccc".to_string()],
            ..SearchConfig::default()
        };
        let planner = QueryPlanner::new(&config);
        let keywords: Vec<&str> = planner.text_queries().map(|q| q.keyword).collect();
        assert_eq!(keywords, vec!["aaa", "bbb", "ccc"]);
    }

    #[test]
    fn default_plan_has_one_query_per_keyword() {
        let config = SearchConfig::default();
        let planner = QueryPlanner::new(&config);
        assert_eq!(planner.text_queries().count(), config.keywords.len());
    }

    #[test]
    fn nearby_query_carries_all_categories() {
        let config = SearchConfig::default();
        let planner = QueryPlanner::new(&config);
        let nearby = planner.nearby_query();
        assert_eq!(nearby.categories, config.nearby_categories.as_slice());
    }
}
