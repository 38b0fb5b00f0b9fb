//! Composes the full search pipeline.
//!
//! Planner → provider queries → dedup merge → enrichment → ranking, with the
//! nearby-category strategy as a recall backstop. Individual query failures
//! are absorbed and logged; the only error path out is a search where every
//! strategy came back empty and at least one query failed.

use nightshop_core::provider::{PlaceSearch, ProviderError};
use nightshop_core::types::{Coordinate, Shop};

use crate::config::SearchConfig;
use crate::dedup::Deduplicator;
use crate::enrich::enrich_records;
use crate::error::SearchError;
use crate::ledger::{FlagLedger, KeyValueStore};
use crate::planner::QueryPlanner;
use crate::rank::rank_shops;

/// Runs searches against a [`PlaceSearch`] provider.
pub struct SearchOrchestrator<P> {
    provider: P,
    config: SearchConfig,
}

impl<P: PlaceSearch> SearchOrchestrator<P> {
    pub fn new(provider: P, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Produces the ranked list of nearby open (or possibly-open) shops.
    ///
    /// Free-text keyword queries run first, in planner order. If none of them
    /// yields a record, the category-based nearby query runs once as a
    /// fallback: keyword queries are more precise for locale-specific shop
    /// naming but can come up empty in sparse regions.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::AllQueriesFailed`] only when the merged working
    /// set is empty after both strategies **and** at least one query failed.
    /// An empty result without any failure is `Ok(vec![])`.
    pub async fn search_nearby_open_shops<S: KeyValueStore>(
        &self,
        ledger: &mut FlagLedger<S>,
        origin: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<Shop>, SearchError> {
        let planner = QueryPlanner::new(&self.config);
        let mut dedup = Deduplicator::new();
        let mut first_error: Option<ProviderError> = None;

        for query in planner.text_queries() {
            match self
                .provider
                .search_text(query.keyword, origin, radius_meters)
                .await
            {
                Ok(batch) => {
                    tracing::debug!(
                        keyword = query.keyword,
                        returned = batch.len(),
                        merged = dedup.len(),
                        "text query merged"
                    );
                    dedup.merge(batch);
                }
                Err(error) => {
                    tracing::warn!(keyword = query.keyword, %error, "text query failed");
                    first_error.get_or_insert(error);
                }
            }
        }

        if dedup.is_empty() {
            let nearby = planner.nearby_query();
            tracing::debug!("text strategy empty — falling back to nearby categories");
            match self
                .provider
                .search_nearby(nearby.categories, origin, radius_meters)
                .await
            {
                Ok(batch) => dedup.merge(batch),
                Err(error) => {
                    tracing::warn!(%error, "nearby query failed");
                    first_error.get_or_insert(error);
                }
            }
        }

        if dedup.is_empty() {
            if let Some(error) = first_error {
                return Err(SearchError::AllQueriesFailed(error));
            }
            return Ok(Vec::new());
        }

        let shops = enrich_records(dedup.into_records(), origin, ledger);
        Ok(rank_shops(shops))
    }
}
