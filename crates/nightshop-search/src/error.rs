use thiserror::Error;

use nightshop_core::provider::ProviderError;

/// Errors raised by the search orchestrator.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No usable result could be assembled from any strategy and at least one
    /// provider query failed. Carries the first error encountered, for
    /// diagnostics. An empty but error-free search is not a failure.
    #[error("no results could be assembled from any search strategy")]
    AllQueriesFailed(#[source] ProviderError),
}
