//! Provider port for place search.
//!
//! The pipeline consumes this trait; the `nightshop-places` crate supplies
//! the production implementation. Keeping the port here lets the search crate
//! stay independent of any particular provider's wire format.

use std::error::Error as StdError;
use std::future::Future;

use thiserror::Error;

use crate::types::{Coordinate, RawPlaceRecord};

/// A failed query against the place-search provider.
///
/// Opaque to the pipeline: the adapter's own error type is carried as the
/// source for diagnostics, but callers only branch on "a query failed".
#[derive(Debug, Error)]
#[error("place search provider error: {source}")]
pub struct ProviderError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl ProviderError {
    pub fn new<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            source: Box::new(source),
        }
    }
}

/// One query against the external place-search provider.
///
/// Each call is all-or-nothing: either the full record list for that query or
/// an error, never a partial result mixed with an error.
pub trait PlaceSearch {
    /// Free-text keyword search biased toward `origin` within `radius_meters`.
    fn search_text(
        &self,
        keyword: &str,
        origin: Coordinate,
        radius_meters: f64,
    ) -> impl Future<Output = Result<Vec<RawPlaceRecord>, ProviderError>> + Send;

    /// Category-restricted search around `origin` within `radius_meters`.
    fn search_nearby(
        &self,
        categories: &[String],
        origin: Coordinate,
        radius_meters: f64,
    ) -> impl Future<Output = Result<Vec<RawPlaceRecord>, ProviderError>> + Send;
}
