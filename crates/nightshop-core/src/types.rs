//! Shared domain types for the night shop search pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A WGS-84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting values outside the valid degree ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LatitudeOutOfRange`] or
    /// [`CoreError::LongitudeOutOfRange`] for out-of-range input.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoreError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }
}

/// Whether the provider believes a place is open right now.
///
/// Providers frequently have no hour data for small shops, so "unknown" is a
/// first-class state rather than an absent boolean. The ranking layer treats
/// unknown optimistically (kept, sorted after confirmed-open).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenState {
    Open,
    Closed,
    Unknown,
}

impl OpenState {
    /// Maps the provider's optional `openNow` boolean into the tri-state.
    #[must_use]
    pub fn from_open_now(open_now: Option<bool>) -> Self {
        match open_now {
            Some(true) => Self::Open,
            Some(false) => Self::Closed,
            None => Self::Unknown,
        }
    }

    #[must_use]
    pub fn is_confirmed_open(self) -> bool {
        self == Self::Open
    }

    #[must_use]
    pub fn is_confirmed_closed(self) -> bool {
        self == Self::Closed
    }
}

/// A place record as returned by the search provider, before deduplication
/// and enrichment.
///
/// `id` and `location` are optional because provider responses occasionally
/// omit them; such records are discarded during the merge step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlaceRecord {
    /// Provider-unique place identifier.
    pub id: Option<String>,
    pub name: String,
    pub address: String,
    pub location: Option<Coordinate>,
    pub open_state: OpenState,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    /// Provider photo resource names, passed through for any shell that
    /// wants to render them.
    pub photo_refs: Vec<String>,
}

/// A fully enriched shop entry, the pipeline's output entity.
///
/// Built fresh on every search invocation; never cached across searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    /// Provider place identifier; unique within one result set.
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    pub open_state: OpenState,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub photo_refs: Vec<String>,
    /// Meters from the search origin. Computed, never provider-supplied.
    pub distance_meters: f64,
    /// Whether an unexpired "reported closed" flag exists for this place.
    pub flagged: bool,
}
