//! Wire types for the Google Places API (New) search endpoints.
//!
//! ## Observed shape
//!
//! Both `places:searchText` and `places:searchNearby` return a single
//! `{"places": [...]}` envelope. The array is omitted entirely (not `[]`)
//! when a query matches nothing, so `places` defaults to empty.
//!
//! Fields arrive only when named in the `X-Goog-FieldMask` header, and even
//! masked fields may be absent per place: small shops routinely lack
//! `currentOpeningHours` (no hour data on file), and rating fields are
//! omitted below the provider's minimum review count. Everything except the
//! envelope is therefore optional and tolerant.

use serde::Deserialize;

use nightshop_core::types::{Coordinate, OpenState, RawPlaceRecord};

/// Top-level response envelope for both search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

/// A single place from a search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Provider-unique place identifier (e.g., `"ChIJN1t_tDeuEmsR..."`).
    #[serde(default)]
    pub id: Option<String>,

    /// Localized display name.
    #[serde(default)]
    pub display_name: Option<LocalizedText>,

    /// Human-readable address.
    #[serde(default)]
    pub formatted_address: Option<String>,

    #[serde(default)]
    pub location: Option<LatLng>,

    /// Opening hours for the current week; absent when the provider has no
    /// hour data for the place.
    #[serde(default)]
    pub current_opening_hours: Option<OpeningHours>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub user_rating_count: Option<u32>,

    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
pub struct LocalizedText {
    pub text: String,
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    /// Whether the place is open at request time. May be absent even when
    /// the hours object is present.
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Photo {
    /// Photo resource name, usable against the place photos endpoint.
    pub name: String,
}

impl Place {
    /// Normalizes the wire place into the pipeline's raw record.
    ///
    /// Missing name/address become empty strings; a missing hours object maps
    /// to [`OpenState::Unknown`]. Records without an id or location survive
    /// normalization and are discarded later by the deduplicator.
    #[must_use]
    pub fn into_record(self) -> RawPlaceRecord {
        RawPlaceRecord {
            id: self.id,
            name: self.display_name.map(|n| n.text).unwrap_or_default(),
            address: self.formatted_address.unwrap_or_default(),
            location: self.location.map(|l| Coordinate {
                lat: l.latitude,
                lng: l.longitude,
            }),
            open_state: OpenState::from_open_now(
                self.current_opening_hours.and_then(|h| h.open_now),
            ),
            rating: self.rating,
            user_rating_count: self.user_rating_count,
            photo_refs: self.photos.into_iter().map(|p| p.name).collect(),
        }
    }
}
