//! HTTP client for the Google Places API (New) search endpoints.
//!
//! Wraps `reqwest` with Places-specific error handling, key management via
//! the `X-Goog-Api-Key` header, response shaping via `X-Goog-FieldMask`, and
//! retry with back-off on transient failures. Each search call is
//! all-or-nothing: the full record list for that query, or an error.

use std::time::Duration;

use reqwest::{Client, Url};

use nightshop_core::provider::{PlaceSearch, ProviderError};
use nightshop_core::types::{Coordinate, RawPlaceRecord};

use crate::error::PlacesError;
use crate::retry::retry_with_backoff;
use crate::types::{Place, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";

/// Fields requested from the provider; anything not named here is omitted
/// from responses.
const FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,\
places.location,places.currentOpeningHours.openNow,places.rating,\
places.userRatingCount,places.photos.name";

/// Maximum places requested per query, matching the provider's page cap.
const MAX_RESULT_COUNT: u32 = 20;

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

/// Client for the Places API search endpoints.
///
/// Use [`PlacesClient::new`] for production or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    text_url: Url,
    nearby_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let base = base_url.trim_end_matches('/');
        let parse = |endpoint: &str| -> Result<Url, PlacesError> {
            Url::parse(&format!("{base}/v1/places:{endpoint}")).map_err(|e| {
                PlacesError::InvalidBaseUrl {
                    base_url: base_url.to_owned(),
                    reason: e.to_string(),
                }
            })
        };

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            text_url: parse("searchText")?,
            nearby_url: parse("searchNearby")?,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Overrides the retry policy (defaults: 3 retries, 1 s base back-off).
    #[must_use]
    pub fn retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Free-text search biased toward `origin` within `radius_meters`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::RateLimited`] / [`PlacesError::UnexpectedStatus`] on
    ///   non-2xx responses (after retries for transient statuses).
    /// - [`PlacesError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_text(
        &self,
        keyword: &str,
        origin: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<RawPlaceRecord>, PlacesError> {
        let body = serde_json::json!({
            "textQuery": keyword,
            "maxResultCount": MAX_RESULT_COUNT,
            "locationBias": {
                "circle": {
                    "center": { "latitude": origin.lat, "longitude": origin.lng },
                    "radius": radius_meters,
                }
            },
        });

        tracing::debug!(keyword, radius_meters, "places text query");
        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.post_search(&self.text_url, &body, "searchText")
        })
        .await?;

        Ok(into_records(response))
    }

    /// Category-restricted search around `origin` within `radius_meters`,
    /// ranked by distance.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`PlacesClient::search_text`].
    pub async fn search_nearby(
        &self,
        categories: &[String],
        origin: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<RawPlaceRecord>, PlacesError> {
        let body = serde_json::json!({
            "includedPrimaryTypes": categories,
            "maxResultCount": MAX_RESULT_COUNT,
            "rankPreference": "DISTANCE",
            "locationRestriction": {
                "circle": {
                    "center": { "latitude": origin.lat, "longitude": origin.lng },
                    "radius": radius_meters,
                }
            },
        });

        tracing::debug!(?categories, radius_meters, "places nearby query");
        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.post_search(&self.nearby_url, &body, "searchNearby")
        })
        .await?;

        Ok(into_records(response))
    }

    /// Sends one POST, checks the status, and parses the response envelope.
    async fn post_search(
        &self,
        url: &Url,
        body: &serde_json::Value,
        context: &str,
    ) -> Result<SearchResponse, PlacesError> {
        let response = self
            .client
            .post(url.clone())
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
            return Err(PlacesError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

fn into_records(response: SearchResponse) -> Vec<RawPlaceRecord> {
    response.places.into_iter().map(Place::into_record).collect()
}

impl PlaceSearch for PlacesClient {
    async fn search_text(
        &self,
        keyword: &str,
        origin: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<RawPlaceRecord>, ProviderError> {
        Self::search_text(self, keyword, origin, radius_meters)
            .await
            .map_err(ProviderError::new)
    }

    async fn search_nearby(
        &self,
        categories: &[String],
        origin: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<RawPlaceRecord>, ProviderError> {
        Self::search_nearby(self, categories, origin, radius_meters)
            .await
            .map_err(ProviderError::new)
    }
}
