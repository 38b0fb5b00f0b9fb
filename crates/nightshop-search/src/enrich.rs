//! Turns deduplicated raw records into enriched [`Shop`] entities.

use nightshop_core::geo::haversine_distance;
use nightshop_core::types::{Coordinate, RawPlaceRecord, Shop};

use crate::ledger::{FlagLedger, KeyValueStore};

/// Enriches the working set: copies provider fields verbatim, computes the
/// distance from the search origin, and marks ledger-flagged entries.
///
/// Takes one ledger snapshot up front, so each search invocation performs a
/// single expiry pass. Records still missing an id or location (none survive
/// the deduplicator) are skipped.
pub fn enrich_records<S: KeyValueStore>(
    records: Vec<RawPlaceRecord>,
    origin: Coordinate,
    ledger: &mut FlagLedger<S>,
) -> Vec<Shop> {
    let flagged = ledger.read();
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id?;
            let location = record.location?;
            Some(Shop {
                flagged: flagged.contains_key(&id),
                distance_meters: haversine_distance(origin, location),
                id,
                name: record.name,
                address: record.address,
                location,
                open_state: record.open_state,
                rating: record.rating,
                user_rating_count: record.user_rating_count,
                photo_refs: record.photo_refs,
            })
        })
        .collect()
}
