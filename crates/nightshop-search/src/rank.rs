//! Filters and orders enriched shops into the final result list.

use std::cmp::Ordering;

use nightshop_core::types::Shop;

/// Drops provider-confirmed-closed shops and sorts the rest by composite
/// priority. Shops with unknown hours are kept: provider hour data for small
/// shops is frequently missing or stale, so ambiguity is treated optimistically.
#[must_use]
pub fn rank_shops(mut shops: Vec<Shop>) -> Vec<Shop> {
    shops.retain(|shop| !shop.open_state.is_confirmed_closed());
    shops.sort_by(compare_priority);
    shops
}

/// The three-key composite order, applied as nested tie-breaks:
/// confirmed-open before unknown, then unflagged before flagged, then
/// ascending distance.
fn compare_priority(a: &Shop, b: &Shop) -> Ordering {
    let a_open = a.open_state.is_confirmed_open();
    let b_open = b.open_state.is_confirmed_open();
    b_open
        .cmp(&a_open)
        .then_with(|| a.flagged.cmp(&b.flagged))
        .then_with(|| a.distance_meters.total_cmp(&b.distance_meters))
}

#[cfg(test)]
mod tests {
    use nightshop_core::types::{Coordinate, OpenState};

    use super::*;

    fn shop(id: &str, open_state: OpenState, flagged: bool, distance_meters: f64) -> Shop {
        Shop {
            id: id.to_owned(),
            name: id.to_owned(),
            address: String::new(),
            location: Coordinate {
                lat: 50.85,
                lng: 4.35,
            },
            open_state,
            rating: None,
            user_rating_count: None,
            photo_refs: Vec::new(),
            distance_meters,
            flagged,
        }
    }

    fn ids(shops: &[Shop]) -> Vec<&str> {
        shops.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn confirmed_closed_shops_are_dropped() {
        let ranked = rank_shops(vec![
            shop("open", OpenState::Open, false, 100.0),
            shop("closed", OpenState::Closed, false, 10.0),
            shop("unknown", OpenState::Unknown, false, 50.0),
        ]);
        assert_eq!(ids(&ranked), vec!["open", "unknown"]);
    }

    #[test]
    fn confirmed_open_sorts_before_unknown_regardless_of_distance() {
        let ranked = rank_shops(vec![
            shop("unknown-near", OpenState::Unknown, false, 10.0),
            shop("open-far", OpenState::Open, false, 900.0),
        ]);
        assert_eq!(ids(&ranked), vec!["open-far", "unknown-near"]);
    }

    #[test]
    fn unflagged_sorts_before_flagged_within_open_bucket() {
        let ranked = rank_shops(vec![
            shop("flagged-near", OpenState::Open, true, 100.0),
            shop("unflagged-far", OpenState::Open, false, 300.0),
        ]);
        assert_eq!(ids(&ranked), vec!["unflagged-far", "flagged-near"]);
    }

    #[test]
    fn open_bucket_outranks_flag_status_of_other_bucket() {
        // A flagged-but-confirmed-open shop still beats any unknown-hours shop.
        let ranked = rank_shops(vec![
            shop("unknown-unflagged", OpenState::Unknown, false, 10.0),
            shop("open-flagged", OpenState::Open, true, 500.0),
        ]);
        assert_eq!(ids(&ranked), vec!["open-flagged", "unknown-unflagged"]);
    }

    #[test]
    fn distance_breaks_remaining_ties() {
        let ranked = rank_shops(vec![
            shop("far", OpenState::Open, false, 300.0),
            shop("near", OpenState::Open, false, 100.0),
            shop("mid", OpenState::Open, false, 200.0),
        ]);
        assert_eq!(ids(&ranked), vec!["near", "mid", "far"]);
    }

    #[test]
    fn full_composite_order() {
        let ranked = rank_shops(vec![
            shop("u-flag", OpenState::Unknown, true, 50.0),
            shop("o-flag", OpenState::Open, true, 50.0),
            shop("u-ok", OpenState::Unknown, false, 50.0),
            shop("o-ok-far", OpenState::Open, false, 800.0),
            shop("o-ok-near", OpenState::Open, false, 100.0),
        ]);
        assert_eq!(
            ids(&ranked),
            vec!["o-ok-near", "o-ok-far", "o-flag", "u-ok", "u-flag"]
        );
    }

    #[test]
    fn sort_is_idempotent() {
        let ranked = rank_shops(vec![
            shop("a", OpenState::Open, false, 300.0),
            shop("b", OpenState::Unknown, true, 100.0),
            shop("c", OpenState::Open, true, 200.0),
            shop("d", OpenState::Unknown, false, 400.0),
        ]);
        let resorted = rank_shops(ranked.clone());
        assert_eq!(ids(&ranked), ids(&resorted));
    }

    #[test]
    fn no_confirmed_closed_shop_survives() {
        let ranked = rank_shops(vec![
            shop("a", OpenState::Closed, false, 1.0),
            shop("b", OpenState::Closed, true, 2.0),
        ]);
        assert!(ranked.is_empty());
        assert!(ranked
            .iter()
            .all(|s| !s.open_state.is_confirmed_closed()));
    }
}
