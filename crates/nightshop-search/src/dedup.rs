//! Merges raw records from successive queries into one working set.

use std::collections::HashSet;

use nightshop_core::types::RawPlaceRecord;

/// Identifier-keyed merge across every query of a search invocation.
///
/// The seen-set spans both strategies and is never reset between queries.
/// First-seen record for an identifier wins; later duplicates are dropped
/// without field merging. Records lacking an identifier or a location are
/// discarded on arrival.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
    records: Vec<RawPlaceRecord>,
}

impl Deduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one query's records into the working set.
    pub fn merge(&mut self, batch: Vec<RawPlaceRecord>) {
        for record in batch {
            let Some(id) = record.id.as_deref() else {
                tracing::trace!(name = %record.name, "dropping record without identifier");
                continue;
            };
            if record.location.is_none() {
                tracing::trace!(id, "dropping record without location");
                continue;
            }
            if self.seen.contains(id) {
                tracing::trace!(id, "dropping duplicate record");
                continue;
            }
            self.seen.insert(id.to_owned());
            self.records.push(record);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// The merged working set, in first-seen order.
    #[must_use]
    pub fn into_records(self) -> Vec<RawPlaceRecord> {
        self.records
    }
}
