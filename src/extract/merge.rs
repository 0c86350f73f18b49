// src/extract/merge.rs

use crate::domain::{Diagnostics, ListingRecord};
use std::collections::HashSet;

/// Normal-ad records first, then grouped-ad records, each stream in its
/// original order. Exact duplicates on the visible fields are removed and the
/// first occurrence survives.
pub fn merge_records(
    normal: Vec<ListingRecord>,
    grouped: Vec<ListingRecord>,
    diagnostics: &mut Diagnostics,
) -> Vec<ListingRecord> {
    dedup(normal.into_iter().chain(grouped).collect(), diagnostics)
}

pub fn dedup(records: Vec<ListingRecord>, diagnostics: &mut Diagnostics) -> Vec<ListingRecord> {
    let before = records.len();
    let mut seen = HashSet::with_capacity(before);
    let keep: Vec<bool> = records.iter().map(|r| seen.insert(r.dedup_key())).collect();
    drop(seen);

    let out: Vec<ListingRecord> = records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, first)| first.then_some(record))
        .collect();

    diagnostics.duplicates_removed += before - out.len();
    out
}
