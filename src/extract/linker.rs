// src/extract/linker.rs

use crate::domain::{Diagnostics, Issue, ListingRecord};
use crate::extract::assemble_record;
use crate::extract::county::CountyStrategy;
use crate::scraper::{GroupedFragments, KeyedText};
use std::collections::{HashMap, HashSet};

/// Fragment texts grouped by join key, keeping document order within a key.
fn by_key<'a>(
    fragments: &'a [KeyedText],
    kind: &'static str,
    diagnostics: &mut Diagnostics,
) -> HashMap<&'a str, Vec<&'a str>> {
    let mut map: HashMap<&str, Vec<&str>> = HashMap::new();
    for f in fragments {
        match f.key.as_deref() {
            Some(key) => map.entry(key).or_default().push(&f.text),
            None => diagnostics.record(Issue::JoinKeyMismatch { kind, key: None }),
        }
    }
    map
}

/// Joins grouped-ad fragments on their list-item key and produces one record
/// per (price, compound) pair under each address.
///
/// The join is inner: a key missing from any of the three mappings produces
/// nothing. Within a key, prices and compound lines pair up in document order.
/// Grouped cards carry no floor area, so `area` is always empty.
pub fn link_grouped(
    fragments: &GroupedFragments,
    strategy: CountyStrategy,
    diagnostics: &mut Diagnostics,
) -> Vec<ListingRecord> {
    let prices = by_key(&fragments.prices, "price", diagnostics);
    let compounds = by_key(&fragments.compound_infos, "compound", diagnostics);

    let mut records = Vec::new();
    let mut seen_addresses: HashSet<&str> = HashSet::new();

    for address in &fragments.addresses {
        let Some(key) = address.key.as_deref() else {
            diagnostics.record(Issue::JoinKeyMismatch {
                kind: "address",
                key: None,
            });
            continue;
        };
        // A key's sub units are emitted once, under its first address.
        if !seen_addresses.insert(key) {
            continue;
        }

        let (Some(unit_prices), Some(unit_compounds)) = (prices.get(key), compounds.get(key))
        else {
            diagnostics.record(Issue::JoinKeyMismatch {
                kind: "address",
                key: Some(key.to_string()),
            });
            continue;
        };

        if unit_prices.len() != unit_compounds.len() {
            let (kind, extra) = if unit_prices.len() > unit_compounds.len() {
                ("price", unit_prices.len() - unit_compounds.len())
            } else {
                ("compound", unit_compounds.len() - unit_prices.len())
            };
            for _ in 0..extra {
                diagnostics.record(Issue::JoinKeyMismatch {
                    kind,
                    key: Some(key.to_string()),
                });
            }
        }

        for (price, compound) in unit_prices.iter().zip(unit_compounds) {
            if let Some(mut record) =
                assemble_record(&address.text, compound, price, strategy, diagnostics)
            {
                record.area.clear();
                records.push(record);
            }
        }
    }

    // Sub units whose key never showed up on an address.
    for (kind, map) in [("price", &prices), ("compound", &compounds)] {
        for (key, texts) in map {
            if !seen_addresses.contains(key) {
                for _ in texts.iter() {
                    diagnostics.record(Issue::JoinKeyMismatch {
                        kind,
                        key: Some(key.to_string()),
                    });
                }
            }
        }
    }

    records
}
