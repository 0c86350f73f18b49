// src/analytics/pivot.rs

use crate::domain::ListingRecord;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub average: f64,
    pub count: usize,
}

/// Average asking price by county (rows) and bedroom count (columns).
/// Listings with the sentinel price are left out; an empty county or bedroom
/// value is a bucket of its own.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PriceByCountyAndBeds {
    pub counties: Vec<String>,
    pub bedrooms: Vec<String>,
    cells: BTreeMap<(String, String), Cell>,
}

/// "3 Bed" sorts before "10 Bed"; anything without a number goes last.
fn bedroom_order(label: &str) -> (u32, String) {
    let digits: String = label.chars().take_while(|c| c.is_ascii_digit()).collect();
    (digits.parse().unwrap_or(u32::MAX), label.to_string())
}

impl PriceByCountyAndBeds {
    pub fn build(records: &[ListingRecord]) -> Self {
        let mut sums: BTreeMap<(String, String), (f64, usize)> = BTreeMap::new();
        let mut counties = BTreeSet::new();
        let mut bedrooms = BTreeSet::new();

        for r in records.iter().filter(|r| r.has_known_price()) {
            let entry = sums
                .entry((r.county.clone(), r.bedrooms.clone()))
                .or_insert((0.0, 0));
            entry.0 += r.price_numeric;
            entry.1 += 1;
            counties.insert(r.county.clone());
            bedrooms.insert(bedroom_order(&r.bedrooms));
        }

        let cells = sums
            .into_iter()
            .map(|(key, (sum, count))| {
                (
                    key,
                    Cell {
                        average: sum / count as f64,
                        count,
                    },
                )
            })
            .collect();

        Self {
            counties: counties.into_iter().collect(),
            bedrooms: bedrooms.into_iter().map(|(_, label)| label).collect(),
            cells,
        }
    }

    pub fn get(&self, county: &str, bedrooms: &str) -> Option<Cell> {
        self.cells
            .get(&(county.to_string(), bedrooms.to_string()))
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Plain-text rendering for the terminal.
    pub fn render(&self) -> String {
        let label = |s: &str| {
            if s.is_empty() {
                "(none)".to_string()
            } else {
                s.to_string()
            }
        };

        let mut out = String::new();
        let _ = write!(out, "{:<16}", "County");
        for b in &self.bedrooms {
            let _ = write!(out, " | {:>12}", label(b));
        }
        out.push('\n');
        out.push_str(&"-".repeat(16 + self.bedrooms.len() * 15));
        out.push('\n');

        for c in &self.counties {
            let _ = write!(out, "{:<16}", label(c));
            for b in &self.bedrooms {
                match self.get(c, b) {
                    Some(cell) => {
                        let _ = write!(out, " | {:>12.0}", cell.average);
                    }
                    None => {
                        let _ = write!(out, " | {:>12}", "-");
                    }
                }
            }
            out.push('\n');
        }
        out
    }
}
