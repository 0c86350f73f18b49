// src/extract/county.rs

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const COUNTIES: [&str; 32] = [
    "Co. Antrim",
    "Co. Armagh",
    "Co. Carlow",
    "Co. Cavan",
    "Co. Clare",
    "Co. Cork",
    "Co. Derry",
    "Co. Donegal",
    "Co. Down",
    "Co. Dublin",
    "Co. Fermanagh",
    "Co. Galway",
    "Co. Kerry",
    "Co. Kildare",
    "Co. Kilkenny",
    "Co. Laois",
    "Co. Leitrim",
    "Co. Limerick",
    "Co. Longford",
    "Co. Louth",
    "Co. Mayo",
    "Co. Meath",
    "Co. Monaghan",
    "Co. Offaly",
    "Co. Roscommon",
    "Co. Sligo",
    "Co. Tipperary",
    "Co. Tyrone",
    "Co. Waterford",
    "Co. Westmeath",
    "Co. Wexford",
    "Co. Wicklow",
];

/// Counties plus "Dublin 1".."Dublin 24" and "Dublin 6W".
static VALID_LABELS: Lazy<HashSet<String>> = Lazy::new(|| {
    let mut labels: HashSet<String> = COUNTIES.iter().map(|c| c.to_string()).collect();
    labels.extend((1..=24).map(|n| format!("Dublin {n}")));
    labels.insert("Dublin 6W".to_string());
    labels
});

static COUNTY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Co\. [A-Z][a-z]+").expect("valid county regex"));

/// How a county label is pulled out of an address. One strategy is used for
/// a whole run so the county column stays comparable.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CountyStrategy {
    /// Last comma-separated part, checked against the known label list.
    #[default]
    Lookup,
    /// First "Co. Xxxx" anywhere in the address.
    Pattern,
}

/// Returns the county label for an address, or "" when none is found.
pub fn resolve_county(address: &str, strategy: CountyStrategy) -> String {
    match strategy {
        CountyStrategy::Lookup => {
            let tail = address
                .rsplit_once(',')
                .map_or(address, |(_, tail)| tail)
                .trim();
            if VALID_LABELS.contains(tail) {
                tail.to_string()
            } else {
                String::new()
            }
        }
        CountyStrategy::Pattern => COUNTY_RE
            .find(address)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    }
}
