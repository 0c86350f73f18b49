use serde::{Deserialize, Serialize};

/// One row of the unified listing table. Normal and grouped ads both end up
/// here; fields that could not be resolved are empty strings, never absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub address: String,
    pub county: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub property_type: String,
    /// Square meters or acreage text, as displayed.
    pub area: String,
    pub price_text: String,
    /// 0.0 means unknown / price on application.
    pub price_numeric: f64,
}

/// The visible fields two records are compared on when deduplicating.
/// `price_numeric` is derived from `price_text` and left out.
pub type DedupKey<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str, &'a str, &'a str);

impl ListingRecord {
    pub fn dedup_key(&self) -> DedupKey<'_> {
        (
            &self.address,
            &self.county,
            &self.bedrooms,
            &self.bathrooms,
            &self.property_type,
            &self.area,
            &self.price_text,
        )
    }

    pub fn has_known_price(&self) -> bool {
        self.price_numeric > 0.0
    }
}
