// src/extract/price.rs

use crate::domain::{Diagnostics, Issue};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Price used when the listing does not disclose one.
pub const SENTINEL_PRICE: f64 = 0.0;

const UNDISCLOSED: [&str; 1] = ["Price on Application"];

// Secondary sterling price plus the whitespace after it, e.g. "£300000 ".
static STERLING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"£[^\s()]*\s*").expect("valid sterling regex"));

#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot read a price from '{residual}' (raw '{raw}')")]
pub struct PriceFormatError {
    pub raw: String,
    pub residual: String,
}

/// Converts displayed price text into a number.
///
/// `"AMV: €250,000"` -> 250000, `"£300,000 (€345,000)"` -> 345000,
/// `"Price on Application"` -> 0.
pub fn normalize_price(raw: &str) -> Result<f64, PriceFormatError> {
    let stripped = raw.trim().replace(['€', ','], "");
    let stripped = STERLING_RE.replace_all(&stripped, "");

    let mut text = stripped.trim();
    if let Some(rest) = text.strip_prefix("AMV:") {
        text = rest.trim();
    }

    if UNDISCLOSED
        .iter()
        .any(|phrase| text.eq_ignore_ascii_case(phrase))
    {
        return Ok(SENTINEL_PRICE);
    }

    let residual = text.replace(['(', ')'], "");
    let residual = residual.trim();

    match residual.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(PriceFormatError {
            raw: raw.to_string(),
            residual: residual.to_string(),
        }),
    }
}

/// Returns the trimmed price text and its numeric value. Unreadable prices
/// fall back to the sentinel and are recorded, never raised.
pub fn resolve_price(raw: &str, diagnostics: &mut Diagnostics) -> (String, f64) {
    let text = raw.trim().to_string();
    let value = match normalize_price(&text) {
        Ok(v) => v,
        Err(e) => {
            diagnostics.record(Issue::PriceFormat { text: e.raw });
            SENTINEL_PRICE
        }
    };
    (text, value)
}

/// Normal-ad price fragments only count when their anchor points at a
/// for-sale listing; anything else is a promotional card.
pub fn is_listing_href(href: Option<&str>, prefix: &str) -> bool {
    href.is_some_and(|h| h.starts_with(prefix))
}
