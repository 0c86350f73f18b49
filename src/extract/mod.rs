pub mod compound;
pub mod county;
pub mod fragments;
pub mod linker;
pub mod merge;
pub mod pipeline;
pub mod price;

use crate::domain::{Diagnostics, Issue, ListingRecord};
use compound::CompoundField;
use county::{resolve_county, CountyStrategy};
use price::resolve_price;
use tracing::debug;

/// Runs the shared resolvers over one (address, compound, price) triple.
/// Both ad styles come through here. Returns `None` for an empty address.
pub(crate) fn assemble_record(
    address: &str,
    compound: &str,
    price: &str,
    strategy: CountyStrategy,
    diagnostics: &mut Diagnostics,
) -> Option<ListingRecord> {
    let address = address.trim();
    if address.is_empty() {
        diagnostics.record(Issue::MissingAddress);
        return None;
    }

    let field = CompoundField::resolve(compound);
    let resolved = field.to_compound_string();
    if resolved != compound.trim() {
        debug!("{address}: compound '{compound}' resolved as '{resolved}'");
    }
    let (price_text, price_numeric) = resolve_price(price, diagnostics);

    Some(ListingRecord {
        address: address.to_string(),
        county: resolve_county(address, strategy),
        bedrooms: field.bedrooms.unwrap_or_default(),
        bathrooms: field.bathrooms.unwrap_or_default(),
        property_type: field.property_type.unwrap_or_default(),
        area: field.area.unwrap_or_default(),
        price_text,
        price_numeric,
    })
}
