use crate::analytics::PriceByCountyAndBeds;
use crate::domain::ListingRecord;
use crate::scraper::ScraperError;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use std::path::Path;

fn xlsx_err(what: &str) -> impl FnOnce(XlsxError) -> ScraperError + '_ {
    move |e| ScraperError::Xlsx(format!("Failed to write {what}: {e}"))
}

/// Workbook with the full listing table on one sheet and the
/// county x bedrooms average price pivot on a second.
pub fn build_listings_workbook(
    listings: &[ListingRecord],
    pivot: &PriceByCountyAndBeds,
) -> Result<Workbook, ScraperError> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Listings").map_err(xlsx_err("sheet name"))?;
    write_listings(sheet, listings)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name("Avg price").map_err(xlsx_err("sheet name"))?;
    write_pivot(sheet, pivot)?;

    Ok(workbook)
}

pub fn save_listings_xlsx(
    path: &Path,
    listings: &[ListingRecord],
    pivot: &PriceByCountyAndBeds,
) -> Result<(), ScraperError> {
    let mut workbook = build_listings_workbook(listings, pivot)?;
    workbook.save(path).map_err(xlsx_err("workbook"))?;
    Ok(())
}

fn write_listings(sheet: &mut Worksheet, listings: &[ListingRecord]) -> Result<(), ScraperError> {
    let headers = [
        "Address",
        "County",
        "Beds",
        "Baths",
        "Type",
        "Area",
        "Price",
        "Price (numeric)",
    ];

    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *header)
            .map_err(xlsx_err(header))?;
    }

    for (i, listing) in listings.iter().enumerate() {
        let r = (i + 1) as u32;
        let text_cols = [
            &listing.address,
            &listing.county,
            &listing.bedrooms,
            &listing.bathrooms,
            &listing.property_type,
            &listing.area,
            &listing.price_text,
        ];
        for (col, value) in text_cols.iter().enumerate() {
            sheet
                .write_string(r, col as u16, value.as_str())
                .map_err(xlsx_err(headers[col]))?;
        }
        sheet
            .write_number(r, 7, listing.price_numeric)
            .map_err(xlsx_err("price"))?;
    }
    Ok(())
}

fn write_pivot(sheet: &mut Worksheet, pivot: &PriceByCountyAndBeds) -> Result<(), ScraperError> {
    sheet.write_string(0, 0, "County").map_err(xlsx_err("pivot header"))?;
    for (j, beds) in pivot.bedrooms.iter().enumerate() {
        let label = if beds.is_empty() { "(none)" } else { beds.as_str() };
        sheet
            .write_string(0, (j + 1) as u16, label)
            .map_err(xlsx_err("pivot header"))?;
    }

    for (i, county) in pivot.counties.iter().enumerate() {
        let r = (i + 1) as u32;
        let label = if county.is_empty() { "(none)" } else { county.as_str() };
        sheet.write_string(r, 0, label).map_err(xlsx_err("county"))?;
        for (j, beds) in pivot.bedrooms.iter().enumerate() {
            if let Some(cell) = pivot.get(county, beds) {
                sheet
                    .write_number(r, (j + 1) as u16, cell.average.round())
                    .map_err(xlsx_err("average price"))?;
            }
        }
    }
    Ok(())
}
