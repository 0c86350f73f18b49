use crate::domain::ListingRecord;
use crate::scraper::ScraperError;
use std::io::{Read, Write};
use std::path::Path;

/// Writes the listing table with a header row:
/// address, county, bedrooms, bathrooms, property_type, area, price_text, price_numeric
pub fn write_listings_csv<W: Write>(out: W, listings: &[ListingRecord]) -> Result<(), ScraperError> {
    let mut writer = csv::Writer::from_writer(out);
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_listings_csv(path: &Path, listings: &[ListingRecord]) -> Result<(), ScraperError> {
    let file = std::fs::File::create(path)?;
    write_listings_csv(std::io::BufWriter::new(file), listings)
}

pub fn read_listings_csv<R: Read>(input: R) -> Result<Vec<ListingRecord>, ScraperError> {
    let mut reader = csv::Reader::from_reader(input);
    let mut out = Vec::new();
    for row in reader.deserialize() {
        out.push(row?);
    }
    Ok(out)
}

pub fn load_listings_csv(path: &Path) -> Result<Vec<ListingRecord>, ScraperError> {
    let file = std::fs::File::open(path)?;
    read_listings_csv(std::io::BufReader::new(file))
}
