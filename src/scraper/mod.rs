pub mod models;
mod scraper;
mod scraper_error;

pub use models::{GroupedFragments, KeyedText, NormalFragments, PriceFragment};
pub use self::scraper::{DaftScraper, FetchSummary, PageRange, ScrapeSettings};
pub use scraper_error::ScraperError;
