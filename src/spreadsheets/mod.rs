pub mod export_csv;
pub mod export_xlsx;

pub use export_csv::{load_listings_csv, save_listings_csv};
pub use export_xlsx::save_listings_xlsx;
