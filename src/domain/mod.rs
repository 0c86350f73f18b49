pub mod diagnostics;
pub mod listing;

pub use diagnostics::{Diagnostics, Issue};
pub use listing::ListingRecord;
