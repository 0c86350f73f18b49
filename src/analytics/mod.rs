pub mod pivot;

pub use pivot::PriceByCountyAndBeds;
