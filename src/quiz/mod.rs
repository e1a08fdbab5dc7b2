//! Quiz core: country catalog, answer normalization and the round engine.

mod catalog;
mod normalize;
mod round;

pub use catalog::{load_catalog, load_catalog_or_fallback, CatalogSource, CountryRecord};
pub use round::{RoundEngine, RoundError, RoundSummary, SummaryEntry};
