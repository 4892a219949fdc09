pub mod fetcher;

pub use crate::domain::model::{BatchItemResult, Dataset, LookupOutcome, Pin, PropertyResult, Record};
pub use crate::domain::ports::CatalogSource;
pub use crate::utils::error::Result;
