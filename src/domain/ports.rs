use crate::domain::model::{Dataset, Pin, Record};
use crate::utils::error::Result;
use async_trait::async_trait;

/// A backend able to answer one dataset lookup for one pin.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_records(&self, dataset: Dataset, pin: &Pin) -> Result<Vec<Record>>;
}
