use crate::domain::model::{BatchItemResult, Dataset, LookupOutcome, Pin, PropertyResult, Record};
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use futures::future::join_all;
use std::sync::Arc;

/// Fans pin lookups out to a [`CatalogSource`] and folds the settled calls
/// into per-pin results.
///
/// Every join here waits for all branches; a failed lookup is recorded in
/// its own slot and never cancels a sibling.
#[derive(Clone)]
pub struct AggregatingFetcher {
    source: Arc<dyn CatalogSource>,
}

impl AggregatingFetcher {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// One outbound call for one dataset. No retry.
    pub async fn lookup(&self, dataset: Dataset, pin: &Pin) -> Result<Vec<Record>> {
        let result = self.source.fetch_records(dataset, pin).await;
        if let Err(e) = &result {
            tracing::warn!(%pin, %dataset, error = %e, "catalog lookup failed");
        }
        result
    }

    /// Assessment and commercial lookups run concurrently; both are awaited
    /// before the result is assembled.
    pub async fn fetch_property(&self, pin: Pin) -> PropertyResult {
        let (assessment, commercial) = tokio::join!(
            self.lookup(Dataset::Assessment, &pin),
            self.lookup(Dataset::Commercial, &pin),
        );

        PropertyResult {
            pin,
            assessment: LookupOutcome::from(assessment),
            commercial: LookupOutcome::from(commercial),
        }
    }

    /// Runs [`fetch_property`](Self::fetch_property) on its own task so that a
    /// fault while assembling surfaces as an error instead of tearing down
    /// the request.
    pub async fn fetch_property_isolated(&self, pin: Pin) -> Result<PropertyResult> {
        let fetcher = self.clone();
        let result = tokio::spawn(async move { fetcher.fetch_property(pin).await }).await?;
        Ok(result)
    }

    /// Output is index-aligned with `pins`. A pin whose task dies is reported
    /// as `success: false, data: None` in its own slot.
    pub async fn fetch_batch(&self, pins: Vec<Pin>) -> Vec<BatchItemResult> {
        tracing::debug!("Dispatching batch of {} pins", pins.len());

        let handles: Vec<_> = pins
            .iter()
            .cloned()
            .map(|pin| {
                let fetcher = self.clone();
                tokio::spawn(async move { fetcher.fetch_property(pin).await })
            })
            .collect();

        let settled = join_all(handles).await;

        pins.into_iter()
            .zip(settled)
            .map(|(pin, joined)| match joined {
                Ok(data) => BatchItemResult {
                    pin,
                    success: true,
                    data: Some(data),
                },
                Err(e) => {
                    tracing::error!(%pin, error = %e, "batch item aborted");
                    BatchItemResult {
                        pin,
                        success: false,
                        data: None,
                    }
                }
            })
            .collect()
    }
}
