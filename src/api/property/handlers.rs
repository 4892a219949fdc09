use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::domain::model::{BatchItemResult, Dataset, Pin, PropertyResult, Record};
use crate::utils::error::{ProxyError, Result};

#[derive(Debug, Serialize)]
pub struct DatasetResponse {
    pub success: bool,
    pub data: Vec<Record>,
    pub pin: Pin,
}

#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    pub success: bool,
    #[serde(flatten)]
    pub property: PropertyResult,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub pins: Vec<Pin>,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub success: bool,
    pub results: Vec<BatchItemResult>,
}

async fn dataset_response(state: &AppState, dataset: Dataset, pin: Pin) -> Result<Json<DatasetResponse>> {
    let data = state.fetcher.lookup(dataset, &pin).await?;
    Ok(Json(DatasetResponse {
        success: true,
        data,
        pin,
    }))
}

#[tracing::instrument(skip(state))]
pub async fn get_assessment_handler(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<DatasetResponse>> {
    dataset_response(&state, Dataset::Assessment, Pin::from(pin)).await
}

#[tracing::instrument(skip(state))]
pub async fn get_commercial_handler(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<DatasetResponse>> {
    dataset_response(&state, Dataset::Commercial, Pin::from(pin)).await
}

/// Dataset failures are reported inside the body; only an internal fault
/// turns into a 500.
#[tracing::instrument(skip(state))]
pub async fn get_property_handler(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<PropertyResponse>> {
    let property = state.fetcher.fetch_property_isolated(Pin::from(pin)).await?;
    Ok(Json(PropertyResponse {
        success: true,
        property,
    }))
}

#[tracing::instrument(skip_all)]
pub async fn post_batch_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<BatchResponse>> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        // body could not be read at all (e.g. over the size limit)
        JsonRejection::BytesRejection(inner) => ProxyError::RequestBodyError {
            status: inner.status(),
            message: inner.body_text(),
        },
        other => {
            tracing::debug!("rejected batch body: {}", other.body_text());
            ProxyError::InvalidRequest
        }
    })?;

    let results = state.fetcher.fetch_batch(request.pins).await;
    Ok(Json(BatchResponse {
        success: true,
        results,
    }))
}
