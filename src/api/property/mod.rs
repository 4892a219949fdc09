use axum::routing::{get, post};
use axum::Router;

use crate::api::AppState;

pub mod handlers;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assessment/:pin", get(handlers::get_assessment_handler))
        .route("/commercial/:pin", get(handlers::get_commercial_handler))
        .route("/property/:pin", get(handlers::get_property_handler))
        .route("/properties/batch", post(handlers::post_batch_handler))
}
