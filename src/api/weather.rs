//! Weather lookup endpoint

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::ApiState;
use crate::providers::WeatherReport;

/// Build weather router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/get_weather/{city}", get(get_weather))
        .with_state(state)
}

/// Fetch current weather for a city
///
/// Always responds 200; provider failures surface in the `status` field.
async fn get_weather(
    State(state): State<Arc<ApiState>>,
    Path(city): Path<String>,
) -> Json<WeatherReport> {
    tracing::debug!(city = %city, "weather lookup");
    Json(state.weather.current_weather(&city).await)
}
