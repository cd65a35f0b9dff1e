//! The composite summary: `GET /`.

use axum::Json;
use axum::extract::State;
use tracing::debug;
use types::CompositeResponse;

use crate::state::ServerState;

/// Query every provider and return the merged result.
///
/// Always 200; upstream failures are embedded as error payloads.
pub async fn get_summary(State(state): State<ServerState>) -> Json<CompositeResponse> {
    let response = state.aggregator.aggregate().await;
    debug!(
        indices = response.market_summary.len(),
        aqi_ok = response.air_quality.is_success(),
        weather_ok = response.weather.is_success(),
        "serving summary"
    );
    Json(response)
}
