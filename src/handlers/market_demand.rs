use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use common::DemandResponse;
use serde::Deserialize;
use tracing::{debug, instrument, trace, warn};

use crate::error::ApiError;
use crate::helpers::demand::{build_demand_response, normalize_destination};
use crate::schemas::AppState;

/// Incoming body; `destination` is optional here so a missing field gets
/// the same answer as a blank one.
#[derive(Debug, Deserialize)]
pub struct MarketDemandPayload {
    #[serde(default)]
    pub destination: Option<String>,
}

/// Market demand insights for a destination
#[utoipa::path(
    post,
    path = "/api/market-demand",
    tag = "market-demand",
    request_body = common::DemandRequest,
    responses(
        (status = 200, description = "Insights computed successfully", body = DemandResponse),
        (status = 400, description = "Destination missing or body malformed", body = crate::schemas::ErrorResponse),
        (status = 404, description = "No flight data for the destination", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Flight data could not be processed", body = crate::schemas::ErrorResponse),
        (status = 503, description = "Flight provider authentication failed", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn get_market_demand(
    State(state): State<AppState>,
    payload: Result<Json<MarketDemandPayload>, JsonRejection>,
) -> Result<Json<DemandResponse>, ApiError> {
    trace!("Entering get_market_demand function");
    let Json(payload) = payload.map_err(|rejection| {
        warn!("Rejected market demand body: {}", rejection.body_text());
        ApiError::InvalidBody(rejection.body_text())
    })?;

    let destination =
        normalize_destination(payload.destination.as_deref()).ok_or(ApiError::MissingDestination)?;

    if let Some(cached) = state.cache.get(&destination).await {
        debug!("Serving market demand for {} from cache", destination);
        return Ok(Json(cached));
    }

    let response = build_demand_response(&state, &destination).await?;
    state.cache.insert(destination, response.clone()).await;

    Ok(Json(response))
}
