use common::DemandResponse;
use compute::prompt::SUMMARY_UNAVAILABLE;
use tracing::{debug, error, info, instrument, warn};

use crate::error::ApiError;
use crate::schemas::AppState;
use crate::services::ProviderError;

/// Trims and upper-cases a destination, rejecting blank values
pub fn normalize_destination(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|destination| !destination.is_empty())
        .map(str::to_uppercase)
}

/// Runs the full pipeline for one destination: search, aggregate, summarize.
///
/// The summary never fails the request; a provider error is replaced by a
/// fixed notice.
#[instrument(skip(state))]
pub async fn build_demand_response(
    state: &AppState,
    destination: &str,
) -> Result<DemandResponse, ApiError> {
    let offers = match state.flights.search_offers(destination).await {
        Ok(offers) => offers,
        Err(ProviderError::Authentication(reason)) => {
            error!("Flight provider authentication failed: {}", reason);
            return Err(ApiError::ProviderAuthentication);
        }
        Err(e) => {
            error!("Flight search for {} failed: {}", destination, e);
            return Err(ApiError::NoFlightData(destination.to_string()));
        }
    };

    if offers.is_empty() {
        warn!("No offers returned for {}", destination);
        return Err(ApiError::NoFlightData(destination.to_string()));
    }

    let insights = match state.compute.compute(&offers) {
        Ok(Some(insights)) => insights,
        Ok(None) => {
            warn!("Offers for {} produced no insights", destination);
            return Err(ApiError::ProcessingFailed);
        }
        Err(e) => {
            error!("Could not aggregate offers for {}: {}", destination, e);
            return Err(ApiError::ProcessingFailed);
        }
    };
    debug!("Computed {} popular routes", insights.popular_routes.len());

    let ai_summary = match state.summarizer.summarize(&insights).await {
        Ok(summary) => summary,
        Err(e) => {
            warn!("Summary generation failed: {}", e);
            SUMMARY_UNAVAILABLE.to_string()
        }
    };

    info!("Market demand for {} ready", destination);
    Ok(DemandResponse {
        ai_summary,
        insights,
    })
}
