use common::{DemandInsights, DemandRequest, DemandResponse, PopularRoute, PriceTrends};
use compute::insights::InsightsComputer;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::services::{FlightOffersSource, SummaryGenerator};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Flight offer provider
    pub flights: Arc<dyn FlightOffersSource>,
    /// Summary provider
    pub summarizer: Arc<dyn SummaryGenerator>,
    /// Aggregation settings
    pub compute: InsightsComputer,
    /// Successful responses keyed by normalized destination
    pub cache: Cache<String, DemandResponse>,
}

impl AppState {
    pub fn new(
        flights: Arc<dyn FlightOffersSource>,
        summarizer: Arc<dyn SummaryGenerator>,
        compute: InsightsComputer,
        cache: Cache<String, DemandResponse>,
    ) -> Self {
        Self {
            flights,
            summarizer,
            compute,
            cache,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Flight offer provider in use
    pub flight_provider: String,
    /// Summary provider in use
    pub summary_provider: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::market_demand::get_market_demand,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            DemandRequest,
            DemandResponse,
            DemandInsights,
            PopularRoute,
            PriceTrends,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "market-demand", description = "Market demand insight endpoints"),
    ),
    info(
        title = "SkyDemand API",
        description = "Airline market demand insights for a destination city",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
