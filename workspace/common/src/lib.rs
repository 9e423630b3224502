//! Transport-layer types shared between the market-demand server and the
//! browser dashboard. Both sides serialize through these structs so the
//! wire shape lives in exactly one place.

mod destinations;
mod money;

pub use destinations::{Destination, DESTINATIONS};
pub use money::{currency_symbol, format_price};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Currency assumed when a payload does not name one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Message shown when a failed response carries no usable `error` field.
pub const GENERIC_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Path of the market-demand endpoint, relative to the API base.
pub const MARKET_DEMAND_PATH: &str = "/api/market-demand";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Request body for `POST /api/market-demand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DemandRequest {
    /// Destination city or airport code (e.g. "LIS")
    pub destination: String,
}

impl DemandRequest {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

/// Successful market-demand payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DemandResponse {
    /// Natural-language summary of the insights
    pub ai_summary: String,
    /// Structured statistics the summary was generated from
    pub insights: DemandInsights,
}

/// Aggregated statistics for one destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DemandInsights {
    /// Per-airline statistics, most deals first
    pub popular_routes: Vec<PopularRoute>,
    /// Price spread over every offer found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_trends: Option<PriceTrends>,
    /// ISO 4217 code all prices are expressed in
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl DemandInsights {
    pub fn route_count(&self) -> usize {
        self.popular_routes.len()
    }
}

/// Minimum, mean and maximum offer price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceTrends {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub min_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub avg_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub max_price: Decimal,
}

/// One airline's aggregated deal statistics for the selected destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PopularRoute {
    /// Airline display name
    pub airline: String,
    /// Number of offers found for this airline
    pub deal_count: u32,
    /// Mean offer price
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub avg_price: Decimal,
}

/// Error body returned by the server on failure.
///
/// Only `error` is meaningful to the dashboard; the rest mirrors the
/// server's `ErrorResponse` and may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DemandErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl DemandErrorResponse {
    /// The server-provided message, or the generic fallback when absent or blank.
    pub fn message_or_default(&self) -> String {
        match self.error.as_deref() {
            Some(message) if !message.trim().is_empty() => message.to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
