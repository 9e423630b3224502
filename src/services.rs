//! Outbound providers: flight-offer search and summary generation.
//!
//! Handlers only see the two traits below.

pub mod amadeus;
pub mod openai;

use async_trait::async_trait;
use common::DemandInsights;
use compute::offers::FlightOffersResponse;
use thiserror::Error;

/// Errors raised while talking to an external provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider refused or failed the credential exchange
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The provider answered successfully but without usable content
    #[error("Provider returned an empty reply")]
    EmptyReply,
}

/// Source of flight offers for a destination
#[async_trait]
pub trait FlightOffersSource: Send + Sync {
    /// Searches offers from the configured origin to `destination`.
    async fn search_offers(&self, destination: &str) -> Result<FlightOffersResponse, ProviderError>;

    /// Human readable provider identifier for health reporting.
    fn provider_name(&self) -> String;
}

/// Generator of natural-language summaries
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    async fn summarize(&self, insights: &DemandInsights) -> Result<String, ProviderError>;

    fn provider_name(&self) -> String;
}

/// Truncates provider error bodies before they end up in logs and errors.
pub(crate) fn excerpt(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
