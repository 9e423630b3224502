use async_trait::async_trait;
use common::{DemandErrorResponse, DemandRequest, DemandResponse, MARKET_DEMAND_PATH};
use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;

use crate::settings;

/// Failure of a single market demand request, as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request never produced a readable response
    #[error("{0}")]
    Transport(String),
    /// The server answered with a failure status or an `error` field
    #[error("{0}")]
    Server(String),
    /// A success response whose body is not a `DemandResponse`
    #[error("{0}")]
    Decode(String),
    /// The response was fine but the chart could not be drawn
    #[error("{0}")]
    Chart(String),
}

/// Source of market demand responses for the dashboard
#[async_trait(?Send)]
pub trait DemandClient {
    async fn fetch_demand(&self, request: &DemandRequest) -> Result<DemandResponse, RequestError>;
}

/// Map an HTTP outcome onto a demand response or the error to display.
pub fn interpret_response(ok: bool, body: &str) -> Result<DemandResponse, RequestError> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if ok => {
            return Err(RequestError::Decode(format!(
                "Failed to parse response: {}",
                e
            )))
        }
        Err(_) => {
            return Err(RequestError::Server(
                DemandErrorResponse::default().message_or_default(),
            ))
        }
    };

    // Any body that is not an object with a string `error` counts as "no error given"
    let reported = DemandErrorResponse::deserialize(&value).unwrap_or_default();
    let has_error = reported
        .error
        .as_deref()
        .is_some_and(|error| !error.trim().is_empty());

    if !ok || has_error {
        return Err(RequestError::Server(reported.message_or_default()));
    }

    DemandResponse::deserialize(&value)
        .map_err(|e| RequestError::Decode(format!("Failed to parse response: {}", e)))
}

/// Browser client posting to the market demand endpoint
#[derive(Debug, Clone, Default)]
pub struct HttpDemandClient {
    base_url: String,
}

impl HttpDemandClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_settings() -> Self {
        Self::new(settings::get_settings().api_base)
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, MARKET_DEMAND_PATH)
    }
}

#[async_trait(?Send)]
impl DemandClient for HttpDemandClient {
    async fn fetch_demand(&self, request: &DemandRequest) -> Result<DemandResponse, RequestError> {
        let url = self.endpoint();
        log::debug!("POST request to: {}", url);

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| {
                let error_msg = format!("Failed to serialize request: {}", e);
                log::error!("POST {} - {}", MARKET_DEMAND_PATH, error_msg);
                RequestError::Transport(error_msg)
            })?
            .send()
            .await
            .map_err(|e| {
                let error_msg = format!("Request failed: {}", e);
                log::error!("POST {} - {}", MARKET_DEMAND_PATH, error_msg);
                RequestError::Transport(error_msg)
            })?;

        let ok = response.ok();
        let status = response.status();
        log::trace!("POST {} - Response received with status {}", MARKET_DEMAND_PATH, status);

        let body = response.text().await.map_err(|e| {
            let error_msg = format!("Failed to read response: {}", e);
            log::error!("POST {} - {}", MARKET_DEMAND_PATH, error_msg);
            RequestError::Transport(error_msg)
        })?;

        let outcome = interpret_response(ok, &body);
        match &outcome {
            Ok(response) => log::info!(
                "POST {} - Success with {} routes",
                MARKET_DEMAND_PATH,
                response.insights.route_count()
            ),
            Err(e) => log::warn!("POST {} - HTTP {}: {}", MARKET_DEMAND_PATH, status, e),
        }
        outcome
    }
}
