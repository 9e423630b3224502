use async_trait::async_trait;
use chrono::{Duration, Utc};
use compute::offers::FlightOffersResponse;
use moka::future::Cache;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, trace, warn};

use super::{excerpt, FlightOffersSource, ProviderError};
use crate::config::AmadeusConfig;

const TOKEN_CACHE_KEY: &str = "access_token";

/// Token endpoint reply; only the token itself is used
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Flight-offer search client using OAuth2 client credentials.
///
/// The access token is reused until the configured TTL elapses or the
/// search endpoint rejects it.
pub struct AmadeusClient {
    http: reqwest::Client,
    config: AmadeusConfig,
    token_cache: Cache<&'static str, String>,
}

impl AmadeusClient {
    pub fn new(http: reqwest::Client, config: AmadeusConfig) -> Self {
        let token_cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(config.token_ttl)
            .build();

        Self {
            http,
            config,
            token_cache,
        }
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        if let Some(token) = self.token_cache.get(TOKEN_CACHE_KEY).await {
            trace!("Reusing cached access token");
            return Ok(token);
        }

        let token = self.fetch_access_token().await?;
        self.token_cache.insert(TOKEN_CACHE_KEY, token.clone()).await;
        Ok(token)
    }

    #[instrument(skip(self))]
    async fn fetch_access_token(&self) -> Result<String, ProviderError> {
        let url = format!("{}/v1/security/oauth2/token", self.config.base_url);
        debug!("Requesting access token from {}", url);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.api_key.expose()),
                ("client_secret", self.config.api_secret.expose()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!("Error fetching access token: {}", e);
                ProviderError::Authentication(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Token endpoint returned {}: {}", status, excerpt(&body));
            return Err(ProviderError::Authentication(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Authentication(format!("malformed token reply: {}", e)))?;

        info!("Obtained new flight provider access token");
        Ok(token.access_token)
    }

    /// Departure date used for searches: tomorrow, provider formatted.
    fn departure_date() -> String {
        (Utc::now().date_naive() + Duration::days(1))
            .format("%Y-%m-%d")
            .to_string()
    }
}

#[async_trait]
impl FlightOffersSource for AmadeusClient {
    #[instrument(skip(self), fields(origin = %self.config.origin))]
    async fn search_offers(&self, destination: &str) -> Result<FlightOffersResponse, ProviderError> {
        let token = self.access_token().await?;
        let url = format!("{}/v2/shopping/flight-offers", self.config.base_url);
        let departure_date = Self::departure_date();
        let max = self.config.max_offers.to_string();

        debug!("Searching offers to {} departing {}", destination, departure_date);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("originLocationCode", self.config.origin.as_str()),
                ("destinationLocationCode", destination),
                ("departureDate", departure_date.as_str()),
                ("adults", "1"),
                ("nonStop", "false"),
                ("max", max.as_str()),
                ("currencyCode", self.config.currency.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("Access token rejected, dropping it from the cache");
            self.token_cache.invalidate(TOKEN_CACHE_KEY).await;
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Error fetching flight offers: {} {}", status, excerpt(&body));
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let offers: FlightOffersResponse = response.json().await?;
        info!("Received {} offers for {}", offers.data.len(), destination);
        Ok(offers)
    }

    fn provider_name(&self) -> String {
        self.config.base_url.clone()
    }
}
