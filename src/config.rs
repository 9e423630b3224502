use anyhow::Result;
use clap::Args;
use moka::future::Cache;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::schemas::AppState;
use crate::services::{amadeus::AmadeusClient, openai::OpenAiSummarizer};

/// Configuration errors detected before the server starts
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("API keys not found! Set {0} in the environment or a .env file.")]
    MissingKey(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// A credential that never shows up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Provider and cache settings shared by every command that talks to the providers
#[derive(Debug, Clone, Args)]
pub struct ProviderArgs {
    /// Flight data provider API key
    #[arg(long, env = "AMADEUS_API_KEY", default_value = "", hide_env_values = true)]
    pub amadeus_api_key: String,

    /// Flight data provider API secret
    #[arg(long, env = "AMADEUS_API_SECRET", default_value = "", hide_env_values = true)]
    pub amadeus_api_secret: String,

    /// Flight data provider base URL
    #[arg(long, env = "AMADEUS_BASE_URL", default_value = "https://test.api.amadeus.com")]
    pub amadeus_base_url: String,

    /// IATA code every search departs from
    #[arg(long, env = "ORIGIN_LOCATION_CODE", default_value = "MAD")]
    pub origin: String,

    /// ISO 4217 code offers are priced in
    #[arg(long, env = "CURRENCY_CODE", default_value = "EUR")]
    pub currency: String,

    /// Maximum number of offers requested per search
    #[arg(long, env = "MAX_OFFERS", default_value_t = 50)]
    pub max_offers: u32,

    /// Language-model provider API key
    #[arg(long, env = "OPENAI_API_KEY", default_value = "", hide_env_values = true)]
    pub openai_api_key: String,

    /// Language-model provider base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
    pub openai_base_url: String,

    /// Chat model used for summaries
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    pub openai_model: String,

    /// Seconds a market-demand response stays cached per destination
    #[arg(long, env = "CACHE_TTL_SECS", default_value_t = 300)]
    pub cache_ttl_secs: u64,

    /// Seconds a provider access token is reused
    #[arg(long, env = "TOKEN_TTL_SECS", default_value_t = 1500)]
    pub token_ttl_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmadeusConfig {
    pub api_key: Secret,
    pub api_secret: Secret,
    pub base_url: String,
    pub origin: String,
    pub currency: String,
    pub max_offers: u32,
    pub token_ttl: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiConfig {
    pub api_key: Secret,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Validated application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub amadeus: AmadeusConfig,
    pub openai: OpenAiConfig,
    pub cache_ttl: Duration,
}

fn required(value: &str, name: &'static str) -> Result<Secret, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::MissingKey(name));
    }
    Ok(Secret::new(value))
}

fn three_letter_code(value: &str, name: &'static str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConfigError::InvalidValue {
            name,
            reason: format!("expected a three letter code, got '{}'", value),
        });
    }
    Ok(value.to_uppercase())
}

impl TryFrom<&ProviderArgs> for AppConfig {
    type Error = ConfigError;

    fn try_from(args: &ProviderArgs) -> Result<Self, Self::Error> {
        if args.max_offers == 0 || args.max_offers > 250 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_OFFERS",
                reason: format!("must be between 1 and 250, got {}", args.max_offers),
            });
        }

        Ok(Self {
            amadeus: AmadeusConfig {
                api_key: required(&args.amadeus_api_key, "AMADEUS_API_KEY")?,
                api_secret: required(&args.amadeus_api_secret, "AMADEUS_API_SECRET")?,
                base_url: args.amadeus_base_url.trim_end_matches('/').to_string(),
                origin: three_letter_code(&args.origin, "ORIGIN_LOCATION_CODE")?,
                currency: three_letter_code(&args.currency, "CURRENCY_CODE")?,
                max_offers: args.max_offers,
                token_ttl: Duration::from_secs(args.token_ttl_secs),
            },
            openai: OpenAiConfig {
                api_key: required(&args.openai_api_key, "OPENAI_API_KEY")?,
                base_url: args.openai_base_url.trim_end_matches('/').to_string(),
                model: args.openai_model.clone(),
                temperature: 0.5,
                max_tokens: 150,
            },
            cache_ttl: Duration::from_secs(args.cache_ttl_secs),
        })
    }
}

/// Initialize application state from validated configuration
pub fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    tracing::info!(
        "Using flight provider {} (origin {}, currency {})",
        config.amadeus.base_url,
        config.amadeus.origin,
        config.amadeus.currency
    );
    tracing::info!("Using summary provider {} ({})", config.openai.base_url, config.openai.model);

    let http = reqwest::Client::builder()
        .user_agent(concat!("skydemand/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let flights = AmadeusClient::new(http.clone(), config.amadeus.clone());
    let summarizer = OpenAiSummarizer::new(http, config.openai.clone());

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(config.cache_ttl)
        .build();

    Ok(AppState::new(
        Arc::new(flights),
        Arc::new(summarizer),
        compute::default_compute(&config.amadeus.currency),
        cache,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProviderArgs {
        ProviderArgs {
            amadeus_api_key: "key".into(),
            amadeus_api_secret: "secret".into(),
            amadeus_base_url: "https://test.api.amadeus.com/".into(),
            origin: "mad".into(),
            currency: "eur".into(),
            max_offers: 50,
            openai_api_key: "sk-test".into(),
            openai_base_url: "https://api.openai.com".into(),
            openai_model: "gpt-3.5-turbo".into(),
            cache_ttl_secs: 300,
            token_ttl_secs: 1500,
        }
    }

    #[test]
    fn test_valid_args_are_normalized() {
        let config = AppConfig::try_from(&args()).unwrap();
        assert_eq!(config.amadeus.base_url, "https://test.api.amadeus.com");
        assert_eq!(config.amadeus.origin, "MAD");
        assert_eq!(config.amadeus.currency, "EUR");
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.openai.api_key.expose(), "sk-test");
    }

    #[test]
    fn test_blank_keys_are_rejected() {
        let mut missing_secret = args();
        missing_secret.amadeus_api_secret = "  ".into();
        assert_eq!(
            AppConfig::try_from(&missing_secret),
            Err(ConfigError::MissingKey("AMADEUS_API_SECRET"))
        );

        let mut missing_openai = args();
        missing_openai.openai_api_key = String::new();
        assert_eq!(
            AppConfig::try_from(&missing_openai),
            Err(ConfigError::MissingKey("OPENAI_API_KEY"))
        );
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let mut bad_origin = args();
        bad_origin.origin = "MADRID".into();
        assert!(matches!(
            AppConfig::try_from(&bad_origin),
            Err(ConfigError::InvalidValue { name: "ORIGIN_LOCATION_CODE", .. })
        ));
    }

    #[test]
    fn test_secrets_are_redacted_in_debug_output() {
        let config = AppConfig::try_from(&args()).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-test"));
        assert!(rendered.contains("Secret(***)"));
    }
}
