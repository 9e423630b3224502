use async_trait::async_trait;
use common::DemandInsights;
use compute::prompt::{build_summary_prompt, NO_DATA_SUMMARY, SYSTEM_PROMPT};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::{excerpt, ProviderError, SummaryGenerator};
use crate::config::OpenAiConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Trimmed text of the first choice.
    fn into_summary(self) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ProviderError::EmptyReply)
    }
}

/// Summary generator backed by a chat-completion endpoint
pub struct OpenAiSummarizer {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiSummarizer {
    pub fn new(http: reqwest::Client, config: OpenAiConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl SummaryGenerator for OpenAiSummarizer {
    #[instrument(skip(self, insights), fields(model = %self.config.model, routes = insights.popular_routes.len()))]
    async fn summarize(&self, insights: &DemandInsights) -> Result<String, ProviderError> {
        if insights.popular_routes.is_empty() {
            return Ok(NO_DATA_SUMMARY.to_string());
        }

        let prompt = build_summary_prompt(insights);
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: &prompt },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/v1/chat/completions", self.config.base_url);
        debug!("Requesting summary from {}", url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.api_key.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Error calling summary provider: {} {}", status, excerpt(&body));
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let summary = response.json::<ChatResponse>().await?.into_summary()?;
        info!("Generated summary of {} characters", summary.len());
        Ok(summary)
    }

    fn provider_name(&self) -> String {
        format!("{} ({})", self.config.base_url, self.config.model)
    }
}
