//! Remote insight generation over the Anthropic messages API
//!
//! One request per call: no retries, no streaming. The credential is checked
//! before any network I/O. Dropping the returned future cancels the request.

use super::prompt::build_insights_prompt;
use super::types::{validate_insights, Insight, InsightOrigin, InsightSource};
use crate::config::InsightConfig;
use crate::error::InsightError;
use crate::types::TrendAnalysis;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Characters of an error body kept on [`InsightError::Status`]
const ERROR_BODY_LIMIT: usize = 256;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the remote insight service.
#[derive(Clone, Debug)]
pub struct RemoteInsightClient {
    client: reqwest::Client,
    config: InsightConfig,
}

impl RemoteInsightClient {
    /// Build a client whose requests time out after `config.timeout`.
    pub fn new(config: InsightConfig) -> Result<Self, InsightError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Ask the service for insights on `trend`.
    ///
    /// Fails with [`InsightError::MissingCredential`] before any I/O when no
    /// key is configured.
    pub async fn generate(
        &self,
        trend: &TrendAnalysis,
        activities: &BTreeMap<String, u8>,
    ) -> Result<Vec<Insight>, InsightError> {
        let api_key = match &self.config.api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => key,
            _ => return Err(InsightError::MissingCredential),
        };

        let prompt = build_insights_prompt(trend, activities);
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: [Message {
                role: "user",
                content: &prompt,
            }],
        };

        debug!(
            endpoint = %self.config.endpoint,
            model = %self.config.model,
            "requesting remote insights"
        );

        let resp = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", &self.config.api_version)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        let raw = resp.text().await?;
        let parsed: MessagesResponse = serde_json::from_str(&raw)
            .map_err(|e| InsightError::MalformedResponse(format!("unexpected body: {}", e)))?;

        let text = parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                InsightError::MalformedResponse("missing text in first content block".to_string())
            })?;

        let insights = parse_insights(&text)?;
        info!(count = insights.len(), "received remote insights");
        Ok(insights)
    }
}

#[async_trait]
impl InsightSource for RemoteInsightClient {
    fn origin(&self) -> InsightOrigin {
        InsightOrigin::Remote
    }

    async fn generate(
        &self,
        trend: &TrendAnalysis,
        activities: &BTreeMap<String, u8>,
    ) -> Result<Vec<Insight>, InsightError> {
        RemoteInsightClient::generate(self, trend, activities).await
    }
}

/// Parse the model's text as a non-empty JSON array of valid insights.
pub fn parse_insights(text: &str) -> Result<Vec<Insight>, InsightError> {
    let value: serde_json::Value = serde_json::from_str(text.trim())?;
    if !value.is_array() {
        return Err(InsightError::MalformedResponse(
            "insight content is not a JSON array".to_string(),
        ));
    }

    let insights: Vec<Insight> = serde_json::from_value(value)?;
    validate_insights(&insights)?;
    Ok(insights)
}

async fn error_from_response(resp: reqwest::Response) -> InsightError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    InsightError::Status { status, body }
}
