//! Error types for the Balance engine

use thiserror::Error;

/// Errors raised by the synchronous engine operations.
///
/// Scoring never fails; only trend analysis and JSON boundaries do.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Trend series is empty; at least one data point is required")]
    EmptyTrendSeries,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Reason code recorded when the rule-based insights stand in for the remote ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    MissingCredential,
    Timeout,
    Transport,
    Status,
    MalformedResponse,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::MissingCredential => "missing_credential",
            FallbackReason::Timeout => "timeout",
            FallbackReason::Transport => "transport",
            FallbackReason::Status => "status",
            FallbackReason::MalformedResponse => "malformed_response",
        }
    }
}

/// Errors raised by the remote insight generator.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Insight service credential is not configured")]
    MissingCredential,

    #[error("Insight service request timed out")]
    Timeout,

    #[error("Insight service request failed: {0}")]
    Transport(reqwest::Error),

    #[error("Insight service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid insight service response: {0}")]
    MalformedResponse(String),

    #[error("Insight content is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Insight service returned no insights")]
    EmptyInsights,

    #[error("Invalid insight: {0}")]
    InvalidInsight(String),
}

impl From<reqwest::Error> for InsightError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            InsightError::Timeout
        } else {
            InsightError::Transport(e)
        }
    }
}

impl InsightError {
    /// Collapse the error into the reason code recorded on fallback.
    ///
    /// Every content-shape failure maps to `MalformedResponse`.
    pub fn reason(&self) -> FallbackReason {
        match self {
            InsightError::MissingCredential => FallbackReason::MissingCredential,
            InsightError::Timeout => FallbackReason::Timeout,
            InsightError::Transport(_) => FallbackReason::Transport,
            InsightError::Status { .. } => FallbackReason::Status,
            InsightError::MalformedResponse(_)
            | InsightError::InvalidJson(_)
            | InsightError::EmptyInsights
            | InsightError::InvalidInsight(_) => FallbackReason::MalformedResponse,
        }
    }
}
