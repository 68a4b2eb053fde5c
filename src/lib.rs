//! Balance - On-device scoring and insight engine for wellness signals
//!
//! Balance turns device health metrics, screen-usage metrics and task records
//! into two 0-100 sub-scores (mental and physical) through a deterministic
//! pipeline: availability resolution → weight selection → factor calculation
//! → weighted aggregation.
//!
//! ## Modules
//!
//! - **Scoring**: weighted multi-factor mental and physical scores
//! - **Trends**: recent-vs-earlier window comparison over a score series
//! - **Insights**: remote recommendations with a rule-based fallback
//! - **State**: reducer-style application state snapshot

pub mod availability;
pub mod config;
pub mod error;
pub mod factors;
pub mod generator;
pub mod insights;
pub mod scoring;
pub mod state;
pub mod trend;
pub mod types;
pub mod weights;

// FFI bindings for C interop (default feature, needed by cdylib/staticlib consumers)
#[cfg(feature = "ffi")]
pub mod ffi;

pub use config::InsightConfig;
pub use error::{ConfigError, EngineError, FallbackReason, InsightError};
pub use scoring::{
    calculate_mental_score, calculate_physical_score, calculate_wellness_scores, ScoreEngine,
    ScoreRequest,
};
pub use trend::{analyze_trend_data, calculate_confidence_score, format_trend_display};
pub use types::{
    RawHealthData, RawUsageData, TaskData, TrendAnalysis, TrendPeriod, TrendPoint,
    WellnessScores,
};

// Insight exports
pub use insights::{
    default_insights, generate_insights, Insight, InsightReport, InsightService,
    RemoteInsightClient,
};

// State exports
pub use state::{AppAction, AppState};

/// Engine version reported by the CLI and FFI
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name reported by the CLI
pub const ENGINE_NAME: &str = "balance-engine";
