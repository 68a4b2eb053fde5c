//! Balance CLI - Command-line interface for the Balance engine
//!
//! Commands:
//! - score: Compute wellness scores from a JSON request
//! - trend: Analyze a score series
//! - insights: Generate insights (remote with rule-based fallback)
//! - generate: Emit synthetic records for demos and testing
//! - doctor: Diagnose configuration

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use balance_engine::config::InsightConfig;
use balance_engine::error::{ConfigError, EngineError};
use balance_engine::generator::{mock_weekly_activities, SignalGenerator};
use balance_engine::insights::{InsightReport, InsightService, RemoteInsightClient};
use balance_engine::scoring::{ScoreEngine, ScoreRequest};
use balance_engine::trend::{analyze_trend_data, calculate_confidence_score, format_trend_display};
use balance_engine::types::{TrendAnalysis, TrendPeriod, TrendPoint};
use balance_engine::{ENGINE_NAME, ENGINE_VERSION};

/// Balance - On-device scoring and insight engine for wellness signals
#[derive(Parser)]
#[command(name = "balance")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score mental and physical wellness signals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute wellness scores from a JSON request
    Score {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Seed for substituted records (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Analyze a JSON array of trend points (oldest first)
    Trend {
        /// Input file path (use - for stdin); omit with --demo
        #[arg(short, long, required_unless_present = "demo")]
        input: Option<PathBuf>,

        /// Period tag for the series
        #[arg(long, default_value = "weekly")]
        period: Period,

        /// Analyze a generated demo series instead of reading input
        #[arg(long)]
        demo: bool,

        /// Print the one-line display summary instead of JSON
        #[arg(long)]
        display: bool,
    },

    /// Generate insights for a trend analysis
    Insights {
        /// TrendAnalysis JSON file (use - for stdin)
        #[arg(short, long, default_value = "-")]
        trend: PathBuf,

        /// Activity completion JSON file (name -> days this week)
        #[arg(short, long)]
        activities: Option<PathBuf>,

        /// Skip the remote service and use rule-based insights
        #[arg(long)]
        offline: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// Emit synthetic records
    Generate {
        /// Kind of record to generate
        #[arg(value_enum)]
        kind: GenerateKind,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Number of days for history
        #[arg(long, default_value = "30")]
        days: u32,

        /// Period for series
        #[arg(long, default_value = "weekly")]
        period: Period,
    },

    /// Diagnose configuration
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Period {
    Weekly,
    Monthly,
    Yearly,
}

impl From<Period> for TrendPeriod {
    fn from(p: Period) -> Self {
        match p {
            Period::Weekly => TrendPeriod::Weekly,
            Period::Monthly => TrendPeriod::Monthly,
            Period::Yearly => TrendPeriod::Yearly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GenerateKind {
    /// Health record
    Health,
    /// Usage record
    Usage,
    /// Task record
    Tasks,
    /// Full scoring request
    Request,
    /// Dated daily history
    History,
    /// Demo trend series
    Series,
    /// Weekly activity completion map
    Activities,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), BalanceCliError> {
    match cli.command {
        Commands::Score {
            input,
            seed,
            pretty,
        } => cmd_score(&input, seed, pretty),

        Commands::Trend {
            input,
            period,
            demo,
            display,
        } => cmd_trend(input.as_deref(), period.into(), demo, display),

        Commands::Insights {
            trend,
            activities,
            offline,
            pretty,
        } => cmd_insights(&trend, activities.as_deref(), offline, pretty),

        Commands::Generate {
            kind,
            seed,
            days,
            period,
        } => cmd_generate(kind, seed, days, period.into()),

        Commands::Doctor { json } => cmd_doctor(json),
    }
}

fn cmd_score(input: &Path, seed: Option<u64>, pretty: bool) -> Result<(), BalanceCliError> {
    let request: ScoreRequest = serde_json::from_str(&read_input(input)?)?;

    let mut engine = match seed {
        Some(seed) => ScoreEngine::seeded(seed),
        None => ScoreEngine::new(),
    };
    let scores = engine.score_request(&request);

    print_json(&scores, pretty)
}

fn cmd_trend(
    input: Option<&Path>,
    period: TrendPeriod,
    demo: bool,
    display: bool,
) -> Result<(), BalanceCliError> {
    let points: Vec<TrendPoint> = match input {
        Some(path) if !demo => serde_json::from_str(&read_input(path)?)?,
        _ => SignalGenerator::from_entropy().trend_series(period, 78, 65),
    };

    let analysis = analyze_trend_data(&points, period)?;

    if display {
        println!("{}", format_trend_display(&analysis));
        return Ok(());
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TrendOutput {
        #[serde(flatten)]
        analysis: TrendAnalysis,
        data_points: usize,
        confidence: u8,
    }

    let stability = (analysis.mental_trend.abs() + analysis.physical_trend.abs()) / 2.0;
    let output = TrendOutput {
        data_points: points.len(),
        confidence: calculate_confidence_score(points.len(), stability),
        analysis,
    };
    print_json(&output, true)
}

fn cmd_insights(
    trend: &Path,
    activities: Option<&Path>,
    offline: bool,
    pretty: bool,
) -> Result<(), BalanceCliError> {
    let trend: TrendAnalysis = serde_json::from_str(&read_input(trend)?)?;
    let activities: BTreeMap<String, u8> = match activities {
        Some(path) => serde_json::from_str(&read_input(path)?)?,
        None => mock_weekly_activities(),
    };

    let report = if offline {
        InsightReport::rule_based(&trend)
    } else {
        let config = InsightConfig::from_env()?;
        let client = RemoteInsightClient::new(config)
            .map_err(|e| BalanceCliError::Runtime(e.to_string()))?;
        let service = InsightService::new(client);

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(service.insights_with_fallback(&trend, &activities))
    };

    print_json(&report, pretty)
}

fn cmd_generate(
    kind: GenerateKind,
    seed: Option<u64>,
    days: u32,
    period: TrendPeriod,
) -> Result<(), BalanceCliError> {
    let mut generator = match seed {
        Some(seed) => SignalGenerator::seeded(seed),
        None => SignalGenerator::from_entropy(),
    };

    match kind {
        GenerateKind::Health => print_json(&generator.health(), true),
        GenerateKind::Usage => print_json(&generator.usage(), true),
        GenerateKind::Tasks => print_json(&generator.tasks(), true),
        GenerateKind::Request => {
            let request = ScoreRequest {
                health: Some(generator.health()),
                usage: Some(generator.usage()),
                tasks: Some(generator.tasks()),
            };
            print_json(&request, true)
        }
        GenerateKind::History => {
            let today = chrono::Local::now().date_naive();
            print_json(&generator.history(days, today), true)
        }
        GenerateKind::Series => print_json(&generator.trend_series(period, 78, 65), true),
        GenerateKind::Activities => print_json(&mock_weekly_activities(), true),
    }
}

fn cmd_doctor(json: bool) -> Result<(), BalanceCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Balance engine version {}", ENGINE_VERSION),
    });

    match InsightConfig::from_env() {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "insights_config".to_string(),
                status: CheckStatus::Ok,
                message: format!(
                    "Endpoint {} (model {}, timeout {}s)",
                    config.endpoint,
                    config.model,
                    config.timeout.as_secs()
                ),
            });

            checks.push(if config.has_credential() {
                DoctorCheck {
                    name: "insights_credential".to_string(),
                    status: CheckStatus::Ok,
                    message: "API key configured".to_string(),
                }
            } else {
                DoctorCheck {
                    name: "insights_credential".to_string(),
                    status: CheckStatus::Warning,
                    message: "BALANCE_INSIGHTS_API_KEY not set; rule-based insights only"
                        .to_string(),
                }
            });
        }
        Err(e) => checks.push(DoctorCheck {
            name: "insights_config".to_string(),
            status: CheckStatus::Error,
            message: e.to_string(),
        }),
    }

    // Check stdin is available (for piped input)
    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (ready for JSON input)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: ENGINE_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Balance Doctor Report");
        println!("=====================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(BalanceCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn read_input(path: &Path) -> Result<String, BalanceCliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), BalanceCliError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

// Error types

#[derive(Debug)]
enum BalanceCliError {
    Io(io::Error),
    Engine(EngineError),
    Json(serde_json::Error),
    Config(ConfigError),
    Runtime(String),
    DoctorFailed,
}

impl From<io::Error> for BalanceCliError {
    fn from(e: io::Error) -> Self {
        BalanceCliError::Io(e)
    }
}

impl From<EngineError> for BalanceCliError {
    fn from(e: EngineError) -> Self {
        BalanceCliError::Engine(e)
    }
}

impl From<serde_json::Error> for BalanceCliError {
    fn from(e: serde_json::Error) -> Self {
        BalanceCliError::Json(e)
    }
}

impl From<ConfigError> for BalanceCliError {
    fn from(e: ConfigError) -> Self {
        BalanceCliError::Config(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<BalanceCliError> for CliError {
    fn from(e: BalanceCliError) -> Self {
        match e {
            BalanceCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            BalanceCliError::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Provide at least one finite trend point".to_string()),
            },
            BalanceCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax and camelCase field names".to_string()),
            },
            BalanceCliError::Config(e) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'balance doctor' to inspect configuration".to_string()),
            },
            BalanceCliError::Runtime(msg) => CliError {
                code: "RUNTIME_ERROR".to_string(),
                message: msg,
                hint: None,
            },
            BalanceCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
