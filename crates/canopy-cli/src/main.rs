//! Canopy CLI - run hierarchical selection conformance scenarios.
//!
//! Runs a scenario list (the built-in reference catalog, or a JSON
//! file) against a selection driver and prints the aggregate
//! conformance report. Exits non-zero when any scenario fails, so the
//! binary slots directly into CI.
//!
//! The bundled target is the in-process simulated component; external
//! automation backends implement `canopy_engine::SelectionDriver` and
//! use the library entry point (`ScenarioRunner`) directly.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use canopy_engine::{
    fixture, ExpansionPolicy, RunReport, RunnerConfig, ScenarioRunner,
    SimulatedSelectionDriver, WaitPolicy,
};
use canopy_types::Scenario;

mod error;

use error::CliResult;

/// Canopy conformance runner
#[derive(Parser)]
#[command(name = "canopy")]
#[command(about = "Verify cascade-selection conformance of a tree multi-select UI", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the system under test (recorded in the report header)
    #[arg(
        short,
        long,
        env = "CANOPY_URL",
        default_value = "https://yekoshy.github.io/RadioBtn-n-Checkbox/"
    )]
    url: String,

    /// JSON scenario list; defaults to the built-in reference catalog
    #[arg(short, long)]
    scenarios: Option<PathBuf>,

    /// Settle delay after each mutating action, in milliseconds
    #[arg(long, default_value_t = 300)]
    settle_ms: u64,

    /// Timeout per driver operation, in milliseconds
    #[arg(long, default_value_t = 5000)]
    op_timeout_ms: u64,

    /// Maximum expand-one-requery rounds during tree expansion
    #[arg(long, default_value_t = 64)]
    max_expand_rounds: usize,

    /// Stop after the first failing scenario
    #[arg(long)]
    fail_fast: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match run(&cli).await {
        Ok(report) => {
            if !report.all_passed() {
                std::process::exit(1);
            }
        }
        Err(err) => {
            error!(%err, "run aborted");
            std::process::exit(2);
        }
    }
}

async fn run(cli: &Cli) -> CliResult<RunReport> {
    let tree = fixture::reference_tree()?;
    let scenarios = load_scenarios(cli)?;

    let wait = WaitPolicy {
        op_timeout_ms: cli.op_timeout_ms,
        settle_ms: cli.settle_ms,
    };
    let config = RunnerConfig {
        expansion: ExpansionPolicy {
            max_rounds: cli.max_expand_rounds,
            wait,
        },
        wait,
        fail_fast: cli.fail_fast,
    };

    info!(
        url = %cli.url,
        scenarios = scenarios.len(),
        "starting conformance run"
    );

    let driver = SimulatedSelectionDriver::new(tree.clone());
    let runner = ScenarioRunner::new(driver, tree).with_config(config);
    let report = runner.run(&scenarios).await?;

    match cli.output {
        OutputFormat::Text => {
            println!("Target: {}", cli.url);
            println!("{}", report);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(report)
}

fn load_scenarios(cli: &Cli) -> CliResult<Vec<Scenario>> {
    match &cli.scenarios {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let scenarios: Vec<Scenario> = serde_json::from_str(&raw)?;
            Ok(scenarios)
        }
        None => Ok(fixture::reference_scenarios()),
    }
}
