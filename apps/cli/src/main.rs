//! `vitalis analyze`: the analysis core's single entry-point command
//! (SPEC_FULL.md §6).
//!
//! Boot-time validation is fail-closed: a missing SSOT or malformed input
//! halts before any analysis runs, and each failure mode maps to a distinct
//! process exit code so calling scripts can branch on it without parsing
//! stderr.

mod input;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vitalis_model::ClusteringAlgorithm;
use vitalis_normalize::ResolverSnapshot;
use vitalis_orchestrator::{run_analysis, AnalysisRequest, OrchestratorConfig, OrchestratorError};

use input::AnalyzeInput;

const EXIT_SUCCESS: u8 = 0;
const EXIT_INPUT_ERROR: u8 = 2;
const EXIT_SSOT_ERROR: u8 = 3;
const EXIT_INTERNAL_ERROR: u8 = 4;

#[derive(Debug, Parser)]
#[command(name = "vitalis", about = "Clinical biomarker analysis core")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Raise the tracing filter to debug, overridden by `RUST_LOG` if set.
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a single analysis from an input JSON file, writing an
    /// AnalysisResult to an output JSON file.
    Analyze {
        /// Path to the input biomarker JSON file.
        input: PathBuf,
        /// Path to write the result JSON file to.
        output: PathBuf,
        /// Clustering algorithm override: rule_based, health_system_grouping,
        /// or weighted_correlation.
        #[arg(long)]
        algorithm: Option<String>,
        /// Clinical weight profile override.
        #[arg(long)]
        profile: Option<String>,
        /// Treat every input biomarker key as already canonical, skipping
        /// strict-mode rejection of unrecognized keys.
        #[arg(long)]
        assume_canonical: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_algorithm(raw: &str) -> Result<ClusteringAlgorithm, String> {
    match raw {
        "rule_based" => Ok(ClusteringAlgorithm::RuleBased),
        "health_system_grouping" => Ok(ClusteringAlgorithm::HealthSystemGrouping),
        "weighted_correlation" => Ok(ClusteringAlgorithm::WeightedCorrelation),
        other => Err(format!(
            "unrecognized --algorithm {other:?}; expected rule_based, health_system_grouping, or weighted_correlation"
        )),
    }
}

fn run(
    input_path: &PathBuf,
    output_path: &PathBuf,
    algorithm: Option<&str>,
    profile: Option<&str>,
    assume_canonical: bool,
) -> Result<(), (u8, String)> {
    info!(path = %input_path.display(), "loading SSOT snapshot");
    let snapshot = ResolverSnapshot::default_snapshot();
    if snapshot.canonical_biomarkers().is_empty() {
        return Err((EXIT_SSOT_ERROR, "SSOT snapshot is empty".to_string()));
    }

    let raw = fs::read_to_string(input_path)
        .map_err(|e| (EXIT_INPUT_ERROR, format!("failed to read input file: {e}")))?;
    let parsed: AnalyzeInput =
        serde_json::from_str(&raw).map_err(|e| (EXIT_INPUT_ERROR, format!("malformed input JSON: {e}")))?;

    let biomarkers: BTreeMap<String, f64> = parsed
        .biomarkers
        .iter()
        .map(|(name, value)| (name.clone(), value.numeric()))
        .collect();

    let mut config = OrchestratorConfig {
        assume_canonical,
        ..OrchestratorConfig::default()
    };
    if let Some(raw_algorithm) = algorithm.or(parsed.clustering_algorithm.as_deref()) {
        config.clustering_algorithm =
            parse_algorithm(raw_algorithm).map_err(|e| (EXIT_INPUT_ERROR, e))?;
    }
    if let Some(raw_profile) = profile.or(parsed.clinical_weight_profile.as_deref()) {
        config.clinical_weight_profile = raw_profile.to_string();
    }

    let request = AnalysisRequest {
        analysis_id: parsed.analysis_id,
        biomarkers,
        user: vitalis_model::UserProfile {
            user_id: parsed.user.user_id,
            age: parsed.user.age,
            sex: parsed.user.sex,
            height_cm: parsed.user.height_cm,
            weight_kg: parsed.user.weight_kg,
            ethnicity: parsed.user.ethnicity,
        },
        questionnaire: parsed.questionnaire,
    };

    let created_at = current_timestamp();
    let result = run_analysis(&snapshot, &request, &config, &created_at).map_err(|e| match e {
        OrchestratorError::NonCanonicalInput(_) => (EXIT_INPUT_ERROR, e.to_string()),
        OrchestratorError::SsotUnavailable => (EXIT_SSOT_ERROR, e.to_string()),
        OrchestratorError::Normalization(_) => (EXIT_INPUT_ERROR, e.to_string()),
        OrchestratorError::Scoring(_) => (EXIT_INTERNAL_ERROR, e.to_string()),
    })?;

    let serialized = serde_json::to_string_pretty(&result)
        .map_err(|e| (EXIT_INTERNAL_ERROR, format!("failed to serialize result: {e}")))?;
    fs::write(output_path, serialized)
        .map_err(|e| (EXIT_INTERNAL_ERROR, format!("failed to write output file: {e}")))?;

    info!(
        analysis_id = %result.analysis_id,
        overall_score = result.overall_score,
        output = %output_path.display(),
        "analysis written"
    );
    Ok(())
}

/// The only wall-clock read in the whole crate — deliberately confined to
/// this binary's boundary, never to a library crate (SPEC_FULL.md §5).
fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Command::Analyze {
        input,
        output,
        algorithm,
        profile,
        assume_canonical,
    } = cli.command;

    match run(&input, &output, algorithm.as_deref(), profile.as_deref(), assume_canonical) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err((code, message)) => {
            error!(%message, exit_code = code, "analyze command failed");
            ExitCode::from(code)
        }
    }
}
