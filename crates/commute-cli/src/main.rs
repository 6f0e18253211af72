//! Command-line commutativity analyzer.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use commute_core::{analyze, AnalysisConfig, AnalysisSummary, CoreResult};
use commute_models::{Namespace, Register, MODEL_NAMES};

#[derive(Parser)]
#[command(name = "commute", about = "Symbolic commutativity analyzer", version)]
struct Cli {
    /// Model to analyze (register, namespace).
    module: String,

    /// Check commutativity conditions for always/sometimes.
    #[arg(short = 'c', long)]
    check_conds: bool,

    /// Print conditions under which calls commute.
    #[arg(short = 'p', long)]
    print_conds: bool,

    /// Write all enumerated solver models to this file.
    #[arg(short = 'm', long, value_name = "FILE")]
    model_file: Option<PathBuf>,

    /// Write generated test cases to this file.
    #[arg(short = 't', long, value_name = "FILE")]
    test_file: Option<PathBuf>,

    /// Number of calls per call set.
    #[arg(short = 'n', long, default_value_t = 2)]
    ncomb: usize,

    /// Comma-separated subset of calls to analyze.
    #[arg(short = 'f', long, value_name = "CALLS", value_delimiter = ',')]
    functions: Option<Vec<String>>,

    /// Use slower but deeper condition simplification.
    #[arg(long)]
    simplify_more: bool,

    /// Maximum test cases to enumerate per call set.
    #[arg(long, value_name = "N")]
    max_testcases: Option<usize>,

    /// Log each enumerated model and its exclusion condition.
    #[arg(long)]
    verbose_testgen: bool,

    /// Report whether results, state, or both diverge, instead of the
    /// single coarse label.
    #[arg(long)]
    fine_divergence: bool,

    /// Per-query solver timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Enable debug logging.
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .without_time()
        .init();

    let config = AnalysisConfig {
        ncomb: cli.ncomb,
        calls: cli.functions,
        max_testcases: cli.max_testcases.unwrap_or(usize::MAX),
        simplify_more: cli.simplify_more,
        verbose_testgen: cli.verbose_testgen,
        check_conds: cli.check_conds,
        print_conds: cli.print_conds,
        fine_divergence: cli.fine_divergence,
        timeout_ms: cli.timeout_ms,
        model_file: cli.model_file,
        test_file: cli.test_file,
    };

    let result: CoreResult<AnalysisSummary> = match cli.module.as_str() {
        "register" => analyze::<Register>(&config),
        "namespace" => analyze::<Namespace>(&config),
        other => {
            eprintln!("unknown model '{other}' (available: {})", MODEL_NAMES.join(", "));
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "analysis failed");
            ExitCode::FAILURE
        }
    }
}
