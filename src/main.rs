use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use bluescore::config::Config;
use bluescore::features::extract_features;
use bluescore::model::{load_model, QualityModel};
use bluescore::output;
use bluescore::scoring::{sample_submission, ScoringEngine};
use bluescore::users::{demo_accounts, seed_demo_accounts};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_STORE: i32 = 2;
const EXIT_CONFIG: i32 = 3;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a project submission from a JSON file (default if no subcommand)
    Score {
        /// Path to the submission JSON (reads stdin if omitted)
        file: Option<PathBuf>,
    },
    /// Extract and print the feature vector without scoring
    Features {
        /// Path to the submission JSON (reads stdin if omitted)
        file: Option<PathBuf>,
    },
    /// Score the built-in sample submission
    Selftest,
    /// Create the demo user and admin accounts
    SeedDemo,
}

#[derive(Parser, Debug)]
#[command(name = "bluescore")]
#[command(about = "Quality scoring for blue carbon restoration submissions", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/bluescore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the trained model artifact (overrides config)
    #[arg(short, long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Score { file: None });

    // Load config
    let config_path = cli.config.as_deref().map(PathBuf::from);
    let config = match bluescore::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    match command {
        Commands::Score { file } => {
            let engine = build_engine(cli.model.as_deref(), &config, cli.verbose);
            let submission = read_submission_or_exit(file.as_deref());
            let result = engine.score(&submission);

            println!("{}", output::format_result(&result));

            if cli.verbose {
                eprintln!("{}", output::format_score_summary(&result, false));
            }
        }
        Commands::Features { file } => {
            let submission = read_submission_or_exit(file.as_deref());
            let features = extract_features(&submission);
            println!("{}", output::format_feature_table(&features));
        }
        Commands::Selftest => {
            let engine = build_engine(cli.model.as_deref(), &config, cli.verbose);
            let submission = sample_submission();
            let result = engine.score(&submission);
            let use_colors = output::should_use_colors();

            println!("{}", output::format_score_summary(&result, use_colors));
            println!();
            println!("{}", output::format_feature_table(&extract_features(&submission)));

            if cli.verbose {
                eprintln!();
                eprintln!("{}", output::format_result(&result));
            }
        }
        Commands::SeedDemo => {
            let store_path = config.user_store_path();
            if cli.verbose {
                eprintln!("Seeding demo accounts in {}", store_path.display());
            }

            let summary = match seed_demo_accounts(&store_path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to seed demo accounts: {}", e);
                    std::process::exit(EXIT_STORE);
                }
            };

            for email in &summary.created {
                println!("Created: {}", email);
            }
            for email in &summary.skipped {
                println!("Already exists: {}", email);
            }

            println!();
            println!("Demo accounts:");
            for account in demo_accounts() {
                println!(
                    "  {:<6} {} / {}",
                    format!("{}:", account.role),
                    account.email,
                    account.password
                );
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load the model once and hand the immutable handle to the engine.
/// A failed load is non-fatal: the engine runs in rule-based mode.
fn build_engine(model_override: Option<&str>, config: &Config, verbose: bool) -> ScoringEngine {
    let model_path = model_override
        .map(PathBuf::from)
        .unwrap_or_else(|| config.model_path());

    let model = load_model(&model_path, verbose);
    if verbose {
        if model.is_some() {
            eprintln!("Scoring mode: trained model");
        } else {
            eprintln!("Scoring mode: rule-based fallback");
        }
    }

    ScoringEngine::new(model.map(|m| Box::new(m) as Box<dyn QualityModel>))
}

fn read_submission_or_exit(file: Option<&Path>) -> serde_json::Value {
    match read_submission(file) {
        Ok(submission) => submission,
        Err(e) => {
            eprintln!("Input error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn read_submission(file: Option<&Path>) -> anyhow::Result<serde_json::Value> {
    let contents = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read submission at {}", path.display()))?,
        None => std::io::read_to_string(std::io::stdin())
            .context("Failed to read submission from stdin")?,
    };

    serde_json::from_str(&contents).context("Submission is not valid JSON")
}
