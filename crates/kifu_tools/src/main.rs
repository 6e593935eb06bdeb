//! Kifu pipeline CLI
//!
//! One subcommand per pipeline step: extraction, dataset building,
//! validation, scoring, policy training/prediction, statistics, and the
//! phase gate. Every report goes to stdout as pretty JSON; `--out` writes
//! the same document to a file.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kifu_tools")]
#[command(about = "Session replay kifu pipeline tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract kifu.jsonl from ops.jsonl
    ExtractKifu(commands::extract::ExtractArgs),
    /// Build dataset.jsonl and ROI frame crops from kifu.jsonl
    BuildDataset(commands::build_dataset::BuildDatasetArgs),
    /// Validate run inputs and derived artifacts
    ValidateRun(commands::validate::ValidateArgs),
    /// Score a predicted kifu against ground truth
    ScoreKifu(commands::score::ScoreKifuArgs),
    /// Train the baseline frequency policy
    TrainPolicy(commands::policy::TrainArgs),
    /// Predict top-k actions from a policy model
    PredictPolicy(commands::policy::PredictArgs),
    /// Score a policy model against dataset labels
    ScorePolicy(commands::policy::ScorePolicyArgs),
    /// Summarize ops.jsonl
    StatsOps(commands::stats::StatsOpsArgs),
    /// Summarize kifu.jsonl
    StatsKifu(commands::stats::StatsKifuArgs),
    /// Summarize dataset.jsonl
    StatsDataset(commands::stats::StatsDatasetArgs),
    /// Summarize a policy model
    StatsPolicy(commands::stats::StatsPolicyArgs),
    /// Check phase gate criteria from score reports
    CheckPhase(commands::phase::CheckPhaseArgs),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::ExtractKifu(args) => commands::extract::run(args),
        Commands::BuildDataset(args) => commands::build_dataset::run(args),
        Commands::ValidateRun(args) => commands::validate::run(args),
        Commands::ScoreKifu(args) => commands::score::run(args),
        Commands::TrainPolicy(args) => commands::policy::run_train(args),
        Commands::PredictPolicy(args) => commands::policy::run_predict(args),
        Commands::ScorePolicy(args) => commands::policy::run_score(args),
        Commands::StatsOps(args) => commands::stats::run_ops(args),
        Commands::StatsKifu(args) => commands::stats::run_kifu(args),
        Commands::StatsDataset(args) => commands::stats::run_dataset(args),
        Commands::StatsPolicy(args) => commands::stats::run_policy(args),
        Commands::CheckPhase(args) => commands::phase::run(args),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            log::error!("{err:#}");
            std::process::exit(1);
        }
    }
}
