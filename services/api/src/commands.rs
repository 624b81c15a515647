use crate::cli::ScoringArgs;
use clap::Args;
use loan_risk::applications::{score_csv_path, BatchScore, PredictionView};
use loan_risk::config::AppConfig;
use loan_risk::error::AppError;
use loan_risk::scoring::{
    ApplicantProfile, ApplicationStatus, ApprovalStatus, LoanPurpose, RiskScoringEngine,
};
use loan_risk::telemetry::{self, LogSink};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Credit score reported by the bureau (300-850)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) credit_score: i32,
    /// Annual gross income
    #[arg(long)]
    pub(crate) income: f64,
    /// Requested loan amount
    #[arg(long)]
    pub(crate) amount: f64,
    /// Whole years with the current employer
    #[arg(long)]
    pub(crate) employment_years: u32,
    /// Loan purpose label, e.g. "Home Purchase" or "Personal/Other"
    #[arg(long)]
    pub(crate) purpose: String,
    /// Decision already recorded for this applicant (pending, approved, rejected)
    #[arg(long, value_parser = parse_prior_status)]
    pub(crate) prior_status: Option<ApplicationStatus>,
    #[command(flatten)]
    pub(crate) scoring: ScoringArgs,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with applicant_id, credit_score, annual_income, requested_amount,
    /// employment_years, purpose and optional prior_status columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print every result as JSON instead of one summary line per applicant
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) scoring: ScoringArgs,
}

fn parse_prior_status(raw: &str) -> Result<ApplicationStatus, String> {
    ApplicationStatus::from_label(raw)
        .ok_or_else(|| format!("'{raw}' is not one of pending, approved, rejected"))
}

/// Loads configuration, applies CLI scoring overrides and routes logs to stderr so stdout only
/// carries command output.
pub(crate) fn load_command_config(scoring: ScoringArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    apply_scoring_overrides(&mut config, scoring);
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;
    Ok(config)
}

pub(crate) fn apply_scoring_overrides(config: &mut AppConfig, scoring: ScoringArgs) {
    if let Some(cutoff) = scoring.approval_cutoff {
        config.scoring.approval_cutoff = cutoff;
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = load_command_config(args.scoring)?;
    let engine = RiskScoringEngine::new(config.scoring);

    let profile = ApplicantProfile {
        credit_score: args.credit_score,
        annual_income: args.income,
        requested_amount: args.amount,
        employment_years: args.employment_years,
        purpose: LoanPurpose::from_label(&args.purpose),
        prior_status: args.prior_status,
    };

    let result = engine.score(&profile);
    info!(
        clamped_score = result.clamped_score,
        status = result.approval_status.label(),
        "applicant scored"
    );

    let view = PredictionView::from_result(None, result);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = load_command_config(args.scoring)?;
    let engine = RiskScoringEngine::new(config.scoring);

    let scores = score_csv_path(&args.csv, &engine)?;
    let tally = BatchTally::from_scores(&scores);
    info!(
        path = %args.csv.display(),
        rows = scores.len(),
        approved = tally.approved,
        "applicant export scored"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    for entry in &scores {
        println!("{}: {}", entry.applicant_id, entry.result.summary());
    }
    println!(
        "{} applicants | {} approved | {} rejected | mean probability {:.2}",
        scores.len(),
        tally.approved,
        tally.rejected,
        tally.mean_probability
    );
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BatchTally {
    approved: usize,
    rejected: usize,
    mean_probability: f64,
}

impl BatchTally {
    fn from_scores(scores: &[BatchScore]) -> Self {
        let approved = scores
            .iter()
            .filter(|entry| entry.result.approval_status == ApprovalStatus::Approved)
            .count();
        let total: f64 = scores
            .iter()
            .map(|entry| entry.result.approval_probability)
            .sum();
        let mean_probability = if scores.is_empty() {
            0.0
        } else {
            total / scores.len() as f64
        };

        Self {
            approved,
            rejected: scores.len() - approved,
            mean_probability,
        }
    }
}
