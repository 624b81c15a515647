//! Scores a CSV export of loan applicants in one pass.
//!
//! Expected headers: `applicant_id, credit_score, annual_income, requested_amount,
//! employment_years, purpose` and an optional `prior_status` column.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::scoring::{
    ApplicantProfile, ApplicationStatus, LoanPurpose, RiskScoringEngine, ScoreResult,
};

/// Score for one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchScore {
    pub applicant_id: String,
    pub profile: ApplicantProfile,
    pub result: ScoreResult,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to open applicant export: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed applicant export: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown prior status '{value}'")]
    UnknownStatus { row: usize, value: String },
}

pub fn score_csv_path<P: AsRef<Path>>(
    path: P,
    engine: &RiskScoringEngine,
) -> Result<Vec<BatchScore>, BatchError> {
    let file = File::open(path)?;
    score_csv(file, engine)
}

pub fn score_csv<R: Read>(
    reader: R,
    engine: &RiskScoringEngine,
) -> Result<Vec<BatchScore>, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut scores = Vec::new();

    for (index, record) in csv_reader.deserialize::<ApplicantRow>().enumerate() {
        let row = record?;
        let prior_status = match row.prior_status.as_deref() {
            Some(raw) => Some(ApplicationStatus::from_label(raw).ok_or_else(|| {
                BatchError::UnknownStatus {
                    row: index + 1,
                    value: raw.to_string(),
                }
            })?),
            None => None,
        };

        let profile = ApplicantProfile {
            credit_score: row.credit_score,
            annual_income: row.annual_income,
            requested_amount: row.requested_amount,
            employment_years: row.employment_years,
            purpose: LoanPurpose::from_label(&row.purpose),
            prior_status,
        };
        let result = engine.score(&profile);

        scores.push(BatchScore {
            applicant_id: row.applicant_id,
            profile,
            result,
        });
    }

    debug!(rows = scores.len(), "scored applicant export");
    Ok(scores)
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    applicant_id: String,
    credit_score: i32,
    annual_income: f64,
    requested_amount: f64,
    employment_years: u32,
    purpose: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    prior_status: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
