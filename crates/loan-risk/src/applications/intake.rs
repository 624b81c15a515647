use std::ops::RangeInclusive;

use super::domain::LoanApplicationSubmission;
use crate::scoring::{ApplicantProfile, LoanPurpose};

/// Validation errors raised before a submission reaches the engine.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("loan amount must be a finite number greater than 0 (found {0})")]
    InvalidAmount(f64),
    #[error("income must be a finite number greater than 0 (found {0})")]
    InvalidIncome(f64),
    #[error("credit score must be between {min} and {max} (found {found})")]
    CreditScoreOutOfRange { min: i32, max: i32, found: i32 },
    #[error("loan purpose is required")]
    BlankPurpose,
}

const DEFAULT_CREDIT_SCORE_RANGE: RangeInclusive<i32> = 300..=850;

/// Guard producing `ApplicantProfile` values from raw submissions.
#[derive(Debug, Clone)]
pub struct IntakeGuard {
    credit_score_range: RangeInclusive<i32>,
}

impl Default for IntakeGuard {
    fn default() -> Self {
        Self {
            credit_score_range: DEFAULT_CREDIT_SCORE_RANGE,
        }
    }
}

impl IntakeGuard {
    pub fn profile_from_submission(
        &self,
        submission: LoanApplicationSubmission,
    ) -> Result<ApplicantProfile, IntakeViolation> {
        let missing: Vec<&'static str> = [
            ("amount", submission.amount.is_none()),
            ("purpose", submission.purpose.is_none()),
            ("income", submission.income.is_none()),
            ("employment_years", submission.employment_years.is_none()),
            ("credit_score", submission.credit_score.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();

        let LoanApplicationSubmission {
            amount: Some(amount),
            purpose: Some(purpose),
            income: Some(income),
            employment_years: Some(employment_years),
            credit_score: Some(credit_score),
        } = submission
        else {
            return Err(IntakeViolation::MissingFields(missing));
        };

        if !(amount.is_finite() && amount > 0.0) {
            return Err(IntakeViolation::InvalidAmount(amount));
        }

        if !(income.is_finite() && income > 0.0) {
            return Err(IntakeViolation::InvalidIncome(income));
        }

        if !self.credit_score_range.contains(&credit_score) {
            return Err(IntakeViolation::CreditScoreOutOfRange {
                min: *self.credit_score_range.start(),
                max: *self.credit_score_range.end(),
                found: credit_score,
            });
        }

        if purpose.trim().is_empty() {
            return Err(IntakeViolation::BlankPurpose);
        }

        Ok(ApplicantProfile {
            credit_score,
            annual_income: income,
            requested_amount: amount,
            employment_years,
            purpose: LoanPurpose::from_label(&purpose),
            prior_status: None,
        })
    }
}
