use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{ApplicantProfile, ApplicationStatus, LoanPurpose, ScoreResult};

/// Identifier wrapper for submitted loan applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Loan request as received from the application form. Every field is optional so intake can
/// report all missing fields at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationSubmission {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub employment_years: Option<u32>,
    #[serde(default)]
    pub credit_score: Option<i32>,
}

/// Stored loan application together with its latest evaluation.
///
/// `status` is the effective label: the recorded decision when there is one, otherwise the label
/// of the latest evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationRecord {
    pub id: ApplicationId,
    pub amount: f64,
    pub purpose: LoanPurpose,
    pub income: f64,
    pub employment_years: u32,
    pub credit_score: i32,
    pub status: ApplicationStatus,
    /// Decision recorded outside the engine.
    #[serde(default)]
    pub decision: Option<ApplicationStatus>,
    pub created_at: DateTime<Utc>,
    pub evaluation: Option<ScoreResult>,
}

impl LoanApplicationRecord {
    /// Profile for re-scoring. Only a recorded approval or rejection becomes the prior status.
    pub fn profile(&self) -> ApplicantProfile {
        let prior_status = match self.decision {
            Some(ApplicationStatus::Pending) | None => None,
            decided => decided,
        };

        ApplicantProfile {
            credit_score: self.credit_score,
            annual_income: self.income,
            requested_amount: self.amount,
            employment_years: self.employment_years,
            purpose: self.purpose.clone(),
            prior_status,
        }
    }

    pub fn decision_rationale(&self) -> String {
        match &self.evaluation {
            Some(result) => result.summary(),
            None => "pending evaluation".to_string(),
        }
    }

    pub fn status_view(&self) -> ApplicationStatusView {
        ApplicationStatusView {
            application_id: self.id.clone(),
            status: self.status.label(),
            decision: self.decision.map(ApplicationStatus::label),
            purpose: self.purpose.label().to_string(),
            amount: self.amount,
            created_at: self.created_at,
            decision_rationale: self.decision_rationale(),
            approval_probability: self
                .evaluation
                .as_ref()
                .map(|result| round_probability(result.approval_probability)),
            confidence_level: self
                .evaluation
                .as_ref()
                .map(|result| result.confidence_level.label()),
            recommendations: self
                .evaluation
                .as_ref()
                .map(|result| result.recommendations.clone())
                .unwrap_or_default(),
        }
    }
}

/// Public view of a stored application.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<&'static str>,
    pub purpose: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
    pub decision_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<&'static str>,
    pub recommendations: Vec<String>,
}

/// Newest-first page of stored applications.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationListView {
    pub applications: Vec<ApplicationStatusView>,
    pub count: usize,
}

impl ApplicationListView {
    pub fn from_records(records: &[LoanApplicationRecord]) -> Self {
        let applications: Vec<ApplicationStatusView> =
            records.iter().map(LoanApplicationRecord::status_view).collect();
        Self {
            count: applications.len(),
            applications,
        }
    }
}

/// Response body for a scoring request, with the per-factor breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    pub approval_status: &'static str,
    pub approval_probability: f64,
    pub confidence_level: &'static str,
    pub recommendations: Vec<String>,
    pub score_breakdown: ScoreBreakdown,
    pub prediction_method: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub raw_score: i16,
    pub clamped_score: i16,
    pub components: Vec<crate::scoring::ScoreComponent>,
}

impl PredictionView {
    pub fn from_result(application_id: Option<ApplicationId>, result: ScoreResult) -> Self {
        Self {
            application_id,
            approval_status: result.approval_status.label(),
            approval_probability: round_probability(result.approval_probability),
            confidence_level: result.confidence_level.label(),
            recommendations: result.recommendations,
            score_breakdown: ScoreBreakdown {
                raw_score: result.raw_score,
                clamped_score: result.clamped_score,
                components: result.components,
            },
            prediction_method: "rule_based",
        }
    }
}

fn round_probability(probability: f64) -> f64 {
    (probability * 1000.0).round() / 1000.0
}
