//! Loan approval risk scoring.
//!
//! A weighted additive rubric over credit band, income coverage, tenure, a debt-to-income proxy
//! and loan purpose. The accumulated score is clamped to `[5, 85]` and reported as a probability,
//! so the engine never claims near-certain approval or rejection. Every caller in the crate
//! (service, router, batch import) goes through [`RiskScoringEngine`].

mod config;
pub mod domain;
mod policy;
pub mod recommendations;
mod rules;

#[cfg(test)]
mod tests;

pub use config::{ScoringConfig, DEFAULT_APPROVAL_CUTOFF};
pub use domain::{
    ApplicantProfile, ApplicationStatus, ApprovalStatus, ConfidenceLevel, LoanPurpose,
    ScoringFactor,
};

use policy::{confidence_for, decide_status};
use recommendations::recommendations_for;
use rules::{clamp_score, score_profile, ScoreSignals};
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying the rubric to a profile.
#[derive(Debug, Clone, Default)]
pub struct RiskScoringEngine {
    config: ScoringConfig,
}

impl RiskScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, profile: &ApplicantProfile) -> ScoreResult {
        let (components, raw_score, signals) = score_profile(profile);
        let clamped_score = clamp_score(raw_score);

        ScoreResult {
            approval_probability: f64::from(clamped_score) / 100.0,
            approval_status: decide_status(clamped_score, profile.prior_status, &self.config),
            confidence_level: confidence_for(clamped_score),
            recommendations: recommendations_for(profile, &signals),
            raw_score,
            clamped_score,
            components,
        }
    }

    pub fn recommend(&self, profile: &ApplicantProfile) -> Vec<String> {
        recommendations_for(profile, &ScoreSignals::from_profile(profile))
    }
}

/// Scores a profile with the default configuration.
pub fn score(profile: &ApplicantProfile) -> ScoreResult {
    RiskScoringEngine::default().score(profile)
}

pub fn recommend(profile: &ApplicantProfile) -> Vec<String> {
    RiskScoringEngine::default().recommend(profile)
}

/// Discrete contribution to a score, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoringFactor,
    pub score: i16,
    pub notes: String,
}

/// Outcome of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub approval_probability: f64,
    pub approval_status: ApprovalStatus,
    pub confidence_level: ConfidenceLevel,
    pub recommendations: Vec<String>,
    pub raw_score: i16,
    pub clamped_score: i16,
    pub components: Vec<ScoreComponent>,
}

impl ScoreResult {
    pub fn summary(&self) -> String {
        format!(
            "{} ({:.0}% approval probability, {} confidence)",
            self.approval_status.label().to_lowercase(),
            self.approval_probability * 100.0,
            self.confidence_level.label().to_lowercase()
        )
    }
}
