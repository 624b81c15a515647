use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{ApplicationId, LoanApplicationRecord, LoanApplicationSubmission};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{ApplicationRepository, RepositoryError};
use crate::scoring::{ApplicationStatus, RiskScoringEngine, ScoreResult, ScoringConfig};

/// Service composing intake validation, the scoring engine and the repository.
pub struct LoanApplicationService<R> {
    guard: IntakeGuard,
    repository: Arc<R>,
    engine: Arc<RiskScoringEngine>,
}

/// Page size for history listings when the caller gives none.
pub const DEFAULT_LISTING_LIMIT: usize = 10;
const MAX_LISTING_LIMIT: usize = 100;

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("loan-{id:06}"))
}

impl<R> LoanApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            guard: IntakeGuard::default(),
            repository,
            engine: Arc::new(RiskScoringEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &RiskScoringEngine {
        &self.engine
    }

    /// Validate and score a submission without storing it.
    pub fn score(
        &self,
        submission: LoanApplicationSubmission,
    ) -> Result<ScoreResult, ApplicationServiceError> {
        let profile = self.guard.profile_from_submission(submission)?;
        Ok(self.engine.score(&profile))
    }

    /// Submit a new application. The computed label is reported as the status until a decision is
    /// recorded.
    pub fn submit(
        &self,
        submission: LoanApplicationSubmission,
    ) -> Result<LoanApplicationRecord, ApplicationServiceError> {
        let profile = self.guard.profile_from_submission(submission)?;
        let evaluation = self.engine.score(&profile);

        let record = LoanApplicationRecord {
            id: next_application_id(),
            amount: profile.requested_amount,
            purpose: profile.purpose,
            income: profile.annual_income,
            employment_years: profile.employment_years,
            credit_score: profile.credit_score,
            status: ApplicationStatus::from(evaluation.approval_status),
            decision: None,
            created_at: Utc::now(),
            evaluation: Some(evaluation),
        };

        let stored = self.repository.insert(record)?;
        info!(
            application_id = %stored.id.0,
            status = stored.status.label(),
            "loan application scored"
        );
        Ok(stored)
    }

    /// Re-score a stored application under the current configuration. A recorded decision keeps
    /// its label; otherwise the status follows the new evaluation.
    pub fn evaluate(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ScoreResult, ApplicationServiceError> {
        let mut record = self.get(application_id)?;

        let evaluation = self.engine.score(&record.profile());
        debug!(
            application_id = %application_id.0,
            clamped_score = evaluation.clamped_score,
            "loan application re-evaluated"
        );

        if record.decision.is_none() {
            record.status = ApplicationStatus::from(evaluation.approval_status);
        }
        record.evaluation = Some(evaluation.clone());
        self.repository.update(record)?;

        Ok(evaluation)
    }

    /// Record a decision made outside the engine.
    pub fn record_decision(
        &self,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<LoanApplicationRecord, ApplicationServiceError> {
        let mut record = self.get(application_id)?;
        record.status = status;
        record.decision = Some(status);
        record.evaluation = Some(self.engine.score(&record.profile()));
        self.repository.update(record.clone())?;

        info!(
            application_id = %application_id.0,
            status = status.label(),
            "loan decision recorded"
        );
        Ok(record)
    }

    /// Stored applications, newest first. `limit` defaults to ten and is capped at one hundred.
    pub fn recent(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<LoanApplicationRecord>, ApplicationServiceError> {
        let limit = limit.unwrap_or(DEFAULT_LISTING_LIMIT).min(MAX_LISTING_LIMIT);
        Ok(self.repository.recent(limit)?)
    }

    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<LoanApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
