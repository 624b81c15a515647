use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::applications::domain::{ApplicationId, LoanApplicationRecord, LoanApplicationSubmission};
use crate::applications::repository::{ApplicationRepository, RepositoryError};
use crate::applications::{application_router, LoanApplicationService};
use crate::scoring::{ApplicationStatus, ScoringConfig};

pub(super) fn submission() -> LoanApplicationSubmission {
    LoanApplicationSubmission {
        amount: Some(30_000.0),
        purpose: Some("Home Purchase".to_string()),
        income: Some(120_000.0),
        employment_years: Some(8),
        credit_score: Some(780),
    }
}

pub(super) fn weak_submission() -> LoanApplicationSubmission {
    LoanApplicationSubmission {
        amount: Some(40_000.0),
        purpose: Some("Personal/Other".to_string()),
        income: Some(25_000.0),
        employment_years: Some(0),
        credit_score: Some(580),
    }
}

pub(super) fn missing_income_submission() -> LoanApplicationSubmission {
    let mut submission = submission();
    submission.income = None;
    submission
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn build_service() -> (LoanApplicationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LoanApplicationService::new(repository.clone(), scoring_config());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, LoanApplicationRecord>>>,
}

impl ApplicationRepository for MemoryRepository {
    fn insert(
        &self,
        record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LoanApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list_by_status(
        &self,
        status: ApplicationStatus,
        limit: usize,
    ) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status == status)
            .take(limit)
            .cloned()
            .collect())
    }

    fn recent(&self, limit: usize) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<LoanApplicationRecord> = guard.values().cloned().collect();
        records.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.id.0.cmp(&left.id.0))
        });
        records.truncate(limit);
        Ok(records)
    }
}

pub(super) struct ConflictRepository;

impl ApplicationRepository for ConflictRepository {
    fn insert(
        &self,
        _record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: LoanApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn list_by_status(
        &self,
        _status: ApplicationStatus,
        _limit: usize,
    ) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn recent(&self, _limit: usize) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(
        &self,
        _record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: LoanApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<LoanApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_by_status(
        &self,
        _status: ApplicationStatus,
        _limit: usize,
    ) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<LoanApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn application_router_with_service(
    service: LoanApplicationService<MemoryRepository>,
) -> axum::Router {
    application_router(Arc::new(service))
}
