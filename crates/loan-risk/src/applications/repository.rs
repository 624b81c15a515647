use super::domain::{ApplicationId, LoanApplicationRecord};
use crate::scoring::ApplicationStatus;

/// Storage abstraction; persistence is supplied by the hosting application.
pub trait ApplicationRepository: Send + Sync {
    fn insert(
        &self,
        record: LoanApplicationRecord,
    ) -> Result<LoanApplicationRecord, RepositoryError>;
    fn update(&self, record: LoanApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanApplicationRecord>, RepositoryError>;
    fn list_by_status(
        &self,
        status: ApplicationStatus,
        limit: usize,
    ) -> Result<Vec<LoanApplicationRecord>, RepositoryError>;
    /// Most recently created records first.
    fn recent(&self, limit: usize) -> Result<Vec<LoanApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
