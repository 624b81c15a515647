//! Loan application intake, tracking and HTTP surface around the scoring engine.

pub mod batch;
pub mod domain;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{score_csv, score_csv_path, BatchError, BatchScore};
pub use domain::{
    ApplicationId, ApplicationListView, ApplicationStatusView, LoanApplicationRecord,
    LoanApplicationSubmission, PredictionView, ScoreBreakdown,
};
pub use intake::{IntakeGuard, IntakeViolation};
pub use repository::{ApplicationRepository, RepositoryError};
pub use router::{application_router, DecisionRequest, ListingQuery};
pub use service::{ApplicationServiceError, LoanApplicationService, DEFAULT_LISTING_LIMIT};
