//! Deterministic loan approval risk scoring.
//!
//! [`scoring`] holds the pure engine. [`applications`] wraps it with intake validation, a
//! repository seam, a service facade, an axum router and batch CSV scoring.

pub mod applications;
pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
