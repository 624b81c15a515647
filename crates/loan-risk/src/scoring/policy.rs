use super::config::ScoringConfig;
use super::domain::{ApplicationStatus, ApprovalStatus, ConfidenceLevel};

const MIDBAND_LOW: i16 = 45;
const MIDBAND_HIGH: i16 = 55;
const HIGH_CONFIDENCE_DISTANCE: i16 = 15;

/// Labels a clamped score. A recorded approval or rejection wins over the cutoff.
pub(crate) fn decide_status(
    clamped_score: i16,
    prior_status: Option<ApplicationStatus>,
    config: &ScoringConfig,
) -> ApprovalStatus {
    match prior_status {
        Some(ApplicationStatus::Approved) => ApprovalStatus::Approved,
        Some(ApplicationStatus::Rejected) => ApprovalStatus::Rejected,
        Some(ApplicationStatus::Pending) | None => {
            if clamped_score >= config.approval_cutoff {
                ApprovalStatus::Approved
            } else {
                ApprovalStatus::Rejected
            }
        }
    }
}

/// Non-decreasing in the distance between the score and the midband.
pub(crate) fn confidence_for(clamped_score: i16) -> ConfidenceLevel {
    let distance = if clamped_score < MIDBAND_LOW {
        MIDBAND_LOW - clamped_score
    } else if clamped_score > MIDBAND_HIGH {
        clamped_score - MIDBAND_HIGH
    } else {
        0
    };

    match distance {
        0 => ConfidenceLevel::Low,
        d if d < HIGH_CONFIDENCE_DISTANCE => ConfidenceLevel::Medium,
        _ => ConfidenceLevel::High,
    }
}
