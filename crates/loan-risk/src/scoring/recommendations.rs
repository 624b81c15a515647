use super::domain::ApplicantProfile;
use super::rules::ScoreSignals;

pub const IMPROVE_CREDIT: &str =
    "Improve your credit score: pay down revolving debt and make every payment on time";
pub const MONITOR_CREDIT: &str =
    "Your credit is good but improvable; monitor your credit report for accuracy";
pub const REDUCE_AMOUNT: &str =
    "Reduce the requested amount or increase your income before reapplying";
pub const MARGINAL_RATIO: &str =
    "Your income-to-loan ratio is adequate but marginal; improving it is recommended";
pub const EMPLOYMENT_HISTORY: &str =
    "Wait for a longer employment history or supply additional income verification";
pub const STRONG_APPLICATION: &str = "Your application is strong across every assessed factor";
pub const MAINTAIN_STABILITY: &str =
    "Maintain your current financial stability until the loan is finalized";

/// Advisory text in priority order. Never empty.
pub(crate) fn recommendations_for(
    profile: &ApplicantProfile,
    signals: &ScoreSignals,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    match profile.credit_score {
        score if score < 650 => recommendations.push(IMPROVE_CREDIT),
        score if score < 700 => recommendations.push(MONITOR_CREDIT),
        _ => {}
    }

    let ratio = signals.income_to_loan;
    if ratio < 1.5 {
        recommendations.push(REDUCE_AMOUNT);
    } else if ratio < 2.0 {
        recommendations.push(MARGINAL_RATIO);
    }

    if profile.employment_years < 2 {
        recommendations.push(EMPLOYMENT_HISTORY);
    }

    if recommendations.is_empty() {
        recommendations.extend([STRONG_APPLICATION, MAINTAIN_STABILITY]);
    }

    recommendations.into_iter().map(str::to_string).collect()
}
