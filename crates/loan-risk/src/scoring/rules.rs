use super::domain::{ApplicantProfile, LoanPurpose, ScoringFactor};
use super::ScoreComponent;

pub(crate) const SCORE_FLOOR: i16 = 5;
pub(crate) const SCORE_CEILING: i16 = 85;

/// Annual rate used to approximate the monthly repayment.
const ASSUMED_ANNUAL_RATE: f64 = 0.06;

/// Derived ratios shared by scoring and recommendations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScoreSignals {
    pub income_to_loan: f64,
    pub debt_to_income: Option<f64>,
}

impl ScoreSignals {
    pub(crate) fn from_profile(profile: &ApplicantProfile) -> Self {
        let income = finite_or_zero(profile.annual_income);
        let requested = finite_or_zero(profile.requested_amount);

        if requested <= 0.0 {
            return Self {
                income_to_loan: 0.0,
                debt_to_income: None,
            };
        }

        let monthly_income = income / 12.0;
        let estimated_payment = requested * ASSUMED_ANNUAL_RATE / 12.0;
        let debt_to_income = if monthly_income > 0.0 {
            estimated_payment / monthly_income
        } else {
            0.0
        };

        Self {
            income_to_loan: income / requested,
            debt_to_income: Some(debt_to_income),
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub(crate) fn score_profile(
    profile: &ApplicantProfile,
) -> (Vec<ScoreComponent>, i16, ScoreSignals) {
    let signals = ScoreSignals::from_profile(profile);
    let mut components = Vec::with_capacity(5);

    let credit_score = profile.credit_score;
    let (points, band) = match credit_score {
        score if score >= 750 => (25, "excellent"),
        score if score >= 700 => (20, "good"),
        score if score >= 650 => (15, "fair"),
        score if score >= 600 => (10, "weak"),
        _ => (5, "poor"),
    };
    components.push(ScoreComponent {
        factor: ScoringFactor::CreditScore,
        score: points,
        notes: format!("credit score {credit_score} in {band} band"),
    });

    let ratio = signals.income_to_loan;
    let points = if ratio >= 3.0 {
        20
    } else if ratio >= 2.0 {
        15
    } else if ratio >= 1.5 {
        10
    } else if ratio >= 1.0 {
        5
    } else {
        0
    };
    components.push(ScoreComponent {
        factor: ScoringFactor::IncomeToLoan,
        score: points,
        notes: format!("income covers requested amount {ratio:.2}x"),
    });

    let years = profile.employment_years;
    let points = match years {
        5.. => 15,
        3..=4 => 10,
        2 => 7,
        1 => 3,
        0 => 0,
    };
    components.push(ScoreComponent {
        factor: ScoringFactor::EmploymentStability,
        score: points,
        notes: format!("{years} year(s) with current employer"),
    });

    let (points, notes) = match signals.debt_to_income {
        None => (0, "no requested amount to assess".to_string()),
        Some(dti) => {
            let points = if dti <= 0.28 {
                10
            } else if dti <= 0.36 {
                5
            } else if dti <= 0.43 {
                -5
            } else {
                -15
            };
            (points, format!("estimated debt-to-income {dti:.2}"))
        }
    };
    components.push(ScoreComponent {
        factor: ScoringFactor::DebtToIncome,
        score: points,
        notes,
    });

    let points = purpose_adjustment(&profile.purpose);
    components.push(ScoreComponent {
        factor: ScoringFactor::LoanPurpose,
        score: points,
        notes: format!("purpose {}", profile.purpose.label()),
    });

    let raw_score = components.iter().map(|component| component.score).sum();

    (components, raw_score, signals)
}

fn purpose_adjustment(purpose: &LoanPurpose) -> i16 {
    match purpose {
        LoanPurpose::HomePurchase | LoanPurpose::HomeRefinance => 5,
        LoanPurpose::Education => 3,
        LoanPurpose::PersonalOther => -5,
        _ => 0,
    }
}

pub(crate) fn clamp_score(raw_score: i16) -> i16 {
    raw_score.clamp(SCORE_FLOOR, SCORE_CEILING)
}
