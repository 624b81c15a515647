use super::policy::confidence_for;
use super::recommendations::{
    EMPLOYMENT_HISTORY, IMPROVE_CREDIT, MAINTAIN_STABILITY, MARGINAL_RATIO, MONITOR_CREDIT,
    REDUCE_AMOUNT, STRONG_APPLICATION,
};
use super::*;
use proptest::prelude::*;

fn profile(
    credit_score: i32,
    annual_income: f64,
    requested_amount: f64,
    employment_years: u32,
    purpose: LoanPurpose,
) -> ApplicantProfile {
    ApplicantProfile {
        credit_score,
        annual_income,
        requested_amount,
        employment_years,
        purpose,
        prior_status: None,
    }
}

fn component_score(result: &ScoreResult, factor: ScoringFactor) -> i16 {
    result
        .components
        .iter()
        .find(|component| component.factor == factor)
        .map(|component| component.score)
        .expect("component present")
}

fn assert_probability(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected probability {expected}, got {actual}"
    );
}

#[test]
fn strong_home_purchase_is_approved_with_high_confidence() {
    let engine = RiskScoringEngine::default();
    let applicant = profile(780, 120_000.0, 30_000.0, 8, LoanPurpose::HomePurchase);

    let result = engine.score(&applicant);

    assert_eq!(result.raw_score, 75);
    assert_eq!(result.clamped_score, 75);
    assert_probability(result.approval_probability, 0.75);
    assert_eq!(result.approval_status, ApprovalStatus::Approved);
    assert_eq!(result.confidence_level, ConfidenceLevel::High);
    assert_eq!(
        result.recommendations,
        vec![STRONG_APPLICATION.to_string(), MAINTAIN_STABILITY.to_string()]
    );
}

#[test]
fn weak_personal_loan_is_rejected_with_targeted_advice() {
    let engine = RiskScoringEngine::default();
    let applicant = profile(580, 25_000.0, 40_000.0, 0, LoanPurpose::PersonalOther);

    let result = engine.score(&applicant);

    assert_eq!(component_score(&result, ScoringFactor::CreditScore), 5);
    assert_eq!(component_score(&result, ScoringFactor::IncomeToLoan), 0);
    assert_eq!(component_score(&result, ScoringFactor::EmploymentStability), 0);
    // 40_000 * 0.06 / 25_000 = 0.096
    assert_eq!(component_score(&result, ScoringFactor::DebtToIncome), 10);
    assert_eq!(component_score(&result, ScoringFactor::LoanPurpose), -5);
    assert_eq!(result.raw_score, 10);
    assert_probability(result.approval_probability, 0.10);
    assert_eq!(result.approval_status, ApprovalStatus::Rejected);
    assert_eq!(result.confidence_level, ConfidenceLevel::High);
    assert_eq!(
        result.recommendations,
        vec![
            IMPROVE_CREDIT.to_string(),
            REDUCE_AMOUNT.to_string(),
            EMPLOYMENT_HISTORY.to_string(),
        ]
    );
}

#[test]
fn zero_requested_amount_skips_ratio_and_debt_terms() {
    let engine = RiskScoringEngine::default();
    let applicant = profile(700, 50_000.0, 0.0, 3, LoanPurpose::Education);

    let result = engine.score(&applicant);

    assert_eq!(component_score(&result, ScoringFactor::IncomeToLoan), 0);
    assert_eq!(component_score(&result, ScoringFactor::DebtToIncome), 0);
    assert_eq!(result.raw_score, 33);
    assert_probability(result.approval_probability, 0.33);
    assert_eq!(result.approval_status, ApprovalStatus::Rejected);
    assert_eq!(result.confidence_level, ConfidenceLevel::Medium);
    assert_eq!(result.recommendations, vec![REDUCE_AMOUNT.to_string()]);
}

#[test]
fn zero_income_does_not_produce_nan() {
    let engine = RiskScoringEngine::default();
    let applicant = profile(720, 0.0, 10_000.0, 4, LoanPurpose::AutoLoan);

    let result = engine.score(&applicant);

    assert!(result.approval_probability.is_finite());
    assert_eq!(component_score(&result, ScoringFactor::IncomeToLoan), 0);
    assert_eq!(component_score(&result, ScoringFactor::DebtToIncome), 10);
    assert_eq!(result.raw_score, 40);
}

#[test]
fn non_finite_inputs_are_treated_as_zero() {
    let engine = RiskScoringEngine::default();
    let applicant = profile(
        650,
        f64::NAN,
        f64::INFINITY,
        1,
        LoanPurpose::Unrecognized("Boat".to_string()),
    );

    let result = engine.score(&applicant);

    assert!(result.approval_probability.is_finite());
    assert_eq!(result.raw_score, 18);
    assert_eq!(result.clamped_score, 18);
}

#[test]
fn negative_raw_score_is_clamped_to_floor() {
    let engine = RiskScoringEngine::default();
    let applicant = profile(400, 10_000.0, 100_000.0, 0, LoanPurpose::PersonalOther);

    let result = engine.score(&applicant);

    assert_eq!(component_score(&result, ScoringFactor::DebtToIncome), -15);
    assert_eq!(result.raw_score, -15);
    assert_eq!(result.clamped_score, 5);
    assert_probability(result.approval_probability, 0.05);
    assert_eq!(result.approval_status, ApprovalStatus::Rejected);
}

#[test]
fn debt_to_income_bands_follow_estimated_payment() {
    let engine = RiskScoringEngine::default();
    let cases = [
        (400_000.0, 10), // dti 0.24
        (500_000.0, 5),  // dti 0.30
        (650_000.0, -5), // dti 0.39
        (800_000.0, -15), // dti 0.48
    ];

    for (requested, expected) in cases {
        let applicant = profile(700, 100_000.0, requested, 3, LoanPurpose::AutoLoan);
        let result = engine.score(&applicant);
        assert_eq!(
            component_score(&result, ScoringFactor::DebtToIncome),
            expected,
            "requested {requested}"
        );
    }
}

#[test]
fn income_ratio_and_employment_bands() {
    let engine = RiskScoringEngine::default();
    let ratios = [(3.0, 20), (2.0, 15), (1.5, 10), (1.0, 5), (0.9, 0)];
    for (ratio, expected) in ratios {
        let applicant = profile(700, 10_000.0 * ratio, 10_000.0, 0, LoanPurpose::AutoLoan);
        let result = engine.score(&applicant);
        assert_eq!(
            component_score(&result, ScoringFactor::IncomeToLoan),
            expected,
            "ratio {ratio}"
        );
    }

    let tenures = [(0, 0), (1, 3), (2, 7), (3, 10), (4, 10), (5, 15), (30, 15)];
    for (years, expected) in tenures {
        let applicant = profile(700, 50_000.0, 10_000.0, years, LoanPurpose::AutoLoan);
        let result = engine.score(&applicant);
        assert_eq!(
            component_score(&result, ScoringFactor::EmploymentStability),
            expected,
            "{years} years"
        );
    }
}

#[test]
fn purpose_adjustments_are_neutral_for_unknown_categories() {
    let engine = RiskScoringEngine::default();
    let cases = [
        (LoanPurpose::HomePurchase, 5),
        (LoanPurpose::HomeRefinance, 5),
        (LoanPurpose::Education, 3),
        (LoanPurpose::DebtConsolidation, 0),
        (LoanPurpose::PersonalLoan, 0),
        (LoanPurpose::Unrecognized("Yacht".to_string()), 0),
        (LoanPurpose::PersonalOther, -5),
    ];

    for (purpose, expected) in cases {
        let applicant = profile(700, 50_000.0, 10_000.0, 3, purpose.clone());
        let result = engine.score(&applicant);
        assert_eq!(
            component_score(&result, ScoringFactor::LoanPurpose),
            expected,
            "{purpose:?}"
        );
    }
}

#[test]
fn approval_cutoff_is_configurable() {
    // 20 + 15 + 7 + 10 + 0 = 52
    let applicant = profile(700, 20_000.0, 10_000.0, 2, LoanPurpose::AutoLoan);

    let lenient = RiskScoringEngine::default().score(&applicant);
    let strict = RiskScoringEngine::new(ScoringConfig::new(55)).score(&applicant);

    assert_eq!(lenient.clamped_score, 52);
    assert_eq!(lenient.approval_status, ApprovalStatus::Approved);
    assert_eq!(strict.approval_status, ApprovalStatus::Rejected);
    assert_eq!(lenient.approval_probability, strict.approval_probability);
}

#[test]
fn unreachable_cutoffs_fall_back_to_default() {
    assert_eq!(ScoringConfig::new(200).approval_cutoff, DEFAULT_APPROVAL_CUTOFF);
    assert_eq!(ScoringConfig::new(4).approval_cutoff, DEFAULT_APPROVAL_CUTOFF);
    assert_eq!(ScoringConfig::new(85).approval_cutoff, 85);
    assert_eq!(ScoringConfig::default().approval_cutoff, 50);
}

#[test]
fn prior_status_overrides_label_but_not_probability() {
    let engine = RiskScoringEngine::default();
    let mut strong = profile(780, 120_000.0, 30_000.0, 8, LoanPurpose::HomePurchase);
    strong.prior_status = Some(ApplicationStatus::Rejected);
    let mut weak = profile(580, 25_000.0, 40_000.0, 0, LoanPurpose::PersonalOther);
    weak.prior_status = Some(ApplicationStatus::Approved);

    let strong_result = engine.score(&strong);
    let weak_result = engine.score(&weak);

    assert_eq!(strong_result.approval_status, ApprovalStatus::Rejected);
    assert_probability(strong_result.approval_probability, 0.75);
    assert_eq!(weak_result.approval_status, ApprovalStatus::Approved);
    assert_probability(weak_result.approval_probability, 0.10);

    strong.prior_status = Some(ApplicationStatus::Pending);
    assert_eq!(
        engine.score(&strong).approval_status,
        ApprovalStatus::Approved
    );
}

#[test]
fn confidence_grows_with_distance_from_midband() {
    assert_eq!(confidence_for(50), ConfidenceLevel::Low);
    assert_eq!(confidence_for(45), ConfidenceLevel::Low);
    assert_eq!(confidence_for(55), ConfidenceLevel::Low);
    assert_eq!(confidence_for(44), ConfidenceLevel::Medium);
    assert_eq!(confidence_for(31), ConfidenceLevel::Medium);
    assert_eq!(confidence_for(69), ConfidenceLevel::Medium);
    assert_eq!(confidence_for(30), ConfidenceLevel::High);
    assert_eq!(confidence_for(70), ConfidenceLevel::High);
    assert_eq!(confidence_for(5), ConfidenceLevel::High);
    assert_eq!(confidence_for(85), ConfidenceLevel::High);

    for score in 5..50 {
        assert!(confidence_for(score) >= confidence_for(score + 1));
    }
    for score in 50..85 {
        assert!(confidence_for(score + 1) >= confidence_for(score));
    }
}

#[test]
fn recommendations_cover_improvable_bands() {
    let applicant = profile(680, 18_000.0, 10_000.0, 6, LoanPurpose::HomePurchase);

    let recommendations = recommend(&applicant);

    assert_eq!(
        recommendations,
        vec![MONITOR_CREDIT.to_string(), MARGINAL_RATIO.to_string()]
    );
    assert_eq!(recommendations, score(&applicant).recommendations);
}

#[test]
fn purpose_labels_normalize() {
    assert_eq!(LoanPurpose::from_label("home purchase"), LoanPurpose::HomePurchase);
    assert_eq!(LoanPurpose::from_label("Personal/Other"), LoanPurpose::PersonalOther);
    assert_eq!(LoanPurpose::from_label("DEBT_CONSOLIDATION"), LoanPurpose::DebtConsolidation);
    assert_eq!(
        LoanPurpose::from_label("  Yacht  "),
        LoanPurpose::Unrecognized("Yacht".to_string())
    );

    let parsed: LoanPurpose = serde_json::from_str("\"Home Refinance\"").expect("purpose parses");
    assert_eq!(parsed, LoanPurpose::HomeRefinance);
    assert_eq!(
        serde_json::to_string(&LoanPurpose::PersonalOther).expect("purpose serializes"),
        "\"Personal/Other\""
    );
}

fn purpose_strategy() -> impl Strategy<Value = LoanPurpose> {
    prop_oneof![
        Just(LoanPurpose::HomePurchase),
        Just(LoanPurpose::HomeRefinance),
        Just(LoanPurpose::Education),
        Just(LoanPurpose::AutoLoan),
        Just(LoanPurpose::BusinessLoan),
        Just(LoanPurpose::DebtConsolidation),
        Just(LoanPurpose::PersonalLoan),
        Just(LoanPurpose::PersonalOther),
        "[A-Z][a-z]{2,10}".prop_map(LoanPurpose::Unrecognized),
    ]
}

fn profile_strategy() -> impl Strategy<Value = ApplicantProfile> {
    (
        -200i32..1_200,
        -1_000_000.0f64..10_000_000.0,
        -100_000.0f64..10_000_000.0,
        0u32..60,
        purpose_strategy(),
    )
        .prop_map(|(credit, income, requested, years, purpose)| {
            profile(credit, income, requested, years, purpose)
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn scoring_is_deterministic(applicant in profile_strategy()) {
        let engine = RiskScoringEngine::default();
        prop_assert_eq!(engine.score(&applicant), engine.score(&applicant));
    }

    #[test]
    fn probability_stays_within_clamp(applicant in profile_strategy()) {
        let result = score(&applicant);
        prop_assert!(result.approval_probability.is_finite());
        prop_assert!(result.approval_probability >= 0.05);
        prop_assert!(result.approval_probability <= 0.85);
    }

    #[test]
    fn raising_credit_never_lowers_probability(
        applicant in profile_strategy(),
        lower in 300i32..850,
        delta in 0i32..300,
    ) {
        let mut low = applicant.clone();
        low.credit_score = lower;
        let mut high = applicant;
        high.credit_score = lower + delta;

        prop_assert!(score(&high).approval_probability >= score(&low).approval_probability);
    }

    #[test]
    fn recommendations_are_never_empty(applicant in profile_strategy()) {
        let recommendations = recommend(&applicant);
        prop_assert!(!recommendations.is_empty());
        prop_assert!(recommendations.len() <= 4);
    }
}
