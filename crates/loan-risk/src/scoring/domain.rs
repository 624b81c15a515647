use serde::{Deserialize, Serialize};

/// Financial snapshot of a single applicant, built once per scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    /// Bureau score. Values outside 300..=850 are accepted and simply land in the lowest or
    /// highest band.
    pub credit_score: i32,
    pub annual_income: f64,
    pub requested_amount: f64,
    pub employment_years: u32,
    pub purpose: LoanPurpose,
    #[serde(default)]
    pub prior_status: Option<ApplicationStatus>,
}

/// Declared use of the loan proceeds.
///
/// Labels that do not match a known category are preserved in `Unrecognized` and scored
/// neutrally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LoanPurpose {
    HomePurchase,
    HomeRefinance,
    Education,
    AutoLoan,
    BusinessLoan,
    DebtConsolidation,
    PersonalLoan,
    PersonalOther,
    Unrecognized(String),
}

impl LoanPurpose {
    pub fn from_label(raw: &str) -> Self {
        let normalized: String = raw
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .map(|ch| ch.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "homepurchase" | "home" | "mortgage" => Self::HomePurchase,
            "homerefinance" | "refinance" => Self::HomeRefinance,
            "education" | "student" | "studentloan" => Self::Education,
            "autoloan" | "auto" | "car" => Self::AutoLoan,
            "businessloan" | "business" => Self::BusinessLoan,
            "debtconsolidation" => Self::DebtConsolidation,
            "personalloan" | "personal" => Self::PersonalLoan,
            "personalother" | "other" => Self::PersonalOther,
            _ => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::HomePurchase => "Home Purchase",
            Self::HomeRefinance => "Home Refinance",
            Self::Education => "Education",
            Self::AutoLoan => "Auto Loan",
            Self::BusinessLoan => "Business Loan",
            Self::DebtConsolidation => "Debt Consolidation",
            Self::PersonalLoan => "Personal Loan",
            Self::PersonalOther => "Personal/Other",
            Self::Unrecognized(label) => label,
        }
    }
}

impl From<String> for LoanPurpose {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<LoanPurpose> for String {
    fn from(value: LoanPurpose) -> Self {
        value.label().to_string()
    }
}

/// Decision recorded against a loan application outside of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl From<ApprovalStatus> for ApplicationStatus {
    fn from(value: ApprovalStatus) -> Self {
        match value {
            ApprovalStatus::Approved => ApplicationStatus::Approved,
            ApprovalStatus::Rejected => ApplicationStatus::Rejected,
        }
    }
}

/// Binary label emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "Approved",
            ApprovalStatus::Rejected => "Rejected",
        }
    }
}

/// How decisive a score is, based on its distance from the midband.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::High => "High",
        }
    }
}

/// Factors contributing to the additive score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringFactor {
    CreditScore,
    IncomeToLoan,
    EmploymentStability,
    DebtToIncome,
    LoanPurpose,
}
