use crate::cli::ScoringArgs;
use crate::commands::load_command_config;
use crate::infra::InMemoryApplicationRepository;
use clap::Args;
use loan_risk::applications::{
    ApplicationRepository, LoanApplicationService, LoanApplicationSubmission,
};
use loan_risk::error::AppError;
use loan_risk::scoring::{
    ApplicantProfile, ApplicationStatus, LoanPurpose, RiskScoringEngine, ScoreResult,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the submission, decision and re-evaluation walkthrough.
    #[arg(long)]
    pub(crate) skip_lifecycle: bool,
    #[command(flatten)]
    pub(crate) scoring: ScoringArgs,
}

struct ReferenceApplicant {
    label: &'static str,
    profile: ApplicantProfile,
}

fn reference_applicants() -> Vec<ReferenceApplicant> {
    vec![
        ReferenceApplicant {
            label: "Established home buyer",
            profile: ApplicantProfile {
                credit_score: 780,
                annual_income: 120_000.0,
                requested_amount: 30_000.0,
                employment_years: 8,
                purpose: LoanPurpose::HomePurchase,
                prior_status: None,
            },
        },
        ReferenceApplicant {
            label: "Thin-file personal borrower",
            profile: ApplicantProfile {
                credit_score: 580,
                annual_income: 25_000.0,
                requested_amount: 40_000.0,
                employment_years: 0,
                purpose: LoanPurpose::PersonalOther,
                prior_status: None,
            },
        },
        ReferenceApplicant {
            label: "Incomplete financials",
            profile: ApplicantProfile {
                credit_score: 700,
                annual_income: 0.0,
                requested_amount: 0.0,
                employment_years: 2,
                purpose: LoanPurpose::Education,
                prior_status: None,
            },
        },
    ]
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = load_command_config(args.scoring)?;
    let engine = RiskScoringEngine::new(config.scoring);

    println!(
        "Loan risk scoring demo (approval cutoff {})",
        engine.config().approval_cutoff
    );
    for applicant in reference_applicants() {
        let result = engine.score(&applicant.profile);
        println!(
            "\n{} | credit {} | income {:.0} | requested {:.0} | {} yrs | {}",
            applicant.label,
            applicant.profile.credit_score,
            applicant.profile.annual_income,
            applicant.profile.requested_amount,
            applicant.profile.employment_years,
            applicant.profile.purpose.label()
        );
        render_result(&result);
    }

    if args.skip_lifecycle {
        return Ok(());
    }

    println!("\nApplication lifecycle");
    let repository = Arc::new(InMemoryApplicationRepository::default());
    let service = LoanApplicationService::new(repository.clone(), config.scoring);

    let incomplete = LoanApplicationSubmission {
        amount: Some(15_000.0),
        purpose: Some("Auto Loan".to_string()),
        ..LoanApplicationSubmission::default()
    };
    if let Err(err) = service.submit(incomplete) {
        println!("- Incomplete submission rejected: {}", err);
    }

    let submission = LoanApplicationSubmission {
        amount: Some(40_000.0),
        purpose: Some("Personal/Other".to_string()),
        income: Some(25_000.0),
        employment_years: Some(0),
        credit_score: Some(580),
    };
    let record = match service.submit(submission) {
        Ok(record) => record,
        Err(err) => {
            println!("  Submission rejected: {}", err);
            return Ok(());
        }
    };
    let view = record.status_view();
    println!(
        "- Received application {} at {} -> status {}",
        view.application_id.0,
        view.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        view.status
    );
    println!("  Decision rationale: {}", view.decision_rationale);

    let overridden = match service.record_decision(&record.id, ApplicationStatus::Approved) {
        Ok(record) => record,
        Err(err) => {
            println!("  Decision unavailable: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Underwriter override recorded -> status {}",
        overridden.status.label()
    );

    match service.evaluate(&record.id) {
        Ok(result) => {
            println!("  Re-evaluation keeps the recorded decision:");
            render_result(&result);
        }
        Err(err) => println!("  Evaluation unavailable: {}", err),
    }

    match repository.list_by_status(ApplicationStatus::Approved, 10) {
        Ok(approved) => println!("- Approved applications on file: {}", approved.len()),
        Err(err) => println!("- Repository unavailable: {}", err),
    }

    match service.recent(None) {
        Ok(recent) => {
            println!("- Recent applications (newest first):");
            for entry in recent {
                let decided = match entry.decision {
                    Some(decision) => format!("decided {}", decision.label()),
                    None => "no decision recorded".to_string(),
                };
                println!("    - {} {} ({})", entry.id.0, entry.status.label(), decided);
            }
        }
        Err(err) => println!("- Recent applications unavailable: {}", err),
    }

    match service.get(&record.id) {
        Ok(stored) => match serde_json::to_string_pretty(&stored.status_view()) {
            Ok(json) => println!("  Public status payload:\n{}", json),
            Err(err) => println!("  Public status payload unavailable: {}", err),
        },
        Err(err) => println!("  Repository lookup failed: {}", err),
    }

    Ok(())
}

fn render_result(result: &ScoreResult) {
    println!(
        "  {} | raw score {} -> clamped {}",
        result.summary(),
        result.raw_score,
        result.clamped_score
    );
    for component in &result.components {
        println!(
            "    - {:?}: {:+} ({})",
            component.factor, component.score, component.notes
        );
    }
    println!("  Recommendations:");
    for recommendation in &result.recommendations {
        println!("    - {}", recommendation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_risk::scoring::ApprovalStatus;

    #[test]
    fn reference_applicants_cover_both_labels() {
        let engine = RiskScoringEngine::default();
        let statuses: Vec<ApprovalStatus> = reference_applicants()
            .iter()
            .map(|applicant| engine.score(&applicant.profile).approval_status)
            .collect();

        assert!(statuses.contains(&ApprovalStatus::Approved));
        assert!(statuses.contains(&ApprovalStatus::Rejected));
    }

    #[test]
    fn incomplete_financials_still_score() {
        let engine = RiskScoringEngine::default();
        let applicants = reference_applicants();
        let incomplete = applicants
            .iter()
            .find(|applicant| applicant.profile.requested_amount == 0.0)
            .expect("zero-amount applicant present");

        let result = engine.score(&incomplete.profile);

        assert!(result.approval_probability.is_finite());
        assert!(!result.recommendations.is_empty());
    }
}
