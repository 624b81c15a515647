use crate::commands::{run_batch, run_score, BatchArgs, ScoreArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_risk::config::parse_approval_cutoff;
use loan_risk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Risk Scoring",
    about = "Score loan applications and serve the risk-scoring API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single applicant and print the prediction as JSON
    Score(ScoreArgs),
    /// Score every applicant in a CSV export
    Batch(BatchArgs),
    /// Walk through reference applicants and the application lifecycle
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) scoring: ScoringArgs,
}

/// Scoring overrides shared by every command that runs the engine.
#[derive(Args, Debug, Default, Clone, Copy)]
pub(crate) struct ScoringArgs {
    /// Clamped score at or above which fresh evaluations are approved (5-85)
    #[arg(long, value_parser = parse_approval_cutoff)]
    pub(crate) approval_cutoff: Option<i16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["loan-risk-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "loan-risk-api",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--approval-cutoff",
            "60",
        ])
        .expect("parses");

        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.scoring.approval_cutoff, Some(60));
    }

    #[test]
    fn rejects_unreachable_cutoff() {
        let result =
            Cli::try_parse_from(["loan-risk-api", "serve", "--approval-cutoff", "95"]);
        assert!(result.is_err());
    }

    #[test]
    fn score_requires_applicant_fields() {
        let result = Cli::try_parse_from(["loan-risk-api", "score", "--credit-score", "700"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "loan-risk-api",
            "score",
            "--credit-score",
            "700",
            "--income",
            "50000",
            "--amount",
            "20000",
            "--employment-years",
            "3",
            "--purpose",
            "Education",
            "--prior-status",
            "approved",
        ])
        .expect("parses");
        let Some(Command::Score(args)) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(args.credit_score, 700);
        assert_eq!(args.purpose, "Education");
        assert!(args.prior_status.is_some());
    }
}
