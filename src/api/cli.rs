use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::Scenario;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliScenario {
    #[value(alias = "conservative", alias = "pessimista")]
    Pessimistic,
    #[value(alias = "realista")]
    Realistic,
    #[value(alias = "otimista")]
    Optimistic,
}

impl From<CliScenario> for Scenario {
    fn from(value: CliScenario) -> Self {
        match value {
            CliScenario::Pessimistic => Scenario::Pessimistic,
            CliScenario::Realistic => Scenario::Realistic,
            CliScenario::Optimistic => Scenario::Optimistic,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "freedom-audit",
    about = "Lifestyle freedom audit: savings target, progress, years to freedom and lead scoring"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API over HTTP
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Print the freedom audit for one set of inputs
    Audit(AuditArgs),
    /// Print the lead score for one set of inputs
    Score(ScoreArgs),
}

#[derive(Args, Debug, Clone)]
#[command(allow_negative_numbers = true)]
pub struct AuditArgs {
    #[arg(long, default_value_t = 0.0, help = "Monthly lifestyle cost")]
    pub monthly_cost: f64,
    #[arg(long, default_value_t = 0.0, help = "Current invested net worth")]
    pub current_assets: f64,
    #[arg(long, default_value_t = 5000.0, help = "Planned monthly contribution")]
    pub monthly_contribution: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Expected real annual return in percent, e.g. 5"
    )]
    pub annual_return_rate: f64,
    #[arg(
        long,
        value_enum,
        help = "Return scenario; overrides --annual-return-rate when set"
    )]
    pub scenario: Option<CliScenario>,
    #[arg(
        long,
        default_value_t = 6.5,
        help = "Optimized real annual return in percent used for the acceleration comparison"
    )]
    pub optimized_return_rate: f64,
}

#[derive(Args, Debug, Clone)]
#[command(allow_negative_numbers = true)]
pub struct ScoreArgs {
    #[arg(long, help = "Current invested net worth")]
    pub assets: f64,
    #[arg(long, help = "Planned monthly contribution")]
    pub monthly_contribution: f64,
    #[arg(long, help = "Projected years to freedom; omit when unbounded")]
    pub years_to_freedom: Option<f64>,
}
