mod engine;
mod milestones;
mod scoring;
mod types;

pub use engine::{calculate_freedom_metrics, run_acceleration, run_scenarios};
pub use scoring::score_lead;
pub use types::{
    AccelerationResult, DEFAULT_ANNUAL_RETURN, FREEDOM_MULTIPLIER, FreedomInputs, FreedomMetrics,
    LeadCategory, LeadPriority, LeadScore, OPTIMIZED_ANNUAL_RETURN, ProgressStage, Scenario,
    ScenarioResult, ScoringInputs, TimelineStage, YearsToFreedom,
};
