use super::types::{LeadCategory, LeadPriority, LeadScore, ScoringInputs, YearsToFreedom};

pub fn score_lead(inputs: &ScoringInputs) -> LeadScore {
    let score = assets_points(inputs.assets)
        + contribution_points(inputs.monthly_contribution)
        + urgency_points(inputs.years_to_freedom);
    let (category, priority) = classify_score(score);
    LeadScore {
        score,
        category,
        priority,
    }
}

fn assets_points(assets: f64) -> u8 {
    if assets >= 1_000_000.0 {
        40
    } else if assets >= 300_000.0 {
        30
    } else if assets >= 50_000.0 {
        10
    } else {
        5
    }
}

fn contribution_points(monthly_contribution: f64) -> u8 {
    if monthly_contribution >= 10_000.0 {
        35
    } else if monthly_contribution >= 5_000.0 {
        25
    } else if monthly_contribution >= 2_000.0 {
        15
    } else {
        5
    }
}

// Closer horizons are more urgent; an unbounded horizon scores lowest.
fn urgency_points(years_to_freedom: YearsToFreedom) -> u8 {
    let YearsToFreedom::Finite(years) = years_to_freedom else {
        return 5;
    };
    if years <= 2.0 {
        25
    } else if years <= 7.0 {
        20
    } else if years <= 15.0 {
        10
    } else {
        5
    }
}

fn classify_score(score: u8) -> (LeadCategory, LeadPriority) {
    match score {
        80.. => (LeadCategory::WealthVip, LeadPriority::Immediate),
        60..=79 => (LeadCategory::PotentialPrivate, LeadPriority::High),
        40..=59 => (LeadCategory::UnderConstruction, LeadPriority::Medium),
        _ => (LeadCategory::Beginner, LeadPriority::Low),
    }
}
