use super::types::{
    AccelerationResult, FREEDOM_MULTIPLIER, FreedomInputs, FreedomMetrics, Scenario,
    ScenarioResult, YearsToFreedom,
};

#[derive(Debug, Clone, Copy)]
struct ClampedInputs {
    monthly_cost: f64,
    current_assets: f64,
    monthly_contribution: f64,
}

impl ClampedInputs {
    // f64::max drops NaN, so NaN inputs land on zero as well.
    fn from_inputs(inputs: &FreedomInputs) -> Self {
        Self {
            monthly_cost: inputs.monthly_cost.max(0.0),
            current_assets: inputs.current_assets.max(0.0),
            monthly_contribution: inputs.monthly_contribution.max(0.0),
        }
    }
}

pub fn calculate_freedom_metrics(inputs: &FreedomInputs) -> FreedomMetrics {
    let clamped = ClampedInputs::from_inputs(inputs);

    let freedom_number = if clamped.monthly_cost > 0.0 {
        clamped.monthly_cost * FREEDOM_MULTIPLIER
    } else {
        0.0
    };
    let percentage = progress_percentage(clamped.current_assets, freedom_number);
    let years_to_freedom = project_years_to_freedom(
        freedom_number,
        clamped.current_assets,
        clamped.monthly_contribution,
        inputs.annual_return_rate,
    );

    FreedomMetrics {
        freedom_number,
        percentage,
        years_to_freedom,
        monthly_investment: clamped.monthly_contribution,
    }
}

/// Evaluates the inputs under every fixed return scenario, ignoring the
/// rate carried by `inputs`.
pub fn run_scenarios(inputs: &FreedomInputs) -> Vec<ScenarioResult> {
    Scenario::ALL
        .iter()
        .map(|&scenario| {
            let annual_return_rate = scenario.annual_return_rate();
            ScenarioResult {
                scenario,
                annual_return_rate,
                metrics: calculate_freedom_metrics(
                    &inputs.with_annual_return_rate(annual_return_rate),
                ),
            }
        })
        .collect()
}

pub fn run_acceleration(inputs: &FreedomInputs, optimized_return_rate: f64) -> AccelerationResult {
    let current_years = calculate_freedom_metrics(inputs).years_to_freedom;
    let accelerated_years =
        calculate_freedom_metrics(&inputs.with_annual_return_rate(optimized_return_rate))
            .years_to_freedom;

    let (years_reduced, reduction_percentage) = match (current_years, accelerated_years) {
        (YearsToFreedom::Finite(current), YearsToFreedom::Finite(accelerated)) => {
            let reduced = (current - accelerated).max(0.0);
            let pct = if current > 0.0 {
                reduced / current * 100.0
            } else {
                0.0
            };
            (Some(reduced), Some(pct))
        }
        _ => (None, None),
    };

    AccelerationResult {
        annual_return_rate: inputs.annual_return_rate,
        optimized_return_rate,
        current_years,
        accelerated_years,
        years_reduced,
        reduction_percentage,
    }
}

fn progress_percentage(current_assets: f64, freedom_number: f64) -> f64 {
    if freedom_number > 0.0 {
        (current_assets / freedom_number * 100.0).min(100.0)
    } else {
        0.0
    }
}

fn project_years_to_freedom(
    freedom_number: f64,
    current_assets: f64,
    monthly_contribution: f64,
    annual_return_rate: f64,
) -> YearsToFreedom {
    if freedom_number <= 0.0 {
        return YearsToFreedom::Unbounded;
    }
    if current_assets >= freedom_number {
        return YearsToFreedom::Finite(0.0);
    }
    if monthly_contribution <= 0.0 {
        return YearsToFreedom::Unbounded;
    }

    match months_to_target(
        freedom_number,
        current_assets,
        monthly_contribution,
        annual_return_rate / 12.0,
    ) {
        Some(months) => YearsToFreedom::Finite((months / 12.0).max(0.0)),
        None => YearsToFreedom::Unbounded,
    }
}

/// Number of monthly periods for `pv` growing at `rate` with deposits of
/// `pmt` to reach `fv`:
///
/// n = ln((fv*r + pmt) / (pv*r + pmt)) / ln(1 + r)
///
/// Returns `None` wherever a log argument is non-positive, a logarithm is
/// NaN, `rate == 0`, or the period count is not finite. When both flows are
/// negative the ratio is still defined and the count may come out negative.
fn months_to_target(fv: f64, pv: f64, pmt: f64, rate: f64) -> Option<f64> {
    let ratio = (fv * rate + pmt) / (pv * rate + pmt);
    let growth = 1.0 + rate;
    if ratio <= 0.0 || growth <= 0.0 {
        return None;
    }

    let numerator = ratio.ln();
    let denominator = growth.ln();
    if numerator.is_nan() || denominator.is_nan() || denominator == 0.0 {
        return None;
    }

    let months = numerator / denominator;
    months.is_finite().then_some(months)
}
