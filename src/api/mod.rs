mod cli;
mod error;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub use cli::{AuditArgs, Cli, CliScenario, Command, ScoreArgs};
pub use error::InputError;

use crate::core::{
    AccelerationResult, DEFAULT_ANNUAL_RETURN, FreedomInputs, FreedomMetrics, LeadScore,
    OPTIMIZED_ANNUAL_RETURN, ProgressStage, Scenario, ScenarioResult, ScoringInputs,
    TimelineStage, YearsToFreedom, calculate_freedom_metrics, run_acceleration, run_scenarios,
    score_lead,
};

/// Largest integer a double holds exactly; money above this is rejected.
const MAX_SAFE_MONEY: f64 = 9_007_199_254_740_991.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiScenario {
    #[serde(alias = "conservative", alias = "pessimista")]
    Pessimistic,
    #[serde(alias = "realista")]
    Realistic,
    #[serde(alias = "otimista")]
    Optimistic,
}

impl From<ApiScenario> for CliScenario {
    fn from(value: ApiScenario) -> Self {
        match value {
            ApiScenario::Pessimistic => CliScenario::Pessimistic,
            ApiScenario::Realistic => CliScenario::Realistic,
            ApiScenario::Optimistic => CliScenario::Optimistic,
        }
    }
}

/// Money arrives either as a JSON number or as raw form text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum MoneyValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AuditPayload {
    monthly_cost: Option<MoneyValue>,
    current_assets: Option<MoneyValue>,
    monthly_contribution: Option<MoneyValue>,
    annual_return_rate: Option<f64>,
    scenario: Option<ApiScenario>,
    optimized_return_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScorePayload {
    assets: Option<MoneyValue>,
    monthly_contribution: Option<MoneyValue>,
    years_to_freedom: YearsToFreedom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuditRequest {
    pub inputs: FreedomInputs,
    pub scenario: Option<Scenario>,
    pub optimized_return_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResponse {
    pub scenario: Option<Scenario>,
    pub annual_return_rate: f64,
    #[serde(flatten)]
    pub metrics: FreedomMetrics,
    pub years_label: String,
    pub progress_stage: ProgressStage,
    pub timeline_stage: TimelineStage,
    pub scenarios: Vec<ScenarioResult>,
    pub acceleration: AccelerationResult,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn default_audit_args() -> AuditArgs {
    AuditArgs {
        monthly_cost: 0.0,
        current_assets: 0.0,
        monthly_contribution: 5_000.0,
        annual_return_rate: DEFAULT_ANNUAL_RETURN * 100.0,
        scenario: None,
        optimized_return_rate: OPTIMIZED_ANNUAL_RETURN * 100.0,
    }
}

pub fn build_audit_request(args: AuditArgs) -> Result<AuditRequest, InputError> {
    let monthly_cost = sanitize_money("monthlyCost", args.monthly_cost)?;
    let current_assets = sanitize_money("currentAssets", args.current_assets)?;
    let monthly_contribution = sanitize_money("monthlyContribution", args.monthly_contribution)?;
    let optimized_return_rate = percent_to_rate("optimizedReturnRate", args.optimized_return_rate)?;

    let scenario = args.scenario.map(Scenario::from);
    let annual_return_rate = match scenario {
        Some(scenario) => scenario.annual_return_rate(),
        None => percent_to_rate("annualReturnRate", args.annual_return_rate)?,
    };

    Ok(AuditRequest {
        inputs: FreedomInputs::new(monthly_cost, current_assets, monthly_contribution)
            .with_annual_return_rate(annual_return_rate),
        scenario,
        optimized_return_rate,
    })
}

pub fn build_audit_response(request: &AuditRequest) -> AuditResponse {
    let metrics = calculate_freedom_metrics(&request.inputs);
    AuditResponse {
        scenario: request.scenario,
        annual_return_rate: request.inputs.annual_return_rate,
        years_label: metrics.years_to_freedom.display_label(),
        progress_stage: ProgressStage::from_percentage(metrics.percentage),
        timeline_stage: TimelineStage::classify(metrics.years_to_freedom, metrics.percentage),
        scenarios: run_scenarios(&request.inputs),
        acceleration: run_acceleration(&request.inputs, request.optimized_return_rate),
        metrics,
    }
}

pub fn build_scoring_inputs(args: ScoreArgs) -> Result<ScoringInputs, InputError> {
    Ok(ScoringInputs {
        assets: sanitize_money("assets", args.assets)?,
        monthly_contribution: sanitize_money("monthlyContribution", args.monthly_contribution)?,
        years_to_freedom: args
            .years_to_freedom
            .map_or(YearsToFreedom::Unbounded, YearsToFreedom::from),
    })
}

fn sanitize_money(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_nan() {
        return Ok(0.0);
    }
    if value < 0.0 {
        return Err(InputError::Negative { field });
    }
    if value > MAX_SAFE_MONEY {
        return Err(InputError::TooLarge { field });
    }
    Ok(value)
}

// Blank or unparseable text counts as zero.
fn parse_money(field: &'static str, value: &MoneyValue) -> Result<f64, InputError> {
    let raw = match value {
        MoneyValue::Number(n) => *n,
        MoneyValue::Text(text) => text.trim().parse::<f64>().unwrap_or(0.0),
    };
    sanitize_money(field, raw)
}

fn percent_to_rate(field: &'static str, percent: f64) -> Result<f64, InputError> {
    if !percent.is_finite() || percent <= -100.0 {
        return Err(InputError::InvalidRate {
            field,
            value: percent,
        });
    }
    Ok(percent / 100.0)
}

fn audit_request_from_payload(payload: AuditPayload) -> Result<AuditRequest, InputError> {
    let mut args = default_audit_args();

    if let Some(v) = payload.monthly_cost {
        args.monthly_cost = parse_money("monthlyCost", &v)?;
    }
    if let Some(v) = payload.current_assets {
        args.current_assets = parse_money("currentAssets", &v)?;
    }
    if let Some(v) = payload.monthly_contribution {
        args.monthly_contribution = parse_money("monthlyContribution", &v)?;
    }
    if let Some(v) = payload.annual_return_rate {
        args.annual_return_rate = v;
    }
    if let Some(v) = payload.scenario {
        args.scenario = Some(v.into());
    }
    if let Some(v) = payload.optimized_return_rate {
        args.optimized_return_rate = v;
    }

    build_audit_request(args)
}

fn scoring_inputs_from_payload(payload: ScorePayload) -> Result<ScoringInputs, InputError> {
    let assets = match payload.assets {
        Some(v) => parse_money("assets", &v)?,
        None => 0.0,
    };
    let monthly_contribution = match payload.monthly_contribution {
        Some(v) => parse_money("monthlyContribution", &v)?,
        None => 0.0,
    };
    Ok(ScoringInputs {
        assets,
        monthly_contribution,
        years_to_freedom: payload.years_to_freedom,
    })
}

#[cfg(test)]
fn audit_request_from_json(json: &str) -> Result<AuditRequest, String> {
    let payload = serde_json::from_str::<AuditPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    audit_request_from_payload(payload).map_err(|e| e.to_string())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/api/audit", get(audit_get_handler).post(audit_post_handler))
        .route("/api/score", post(score_post_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Freedom audit API listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/audit");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn audit_get_handler(Query(payload): Query<AuditPayload>) -> Response {
    audit_handler_impl(payload).await
}

async fn audit_post_handler(Json(payload): Json<AuditPayload>) -> Response {
    audit_handler_impl(payload).await
}

async fn audit_handler_impl(payload: AuditPayload) -> Response {
    tracing::debug!(?payload, "audit request");
    let request = match audit_request_from_payload(payload) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "rejected audit request");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    json_response(StatusCode::OK, build_audit_response(&request))
}

async fn score_post_handler(Json(payload): Json<ScorePayload>) -> Response {
    tracing::debug!(?payload, "score request");
    let inputs = match scoring_inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(e) => {
            tracing::warn!(error = %e, "rejected score request");
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
    };

    let score: LeadScore = score_lead(&inputs);
    tracing::debug!(score = score.score, category = score.category.label(), "scored lead");
    json_response(StatusCode::OK, score)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LeadCategory, LeadPriority};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_args() -> AuditArgs {
        AuditArgs {
            monthly_cost: 20_000.0,
            current_assets: 800_000.0,
            ..default_audit_args()
        }
    }

    #[test]
    fn build_audit_request_converts_percent_rates() {
        let request = build_audit_request(sample_args()).expect("valid inputs");
        assert_approx(request.inputs.annual_return_rate, 0.05);
        assert_approx(request.optimized_return_rate, 0.065);
        assert_approx(request.inputs.monthly_contribution, 5_000.0);
        assert_eq!(request.scenario, None);
    }

    #[test]
    fn build_audit_request_scenario_overrides_rate() {
        let mut args = sample_args();
        args.annual_return_rate = 12.0;
        args.scenario = Some(CliScenario::Optimistic);
        let request = build_audit_request(args).expect("valid inputs");
        assert_approx(request.inputs.annual_return_rate, 0.08);
        assert_eq!(request.scenario, Some(Scenario::Optimistic));
    }

    #[test]
    fn build_audit_request_rejects_negative_money() {
        let mut args = sample_args();
        args.current_assets = -1.0;
        let err = build_audit_request(args).expect_err("must reject negative assets");
        assert_eq!(
            err,
            InputError::Negative {
                field: "currentAssets"
            }
        );
        assert!(err.to_string().contains("currentAssets"));
    }

    #[test]
    fn build_audit_request_rejects_unsafe_magnitudes() {
        let mut args = sample_args();
        args.monthly_cost = f64::INFINITY;
        let err = build_audit_request(args).expect_err("must reject infinite cost");
        assert_eq!(err, InputError::TooLarge { field: "monthlyCost" });
    }

    #[test]
    fn build_audit_request_rejects_invalid_rate() {
        let mut args = sample_args();
        args.annual_return_rate = -100.0;
        let err = build_audit_request(args).expect_err("must reject -100% rate");
        assert!(err.to_string().contains("annualReturnRate"));

        let mut args = sample_args();
        args.optimized_return_rate = f64::NAN;
        let err = build_audit_request(args).expect_err("must reject NaN rate");
        assert!(err.to_string().contains("optimizedReturnRate"));
    }

    #[test]
    fn parse_money_treats_blank_and_garbage_text_as_zero() {
        assert_approx(
            parse_money("monthlyCost", &MoneyValue::Text(String::new())).expect("blank"),
            0.0,
        );
        assert_approx(
            parse_money("monthlyCost", &MoneyValue::Text("abc".to_string())).expect("garbage"),
            0.0,
        );
        assert_approx(
            parse_money("monthlyCost", &MoneyValue::Text(" 20000 ".to_string())).expect("text"),
            20_000.0,
        );
        assert_approx(
            parse_money("monthlyCost", &MoneyValue::Number(f64::NAN)).expect("nan"),
            0.0,
        );
    }

    #[test]
    fn parse_money_rejects_negative_text() {
        let err = parse_money("assets", &MoneyValue::Text("-5".to_string()))
            .expect_err("negative text");
        assert_eq!(err, InputError::Negative { field: "assets" });
    }

    #[test]
    fn audit_request_from_json_parses_web_keys() {
        let json = r#"{
          "monthlyCost": "20000",
          "currentAssets": 800000,
          "monthlyContribution": 7500,
          "annualReturnRate": 4,
          "optimizedReturnRate": 7
        }"#;
        let request = audit_request_from_json(json).expect("json should parse");
        assert_approx(request.inputs.monthly_cost, 20_000.0);
        assert_approx(request.inputs.current_assets, 800_000.0);
        assert_approx(request.inputs.monthly_contribution, 7_500.0);
        assert_approx(request.inputs.annual_return_rate, 0.04);
        assert_approx(request.optimized_return_rate, 0.07);
    }

    #[test]
    fn audit_request_from_json_accepts_scenario_aliases() {
        let request =
            audit_request_from_json(r#"{"scenario": "otimista"}"#).expect("json should parse");
        assert_eq!(request.scenario, Some(Scenario::Optimistic));
        assert_approx(request.inputs.annual_return_rate, 0.08);

        let request = audit_request_from_json(r#"{"scenario": "conservative"}"#)
            .expect("json should parse");
        assert_eq!(request.scenario, Some(Scenario::Pessimistic));
    }

    #[test]
    fn audit_request_from_json_uses_defaults_for_missing_fields() {
        let request = audit_request_from_json("{}").expect("json should parse");
        assert_approx(request.inputs.monthly_cost, 0.0);
        assert_approx(request.inputs.monthly_contribution, 5_000.0);
        assert_approx(request.inputs.annual_return_rate, 0.05);
    }

    #[test]
    fn audit_request_from_json_reports_negative_field() {
        let err = audit_request_from_json(r#"{"monthlyCost": -10}"#).expect_err("negative");
        assert!(err.contains("monthlyCost"));
    }

    #[test]
    fn audit_response_serialization_contains_expected_fields() {
        let request = build_audit_request(AuditArgs {
            monthly_cost: 10_000.0,
            current_assets: 1_500_000.0,
            ..default_audit_args()
        })
        .expect("valid inputs");
        let response = build_audit_response(&request);
        assert_approx(response.metrics.percentage, 50.0);
        assert_eq!(response.progress_stage, ProgressStage::Halfway);
        assert_eq!(response.timeline_stage, TimelineStage::Steady);
        assert_eq!(response.scenarios.len(), 3);

        let json = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(json["freedomNumber"], 3_000_000.0);
        assert_eq!(json["percentage"], 50.0);
        assert!(json["yearsToFreedom"].is_number());
        assert_eq!(json["monthlyInvestment"], 5_000.0);
        assert_eq!(json["yearsLabel"], "8.9");
        assert_eq!(json["progressStage"], "halfway");
        assert_eq!(json["timelineStage"], "steady");
        assert_eq!(json["scenarios"][0]["scenario"], "pessimistic");
        assert!(json["acceleration"]["yearsReduced"].is_number());
    }

    #[test]
    fn audit_response_serializes_unbounded_years_as_null() {
        let request = build_audit_request(AuditArgs {
            monthly_cost: 10_000.0,
            monthly_contribution: 0.0,
            ..default_audit_args()
        })
        .expect("valid inputs");
        let response = build_audit_response(&request);
        let json = serde_json::to_value(&response).expect("response should serialize");
        assert!(json["yearsToFreedom"].is_null());
        assert_eq!(json["yearsLabel"], "—");
        assert_eq!(json["timelineStage"], "undefined");
        assert!(json["acceleration"]["yearsReduced"].is_null());
    }

    #[test]
    fn scoring_inputs_from_payload_reads_null_years_as_unbounded() {
        let payload: ScorePayload = serde_json::from_str(
            r#"{"assets": "1000000", "monthlyContribution": 10000, "yearsToFreedom": null}"#,
        )
        .expect("json should parse");
        let inputs = scoring_inputs_from_payload(payload).expect("valid inputs");
        assert_eq!(inputs.years_to_freedom, YearsToFreedom::Unbounded);

        let score = score_lead(&inputs);
        assert_eq!(score.score, 80);
        assert_eq!(score.category, LeadCategory::WealthVip);
        assert_eq!(score.priority, LeadPriority::Immediate);
    }

    #[test]
    fn scoring_inputs_from_payload_reads_finite_years() {
        let payload: ScorePayload =
            serde_json::from_str(r#"{"assets": 60000, "monthlyContribution": 2500, "yearsToFreedom": 6.5}"#)
                .expect("json should parse");
        let inputs = scoring_inputs_from_payload(payload).expect("valid inputs");
        assert_eq!(inputs.years_to_freedom, YearsToFreedom::Finite(6.5));
        assert_eq!(score_lead(&inputs).score, 45);
    }

    #[test]
    fn scoring_inputs_from_payload_clamps_negative_years_to_zero() {
        let payload: ScorePayload =
            serde_json::from_str(r#"{"assets": 0, "monthlyContribution": 0, "yearsToFreedom": -3}"#)
                .expect("json should parse");
        let inputs = scoring_inputs_from_payload(payload).expect("valid inputs");
        assert_eq!(inputs.years_to_freedom, YearsToFreedom::Finite(0.0));
        // 5 + 5 + 25
        assert_eq!(score_lead(&inputs).score, 35);
    }

    #[test]
    fn build_scoring_inputs_maps_missing_years_to_unbounded() {
        let inputs = build_scoring_inputs(ScoreArgs {
            assets: 10.0,
            monthly_contribution: 10.0,
            years_to_freedom: None,
        })
        .expect("valid inputs");
        assert_eq!(inputs.years_to_freedom, YearsToFreedom::Unbounded);
    }

    #[test]
    fn error_response_is_json_and_not_cached() {
        let response = error_response(StatusCode::BAD_REQUEST, "bad");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).expect("header"),
            "no-store"
        );
    }
}
