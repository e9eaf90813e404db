use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Target multiple applied to monthly lifestyle cost.
pub const FREEDOM_MULTIPLIER: f64 = 300.0;
pub const DEFAULT_ANNUAL_RETURN: f64 = 0.05;
pub const OPTIMIZED_ANNUAL_RETURN: f64 = 0.065;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreedomInputs {
    pub monthly_cost: f64,
    pub current_assets: f64,
    pub monthly_contribution: f64,
    /// Real (inflation-adjusted) annual return as a decimal fraction.
    pub annual_return_rate: f64,
}

impl FreedomInputs {
    pub fn new(monthly_cost: f64, current_assets: f64, monthly_contribution: f64) -> Self {
        Self {
            monthly_cost,
            current_assets,
            monthly_contribution,
            annual_return_rate: DEFAULT_ANNUAL_RETURN,
        }
    }

    pub fn with_annual_return_rate(self, annual_return_rate: f64) -> Self {
        Self {
            annual_return_rate,
            ..self
        }
    }
}

impl Default for FreedomInputs {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// Projected time until the freedom number is reached.
///
/// `Unbounded` covers both "no target can be defined" and "the target is
/// never reached at the current pace".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum YearsToFreedom {
    Finite(f64),
    #[default]
    Unbounded,
}

impl YearsToFreedom {
    pub fn is_finite(self) -> bool {
        matches!(self, YearsToFreedom::Finite(_))
    }

    pub fn years(self) -> Option<f64> {
        match self {
            YearsToFreedom::Finite(years) => Some(years),
            YearsToFreedom::Unbounded => None,
        }
    }

    /// Short label for display: "—" when unbounded, "50+" past fifty years.
    pub fn display_label(self) -> String {
        match self {
            YearsToFreedom::Unbounded => "—".to_string(),
            YearsToFreedom::Finite(years) if years <= 0.0 => "0".to_string(),
            YearsToFreedom::Finite(years) if years > 50.0 => "50+".to_string(),
            YearsToFreedom::Finite(years) => format!("{years:.1}"),
        }
    }
}

/// Non-finite values map to `Unbounded`; negative years clamp to `Finite(0.0)`.
impl From<f64> for YearsToFreedom {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            YearsToFreedom::Finite(value.max(0.0))
        } else {
            YearsToFreedom::Unbounded
        }
    }
}

impl Serialize for YearsToFreedom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            YearsToFreedom::Finite(years) => serializer.serialize_some(years),
            YearsToFreedom::Unbounded => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for YearsToFreedom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(value.map_or(YearsToFreedom::Unbounded, YearsToFreedom::from))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreedomMetrics {
    pub freedom_number: f64,
    pub percentage: f64,
    pub years_to_freedom: YearsToFreedom,
    pub monthly_investment: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Pessimistic,
    Realistic,
    Optimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Pessimistic,
        Scenario::Realistic,
        Scenario::Optimistic,
    ];

    pub fn annual_return_rate(self) -> f64 {
        match self {
            Scenario::Pessimistic => 0.03,
            Scenario::Realistic => DEFAULT_ANNUAL_RETURN,
            Scenario::Optimistic => 0.08,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub annual_return_rate: f64,
    pub metrics: FreedomMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccelerationResult {
    pub annual_return_rate: f64,
    pub optimized_return_rate: f64,
    pub current_years: YearsToFreedom,
    pub accelerated_years: YearsToFreedom,
    pub years_reduced: Option<f64>,
    pub reduction_percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringInputs {
    pub assets: f64,
    pub monthly_contribution: f64,
    pub years_to_freedom: YearsToFreedom,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum LeadCategory {
    #[serde(rename = "Beginner")]
    Beginner,
    #[serde(rename = "Under Construction")]
    UnderConstruction,
    #[serde(rename = "Potential Private")]
    PotentialPrivate,
    #[serde(rename = "Wealth/VIP")]
    WealthVip,
}

impl LeadCategory {
    pub fn label(self) -> &'static str {
        match self {
            LeadCategory::Beginner => "Beginner",
            LeadCategory::UnderConstruction => "Under Construction",
            LeadCategory::PotentialPrivate => "Potential Private",
            LeadCategory::WealthVip => "Wealth/VIP",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
pub enum LeadPriority {
    Low,
    Medium,
    High,
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeadScore {
    pub score: u8,
    pub category: LeadCategory,
    pub priority: LeadPriority,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressStage {
    Starting,
    InMotion,
    BuildingMomentum,
    Halfway,
    FullAutonomy,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineStage {
    Achieved,
    Undefined,
    Near,
    Steady,
    Long,
}
