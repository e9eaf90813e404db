use super::types::{ProgressStage, TimelineStage, YearsToFreedom};

impl ProgressStage {
    pub fn from_percentage(percentage: f64) -> Self {
        let pct = percentage.clamp(0.0, 100.0);
        if pct >= 100.0 {
            ProgressStage::FullAutonomy
        } else if pct >= 50.0 {
            ProgressStage::Halfway
        } else if pct >= 25.0 {
            ProgressStage::BuildingMomentum
        } else if pct >= 5.0 {
            ProgressStage::InMotion
        } else {
            ProgressStage::Starting
        }
    }
}

impl TimelineStage {
    /// Full progress wins over the projection, so a funded target is
    /// `Achieved` whatever the years say.
    pub fn classify(years_to_freedom: YearsToFreedom, percentage: f64) -> Self {
        if percentage >= 100.0 {
            return TimelineStage::Achieved;
        }
        match years_to_freedom {
            YearsToFreedom::Unbounded => TimelineStage::Undefined,
            YearsToFreedom::Finite(years) if years <= 0.0 => TimelineStage::Achieved,
            YearsToFreedom::Finite(years) if years <= 5.0 => TimelineStage::Near,
            YearsToFreedom::Finite(years) if years <= 15.0 => TimelineStage::Steady,
            YearsToFreedom::Finite(_) => TimelineStage::Long,
        }
    }
}
