use serde::Serialize;
use std::fmt;

/// Urgency bucket for a predicted maintenance cost.
///
/// | Cost          | Category                    |
/// |---------------|-----------------------------|
/// | > 1000        | High Priority Maintenance   |
/// | > 500         | Moderate Maintenance Needed |
/// | <= 500        | Routine Maintenance         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CostCategory {
    HighPriority,
    Moderate,
    Routine,
}

impl CostCategory {
    pub fn from_cost(cost: f64) -> Self {
        match cost {
            c if c > 1000.0 => CostCategory::HighPriority,
            c if c > 500.0 => CostCategory::Moderate,
            _ => CostCategory::Routine,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CostCategory::HighPriority => "High Priority Maintenance",
            CostCategory::Moderate => "Moderate Maintenance Needed",
            CostCategory::Routine => "Routine Maintenance",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
