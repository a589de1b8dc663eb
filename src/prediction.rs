//! Prediction request/response types and input checks.
//!
//! The accepted choices and ranges mirror what the prediction service
//! validates, so a bad request is rejected locally before any HTTP call.

use crate::analyzers::category::CostCategory;
use crate::analyzers::types::SummarySeries;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub const MAKES: &[&str] = &["Toyota", "Honda", "Ford", "Chevrolet", "BMW", "Tesla"];
pub const ENGINE_TYPES: &[&str] = &["gas", "diesel", "electric"];
pub const DRIVING_CONDITIONS: &[&str] = &["city", "highway", "mixed"];
pub const OIL_LEVELS: &[&str] = &["Low", "Medium", "High", "N/A"];

/// Reference costs shown next to an estimate.
pub const REFERENCE_COSTS: &[(&str, f64)] = &[("Routine", 300.0), ("Average", 700.0), ("Major", 1500.0)];

/// Vehicle attributes sent to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub make: String,
    pub model_year: i32,
    pub engine_type: String,
    pub mileage: f64,
    pub driving_condition: String,
    pub service_interval: i32,
    pub days_since_service: i32,
    pub oil_level: String,
    pub tire_pressure: f64,
    pub brake_wear: f64,
    pub fault_codes: i32,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            make: "Toyota".to_string(),
            model_year: 2020,
            engine_type: "gas".to_string(),
            mileage: 45_000.0,
            driving_condition: "city".to_string(),
            service_interval: 180,
            days_since_service: 60,
            oil_level: "Medium".to_string(),
            tire_pressure: 33.5,
            brake_wear: 35.0,
            fault_codes: 2,
        }
    }
}

fn choice(field: &'static str, value: &str, allowed: &'static [&'static str]) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::NotAChoice {
            field,
            value: value.to_string(),
            allowed,
        })
    }
}

fn range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl PredictionRequest {
    /// Checks every field; returns the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        choice("make", &self.make, MAKES)?;
        range("model_year", self.model_year.into(), 2010.0, 2024.0)?;
        choice("engine_type", &self.engine_type, ENGINE_TYPES)?;
        range("mileage", self.mileage, 0.0, f64::MAX)?;
        choice("driving_condition", &self.driving_condition, DRIVING_CONDITIONS)?;
        range("service_interval", self.service_interval.into(), 90.0, 365.0)?;
        range("days_since_service", self.days_since_service.into(), 0.0, f64::MAX)?;
        choice("oil_level", &self.oil_level, OIL_LEVELS)?;
        range("tire_pressure", self.tire_pressure, 25.0, 40.0)?;
        range("brake_wear", self.brake_wear, 0.0, 100.0)?;
        range("fault_codes", self.fault_codes.into(), 0.0, f64::MAX)?;
        Ok(())
    }

    /// Human-readable factors shown with the estimate.
    pub fn key_factors(&self) -> Vec<String> {
        vec![
            format!("{} Vehicle", self.make),
            format!("{} km Mileage", self.mileage),
            format!("{}% Brake Wear", self.brake_wear),
            format!("{} Fault Codes", self.fault_codes),
        ]
    }
}

/// Response of the prediction endpoint. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResponse {
    pub predicted_cost: f64,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl PredictionResponse {
    pub fn category(&self) -> CostCategory {
        CostCategory::from_cost(self.predicted_cost)
    }
}

/// Reference costs followed by the estimate, for the comparison chart.
pub fn comparison_series(predicted_cost: f64) -> SummarySeries {
    let mut series = SummarySeries::new("Maintenance Cost ($)");
    for (label, cost) in REFERENCE_COSTS {
        series.push(*label, *cost);
    }
    series.push("Your Estimate", predicted_cost);
    series
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_is_valid() {
        assert_eq!(PredictionRequest::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_unknown_make() {
        let req = PredictionRequest {
            make: "toyota".into(),
            ..Default::default()
        };
        assert!(matches!(
            req.validate(),
            Err(ValidationError::NotAChoice { field: "make", .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        let cases = [
            PredictionRequest { model_year: 2009, ..Default::default() },
            PredictionRequest { service_interval: 400, ..Default::default() },
            PredictionRequest { tire_pressure: 24.9, ..Default::default() },
            PredictionRequest { brake_wear: 100.5, ..Default::default() },
            PredictionRequest { fault_codes: -1, ..Default::default() },
            PredictionRequest { mileage: -1.0, ..Default::default() },
        ];
        for req in cases {
            assert!(matches!(req.validate(), Err(ValidationError::OutOfRange { .. })));
        }
    }

    #[test]
    fn test_accepts_range_edges() {
        let req = PredictionRequest {
            model_year: 2024,
            service_interval: 90,
            tire_pressure: 40.0,
            brake_wear: 0.0,
            oil_level: "N/A".into(),
            engine_type: "electric".into(),
            ..Default::default()
        };
        assert_eq!(req.validate(), Ok(()));
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let resp: PredictionResponse = serde_json::from_str(
            r#"{"id": 7, "make": "Ford", "predicted_cost": 812.5, "timestamp": "2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(resp.predicted_cost, 812.5);
        assert_eq!(resp.id, Some(7));
        assert_eq!(resp.category(), CostCategory::Moderate);
    }

    #[test]
    fn test_comparison_series() {
        let series = comparison_series(950.0);
        assert_eq!(series.labels(), vec!["Routine", "Average", "Major", "Your Estimate"]);
        assert_eq!(series.values(), vec![300.0, 700.0, 1500.0, 950.0]);
    }
}
