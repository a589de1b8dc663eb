//! Observation records and typed field selectors.
//!
//! Records arrive from the sample-data endpoint as flat JSON objects. The
//! pipeline never indexes them by raw string; every read goes through a
//! [`CategoryField`] or [`NumericField`] selector.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Categorical (string-valued) fields of a vehicle or household sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryField {
    Make,
    EngineType,
    DrivingCondition,
    OilLevel,
    Season,
    TimeOfDay,
}

impl CategoryField {
    pub fn key(self) -> &'static str {
        match self {
            CategoryField::Make => "make",
            CategoryField::EngineType => "engine_type",
            CategoryField::DrivingCondition => "driving_condition",
            CategoryField::OilLevel => "oil_level",
            CategoryField::Season => "season",
            CategoryField::TimeOfDay => "time_of_day",
        }
    }
}

/// Numeric fields of a vehicle or household sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    MaintenanceCost,
    Mileage,
    VehicleAge,
    ModelYear,
    BrakeWear,
    TirePressure,
    FaultCodes,
    EnergyConsumption,
    Temperature,
    NumPeople,
    NumChildren,
}

impl NumericField {
    pub fn key(self) -> &'static str {
        match self {
            NumericField::MaintenanceCost => "maintenance_cost",
            NumericField::Mileage => "mileage",
            NumericField::VehicleAge => "vehicle_age",
            NumericField::ModelYear => "model_year",
            NumericField::BrakeWear => "brake_wear",
            NumericField::TirePressure => "tire_pressure",
            NumericField::FaultCodes => "fault_codes",
            NumericField::EnergyConsumption => "energy_consumption",
            NumericField::Temperature => "temperature",
            NumericField::NumPeople => "num_people",
            NumericField::NumChildren => "num_children",
        }
    }
}

/// One sample row. Immutable once deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Observation(Map<String, Value>);

impl Observation {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Returns the string value of `field`, if present and a string.
    pub fn category(&self, field: CategoryField) -> Option<&str> {
        self.0.get(field.key()).and_then(Value::as_str)
    }

    /// Returns `field` as a finite number.
    ///
    /// JSON numbers and numeric strings (`"42.5"`) are accepted. Anything
    /// else, including a missing field, is `None`.
    pub fn number(&self, field: NumericField) -> Option<f64> {
        let value = match self.0.get(field.key())? {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Returns `field` as a number, coercing missing or non-numeric values to 0.
    pub fn number_or_zero(&self, field: NumericField) -> f64 {
        self.number(field).unwrap_or(0.0)
    }

    /// Returns `field` truncated to an integer, coercing missing or
    /// non-numeric values to 0.
    pub fn int(&self, field: NumericField) -> i64 {
        self.number(field).map(|v| v.trunc() as i64).unwrap_or(0)
    }
}

impl From<Value> for Observation {
    /// Non-object values become an empty observation.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_reads_string_field() {
        let obs = Observation::from(json!({"make": "Toyota", "mileage": 1000}));
        assert_eq!(obs.category(CategoryField::Make), Some("Toyota"));
        assert_eq!(obs.category(CategoryField::DrivingCondition), None);
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        let obs = Observation::from(json!({"num_people": "2", "mileage": 1500.5}));
        assert_eq!(obs.number(NumericField::NumPeople), Some(2.0));
        assert_eq!(obs.number(NumericField::Mileage), Some(1500.5));
    }

    #[test]
    fn test_int_coerces_garbage_to_zero() {
        let obs = Observation::from(json!({"num_people": "2", "num_children": "abc"}));
        assert_eq!(obs.int(NumericField::NumPeople), 2);
        assert_eq!(obs.int(NumericField::NumChildren), 0);
        assert_eq!(obs.int(NumericField::Temperature), 0);
    }

    #[test]
    fn test_non_object_becomes_empty() {
        let obs = Observation::from(json!([1, 2, 3]));
        assert_eq!(obs, Observation::default());
    }
}
