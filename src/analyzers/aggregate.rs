//! Grouping and averaging over observation datasets.
//!
//! Every function here is pure: it reads the dataset, builds transient
//! [`Accumulator`]s, and returns a fresh [`SummarySeries`].

use crate::analyzers::types::{Accumulator, SummarySeries};
use crate::observation::{CategoryField, NumericField, Observation};
use std::collections::BTreeMap;

/// Averages `value` per expected category label.
///
/// The output has exactly one point per entry of `labels`, in that order.
/// Matching is exact and case-sensitive. Labels with no matching
/// observation average to 0, and observations whose category is not in
/// `labels` are ignored. A missing or non-numeric `value` counts as 0.
pub fn group_average<S: AsRef<str>>(
    data: &[Observation],
    category: CategoryField,
    value: NumericField,
    labels: &[S],
) -> SummarySeries {
    let mut groups = vec![Accumulator::default(); labels.len()];

    for obs in data {
        let Some(key) = obs.category(category) else {
            continue;
        };
        if let Some(idx) = labels.iter().position(|l| l.as_ref() == key) {
            groups[idx].add(obs.number_or_zero(value));
        }
    }

    let mut series = SummarySeries::new(format!("Average {} by {}", value.key(), category.key()));
    for (label, acc) in labels.iter().zip(&groups) {
        series.push(label.as_ref(), acc.average());
    }
    series
}

/// Distinct values of `category` in first-seen order.
pub fn distinct_labels(data: &[Observation], category: CategoryField) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for obs in data {
        if let Some(key) = obs.category(category) {
            if !labels.iter().any(|l| l == key) {
                labels.push(key.to_string());
            }
        }
    }
    labels
}

/// Averages `value` per integer key, ascending by key.
///
/// Every observation contributes; see [`group_by_derived_key`] for the
/// validating variant.
pub fn group_by_int_key(
    data: &[Observation],
    key_fn: impl Fn(&Observation) -> i64,
    value: NumericField,
) -> SummarySeries {
    grouped_by_key(data, key_fn, value, |_| true)
}

/// Averages `value` per derived integer key, ascending by key.
///
/// Observations whose key is `<= 0` are treated as invalid composite data
/// and skipped entirely.
pub fn group_by_derived_key(
    data: &[Observation],
    key_fn: impl Fn(&Observation) -> i64,
    value: NumericField,
) -> SummarySeries {
    grouped_by_key(data, key_fn, value, |key| key > 0)
}

fn grouped_by_key(
    data: &[Observation],
    key_fn: impl Fn(&Observation) -> i64,
    value: NumericField,
    keep: impl Fn(i64) -> bool,
) -> SummarySeries {
    let mut groups: BTreeMap<i64, Accumulator> = BTreeMap::new();

    for obs in data {
        let key = key_fn(obs);
        if !keep(key) {
            continue;
        }
        groups.entry(key).or_default().add(obs.number_or_zero(value));
    }

    let mut series = SummarySeries::new(format!("Average {} by key", value.key()));
    for (key, acc) in groups {
        series.push(key.to_string(), acc.average());
    }
    series
}

/// Household size: `num_people + num_children`, each coerced to an integer.
/// The sum saturates at the `i64` bounds.
pub fn household_size(obs: &Observation) -> i64 {
    obs.int(NumericField::NumPeople)
        .saturating_add(obs.int(NumericField::NumChildren))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obs(v: serde_json::Value) -> Observation {
        Observation::from(v)
    }

    #[test]
    fn test_group_average_follows_label_order() {
        let data = vec![
            obs(json!({"make": "Toyota", "maintenance_cost": 500})),
            obs(json!({"make": "Toyota", "maintenance_cost": 700})),
            obs(json!({"make": "Ford", "maintenance_cost": 300})),
        ];
        let series = group_average(
            &data,
            CategoryField::Make,
            NumericField::MaintenanceCost,
            &["Toyota", "Ford", "Honda"],
        );

        assert_eq!(series.labels(), vec!["Toyota", "Ford", "Honda"]);
        assert_eq!(series.values(), vec![600.0, 300.0, 0.0]);
    }

    #[test]
    fn test_group_average_is_case_sensitive_and_ignores_unknown() {
        let data = vec![
            obs(json!({"driving_condition": "City", "maintenance_cost": 900})),
            obs(json!({"driving_condition": "offroad", "maintenance_cost": 900})),
            obs(json!({"driving_condition": "city", "maintenance_cost": 100})),
        ];
        let series = group_average(
            &data,
            CategoryField::DrivingCondition,
            NumericField::MaintenanceCost,
            &["city", "highway"],
        );

        assert_eq!(series.values(), vec![100.0, 0.0]);
    }

    #[test]
    fn test_group_average_empty_labels() {
        let data = vec![obs(json!({"make": "BMW", "maintenance_cost": 1}))];
        let labels: [&str; 0] = [];
        let series = group_average(&data, CategoryField::Make, NumericField::MaintenanceCost, &labels);
        assert!(series.is_empty());
    }

    #[test]
    fn test_distinct_labels_first_seen_order() {
        let data = vec![
            obs(json!({"make": "Tesla"})),
            obs(json!({"make": "BMW"})),
            obs(json!({"make": "Tesla"})),
            obs(json!({"mileage": 3})),
        ];
        assert_eq!(distinct_labels(&data, CategoryField::Make), vec!["Tesla", "BMW"]);
    }

    #[test]
    fn test_derived_key_discards_non_positive_and_sorts_numerically() {
        let data = vec![
            obs(json!({"num_people": 10, "num_children": 0, "energy_consumption": 50})),
            obs(json!({"num_people": "2", "num_children": "abc", "energy_consumption": 20})),
            obs(json!({"num_people": 0, "num_children": 0, "energy_consumption": 999})),
            obs(json!({"num_people": -3, "num_children": 1, "energy_consumption": 999})),
            obs(json!({"num_people": 1, "num_children": 1, "energy_consumption": 30})),
            obs(json!({"energy_consumption": 999})),
        ];
        let series = group_by_derived_key(&data, household_size, NumericField::EnergyConsumption);

        assert_eq!(series.labels(), vec!["2", "10"]);
        assert_eq!(series.values(), vec![25.0, 50.0]);
    }

    #[test]
    fn test_household_size_coerces_non_numeric() {
        let o = obs(json!({"num_people": "2", "num_children": "abc"}));
        assert_eq!(household_size(&o), 2);
    }

    #[test]
    fn test_household_size_saturates_on_huge_counts() {
        let data = vec![
            obs(json!({"num_people": 1e19, "num_children": 1, "energy_consumption": 40})),
            obs(json!({"num_people": -1e19, "num_children": -1, "energy_consumption": 999})),
        ];
        assert_eq!(household_size(&data[0]), i64::MAX);
        assert_eq!(household_size(&data[1]), i64::MIN);

        let series = group_by_derived_key(&data, household_size, NumericField::EnergyConsumption);
        assert_eq!(series.labels(), vec![i64::MAX.to_string()]);
        assert_eq!(series.values(), vec![40.0]);
    }

    #[test]
    fn test_int_key_keeps_zero() {
        let data = vec![
            obs(json!({"vehicle_age": 3, "maintenance_cost": 400})),
            obs(json!({"vehicle_age": 0, "maintenance_cost": 100})),
            obs(json!({"vehicle_age": 3, "maintenance_cost": 600})),
        ];
        let series = group_by_int_key(
            &data,
            |o| o.int(NumericField::VehicleAge),
            NumericField::MaintenanceCost,
        );

        assert_eq!(series.labels(), vec!["0", "3"]);
        assert_eq!(series.values(), vec![100.0, 500.0]);
    }
}
