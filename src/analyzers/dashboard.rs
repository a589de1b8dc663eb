//! Composes the pipeline operations into the dashboard's chart set.

use crate::analyzers::aggregate::{group_average, group_by_derived_key, group_by_int_key, household_size};
use crate::analyzers::binning::{binned_average, histogram};
use crate::analyzers::ranking::{importance_series, top_k};
use crate::analyzers::types::{
    ChartKind, CostSummary, FeatureImportance, ScatterPoint, SummarySeries,
};
use crate::analyzers::utility::{capitalize, mean, stddev};
use crate::charts::{ChartRegistry, ChartSurface};
use crate::error::AggregateError;
use crate::observation::{CategoryField, NumericField, Observation};
use crate::prediction::{DRIVING_CONDITIONS, MAKES};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

pub const SEASONS: &[&str] = &["Winter", "Spring", "Summer", "Fall"];
pub const TIMES_OF_DAY: &[&str] = &["Morning", "Afternoon", "Evening", "Night"];

/// Tunables for chart construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSettings {
    /// Width of the cost-distribution bins, in dollars.
    pub cost_bin_width: f64,
    /// Width of the temperature bands for household datasets.
    pub temperature_bin_width: f64,
    /// How many features the importance chart shows.
    pub top_features: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            cost_bin_width: 200.0,
            temperature_bin_width: 5.0,
            top_features: 10,
        }
    }
}

/// One chart: the canvas it belongs to, its type, and its data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub canvas_id: String,
    pub kind: ChartKind,
    pub series: SummarySeries,
}

impl ChartSpec {
    fn new(canvas_id: &str, kind: ChartKind, series: SummarySeries) -> Self {
        Self {
            canvas_id: canvas_id.to_string(),
            kind,
            series,
        }
    }
}

/// Everything one dashboard load renders.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub summary: CostSummary,
    pub charts: Vec<ChartSpec>,
}

impl Dashboard {
    pub fn chart(&self, canvas_id: &str) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.canvas_id == canvas_id)
    }

    /// Hands every chart to `registry`, replacing whatever each canvas held.
    pub fn publish<S: ChartSurface>(&self, registry: &mut ChartRegistry<S>) -> anyhow::Result<()> {
        for chart in &self.charts {
            registry.replace(&chart.canvas_id, chart.kind, &chart.series)?;
        }
        info!(charts = self.charts.len(), "Dashboard published");
        Ok(())
    }
}

/// Count, mean, population standard deviation and range of `field`.
pub fn cost_summary(data: &[Observation], field: NumericField) -> CostSummary {
    let values: Vec<f64> = data.iter().filter_map(|o| o.number(field)).collect();
    if values.is_empty() {
        return CostSummary::default();
    }

    let avg = mean(&values);
    CostSummary {
        count: values.len(),
        mean: avg,
        stddev: stddev(&values, avg),
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Pairs `x` and `y` for every observation that has both.
pub fn scatter(data: &[Observation], x: NumericField, y: NumericField) -> Vec<ScatterPoint> {
    data.iter()
        .filter_map(|o| Some(ScatterPoint {
            x: o.number(x)?,
            y: o.number(y)?,
        }))
        .collect()
}

/// Builds the vehicle maintenance dashboard.
///
/// An empty `data` or `importances` (for example after a failed fetch)
/// still yields every chart, just with empty or zero-valued series.
pub fn vehicle_dashboard(
    data: &[Observation],
    importances: &[FeatureImportance],
    settings: &DashboardSettings,
) -> Result<Dashboard, AggregateError> {
    debug!(
        observations = data.len(),
        features = importances.len(),
        "Building vehicle dashboard"
    );
    let cost = NumericField::MaintenanceCost;

    let distribution = histogram(data, cost, settings.cost_bin_width, "$")?;
    let by_make = group_average(data, CategoryField::Make, cost, MAKES);
    let by_condition =
        group_average(data, CategoryField::DrivingCondition, cost, DRIVING_CONDITIONS)
            .map_labels(capitalize);
    let by_age = group_by_int_key(data, |o| o.int(NumericField::VehicleAge), cost);
    let ranked = top_k(importances, settings.top_features);

    Ok(Dashboard {
        generated_at: Utc::now(),
        summary: cost_summary(data, cost),
        charts: vec![
            ChartSpec::new("cost-distribution-chart", ChartKind::Bar, distribution),
            ChartSpec::new("make-chart", ChartKind::Bar, by_make),
            ChartSpec::new("condition-chart", ChartKind::Pie, by_condition),
            ChartSpec::new("age-chart", ChartKind::Line, by_age),
            ChartSpec::new(
                "mileage-chart",
                ChartKind::Scatter,
                SummarySeries::from_scatter(
                    "maintenance_cost by mileage",
                    scatter(data, NumericField::Mileage, cost),
                ),
            ),
            ChartSpec::new(
                "feature-importance-chart",
                ChartKind::HorizontalBar,
                importance_series(&ranked),
            ),
        ],
    })
}

/// Builds the household energy dashboard.
pub fn household_dashboard(
    data: &[Observation],
    settings: &DashboardSettings,
) -> Result<Dashboard, AggregateError> {
    debug!(observations = data.len(), "Building household dashboard");
    let energy = NumericField::EnergyConsumption;

    let by_temperature = binned_average(
        data,
        NumericField::Temperature,
        energy,
        settings.temperature_bin_width,
        "",
    )?;

    Ok(Dashboard {
        generated_at: Utc::now(),
        summary: cost_summary(data, energy),
        charts: vec![
            ChartSpec::new(
                "season-chart",
                ChartKind::Bar,
                group_average(data, CategoryField::Season, energy, SEASONS),
            ),
            ChartSpec::new(
                "time-of-day-chart",
                ChartKind::Bar,
                group_average(data, CategoryField::TimeOfDay, energy, TIMES_OF_DAY),
            ),
            ChartSpec::new(
                "household-size-chart",
                ChartKind::Line,
                group_by_derived_key(data, household_size, energy),
            ),
            ChartSpec::new("temperature-chart", ChartKind::Bar, by_temperature),
        ],
    })
}
