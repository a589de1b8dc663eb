//! Output formatting and persistence for dashboards.
//!
//! Supports pretty-printing, JSON serialization, and CSV export of every
//! chart series, optionally gzip-compressed.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::dashboard::Dashboard;
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Logs a dashboard using Rust's debug pretty-print format.
pub fn print_pretty(dashboard: &Dashboard) {
    debug!("{:#?}", dashboard);
}

/// Logs a dashboard as pretty-printed JSON.
pub fn print_json(dashboard: &Dashboard) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(dashboard)?);
    Ok(())
}

#[derive(Serialize)]
struct SeriesRow<'a> {
    canvas_id: &'a str,
    position: usize,
    label: &'a str,
    value: f64,
}

/// Renders every chart of `dashboard` as CSV rows
/// (`canvas_id,position,label,value`).
///
/// Scatter points are written with `x` as the label and `y` as the value.
pub fn dashboard_csv(dashboard: &Dashboard) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());

    for chart in &dashboard.charts {
        for (position, point) in chart.series.points.iter().enumerate() {
            writer.serialize(SeriesRow {
                canvas_id: &chart.canvas_id,
                position,
                label: &point.label,
                value: point.value,
            })?;
        }
        for (position, point) in chart.series.scatter.iter().enumerate() {
            writer.serialize(SeriesRow {
                canvas_id: &chart.canvas_id,
                position,
                label: &point.x.to_string(),
                value: point.y,
            })?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(bytes)
}

/// Writes the dashboard CSV to `path`, gzip-compressed when `gzip` is set.
pub fn write_csv(path: &Path, dashboard: &Dashboard, gzip: bool) -> Result<()> {
    let body = dashboard_csv(dashboard)?;
    debug!(path = %path.display(), gzip, bytes = body.len(), "Writing dashboard CSV");

    let mut file = File::create(path)?;
    if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&body)?;
        file.write_all(&encoder.finish()?)?;
    } else {
        file.write_all(&body)?;
    }
    file.flush()?;

    Ok(())
}

/// Serializes `dashboard` (summary plus every chart) as pretty JSON into `path`.
pub fn write_json(path: &Path, dashboard: &Dashboard) -> Result<()> {
    debug!(path = %path.display(), charts = dashboard.charts.len(), "Writing dashboard JSON");
    std::fs::write(path, serde_json::to_vec_pretty(dashboard)?)?;
    Ok(())
}
