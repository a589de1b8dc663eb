//! Owned chart resources keyed by canvas id.
//!
//! A [`ChartSurface`] creates and disposes rendered charts. The
//! [`ChartRegistry`] holds at most one live handle per canvas and always
//! disposes the old one before creating its replacement.

use crate::analyzers::types::{ChartKind, ScatterPoint, SummarySeries};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Something that can render a [`SummarySeries`] onto a named canvas.
pub trait ChartSurface {
    type Handle;

    fn create(
        &mut self,
        canvas_id: &str,
        kind: ChartKind,
        series: &SummarySeries,
    ) -> Result<Self::Handle>;

    fn dispose(&mut self, handle: Self::Handle) -> Result<()>;
}

/// Tracks the live chart on each canvas.
pub struct ChartRegistry<S: ChartSurface> {
    surface: S,
    charts: HashMap<String, S::Handle>,
}

impl<S: ChartSurface> ChartRegistry<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            charts: HashMap::new(),
        }
    }

    /// Disposes the chart currently on `canvas_id` (if any), then creates a
    /// new one from `series`.
    pub fn replace(&mut self, canvas_id: &str, kind: ChartKind, series: &SummarySeries) -> Result<()> {
        if let Some(previous) = self.charts.remove(canvas_id) {
            debug!(canvas_id, "Disposing previous chart");
            self.surface.dispose(previous)?;
        }

        let handle = self.surface.create(canvas_id, kind, series)?;
        self.charts.insert(canvas_id.to_string(), handle);
        Ok(())
    }

    pub fn contains(&self, canvas_id: &str) -> bool {
        self.charts.contains_key(canvas_id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Disposes every live chart.
    pub fn dispose_all(&mut self) -> Result<()> {
        for (_, handle) in self.charts.drain() {
            self.surface.dispose(handle)?;
        }
        Ok(())
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[derive(Serialize)]
struct ChartDocument<'a> {
    canvas_id: &'a str,
    kind: ChartKind,
    title: &'a str,
    labels: Vec<&'a str>,
    values: Vec<f64>,
    points: &'a [ScatterPoint],
}

/// Writes each chart as `<dir>/<canvas_id>.json` for an external renderer.
pub struct JsonFileSurface {
    dir: PathBuf,
}

impl JsonFileSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating chart directory {}", dir.display()))?;
        Ok(Self { dir })
    }
}

impl ChartSurface for JsonFileSurface {
    type Handle = PathBuf;

    fn create(&mut self, canvas_id: &str, kind: ChartKind, series: &SummarySeries) -> Result<PathBuf> {
        let path = self.dir.join(format!("{canvas_id}.json"));
        let doc = ChartDocument {
            canvas_id,
            kind,
            title: &series.title,
            labels: series.labels(),
            values: series.values(),
            points: &series.scatter,
        };
        std::fs::write(&path, serde_json::to_vec_pretty(&doc)?)
            .with_context(|| format!("writing chart {}", path.display()))?;
        debug!(path = %path.display(), points = series.len(), "Chart written");
        Ok(path)
    }

    fn dispose(&mut self, handle: PathBuf) -> Result<()> {
        match std::fs::remove_file(&handle) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing chart {}", handle.display())),
        }
    }
}
