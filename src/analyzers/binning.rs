//! Fixed-width numeric binning.
//!
//! Bins start at `floor(min / width) * width` and step by `width` until the
//! bin holding the maximum. Each bin is `[lower, lower + width)` except the
//! last, whose upper edge is inclusive, so the maximum is always captured.
//! An empty dataset produces an empty series.

use crate::analyzers::types::{Accumulator, SummarySeries};
use crate::analyzers::utility::format_edge;
use crate::error::AggregateError;
use crate::observation::{NumericField, Observation};

/// Upper bound on the bins one series may hold.
pub const MAX_BINS: usize = 10_000;

/// Contiguous bins laid out over the observed range of one field.
///
/// Bin indices stay in `f64` until they are known to be in range, so an
/// outlier can never overflow the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BinLayout {
    width: f64,
    first: f64,
    count: usize,
}

impl BinLayout {
    fn over(values: &[f64], width: f64) -> Result<Option<Self>, AggregateError> {
        let Some(min) = values.iter().copied().reduce(f64::min) else {
            return Ok(None);
        };
        let max = values.iter().copied().fold(min, f64::max);

        let first = (min / width).floor();
        let count = (max / width).floor() - first + 1.0;
        if !count.is_finite() || count > MAX_BINS as f64 {
            return Err(AggregateError::TooManyBins {
                count,
                max: MAX_BINS,
            });
        }

        Ok(Some(Self {
            width,
            first,
            count: count as usize,
        }))
    }

    fn index_of(&self, value: f64) -> usize {
        let raw = (value / self.width).floor() - self.first;
        raw.clamp(0.0, (self.count - 1) as f64) as usize
    }

    fn lower(&self, idx: usize) -> f64 {
        (self.first + idx as f64) * self.width
    }

    fn label(&self, idx: usize, unit: &str) -> String {
        let lower = self.lower(idx);
        format!(
            "{unit}{}-{unit}{}",
            format_edge(lower),
            format_edge(lower + self.width)
        )
    }
}

fn check_width(width: f64) -> Result<(), AggregateError> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(AggregateError::InvalidBinWidth(width))
    }
}

/// Counts observations per bin of `field`.
///
/// Missing or non-numeric values are binned as 0, so the counts always sum
/// to `data.len()`. `unit` prefixes both edges of each label (`"$"` gives
/// `"$0-$200"`).
pub fn histogram(
    data: &[Observation],
    field: NumericField,
    width: f64,
    unit: &str,
) -> Result<SummarySeries, AggregateError> {
    check_width(width)?;

    let values: Vec<f64> = data.iter().map(|o| o.number_or_zero(field)).collect();
    let mut series = SummarySeries::new(format!("{} distribution", field.key()));

    let Some(layout) = BinLayout::over(&values, width)? else {
        return Ok(series);
    };

    let mut counts = vec![0usize; layout.count];
    for v in &values {
        counts[layout.index_of(*v)] += 1;
    }

    for (idx, count) in counts.into_iter().enumerate() {
        series.push(layout.label(idx, unit), count as f64);
    }
    Ok(series)
}

/// Averages `value` per bin of `bin_field`; empty bins average to 0.
pub fn binned_average(
    data: &[Observation],
    bin_field: NumericField,
    value: NumericField,
    width: f64,
    unit: &str,
) -> Result<SummarySeries, AggregateError> {
    check_width(width)?;

    let keys: Vec<f64> = data.iter().map(|o| o.number_or_zero(bin_field)).collect();
    let mut series = SummarySeries::new(format!(
        "Average {} by {} range",
        value.key(),
        bin_field.key()
    ));

    let Some(layout) = BinLayout::over(&keys, width)? else {
        return Ok(series);
    };

    let mut bins = vec![Accumulator::default(); layout.count];
    for (obs, key) in data.iter().zip(&keys) {
        bins[layout.index_of(*key)].add(obs.number_or_zero(value));
    }

    for (idx, acc) in bins.iter().enumerate() {
        series.push(layout.label(idx, unit), acc.average());
    }
    Ok(series)
}
