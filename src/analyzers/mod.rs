//! The aggregation pipeline.
//!
//! Turns a flat observation dataset into [`types::SummarySeries`] for
//! display: category averages, fixed-width bins, derived-key groups, and
//! top-K feature rankings. [`dashboard`] composes them into the chart set.

pub mod aggregate;
pub mod binning;
pub mod category;
pub mod dashboard;
pub mod ranking;
pub mod types;
pub mod utility;
