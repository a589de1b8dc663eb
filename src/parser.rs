//! JSON decoding for locally stored datasets.

use anyhow::Result;
use serde_json::Value;

use crate::analyzers::types::FeatureImportance;
use crate::observation::Observation;

/// Decodes a JSON array of observation objects.
///
/// # Errors
///
/// Returns an error if the bytes are not a JSON array. Array elements that
/// are not objects become empty observations.
pub fn parse_observations(bytes: &[u8]) -> Result<Vec<Observation>> {
    let rows: Vec<Value> = serde_json::from_slice(bytes)?;
    Ok(rows.into_iter().map(Observation::from).collect())
}

/// Decodes a JSON array of `{ feature, importance }` objects.
pub fn parse_feature_importance(bytes: &[u8]) -> Result<Vec<FeatureImportance>> {
    Ok(serde_json::from_slice(bytes)?)
}
