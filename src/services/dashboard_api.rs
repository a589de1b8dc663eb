//! Trait for the prediction service's dashboard endpoints.

use crate::analyzers::types::FeatureImportance;
use crate::observation::Observation;
use crate::prediction::{PredictionRequest, PredictionResponse};
use anyhow::Result;
use tracing::{error, info};

/// Abstraction over the service backing the dashboard.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    /// Returns the sample observation dataset.
    async fn sample_data(&self) -> Result<Vec<Observation>>;

    /// Returns the model's feature-importance list, in service order.
    async fn feature_importance(&self) -> Result<Vec<FeatureImportance>>;

    /// Submits one prediction request.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse>;
}

/// Fetches the sample dataset, degrading to an empty one on any failure.
pub async fn load_sample_data<A: DashboardApi + ?Sized>(api: &A) -> Vec<Observation> {
    match api.sample_data().await {
        Ok(data) => {
            info!(observations = data.len(), "Sample data loaded");
            data
        }
        Err(e) => {
            error!(error = %e, "Failed to load sample data");
            Vec::new()
        }
    }
}

/// Fetches feature importances, degrading to an empty list on any failure.
pub async fn load_feature_importance<A: DashboardApi + ?Sized>(api: &A) -> Vec<FeatureImportance> {
    match api.feature_importance().await {
        Ok(entries) => {
            info!(features = entries.len(), "Feature importance loaded");
            entries
        }
        Err(e) => {
            error!(error = %e, "Failed to load feature importance");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct Offline;

    #[async_trait::async_trait]
    impl DashboardApi for Offline {
        async fn sample_data(&self) -> Result<Vec<Observation>> {
            Err(anyhow!("connection refused"))
        }

        async fn feature_importance(&self) -> Result<Vec<FeatureImportance>> {
            Err(anyhow!("connection refused"))
        }

        async fn predict(&self, _request: &PredictionRequest) -> Result<PredictionResponse> {
            Err(anyhow!("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_failed_fetches_degrade_to_empty() {
        assert!(load_sample_data(&Offline).await.is_empty());
        assert!(load_feature_importance(&Offline).await.is_empty());
    }
}
