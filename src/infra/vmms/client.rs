use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::analyzers::types::FeatureImportance;
use crate::fetch::{HttpClient, fetch_json, post_json};
use crate::observation::Observation;
use crate::prediction::{PredictionRequest, PredictionResponse};
use crate::services::dashboard_api::DashboardApi;

/// HTTP client for the maintenance prediction service.
pub struct VmmsClient<C> {
    base_url: String,
    http: C,
}

impl<C: HttpClient> VmmsClient<C> {
    pub fn new(base_url: &str, http: C) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl<C: HttpClient> DashboardApi for VmmsClient<C> {
    async fn sample_data(&self) -> Result<Vec<Observation>> {
        let url = self.url("/api/sample-data/");
        debug!(url = %url, "Fetching sample data");
        fetch_json(&self.http, &url).await
    }

    async fn feature_importance(&self) -> Result<Vec<FeatureImportance>> {
        let url = self.url("/api/feature-importance/");
        debug!(url = %url, "Fetching feature importance");
        fetch_json(&self.http, &url).await
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        let url = self.url("/api/predict/");
        debug!(url = %url, make = %request.make, "Submitting prediction");
        post_json(&self.http, &url, request).await
    }
}
