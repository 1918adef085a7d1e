pub mod models;

use models::{
    HistoryRecord, ModelMetrics, NewRecord, PredictionPoint, Snapshot, SourcesPayload,
    ThesisIndicators, TrendPoint,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Failure taxonomy for a single API call. Transport and shape failures are
/// handled identically by the refresh orchestrator; the split exists for
/// status surfaces and logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("unexpected payload: {0}")]
    Shape(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Shape(error.to_string())
        } else {
            // Timeouts, DNS failures and connection errors all land here.
            Self::Transport(error.to_string())
        }
    }
}

/// Thin client over the AirViewer backend. Cheap to clone; each refresh
/// task takes its own copy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Shape(e.to_string()))
    }

    /// Latest sensor snapshot.
    pub async fn current(&self) -> Result<Snapshot, ApiError> {
        self.get_json("/data/current").await
    }

    /// Trailing 24 h trend series, oldest first.
    pub async fn last_24h(&self) -> Result<Vec<TrendPoint>, ApiError> {
        self.get_json("/data/last_24h").await
    }

    /// Forward 24 h prediction series.
    pub async fn prediction_next_24h(&self) -> Result<Vec<PredictionPoint>, ApiError> {
        self.get_json("/prediction/next_24h").await
    }

    pub async fn model_metrics(&self) -> Result<ModelMetrics, ApiError> {
        self.get_json("/model/metrics").await
    }

    /// Emission source breakdown, normalized across the two payload shapes
    /// observed in deployed backends.
    pub async fn prediction_sources(&self) -> Result<Vec<models::EmissionSource>, ApiError> {
        let payload: SourcesPayload = self.get_json("/prediction/sources").await?;
        Ok(payload.into_sources())
    }

    pub async fn thesis_indicators(&self) -> Result<ThesisIndicators, ApiError> {
        self.get_json("/thesis/indicators").await
    }

    /// Historical records within an inclusive date range.
    pub async fn history(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<HistoryRecord>, ApiError> {
        let url = format!("{}/history", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("start_date", start_date), ("end_date", end_date)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        response
            .json::<Vec<HistoryRecord>>()
            .await
            .map_err(|e| ApiError::Shape(e.to_string()))
    }

    /// Appends a record; any OK status counts as success, the body is ignored.
    pub async fn add_record(&self, record: &NewRecord) -> Result<(), ApiError> {
        let url = format!("{}/history/record", self.base_url);
        let response = self.http.post(&url).json(record).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status(status.as_u16()))
        }
    }

    /// Removes the most recent record; any OK status counts as success.
    pub async fn delete_last_record(&self) -> Result<(), ApiError> {
        let url = format!("{}/history/record/last", self.base_url);
        let response = self.http.delete(&url).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status(status.as_u16()))
        }
    }

    /// CSV export for a date range. The body is returned verbatim, never
    /// parsed; the caller decides where the file lands.
    pub async fn download_csv(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let url = format!("{}/history/download", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("start_date", start_date), ("end_date", end_date)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
