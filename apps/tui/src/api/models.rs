use serde::{Deserialize, Serialize};

/// Latest point-in-time sensor bundle from `/data/current`.
///
/// Replaced wholesale on every successful fetch; never merged with a
/// previous snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub aqi: f64,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub co: f64,
}

/// One element of the trailing 24 h trend series.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendPoint {
    pub time: String,
    pub aqi: f64,
}

/// One element of the forward prediction series.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionPoint {
    pub time_h: u32,
    pub pred_aqi: f64,
}

/// Model quality info from `/model/metrics`. All fields are optional;
/// absent values render as "N/A".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelMetrics {
    pub rmse: Option<f64>,
    #[serde(alias = "r_squared")]
    pub r2: Option<f64>,
    pub model_name: Option<String>,
    pub last_trained: Option<String>,
}

/// A single emission source and its contribution percentage.
#[derive(Debug, Clone, Deserialize)]
pub struct EmissionSource {
    #[serde(alias = "label")]
    pub name: String,
    #[serde(alias = "pct", alias = "value")]
    pub contribution: f64,
}

/// `/prediction/sources` has shipped in two shapes across backend versions:
/// parallel `labels`/`contributions` arrays, or a `sources` object list.
/// Both are accepted and normalized through [`SourcesPayload::into_sources`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SourcesPayload {
    Parallel {
        labels: Vec<String>,
        contributions: Vec<f64>,
    },
    Named {
        sources: Vec<EmissionSource>,
    },
}

impl SourcesPayload {
    pub fn into_sources(self) -> Vec<EmissionSource> {
        match self {
            Self::Parallel {
                labels,
                contributions,
            } => labels
                .into_iter()
                .zip(contributions)
                .map(|(name, contribution)| EmissionSource { name, contribution })
                .collect(),
            Self::Named { sources } => sources,
        }
    }
}

/// Aggregate KPI values from `/thesis/indicators`.
#[derive(Debug, Clone, Deserialize)]
pub struct ThesisIndicators {
    #[serde(rename = "TPA_Alcance_Hrs")]
    pub reach_hours: f64,
    #[serde(rename = "TPA_Respuesta_Seg")]
    pub response_seconds: f64,
    #[serde(rename = "PPE_Precision_Pct")]
    pub precision_pct: f64,
    #[serde(rename = "PSC_Superacion_Pct")]
    pub exceedance_pct: f64,
}

/// One historical record row from `/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: String,
    pub aqi: f64,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub co: f64,
}

/// Body for `POST /history/record`.
#[derive(Debug, Clone, Serialize)]
pub struct NewRecord {
    pub timestamp: String,
    pub pm25: f64,
    pub pm10: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_accept_both_r_squared_spellings() {
        let a: ModelMetrics =
            serde_json::from_str(r#"{"rmse": 4.2, "r2": 0.91, "model_name": "rf"}"#)
                .expect("r2 form");
        let b: ModelMetrics =
            serde_json::from_str(r#"{"rmse": 4.2, "r_squared": 0.91, "model_name": "rf"}"#)
                .expect("r_squared form");
        assert_eq!(a.r2, b.r2);
        assert_eq!(a.r2, Some(0.91));
    }

    #[test]
    fn metrics_tolerate_absent_fields() {
        let metrics: ModelMetrics = serde_json::from_str("{}").expect("empty object");
        assert!(metrics.rmse.is_none());
        assert!(metrics.r2.is_none());
        assert!(metrics.model_name.is_none());
        assert!(metrics.last_trained.is_none());
    }

    #[test]
    fn sources_payload_shapes_normalize_identically() {
        let parallel: SourcesPayload = serde_json::from_str(
            r#"{"labels": ["Traffic", "Industry"], "contributions": [62.5, 37.5]}"#,
        )
        .expect("parallel shape");
        let named: SourcesPayload = serde_json::from_str(
            r#"{"sources": [
                {"name": "Traffic", "contribution": 62.5},
                {"name": "Industry", "contribution": 37.5}
            ]}"#,
        )
        .expect("named shape");

        let a = parallel.into_sources();
        let b = named.into_sources();
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].name, b[0].name);
        assert!((a[0].contribution - b[0].contribution).abs() < f64::EPSILON);
        assert_eq!(a[1].name, "Industry");
    }

    #[test]
    fn indicators_deserialize_from_backend_field_names() {
        let indicators: ThesisIndicators = serde_json::from_str(
            r#"{
                "TPA_Alcance_Hrs": 2.5,
                "TPA_Respuesta_Seg": 1.2,
                "PPE_Precision_Pct": 93.4,
                "PSC_Superacion_Pct": 48.0
            }"#,
        )
        .expect("indicator payload");
        assert!((indicators.reach_hours - 2.5).abs() < f64::EPSILON);
        assert!((indicators.precision_pct - 93.4).abs() < f64::EPSILON);
    }
}
