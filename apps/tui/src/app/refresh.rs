use crate::api::models::{
    EmissionSource, HistoryRecord, ModelMetrics, NewRecord, PredictionPoint, ThesisIndicators,
    TrendPoint,
};
use crate::api::ApiError;
use crate::app::alerts;
use crate::app::state::{
    fmt0, fmt1, fmt2, App, HistoryRows, IndicatorChart, MapMarker, PredictionChart, SourcesChart,
    TrendChart, ViewPhase, CURRENT_FAILURE_MESSAGE, NOT_AVAILABLE, PREDICTION_FAILURE_MESSAGE,
    VALUE_PLACEHOLDER,
};
use crate::domain::{classify, AqiCategory};

/// Successful current-view fetch. The snapshot is the primary payload; the
/// trend series rides along with its own error so a chart failure cannot
/// take down the AQI card.
#[derive(Debug)]
pub struct CurrentOutcome {
    pub snapshot: crate::api::models::Snapshot,
    pub trend: Result<Vec<TrendPoint>, ApiError>,
}

/// Successful prediction-view fetch. Series and metrics are both required;
/// the observed tail and source breakdown are best-effort extras.
#[derive(Debug)]
pub struct PredictionOutcome {
    pub prediction: Vec<PredictionPoint>,
    pub metrics: ModelMetrics,
    pub observed: Vec<TrendPoint>,
    pub sources: Result<Vec<EmissionSource>, ApiError>,
}

/// Completion messages sent from spawned fetch tasks back to the event
/// loop. All state mutation happens on the loop side.
#[derive(Debug)]
pub enum ViewMessage {
    CurrentFetched(Result<CurrentOutcome, ApiError>),
    PredictionFetched(Result<PredictionOutcome, ApiError>),
    HistoryFetched(Result<Vec<HistoryRecord>, ApiError>),
    IndicatorsFetched(Result<ThesisIndicators, ApiError>),
    RecordAdded(Result<(), ApiError>),
    RecordDeleted(Result<(), ApiError>),
    CsvSaved(Result<String, String>),
}

/// First strictly-greater maximum of the prediction series. Ties keep the
/// earliest hour.
pub fn find_peak(series: &[PredictionPoint]) -> Option<&PredictionPoint> {
    let mut peak: Option<&PredictionPoint> = None;
    for point in series {
        match peak {
            Some(best) if point.pred_aqi > best.pred_aqi => peak = Some(point),
            None => peak = Some(point),
            _ => {}
        }
    }
    peak
}

/// Starts a current-view refresh unless one is already in flight.
/// Returns whether a fetch was started.
pub fn trigger_current(app: &mut App) -> bool {
    if app.current.phase == ViewPhase::Fetching {
        return false;
    }
    app.current.phase = ViewPhase::Fetching;

    let api = app.api.clone();
    let tx = app.tx.clone();
    tokio::spawn(async move {
        let outcome = match api.current().await {
            Ok(snapshot) => Ok(CurrentOutcome {
                snapshot,
                trend: api.last_24h().await,
            }),
            Err(e) => Err(e),
        };
        let _ = tx.send(ViewMessage::CurrentFetched(outcome));
    });
    true
}

pub fn trigger_prediction(app: &mut App) -> bool {
    if app.prediction.phase == ViewPhase::Fetching {
        return false;
    }
    app.prediction.phase = ViewPhase::Fetching;

    let api = app.api.clone();
    let tx = app.tx.clone();
    tokio::spawn(async move {
        let outcome = match tokio::join!(api.prediction_next_24h(), api.model_metrics()) {
            (Ok(prediction), Ok(metrics)) => Ok(PredictionOutcome {
                prediction,
                metrics,
                observed: api.last_24h().await.unwrap_or_default(),
                sources: api.prediction_sources().await,
            }),
            (Err(e), _) | (_, Err(e)) => Err(e),
        };
        let _ = tx.send(ViewMessage::PredictionFetched(outcome));
    });
    true
}

pub fn trigger_history(app: &mut App) -> bool {
    if app.history.phase == ViewPhase::Fetching {
        return false;
    }
    app.history.phase = ViewPhase::Fetching;

    let api = app.api.clone();
    let tx = app.tx.clone();
    let start = app.history.start_date.clone();
    let end = app.history.end_date.clone();
    tokio::spawn(async move {
        let result = api.history(&start, &end).await;
        let _ = tx.send(ViewMessage::HistoryFetched(result));
    });
    true
}

pub fn trigger_indicators(app: &App) {
    let api = app.api.clone();
    let tx = app.tx.clone();
    tokio::spawn(async move {
        let result = api.thesis_indicators().await;
        let _ = tx.send(ViewMessage::IndicatorsFetched(result));
    });
}

pub fn trigger_add_record(app: &App, record: NewRecord) {
    let api = app.api.clone();
    let tx = app.tx.clone();
    tokio::spawn(async move {
        let result = api.add_record(&record).await;
        let _ = tx.send(ViewMessage::RecordAdded(result));
    });
}

pub fn trigger_delete_last(app: &App) {
    let api = app.api.clone();
    let tx = app.tx.clone();
    tokio::spawn(async move {
        let result = api.delete_last_record().await;
        let _ = tx.send(ViewMessage::RecordDeleted(result));
    });
}

pub fn trigger_csv_download(app: &App) {
    let api = app.api.clone();
    let tx = app.tx.clone();
    let start = app.history.start_date.clone();
    let end = app.history.end_date.clone();
    tokio::spawn(async move {
        let result = match api.download_csv(&start, &end).await {
            Ok(bytes) => {
                let path = format!("airviewer_history_{start}_{end}.csv");
                match tokio::fs::write(&path, bytes).await {
                    Ok(()) => Ok(path),
                    Err(e) => Err(format!("could not write {path}: {e}")),
                }
            }
            Err(e) => Err(e.to_string()),
        };
        let _ = tx.send(ViewMessage::CsvSaved(result));
    });
}

/// Applies a completion message to the state tree. Each arm owns the full
/// commit-or-fallback decision for its view.
pub fn handle_message(app: &mut App, message: ViewMessage) {
    match message {
        ViewMessage::CurrentFetched(outcome) => apply_current(app, outcome),
        ViewMessage::PredictionFetched(outcome) => apply_prediction(app, outcome),
        ViewMessage::HistoryFetched(result) => apply_history(app, result),
        ViewMessage::IndicatorsFetched(result) => apply_indicators(app, result),
        ViewMessage::RecordAdded(result) => {
            match result {
                Ok(()) => {
                    app.status_message = "Record added.".to_string();
                    trigger_history(app);
                }
                Err(e) => app.status_message = format!("Add record failed: {e}"),
            };
        }
        ViewMessage::RecordDeleted(result) => {
            match result {
                Ok(()) => {
                    app.status_message = "Last record deleted.".to_string();
                    trigger_history(app);
                }
                Err(e) => app.status_message = format!("Delete failed: {e}"),
            };
        }
        ViewMessage::CsvSaved(result) => {
            app.status_message = match result {
                Ok(path) => format!("History exported to {path}"),
                Err(e) => format!("Export failed: {e}"),
            };
        }
    }
}

fn apply_current(app: &mut App, outcome: Result<CurrentOutcome, ApiError>) {
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            // Primary failure: placeholders on the card, last-good chart
            // and marker stay on screen.
            app.current.phase = ViewPhase::Failed;
            app.current.aqi_display = VALUE_PLACEHOLDER.to_string();
            app.current.category = AqiCategory::Unknown;
            app.current.status_line = CURRENT_FAILURE_MESSAGE.to_string();
            app.current.pm25 = VALUE_PLACEHOLDER.to_string();
            app.current.pm10 = VALUE_PLACEHOLDER.to_string();
            app.current.no2 = VALUE_PLACEHOLDER.to_string();
            app.current.co = VALUE_PLACEHOLDER.to_string();
            if app.config.debug {
                eprintln!("current refresh failed: {e}");
            }
            return;
        }
    };

    app.current.phase = ViewPhase::Rendering;

    let snapshot = &outcome.snapshot;
    let category = classify(snapshot.aqi);
    app.current.aqi_display = fmt0(snapshot.aqi);
    app.current.category = category;
    app.current.status_line = category.description().to_string();
    app.current.pm25 = fmt1(snapshot.pm25);
    app.current.pm10 = fmt1(snapshot.pm10);
    app.current.no2 = fmt1(snapshot.no2);
    app.current.co = fmt1(snapshot.co);
    app.current.last_update = Some(chrono::Local::now().format("%H:%M:%S").to_string());

    alerts::maybe_alert(app, category);

    // Secondary boundary: chart and marker share it, and their failure
    // never undoes the committed card above. On failure both keep their
    // prior state.
    let trend_result = outcome
        .trend
        .map_err(|e| e.to_string())
        .and_then(|series| TrendChart::build(&series));
    match trend_result {
        Ok(chart) => {
            app.current.trend = None;
            app.current.trend = Some(chart);

            app.current.marker = None;
            app.current.marker = Some(MapMarker {
                station: app.config.station.name.clone(),
                lat: app.config.station.lat,
                lng: app.config.station.lng,
                aqi: outcome.snapshot.aqi,
                category,
            });
        }
        Err(e) => {
            app.status_message = format!("Trend chart unavailable: {e}");
        }
    }

    app.current.phase = ViewPhase::Idle;
}

fn apply_prediction(app: &mut App, outcome: Result<PredictionOutcome, ApiError>) {
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            app.prediction.phase = ViewPhase::Failed;
            app.prediction.model_name = PREDICTION_FAILURE_MESSAGE.to_string();
            app.prediction.rmse = NOT_AVAILABLE.to_string();
            app.prediction.r2 = NOT_AVAILABLE.to_string();
            app.prediction.last_trained = NOT_AVAILABLE.to_string();
            app.prediction.peak_aqi = VALUE_PLACEHOLDER.to_string();
            app.prediction.peak_time = VALUE_PLACEHOLDER.to_string();
            app.prediction.peak_category = AqiCategory::Unknown;
            app.prediction.banner = AqiCategory::Unknown.banner_message().to_string();
            app.prediction.chart = None;
            app.prediction.sources = None;
            if app.config.debug {
                eprintln!("prediction refresh failed: {e}");
            }
            return;
        }
    };

    app.prediction.phase = ViewPhase::Rendering;

    let metrics = &outcome.metrics;
    app.prediction.model_name = metrics
        .model_name
        .clone()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    app.prediction.rmse = metrics.rmse.map_or_else(|| NOT_AVAILABLE.to_string(), fmt2);
    app.prediction.r2 = metrics.r2.map_or_else(|| NOT_AVAILABLE.to_string(), fmt2);
    app.prediction.last_trained = metrics
        .last_trained
        .clone()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    // The predicted peak only drives the banner text; alert side effects
    // are tied to the current reading, not the forecast.
    match find_peak(&outcome.prediction) {
        Some(peak) => {
            let category = classify(peak.pred_aqi);
            app.prediction.peak_aqi = fmt0(peak.pred_aqi);
            app.prediction.peak_time = format!("+{}h", peak.time_h);
            app.prediction.peak_category = category;
            app.prediction.banner = category.banner_message().to_string();
        }
        None => {
            // Empty series degrades like an unknown reading.
            app.prediction.peak_aqi = VALUE_PLACEHOLDER.to_string();
            app.prediction.peak_time = VALUE_PLACEHOLDER.to_string();
            app.prediction.peak_category = AqiCategory::Unknown;
            app.prediction.banner = AqiCategory::Unknown.banner_message().to_string();
        }
    }

    app.prediction.chart = None;
    app.prediction.chart = Some(PredictionChart::build(
        &outcome.prediction,
        &outcome.observed,
    ));

    match outcome.sources {
        Ok(sources) if !sources.is_empty() => {
            app.prediction.sources = Some(SourcesChart::build(&sources));
        }
        Ok(_) => app.prediction.sources = None,
        Err(e) => {
            app.status_message = format!("Source breakdown unavailable: {e}");
        }
    }

    app.prediction.phase = ViewPhase::Idle;
}

fn apply_history(app: &mut App, result: Result<Vec<HistoryRecord>, ApiError>) {
    match result {
        Ok(rows) if rows.is_empty() => {
            app.history.rows = HistoryRows::Empty;
            app.history.selected_index = 0;
            app.history.phase = ViewPhase::Idle;
        }
        Ok(rows) => {
            if app.history.selected_index >= rows.len() {
                app.history.selected_index = rows.len() - 1;
            }
            app.history.rows = HistoryRows::Rows(rows);
            app.history.phase = ViewPhase::Idle;
        }
        Err(e) => {
            app.history.rows = HistoryRows::Failed(e.to_string());
            app.history.selected_index = 0;
            app.history.phase = ViewPhase::Failed;
        }
    }
}

fn apply_indicators(app: &mut App, result: Result<ThesisIndicators, ApiError>) {
    match result {
        Ok(indicators) => {
            app.history.indicator_chart = Some(build_indicator_chart(
                app.history.indicator_selection,
                &indicators,
            ));
            app.history.indicators = Some(indicators);
        }
        Err(e) => {
            app.status_message = format!("Indicators unavailable: {e}");
        }
    }
}

/// Chart for the selected KPI tile: the measured value against its
/// reference bound.
pub fn build_indicator_chart(selection: usize, indicators: &ThesisIndicators) -> IndicatorChart {
    match selection {
        0 => IndicatorChart {
            title: "Alert reach vs 24h window".to_string(),
            entries: vec![
                ("Reach".to_string(), indicators.reach_hours.round() as u64),
                ("Window".to_string(), 24),
            ],
        },
        1 => IndicatorChart {
            title: "Response time vs 5s bound".to_string(),
            entries: vec![
                (
                    "Median".to_string(),
                    indicators.response_seconds.round() as u64,
                ),
                ("Bound".to_string(), 5),
            ],
        },
        2 => IndicatorChart {
            title: "Prediction precision".to_string(),
            entries: vec![
                (
                    "Precise".to_string(),
                    indicators.precision_pct.round() as u64,
                ),
                (
                    "Error".to_string(),
                    (100.0 - indicators.precision_pct).max(0.0).round() as u64,
                ),
            ],
        },
        _ => IndicatorChart {
            title: "Threshold exceedance".to_string(),
            entries: vec![
                (
                    "Exceeded".to_string(),
                    indicators.exceedance_pct.round() as u64,
                ),
                (
                    "Within".to_string(),
                    (100.0 - indicators.exceedance_pct).max(0.0).round() as u64,
                ),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Snapshot;
    use crate::api::ApiClient;
    use crate::config::AppConfig;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let config = AppConfig::default();
        let api =
            ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).expect("test client");
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(config, api, tx)
    }

    fn prediction_series(values: &[f64]) -> Vec<PredictionPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, aqi)| PredictionPoint {
                time_h: i as u32 + 1,
                pred_aqi: *aqi,
            })
            .collect()
    }

    fn snapshot(aqi: f64) -> Snapshot {
        Snapshot {
            aqi,
            pm25: 35.4,
            pm10: 50.0,
            no2: 21.0,
            co: 0.8,
        }
    }

    fn trend(values: &[f64]) -> Vec<TrendPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, aqi)| TrendPoint {
                time: format!("{i:02}:00"),
                aqi: *aqi,
            })
            .collect()
    }

    #[test]
    fn find_peak_keeps_earliest_on_tie() {
        let series = prediction_series(&[80.0, 95.0, 95.0]);
        let peak = find_peak(&series).expect("peak");
        assert_eq!(peak.time_h, 2);
        assert!((peak.pred_aqi - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn find_peak_single_element() {
        let series = prediction_series(&[42.0]);
        assert_eq!(find_peak(&series).expect("peak").time_h, 1);
    }

    #[test]
    fn find_peak_empty_series() {
        assert!(find_peak(&[]).is_none());
    }

    #[test]
    fn current_failure_shows_placeholders_and_keeps_chart() {
        let mut app = test_app();
        apply_current(
            &mut app,
            Ok(CurrentOutcome {
                snapshot: snapshot(72.0),
                trend: Ok(trend(&[60.0, 72.0])),
            }),
        );
        assert!(app.current.trend.is_some());

        apply_current(
            &mut app,
            Err(ApiError::Transport("connection refused".to_string())),
        );
        assert_eq!(app.current.phase, ViewPhase::Failed);
        assert_eq!(app.current.aqi_display, VALUE_PLACEHOLDER);
        assert_eq!(app.current.pm25, VALUE_PLACEHOLDER);
        assert_eq!(app.current.category, AqiCategory::Unknown);
        assert_eq!(app.current.status_line, CURRENT_FAILURE_MESSAGE);
        // Last-good chart survives a primary failure.
        assert!(app.current.trend.is_some());
    }

    #[test]
    fn trend_failure_does_not_undo_committed_card() {
        let mut app = test_app();
        apply_current(
            &mut app,
            Ok(CurrentOutcome {
                snapshot: snapshot(60.0),
                trend: Ok(trend(&[55.0, 60.0])),
            }),
        );
        let old_points = app.current.trend.as_ref().expect("chart").points.clone();

        apply_current(
            &mut app,
            Ok(CurrentOutcome {
                snapshot: snapshot(180.0),
                trend: Err(ApiError::Status(500)),
            }),
        );

        assert_eq!(app.current.phase, ViewPhase::Idle);
        assert_eq!(app.current.aqi_display, "180");
        assert_eq!(app.current.category, AqiCategory::Unhealthy);
        assert!(app.status_message.contains("Trend chart unavailable"));
        // Chart and marker both keep their prior state.
        let points = &app.current.trend.as_ref().expect("chart").points;
        assert_eq!(points, &old_points);
        let marker = app.current.marker.as_ref().expect("marker");
        assert!((marker.aqi - 60.0).abs() < f64::EPSILON);
        assert_eq!(marker.category, AqiCategory::Moderate);
    }

    #[test]
    fn marker_follows_the_snapshot_when_the_trend_commits() {
        let mut app = test_app();
        apply_current(
            &mut app,
            Ok(CurrentOutcome {
                snapshot: snapshot(60.0),
                trend: Ok(trend(&[55.0, 60.0])),
            }),
        );
        apply_current(
            &mut app,
            Ok(CurrentOutcome {
                snapshot: snapshot(180.0),
                trend: Ok(trend(&[60.0, 180.0])),
            }),
        );
        let marker = app.current.marker.as_ref().expect("marker");
        assert!((marker.aqi - 180.0).abs() < f64::EPSILON);
        assert_eq!(marker.category, AqiCategory::Unhealthy);
    }

    #[test]
    fn empty_trend_series_is_a_secondary_failure() {
        let mut app = test_app();
        apply_current(
            &mut app,
            Ok(CurrentOutcome {
                snapshot: snapshot(40.0),
                trend: Ok(vec![]),
            }),
        );
        assert_eq!(app.current.aqi_display, "40");
        assert!(app.current.trend.is_none());
        assert!(app.status_message.contains("Trend chart unavailable"));
    }

    #[test]
    fn alert_fires_only_at_unhealthy_and_above() {
        let mut app = test_app();
        apply_current(
            &mut app,
            Ok(CurrentOutcome {
                snapshot: snapshot(150.0),
                trend: Ok(trend(&[150.0, 150.0])),
            }),
        );
        assert!(!app.flash_active());

        apply_current(
            &mut app,
            Ok(CurrentOutcome {
                snapshot: snapshot(151.0),
                trend: Ok(trend(&[150.0, 151.0])),
            }),
        );
        assert!(app.flash_active());
    }

    #[test]
    fn alerts_respect_the_disable_switch() {
        let mut app = test_app();
        app.config.alerts_enabled = false;
        apply_current(
            &mut app,
            Ok(CurrentOutcome {
                snapshot: snapshot(400.0),
                trend: Ok(trend(&[380.0, 400.0])),
            }),
        );
        assert!(!app.flash_active());
    }

    #[test]
    fn prediction_failure_shows_model_error_message() {
        let mut app = test_app();
        apply_prediction(&mut app, Err(ApiError::Status(503)));
        assert_eq!(app.prediction.phase, ViewPhase::Failed);
        assert_eq!(app.prediction.model_name, PREDICTION_FAILURE_MESSAGE);
        assert_eq!(app.prediction.rmse, NOT_AVAILABLE);
        assert_eq!(app.prediction.peak_aqi, VALUE_PLACEHOLDER);
        assert_eq!(app.prediction.peak_category, AqiCategory::Unknown);
    }

    #[test]
    fn prediction_commit_fills_peak_and_banner() {
        let mut app = test_app();
        apply_prediction(
            &mut app,
            Ok(PredictionOutcome {
                prediction: prediction_series(&[90.0, 165.0, 120.0]),
                metrics: ModelMetrics {
                    rmse: Some(4.217),
                    r2: Some(0.913),
                    model_name: Some("random_forest_v2".to_string()),
                    last_trained: Some("2026-08-20".to_string()),
                },
                observed: trend(&[80.0, 85.0]),
                sources: Ok(vec![]),
            }),
        );
        assert_eq!(app.prediction.phase, ViewPhase::Idle);
        assert_eq!(app.prediction.model_name, "random_forest_v2");
        assert_eq!(app.prediction.rmse, "4.22");
        assert_eq!(app.prediction.r2, "0.91");
        assert_eq!(app.prediction.peak_aqi, "165");
        assert_eq!(app.prediction.peak_time, "+2h");
        assert_eq!(app.prediction.peak_category, AqiCategory::Unhealthy);
        assert_eq!(
            app.prediction.banner,
            AqiCategory::Unhealthy.banner_message()
        );
        assert!(app.prediction.chart.is_some());
        assert!(app.prediction.sources.is_none());
    }

    #[test]
    fn predicted_peak_never_fires_the_alert() {
        let mut app = test_app();
        apply_prediction(
            &mut app,
            Ok(PredictionOutcome {
                prediction: prediction_series(&[120.0, 220.0, 180.0]),
                metrics: ModelMetrics::default(),
                observed: vec![],
                sources: Ok(vec![]),
            }),
        );
        // The forecast drives the banner, not the bell/flash.
        assert_eq!(app.prediction.peak_category, AqiCategory::VeryUnhealthy);
        assert!(!app.flash_active());
    }

    #[test]
    fn empty_prediction_series_degrades_to_unknown() {
        let mut app = test_app();
        apply_prediction(
            &mut app,
            Ok(PredictionOutcome {
                prediction: vec![],
                metrics: ModelMetrics::default(),
                observed: vec![],
                sources: Ok(vec![]),
            }),
        );
        assert_eq!(app.prediction.peak_aqi, VALUE_PLACEHOLDER);
        assert_eq!(app.prediction.peak_category, AqiCategory::Unknown);
        assert_eq!(app.prediction.model_name, NOT_AVAILABLE);
    }

    #[test]
    fn empty_history_renders_placeholder_row() {
        let mut app = test_app();
        apply_history(&mut app, Ok(vec![]));
        assert!(matches!(app.history.rows, HistoryRows::Empty));
        assert_eq!(app.history.phase, ViewPhase::Idle);
    }

    #[test]
    fn history_error_renders_error_row() {
        let mut app = test_app();
        apply_history(&mut app, Err(ApiError::Transport("timeout".to_string())));
        match &app.history.rows {
            HistoryRows::Failed(message) => assert!(message.contains("timeout")),
            other => panic!("expected error row, got {other:?}"),
        }
        assert_eq!(app.history.phase, ViewPhase::Failed);
    }

    #[test]
    fn history_success_clamps_selection() {
        let mut app = test_app();
        app.history.selected_index = 10;
        apply_history(
            &mut app,
            Ok(vec![HistoryRecord {
                timestamp: "2026-08-20 10:00".to_string(),
                aqi: 80.0,
                pm25: 24.0,
                pm10: 40.0,
                no2: 18.0,
                co: 0.6,
            }]),
        );
        assert_eq!(app.history.selected_index, 0);
        assert_eq!(app.history.row_count(), 1);
    }

    #[tokio::test]
    async fn trigger_is_ignored_while_fetch_in_flight() {
        let mut app = test_app();
        assert!(trigger_current(&mut app));
        assert_eq!(app.current.phase, ViewPhase::Fetching);
        assert!(!trigger_current(&mut app));
        assert_eq!(app.current.phase, ViewPhase::Fetching);
    }

    #[tokio::test]
    async fn failed_view_accepts_a_new_trigger() {
        let mut app = test_app();
        app.history.phase = ViewPhase::Failed;
        assert!(trigger_history(&mut app));
        assert_eq!(app.history.phase, ViewPhase::Fetching);
    }

    #[test]
    fn record_failures_surface_as_status_text() {
        let mut app = test_app();
        handle_message(&mut app, ViewMessage::RecordAdded(Err(ApiError::Status(422))));
        assert!(app.status_message.contains("Add record failed"));

        handle_message(
            &mut app,
            ViewMessage::RecordDeleted(Err(ApiError::Transport("timeout".to_string()))),
        );
        assert!(app.status_message.contains("Delete failed"));
    }

    #[test]
    fn indicator_chart_tracks_selection() {
        let indicators = ThesisIndicators {
            reach_hours: 2.5,
            response_seconds: 1.2,
            precision_pct: 93.4,
            exceedance_pct: 48.0,
        };
        let chart = build_indicator_chart(2, &indicators);
        assert_eq!(chart.entries[0], ("Precise".to_string(), 93));
        assert_eq!(chart.entries[1], ("Error".to_string(), 7));
    }
}
