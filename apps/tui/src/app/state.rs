use crate::api::models::{EmissionSource, HistoryRecord, PredictionPoint, ThesisIndicators, TrendPoint};
use crate::api::ApiClient;
use crate::app::refresh::ViewMessage;
use crate::config::AppConfig;
use crate::domain::AqiCategory;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;

/// Sentinel shown where a numeric surface has no committed value.
pub const VALUE_PLACEHOLDER: &str = "--";
/// Shown where an optional metric is absent from the payload.
pub const NOT_AVAILABLE: &str = "N/A";
/// Status text for a failed primary fetch of the current view.
pub const CURRENT_FAILURE_MESSAGE: &str = "Total communication failure with the backend.";
/// Model-name surface text for a failed prediction refresh.
pub const PREDICTION_FAILURE_MESSAGE: &str = "Model connection error.";
/// Placeholder row text for an empty history result.
pub const HISTORY_EMPTY_MESSAGE: &str = "No records in the selected range.";

/// Refresh lifecycle of a single view. `Rendering` only exists between the
/// primary commit and the end of surface updates within one message
/// application; the loop never observes it across iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    #[default]
    Idle,
    Fetching,
    Rendering,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Prediction,
    History,
}

/// Prepared trend chart surface. Rebuilt from scratch on every refresh;
/// the previous instance is dropped before the new one is stored.
#[derive(Debug)]
pub struct TrendChart {
    pub points: Vec<(f64, f64)>,
    pub first_label: String,
    pub last_label: String,
    pub y_bounds: [f64; 2],
}

impl TrendChart {
    pub fn build(series: &[TrendPoint]) -> Result<Self, String> {
        if series.is_empty() {
            return Err("empty trend series".to_string());
        }

        let points: Vec<(f64, f64)> = series
            .iter()
            .enumerate()
            .map(|(i, point)| (i as f64, point.aqi))
            .collect();

        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for (_, aqi) in &points {
            min = min.min(*aqi);
            max = max.max(*aqi);
        }
        if (max - min).abs() < 1.0 {
            max = min + 1.0;
        }

        Ok(Self {
            points,
            first_label: series[0].time.clone(),
            last_label: series[series.len() - 1].time.clone(),
            y_bounds: [(min - 5.0).max(0.0), max + 5.0],
        })
    }
}

/// Station marker for the map panel; color follows the committed AQI.
#[derive(Debug)]
pub struct MapMarker {
    pub station: String,
    pub lat: f64,
    pub lng: f64,
    pub aqi: f64,
    pub category: AqiCategory,
}

impl MapMarker {
    pub fn popup(&self) -> String {
        format!(
            "{} | AQI {:.0} ({})",
            self.station,
            self.aqi,
            self.category.label()
        )
    }
}

/// Current-snapshot view: the AQI card, pollutant tiles, trend chart and
/// map marker. Chart and marker are secondary surfaces behind their own
/// failure boundary.
#[derive(Debug)]
pub struct CurrentView {
    pub phase: ViewPhase,
    pub aqi_display: String,
    pub category: AqiCategory,
    pub status_line: String,
    pub pm25: String,
    pub pm10: String,
    pub no2: String,
    pub co: String,
    pub last_update: Option<String>,
    pub trend: Option<TrendChart>,
    pub marker: Option<MapMarker>,
}

impl CurrentView {
    fn new() -> Self {
        Self {
            phase: ViewPhase::Idle,
            aqi_display: VALUE_PLACEHOLDER.to_string(),
            category: AqiCategory::Unknown,
            status_line: "Waiting for first reading...".to_string(),
            pm25: VALUE_PLACEHOLDER.to_string(),
            pm10: VALUE_PLACEHOLDER.to_string(),
            no2: VALUE_PLACEHOLDER.to_string(),
            co: VALUE_PLACEHOLDER.to_string(),
            last_update: None,
            trend: None,
            marker: None,
        }
    }
}

/// Combined forward/backward chart for the prediction screen.
#[derive(Debug)]
pub struct PredictionChart {
    pub predicted: Vec<(f64, f64)>,
    pub observed: Vec<(f64, f64)>,
    pub y_bounds: [f64; 2],
}

impl PredictionChart {
    pub fn build(prediction: &[PredictionPoint], observed: &[TrendPoint]) -> Self {
        let predicted: Vec<(f64, f64)> = prediction
            .iter()
            .map(|point| (f64::from(point.time_h), point.pred_aqi))
            .collect();

        // The trailing series is mapped onto the same 0..24 hour axis.
        let step = if observed.len() > 1 {
            24.0 / (observed.len() - 1) as f64
        } else {
            0.0
        };
        let observed: Vec<(f64, f64)> = observed
            .iter()
            .enumerate()
            .map(|(i, point)| (i as f64 * step, point.aqi))
            .collect();

        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for (_, aqi) in predicted.iter().chain(observed.iter()) {
            min = min.min(*aqi);
            max = max.max(*aqi);
        }
        if predicted.is_empty() && observed.is_empty() {
            min = 0.0;
            max = 100.0;
        }

        Self {
            predicted,
            observed,
            y_bounds: [(min - 5.0).max(0.0), max + 5.0],
        }
    }
}

/// Emission source breakdown rendered as a bar chart.
#[derive(Debug)]
pub struct SourcesChart {
    pub entries: Vec<(String, u64)>,
}

impl SourcesChart {
    pub fn build(sources: &[EmissionSource]) -> Self {
        let entries = sources
            .iter()
            .map(|source| {
                (
                    source.name.clone(),
                    source.contribution.round().max(0.0) as u64,
                )
            })
            .collect();
        Self { entries }
    }
}

#[derive(Debug)]
pub struct PredictionView {
    pub phase: ViewPhase,
    pub model_name: String,
    pub rmse: String,
    pub r2: String,
    pub last_trained: String,
    pub peak_aqi: String,
    pub peak_time: String,
    pub peak_category: AqiCategory,
    pub banner: String,
    pub chart: Option<PredictionChart>,
    pub sources: Option<SourcesChart>,
}

impl PredictionView {
    fn new() -> Self {
        Self {
            phase: ViewPhase::Idle,
            model_name: NOT_AVAILABLE.to_string(),
            rmse: NOT_AVAILABLE.to_string(),
            r2: NOT_AVAILABLE.to_string(),
            last_trained: NOT_AVAILABLE.to_string(),
            peak_aqi: VALUE_PLACEHOLDER.to_string(),
            peak_time: VALUE_PLACEHOLDER.to_string(),
            peak_category: AqiCategory::Unknown,
            banner: AqiCategory::Unknown.banner_message().to_string(),
            chart: None,
            sources: None,
        }
    }
}

/// Result rows of the last history search. `Empty` and `Failed` render as
/// exactly one placeholder/error row, never as an empty table.
#[derive(Debug, Default)]
pub enum HistoryRows {
    #[default]
    NotLoaded,
    Empty,
    Failed(String),
    Rows(Vec<HistoryRecord>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Timestamp,
    Pm25,
    Pm10,
}

/// Transient state of the add-record popup.
#[derive(Debug)]
pub struct AddRecordForm {
    pub field: RecordField,
    pub timestamp: String,
    pub pm25: String,
    pub pm10: String,
}

impl AddRecordForm {
    pub fn new(timestamp: String) -> Self {
        Self {
            field: RecordField::Timestamp,
            timestamp,
            pm25: String::new(),
            pm10: String::new(),
        }
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            RecordField::Timestamp => RecordField::Pm25,
            RecordField::Pm25 => RecordField::Pm10,
            RecordField::Pm10 => RecordField::Timestamp,
        };
    }

    pub fn active_value_mut(&mut self) -> &mut String {
        match self.field {
            RecordField::Timestamp => &mut self.timestamp,
            RecordField::Pm25 => &mut self.pm25,
            RecordField::Pm10 => &mut self.pm10,
        }
    }
}

pub const INDICATOR_TILES: [&str; 4] = [
    "TPA Reach (h)",
    "TPA Response (s)",
    "PPE Precision (%)",
    "PSC Exceedance (%)",
];

/// Chart shown under the KPI tiles for the selected indicator.
#[derive(Debug)]
pub struct IndicatorChart {
    pub title: String,
    pub entries: Vec<(String, u64)>,
}

#[derive(Debug)]
pub struct HistoryView {
    pub phase: ViewPhase,
    pub initialized: bool,
    pub start_date: String,
    pub end_date: String,
    pub editing_date: Option<DateField>,
    pub rows: HistoryRows,
    pub selected_index: usize,
    pub indicators: Option<ThesisIndicators>,
    pub indicator_selection: usize,
    pub indicator_chart: Option<IndicatorChart>,
    pub add_form: Option<AddRecordForm>,
}

impl HistoryView {
    fn new(start_date: String, end_date: String) -> Self {
        Self {
            phase: ViewPhase::Idle,
            initialized: false,
            start_date,
            end_date,
            editing_date: None,
            rows: HistoryRows::NotLoaded,
            selected_index: 0,
            indicators: None,
            indicator_selection: 0,
            indicator_chart: None,
            add_form: None,
        }
    }

    pub fn row_count(&self) -> usize {
        match &self.rows {
            HistoryRows::Rows(rows) => rows.len(),
            _ => 0,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub status_message: String,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub throbber: throbber_widgets_tui::ThrobberState,
    pub alert_flash_until: Option<Instant>,
    pub next_poll_at: Instant,
    pub current: CurrentView,
    pub prediction: PredictionView,
    pub history: HistoryView,
    pub config: AppConfig,
    pub api: ApiClient,
    pub tx: UnboundedSender<ViewMessage>,
}

impl App {
    pub fn new(config: AppConfig, api: ApiClient, tx: UnboundedSender<ViewMessage>) -> Self {
        let today = chrono::Local::now().date_naive();
        let week_ago = today - chrono::Duration::days(7);

        Self {
            running: true,
            screen: AppScreen::Dashboard,
            show_help: false,
            status_message: String::new(),
            animation_counter: 0.0,
            last_frame: Instant::now(),
            throbber: throbber_widgets_tui::ThrobberState::default(),
            alert_flash_until: None,
            next_poll_at: Instant::now(),
            current: CurrentView::new(),
            prediction: PredictionView::new(),
            history: HistoryView::new(
                week_ago.format("%Y-%m-%d").to_string(),
                today.format("%Y-%m-%d").to_string(),
            ),
            config,
            api,
            tx,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        if self.is_fetching() {
            self.throbber.calc_next();
        }

        if let Some(until) = self.alert_flash_until {
            if now >= until {
                self.alert_flash_until = None;
            }
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.current.phase == ViewPhase::Fetching
            || self.prediction.phase == ViewPhase::Fetching
            || self.history.phase == ViewPhase::Fetching
    }

    pub const fn flash_active(&self) -> bool {
        self.alert_flash_until.is_some()
    }
}

/// Fixed-precision display formatting: AQI renders whole, pollutant
/// readings with one decimal, model metrics and KPI values with two.
pub fn fmt0(value: f64) -> String {
    format!("{value:.0}")
}

pub fn fmt1(value: f64) -> String {
    format!("{value:.1}")
}

pub fn fmt2(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::TrendPoint;

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
    fn trend_chart_rejects_empty_series() {
        assert!(TrendChart::build(&[]).is_err());
    }

    #[test]
    fn trend_chart_bounds_cover_series() {
        let chart = TrendChart::build(&trend(&[60.0, 80.0, 75.0])).expect("chart");
        assert_eq!(chart.points.len(), 3);
        assert!(chart.y_bounds[0] <= 60.0);
        assert!(chart.y_bounds[1] >= 80.0);
        assert_eq!(chart.first_label, "00:00");
        assert_eq!(chart.last_label, "02:00");
    }

    #[test]
    fn display_precision_matches_surface_contract() {
        assert_eq!(fmt0(87.6), "88");
        assert_eq!(fmt1(12.34), "12.3");
        assert_eq!(fmt2(0.9152), "0.92");
    }

    #[test]
    fn add_record_form_cycles_fields() {
        let mut form = AddRecordForm::new("2026-08-24 10:00".to_string());
        assert_eq!(form.field, RecordField::Timestamp);
        form.next_field();
        assert_eq!(form.field, RecordField::Pm25);
        form.next_field();
        form.next_field();
        assert_eq!(form.field, RecordField::Timestamp);
    }
}
