use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::input::handle_input;
use crate::app::input::screens::select_screen;
use crate::app::refresh::{self, ViewMessage};
use crate::app::state::{App, AppScreen};
use crate::domain::classify;
use crate::ui;

/// Run the main application event loop.
///
/// Fetch tasks report back over `rx`; their messages are drained and
/// applied here, before drawing, so every frame sees a consistent state
/// tree.
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut UnboundedReceiver<ViewMessage>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    // First paint starts with live data on the way. History and the KPI
    // indicators load once here; later loads are explicit searches.
    select_screen(app, AppScreen::Dashboard);
    if !app.history.initialized {
        app.history.initialized = true;
        refresh::trigger_history(app);
        refresh::trigger_indicators(app);
    }
    app.next_poll_at = Instant::now() + app.config.poll_interval;

    loop {
        // Update animations
        app.update();

        // Apply every completed fetch before this frame.
        while let Ok(message) = rx.try_recv() {
            refresh::handle_message(app, message);
        }

        if Instant::now() >= app.next_poll_at {
            auto_refresh(app);
            app.next_poll_at = Instant::now() + app.config.poll_interval;
        }

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events for now
                }
            }
        }
    }
    Ok(())
}

/// Periodic refresh of the active screen. The history screen is excluded;
/// its data only moves on an explicit search.
fn auto_refresh(app: &mut App) {
    match app.screen {
        AppScreen::Dashboard => {
            refresh::trigger_current(app);
        }
        AppScreen::Prediction => {
            refresh::trigger_prediction(app);
        }
        AppScreen::History => {}
    }
}

/// Run the application in headless mode (no UI): one snapshot fetch,
/// printed to stdout.
pub async fn run_headless(app: &App, json: bool) -> Result<()> {
    let snapshot = app.api.current().await?;
    let category = classify(snapshot.aqi);

    let report = HeadlessReport {
        station: app.config.station.name.clone(),
        aqi: snapshot.aqi,
        category: category.label().to_string(),
        category_tag: category.style().to_string(),
        tier: category.tier(),
        alert: category.is_alert_worthy(),
        pm25: snapshot.pm25,
        pm10: snapshot.pm10,
        no2: snapshot.no2,
        co: snapshot.co,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\nAirViewer Snapshot");
        println!("==================");
        println!("Station: {}", report.station);
        println!("AQI: {:.0} ({})", report.aqi, report.category);
        println!("PM2.5: {:.1} ug/m3", report.pm25);
        println!("PM10: {:.1} ug/m3", report.pm10);
        println!("NO2: {:.1} ppb", report.no2);
        println!("CO: {:.1} ppm", report.co);
        if report.alert {
            println!("\nALERT: {}", category.banner_message());
        }
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct HeadlessReport {
    station: String,
    aqi: f64,
    category: String,
    category_tag: String,
    tier: u8,
    alert: bool,
    pm25: f64,
    pm10: f64,
    no2: f64,
    co: f64,
}
