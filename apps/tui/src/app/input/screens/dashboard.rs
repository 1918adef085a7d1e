use crate::app::refresh;
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('r') => {
            if !refresh::trigger_current(app) {
                app.status_message = "Refresh already in progress".to_string();
            }
        }
        KeyCode::Char('a') => {
            app.config.alerts_enabled = !app.config.alerts_enabled;
            app.status_message = if app.config.alerts_enabled {
                "Alerts enabled".to_string()
            } else {
                "Alerts disabled".to_string()
            };
        }
        _ => {}
    }
}
