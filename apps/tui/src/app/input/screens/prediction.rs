use crate::app::refresh;
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_prediction_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('r') => {
            if !refresh::trigger_prediction(app) {
                app.status_message = "Refresh already in progress".to_string();
            }
        }
        _ => {}
    }
}
