use crate::app::refresh;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod dashboard;
mod help;
mod history;
mod prediction;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.show_help {
        help::handle_help_input(app, key);
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if handle_screen_switch(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Dashboard => dashboard::handle_dashboard_input(app, key),
        AppScreen::Prediction => prediction::handle_prediction_input(app, key),
        AppScreen::History => history::handle_history_input(app, key),
    }
}

fn handle_screen_switch(app: &mut App, key: KeyCode) -> bool {
    // Number keys always switch screens, except while a text field on the
    // history screen is capturing input.
    if app.screen == AppScreen::History
        && (app.history.editing_date.is_some() || app.history.add_form.is_some())
    {
        return false;
    }

    match key {
        KeyCode::Char('1') => select_screen(app, AppScreen::Dashboard),
        KeyCode::Char('2') => select_screen(app, AppScreen::Prediction),
        KeyCode::Char('3') => select_screen(app, AppScreen::History),
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        _ => return false,
    }
    true
}

/// Switches the active screen and starts its entry refresh. The dashboard
/// and prediction screens refresh on every entry; the history screen loads
/// its data and KPI indicators once and then only on explicit search.
pub fn select_screen(app: &mut App, screen: AppScreen) {
    app.screen = screen;
    match screen {
        AppScreen::Dashboard => {
            refresh::trigger_current(app);
        }
        AppScreen::Prediction => {
            refresh::trigger_prediction(app);
        }
        AppScreen::History => {
            if !app.history.initialized {
                app.history.initialized = true;
                refresh::trigger_history(app);
                refresh::trigger_indicators(app);
            }
        }
    }
}
