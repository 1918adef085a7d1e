use crate::api::models::NewRecord;
use crate::app::refresh;
use crate::app::state::{AddRecordForm, App, DateField, INDICATOR_TILES};
use crossterm::event::KeyCode;

pub fn handle_history_input(app: &mut App, key: KeyCode) {
    if app.history.add_form.is_some() {
        handle_add_form_input(app, key);
        return;
    }

    if let Some(field) = app.history.editing_date {
        handle_date_input(app, key, field);
        return;
    }

    match key {
        KeyCode::Char('s') => app.history.editing_date = Some(DateField::Start),
        KeyCode::Char('e') => app.history.editing_date = Some(DateField::End),
        KeyCode::Enter | KeyCode::Char('r') => {
            if !refresh::trigger_history(app) {
                app.status_message = "Search already in progress".to_string();
            }
        }
        KeyCode::Char('a') => {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
            app.history.add_form = Some(AddRecordForm::new(now));
        }
        KeyCode::Char('d') => refresh::trigger_delete_last(app),
        KeyCode::Char('c') => {
            app.status_message = "Exporting history...".to_string();
            refresh::trigger_csv_download(app);
        }
        KeyCode::Char('i') => refresh::trigger_indicators(app),
        KeyCode::Up => {
            app.history.selected_index =
                wrap_select(app.history.selected_index, app.history.row_count(), false);
        }
        KeyCode::Down => {
            app.history.selected_index =
                wrap_select(app.history.selected_index, app.history.row_count(), true);
        }
        KeyCode::Left => {
            app.history.indicator_selection =
                wrap_select(app.history.indicator_selection, INDICATOR_TILES.len(), false);
            rebuild_indicator_chart(app);
        }
        KeyCode::Right => {
            app.history.indicator_selection =
                wrap_select(app.history.indicator_selection, INDICATOR_TILES.len(), true);
            rebuild_indicator_chart(app);
        }
        _ => {}
    }
}

/// Moves a selection one step in either direction, wrapping at the ends.
/// An empty list pins the selection to 0.
const fn wrap_select(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

fn rebuild_indicator_chart(app: &mut App) {
    if let Some(indicators) = &app.history.indicators {
        app.history.indicator_chart = Some(refresh::build_indicator_chart(
            app.history.indicator_selection,
            indicators,
        ));
    }
}

fn handle_date_input(app: &mut App, key: KeyCode, field: DateField) {
    let value = match field {
        DateField::Start => &mut app.history.start_date,
        DateField::End => &mut app.history.end_date,
    };

    match key {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => value.push(c),
        KeyCode::Backspace => {
            value.pop();
        }
        KeyCode::Enter => {
            if chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
                app.history.editing_date = None;
                refresh::trigger_history(app);
            } else {
                app.status_message = "Dates must be YYYY-MM-DD".to_string();
            }
        }
        KeyCode::Esc => app.history.editing_date = None,
        _ => {}
    }
}

fn handle_add_form_input(app: &mut App, key: KeyCode) {
    let Some(form) = app.history.add_form.as_mut() else {
        return;
    };

    match key {
        KeyCode::Esc => app.history.add_form = None,
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::Backspace => {
            form.active_value_mut().pop();
        }
        KeyCode::Char(c) => form.active_value_mut().push(c),
        KeyCode::Enter => submit_add_form(app),
        _ => {}
    }
}

fn submit_add_form(app: &mut App) {
    let Some(form) = app.history.add_form.as_ref() else {
        return;
    };

    let (Ok(pm25), Ok(pm10)) = (form.pm25.trim().parse(), form.pm10.trim().parse()) else {
        app.status_message = "PM values must be numeric".to_string();
        return;
    };
    if form.timestamp.trim().is_empty() {
        app.status_message = "Timestamp is required".to_string();
        return;
    }

    let record = NewRecord {
        timestamp: form.timestamp.trim().to_string(),
        pm25,
        pm10,
    };
    app.history.add_form = None;
    refresh::trigger_add_record(app, record);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::app::state::ViewPhase;
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

    #[tokio::test]
    async fn date_edit_commits_only_valid_dates() {
        let mut app = test_app();
        handle_history_input(&mut app, KeyCode::Char('s'));
        assert_eq!(app.history.editing_date, Some(DateField::Start));

        app.history.start_date = "2026-13-99".to_string();
        handle_history_input(&mut app, KeyCode::Enter);
        assert_eq!(app.history.editing_date, Some(DateField::Start));
        assert!(app.status_message.contains("YYYY-MM-DD"));

        app.history.start_date = "2026-08-01".to_string();
        handle_history_input(&mut app, KeyCode::Enter);
        assert_eq!(app.history.editing_date, None);
        assert_eq!(app.history.phase, ViewPhase::Fetching);
    }

    #[tokio::test]
    async fn add_form_rejects_non_numeric_values() {
        let mut app = test_app();
        handle_history_input(&mut app, KeyCode::Char('a'));
        assert!(app.history.add_form.is_some());

        let form = app.history.add_form.as_mut().expect("form");
        form.pm25 = "abc".to_string();
        form.pm10 = "40.0".to_string();
        handle_history_input(&mut app, KeyCode::Enter);
        // Form stays open for correction.
        assert!(app.history.add_form.is_some());
        assert!(app.status_message.contains("numeric"));
    }

    #[test]
    fn wrap_select_handles_edges_and_empty_lists() {
        assert_eq!(wrap_select(0, 0, true), 0);
        assert_eq!(wrap_select(0, 0, false), 0);
        assert_eq!(wrap_select(2, 3, true), 0);
        assert_eq!(wrap_select(0, 3, false), 2);
        assert_eq!(wrap_select(1, 3, true), 2);
    }

    #[tokio::test]
    async fn indicator_selection_wraps_across_tiles() {
        let mut app = test_app();
        handle_history_input(&mut app, KeyCode::Left);
        assert_eq!(app.history.indicator_selection, INDICATOR_TILES.len() - 1);
        handle_history_input(&mut app, KeyCode::Right);
        assert_eq!(app.history.indicator_selection, 0);
    }
}
