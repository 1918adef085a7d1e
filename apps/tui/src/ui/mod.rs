// UI module for the AirViewer dashboard
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::{App, AppScreen};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    if app.show_help {
        let area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(100)])
            .split(f.area().inner(Margin::new(2, 1)));
        screens::help::render_help(f, area[0]);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(10),   // Active screen
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_tabs(app, f, main_layout[0]);

    match app.screen {
        AppScreen::Dashboard => screens::dashboard::render_dashboard(app, f, main_layout[1]),
        AppScreen::Prediction => screens::prediction::render_prediction(app, f, main_layout[1]),
        AppScreen::History => screens::history::render_history(app, f, main_layout[1]),
    }

    render_status(app, f, main_layout[2]);
    render_shortcuts(app, f, main_layout[3]);
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let titles = ["1 Current", "2 Prediction", "3 History"]
        .iter()
        .map(|title| TextLine::from(*title))
        .collect::<Vec<_>>();

    let selected = match app.screen {
        AppScreen::Dashboard => 0,
        AppScreen::Prediction => 1,
        AppScreen::History => 2,
    };

    // A red border while an alert flash is active.
    let border_style = if app.flash_active() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .title("== AirViewer ==")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_status(app: &mut App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if app.is_fetching() {
        let throbber = throbber_widgets_tui::Throbber::default()
            .label("Refreshing...")
            .style(Style::default().fg(Color::Cyan))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
            .use_type(throbber_widgets_tui::WhichUse::Spin);
        let inner = status_block.inner(area);
        f.render_widget(status_block, area);
        f.render_stateful_widget(throbber, inner, &mut app.throbber);
        return;
    }

    let style = if app.status_message.starts_with("Error")
        || app.status_message.contains("failed")
        || app.status_message.contains("unavailable")
    {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };

    let status_paragraph = Paragraph::new(Span::styled(&app.status_message, style))
        .block(status_block)
        .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Gray);

    let mut spans = vec![
        Span::styled("1/2/3", key_style),
        Span::styled(": Screens | ", text_style),
        Span::styled("r", key_style),
        Span::styled(": Refresh | ", text_style),
    ];

    match app.screen {
        AppScreen::Dashboard => {
            spans.push(Span::styled("a", key_style));
            spans.push(Span::styled(": Toggle alerts | ", text_style));
        }
        AppScreen::Prediction => {}
        AppScreen::History => {
            spans.extend([
                Span::styled("s/e", key_style),
                Span::styled(": Dates | ", text_style),
                Span::styled("a", key_style),
                Span::styled(": Add | ", text_style),
                Span::styled("d", key_style),
                Span::styled(": Delete last | ", text_style),
                Span::styled("c", key_style),
                Span::styled(": Export | ", text_style),
            ]);
        }
    }

    spans.extend([
        Span::styled("?", key_style),
        Span::styled(": Help | ", text_style),
        Span::styled("q", key_style),
        Span::styled(": Quit", text_style),
    ]);

    let shortcuts_paragraph = Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center);
    f.render_widget(shortcuts_paragraph, area);
}
