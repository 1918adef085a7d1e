use crate::app::state::App;
use crate::ui::widgets::{charts, map};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_dashboard(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(6)])
        .split(columns[0]);

    render_aqi_card(app, f, left[0]);
    render_pollutant_tiles(app, f, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    match &app.current.trend {
        Some(chart) => charts::render_trend(chart, f, right[0]),
        None => {
            let block = Block::default()
                .title("AQI Trend (24h)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan));
            let paragraph = Paragraph::new("No trend data")
                .block(block)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(paragraph, right[0]);
        }
    }

    match &app.current.marker {
        Some(marker) => map::render_map(marker, app.animation_counter, f, right[1]),
        None => map::render_map_placeholder(f, right[1]),
    }
}

fn render_aqi_card(app: &App, f: &mut Frame<'_>, area: Rect) {
    let category = app.current.category;
    let color = category.color();

    let block = Block::default()
        .title(" Air Quality Index ")
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let last_update = app.current.last_update.as_ref().map_or_else(
        || "Last update: --".to_string(),
        |time| format!("Last update: {time}"),
    );

    let lines = vec![
        TextLine::from(""),
        TextLine::from(Span::styled(
            app.current.aqi_display.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        TextLine::from(Span::styled(
            category.label(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        TextLine::from(""),
        TextLine::from(Span::styled(
            app.current.status_line.clone(),
            Style::default().fg(Color::White),
        ))
        .alignment(Alignment::Center),
        TextLine::from(""),
        TextLine::from(Span::styled(
            last_update,
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_pollutant_tiles(app: &App, f: &mut Frame<'_>, area: Rect) {
    let tiles = [
        ("PM2.5", &app.current.pm25, "ug/m3"),
        ("PM10", &app.current.pm10, "ug/m3"),
        ("NO2", &app.current.no2, "ppb"),
        ("CO", &app.current.co, "ppm"),
    ];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (row_index, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row_area);

        for (col_index, cell_area) in cells.iter().enumerate() {
            let (name, value, unit) = tiles[row_index * 2 + col_index];
            render_tile(name, value, unit, f, *cell_area);
        }
    }
}

fn render_tile(name: &str, value: &str, unit: &str, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" {name} "))
        .title_style(Style::default().fg(Color::Cyan))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = vec![
        TextLine::from(Span::styled(
            value.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        TextLine::from(Span::styled(unit, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center),
    ];

    let paragraph = Paragraph::new(Text::from(lines)).block(block);
    f.render_widget(paragraph, area);
}
