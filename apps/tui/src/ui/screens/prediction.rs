use crate::app::state::App;
use crate::ui::widgets::charts;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_prediction(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Model metric tiles
            Constraint::Length(3), // Advisory banner
            Constraint::Min(8),    // Charts
        ])
        .split(area);

    render_metric_tiles(app, f, rows[0]);
    render_banner(app, f, rows[1]);

    let charts_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[2]);

    match &app.prediction.chart {
        Some(chart) => charts::render_prediction_chart(chart, f, charts_area[0]),
        None => {
            let block = Block::default()
                .title("Next 24h Forecast")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta));
            let paragraph = Paragraph::new("No forecast data")
                .block(block)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(paragraph, charts_area[0]);
        }
    }

    match &app.prediction.sources {
        Some(sources) => charts::render_sources(sources, f, charts_area[1]),
        None => {
            let block = Block::default()
                .title("Emission Sources (%)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan));
            let paragraph = Paragraph::new("No source data")
                .block(block)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(paragraph, charts_area[1]);
        }
    }
}

fn render_metric_tiles(app: &App, f: &mut Frame<'_>, area: Rect) {
    let tiles = [
        ("Model", &app.prediction.model_name),
        ("RMSE", &app.prediction.rmse),
        ("R2", &app.prediction.r2),
        ("Last trained", &app.prediction.last_trained),
    ];

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    for (index, cell_area) in cells.iter().enumerate() {
        let (name, value) = tiles[index];
        let block = Block::default()
            .title(format!(" {name} "))
            .title_style(Style::default().fg(Color::Magenta))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let paragraph = Paragraph::new(Span::styled(
            value.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(paragraph, *cell_area);
    }
}

fn render_banner(app: &App, f: &mut Frame<'_>, area: Rect) {
    let category = app.prediction.peak_category;
    let color = category.color();

    let peak_line = format!(
        "Peak: {} AQI at {} ({})",
        app.prediction.peak_aqi,
        app.prediction.peak_time,
        category.label()
    );

    let lines = vec![TextLine::from(vec![
        Span::styled(
            peak_line,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default()),
        Span::styled(
            app.prediction.banner.clone(),
            Style::default().fg(Color::White),
        ),
    ])];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
