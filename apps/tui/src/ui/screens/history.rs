use crate::app::state::{
    fmt2, App, DateField, HistoryRows, RecordField, HISTORY_EMPTY_MESSAGE, NOT_AVAILABLE,
};
use crate::domain::classify;
use crate::ui::widgets::{charts, popup, tables};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_history(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    render_filter_bar(app, f, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    render_table(app, f, columns[0]);
    render_indicator_panel(app, f, columns[1]);

    if app.history.add_form.is_some() {
        render_add_form(app, f, area);
    }
}

fn date_span<'a>(label: &'a str, value: &'a str, active: bool) -> Vec<Span<'a>> {
    let value_style = if active {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };

    vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::styled(value.to_string(), value_style),
        Span::raw("   "),
    ]
}

fn render_filter_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut spans = Vec::new();
    spans.extend(date_span(
        "Start",
        &app.history.start_date,
        app.history.editing_date == Some(DateField::Start),
    ));
    spans.extend(date_span(
        "End",
        &app.history.end_date,
        app.history.editing_date == Some(DateField::End),
    ));

    let hint = if app.history.editing_date.is_some() {
        "Type the date, Enter to search, Esc to cancel"
    } else {
        "s/e: edit dates   Enter: search"
    };
    spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));

    let block = Block::default()
        .title(" Date Range ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(TextLine::from(spans)).block(block);
    f.render_widget(paragraph, area);
}

fn render_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Records ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    match &app.history.rows {
        HistoryRows::NotLoaded => {
            let paragraph = Paragraph::new("Press Enter to search")
                .block(block)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(paragraph, area);
        }
        HistoryRows::Empty => {
            let paragraph = Paragraph::new(HISTORY_EMPTY_MESSAGE)
                .block(block)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(paragraph, area);
        }
        HistoryRows::Failed(message) => {
            let paragraph = Paragraph::new(format!("Could not load records: {message}"))
                .block(block)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
        HistoryRows::Rows(records) => {
            render_record_rows(app, records, f, area);
        }
    }
}

fn render_record_rows(
    app: &App,
    records: &[crate::api::models::HistoryRecord],
    f: &mut Frame<'_>,
    area: Rect,
) {
    let header = Row::new(vec![
        Cell::from("Timestamp"),
        Cell::from("AQI"),
        Cell::from("PM2.5"),
        Cell::from("PM10"),
        Cell::from("NO2"),
        Cell::from("CO"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let total_rows = records.len();
    let max_visible_rows = area.height.saturating_sub(4) as usize;
    let offset = tables::scroll_offset(total_rows, max_visible_rows, app.history.selected_index);

    let visible = records.iter().skip(offset).take(max_visible_rows);
    let rows = visible.enumerate().map(|(i, record)| {
        let is_selected = i + offset == app.history.selected_index;
        let style = if is_selected {
            Style::default()
                .bg(Color::Rgb(0, 0, 238))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(classify(record.aqi).color())
        };

        Row::new(vec![
            Cell::from(record.timestamp.clone()),
            Cell::from(format!("{:.0}", record.aqi)),
            Cell::from(format!("{:.1}", record.pm25)),
            Cell::from(format!("{:.1}", record.pm10)),
            Cell::from(format!("{:.1}", record.no2)),
            Cell::from(format!("{:.1}", record.co)),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(17),
        Constraint::Length(5),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!(
                    " Records ({} of {}) ",
                    app.history.selected_index + 1,
                    total_rows
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_indicator_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(area);

    render_kpi_tiles(app, f, rows[0]);

    match &app.history.indicator_chart {
        Some(chart) => charts::render_bars(&chart.title, &chart.entries, Color::Green, f, rows[1]),
        None => {
            let block = Block::default()
                .title(" KPI Detail ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            let paragraph = Paragraph::new("No indicator data")
                .block(block)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(paragraph, rows[1]);
        }
    }
}

/// KPI tile values; indicators render with two decimals like the model
/// metrics.
fn kpi_values(indicators: Option<&crate::api::models::ThesisIndicators>) -> [String; 4] {
    indicators.map_or(
        [
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
        ],
        |ind| {
            [
                fmt2(ind.reach_hours),
                fmt2(ind.response_seconds),
                fmt2(ind.precision_pct),
                fmt2(ind.exceedance_pct),
            ]
        },
    )
}

fn render_kpi_tiles(app: &App, f: &mut Frame<'_>, area: Rect) {
    let values = kpi_values(app.history.indicators.as_ref());

    let titles = crate::app::state::INDICATOR_TILES;

    let grid = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    for (row_index, row_area) in grid.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row_area);

        for (col_index, cell_area) in cells.iter().enumerate() {
            let index = row_index * 2 + col_index;
            let is_selected = index == app.history.indicator_selection;
            let border_style = if is_selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let block = Block::default()
                .title(format!(" {} ", titles[index]))
                .borders(Borders::ALL)
                .border_style(border_style);

            let paragraph = Paragraph::new(Span::styled(
                values[index].clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ))
            .block(block)
            .alignment(Alignment::Center);
            f.render_widget(paragraph, *cell_area);
        }
    }
}

fn render_add_form(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(form) = &app.history.add_form else {
        return;
    };

    let popup_area = popup::centered_rect(50, 40, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Add Record ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let field_style = |field: RecordField| {
        if form.field == field {
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let field_label = |name: &str, field: RecordField| {
        let prefix = if form.field == field { "> " } else { "  " };
        Span::styled(
            format!("{prefix}{name}: "),
            Style::default().fg(Color::Gray),
        )
    };

    let lines = vec![
        TextLine::from(""),
        TextLine::from(vec![
            field_label("Timestamp", RecordField::Timestamp),
            Span::styled(form.timestamp.clone(), field_style(RecordField::Timestamp)),
        ]),
        TextLine::from(vec![
            field_label("PM2.5", RecordField::Pm25),
            Span::styled(form.pm25.clone(), field_style(RecordField::Pm25)),
        ]),
        TextLine::from(vec![
            field_label("PM10", RecordField::Pm10),
            Span::styled(form.pm10.clone(), field_style(RecordField::Pm10)),
        ]),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Tab: next field   Enter: save   Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup_area);
}
