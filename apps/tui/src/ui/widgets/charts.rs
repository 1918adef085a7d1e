use crate::app::state::{PredictionChart, SourcesChart, TrendChart};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

pub fn render_trend(chart: &TrendChart, f: &mut Frame<'_>, area: Rect) {
    let datasets = vec![Dataset::default()
        .name("AQI")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&chart.points)];

    let x_labels = vec![
        Span::raw(chart.first_label.clone()),
        Span::raw(chart.last_label.clone()),
    ];
    let y_labels = vec![
        Span::raw(format!("{:.0}", chart.y_bounds[0])),
        Span::raw(format!("{:.0}", chart.y_bounds[1])),
    ];

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .title("AQI Trend (24h)")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (chart.points.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(chart.y_bounds)
                .labels(y_labels),
        );

    f.render_widget(widget, area);
}

pub fn render_prediction_chart(chart: &PredictionChart, f: &mut Frame<'_>, area: Rect) {
    let datasets = vec![
        Dataset::default()
            .name("Observed")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&chart.observed),
        Dataset::default()
            .name("Predicted")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Magenta))
            .data(&chart.predicted),
    ];

    let y_labels = vec![
        Span::raw(format!("{:.0}", chart.y_bounds[0])),
        Span::raw(format!("{:.0}", chart.y_bounds[1])),
    ];

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .title("Next 24h Forecast")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .x_axis(
            Axis::default()
                .title("Hours ahead")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, 24.0])
                .labels(vec![Span::raw("0"), Span::raw("12"), Span::raw("24")]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(chart.y_bounds)
                .labels(y_labels),
        );

    f.render_widget(widget, area);
}

pub fn render_sources(chart: &SourcesChart, f: &mut Frame<'_>, area: Rect) {
    render_bars("Emission Sources (%)", &chart.entries, Color::Yellow, f, area);
}

pub fn render_bars(
    title: &str,
    entries: &[(String, u64)],
    color: Color,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let bars: Vec<Bar<'_>> = entries
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .value(*value)
                .label(TextLine::from(label.clone()))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let max_value = entries
        .iter()
        .map(|(_, value)| *value)
        .max()
        .unwrap_or(0)
        .max(1);

    let widget = BarChart::default()
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(9);

    f.render_widget(widget, area);
}
