use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_help(f: &mut Frame<'_>, area: Rect) {
    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let key = |k: &'static str, desc: &'static str| {
        TextLine::from(vec![
            Span::styled(
                format!("  {k}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" - {desc}"), Style::default()),
        ])
    };

    let help_text = vec![
        TextLine::from(vec![Span::styled(
            "AirViewer",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]),
        TextLine::from(""),
        TextLine::from("Terminal dashboard for the Trujillo air-quality monitoring station."),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Global:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key("1 / 2 / 3", "Switch to Current / Prediction / History"),
        key("r", "Refresh the active screen"),
        key("?", "Toggle this help screen"),
        key("q / Esc", "Quit"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Current screen:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key("a", "Toggle audible/visual alerts"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "History screen:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key("s / e", "Edit start / end date"),
        key("Enter", "Search the selected range"),
        key("Up / Down", "Move through records"),
        key("Left / Right", "Select a KPI tile"),
        key("a", "Add a record"),
        key("d", "Delete the most recent record"),
        key("c", "Export the range as CSV"),
        key("i", "Reload KPI indicators"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "AQI categories:",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        TextLine::from("  0-50 Good, 51-100 Moderate, 101-150 Unhealthy for Sensitive Groups,"),
        TextLine::from("  151-200 Unhealthy, 201-300 Very Unhealthy, 301+ Hazardous"),
        TextLine::from(""),
        TextLine::from(vec![Span::styled(
            "Press Esc to close this help screen",
            Style::default().fg(Color::Yellow),
        )]),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_text))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(help_paragraph, area);
}
