use crate::app::state::MapMarker;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::canvas::{Canvas, Circle},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Station map panel. A small window around the station coordinates with
/// the marker tinted by the committed AQI category.
pub fn render_map(marker: &MapMarker, animation: f64, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Station Map")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height < 4 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let lng = marker.lng;
    let lat = marker.lat;
    let color = marker.category.color();

    // Pulse the marker so it reads as live.
    let pulse = (animation * 3.0).sin().mul_add(0.2, 0.8);

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: lng,
                    y: lat,
                    radius: 0.08 * pulse,
                    color,
                });
                ctx.draw(&Circle {
                    x: lng,
                    y: lat,
                    radius: 0.02,
                    color,
                });
            })
            .x_bounds([lng - 0.25, lng + 0.25])
            .y_bounds([lat - 0.25, lat + 0.25]),
        chunks[0],
    );

    let caption = Paragraph::new(marker.popup())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color));
    f.render_widget(caption, chunks[1]);
}

/// Placeholder while no snapshot has been committed yet.
pub fn render_map_placeholder(f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Station Map")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new("No position data")
        .block(block)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}
