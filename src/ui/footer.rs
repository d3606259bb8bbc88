use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        hint("↑↓", "row"),
        hint("←→", "field"),
        hint("enter", if app.selected_field.is_text() { "edit" } else { "change" }),
        hint("a", "add"),
        hint("d", "delete"),
        hint("R", "reset"),
        hint("?", "help"),
        hint("q", "quit"),
    ];

    // Row counter
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!(
            " {}/{} ",
            app.selected_row + 1,
            app.collection.len()
        ),
        Style::default()
            .fg(ratatui::style::Color::Black)
            .bg(ratatui::style::Color::DarkGray),
    ));

    // Flash message
    if let Some((msg, _)) = &app.flash_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            msg,
            Style::default().fg(ratatui::style::Color::Yellow),
        ));
    }

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);
    f.render_widget(paragraph, area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {key}:{desc} "),
        Style::default().fg(ratatui::style::Color::DarkGray),
    )
}
