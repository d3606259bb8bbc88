use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::theme::JIRA_BLUE;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let results = app.result_lines();

    let lines: Vec<Line> = if results.is_empty() {
        vec![Line::styled(
            "Rows with a summary show up here.",
            Style::default().fg(ratatui::style::Color::DarkGray),
        )]
    } else {
        results.into_iter().map(Line::raw).collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(JIRA_BLUE))
                .title(" Results "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
