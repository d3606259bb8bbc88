use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub const STEPS: [&str; 5] = [
    "Copy the text from the Results above",
    "Go to your parent JIRA",
    "Click on More → Create multiple sub-tasks",
    "Paste the content you copied from this page above",
    "Click on \"Create Sub-Tasks\"",
];

pub fn render(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = STEPS
        .iter()
        .enumerate()
        .map(|(i, step)| Line::raw(format!("{}. {step}", i + 1)))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ratatui::style::Color::DarkGray))
                .title(" How it works "),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
