use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    if !app.input_active {
        return;
    }

    let row_id = app.selected().map(|r| r.row_id).unwrap_or_default();
    let title = format!(
        " {} (row {row_id}) · enter:save esc:cancel ",
        app.selected_field.header()
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ratatui::style::Color::Yellow))
        .title(title);

    // Keep the cursor in view on long values
    let inner_width = area.width.saturating_sub(2) as usize;
    let skip = (app.input_cursor + 1).saturating_sub(inner_width);
    let visible: String = app.input_buffer.chars().skip(skip).collect();

    let paragraph = Paragraph::new(Line::raw(visible)).block(block);
    f.render_widget(paragraph, area);

    // Position cursor
    let x = area.x + 1 + app.input_cursor.saturating_sub(skip) as u16;
    let y = area.y + 1;
    f.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), y));
}
