use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row as TableRow, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::model::row::{Field, Row};
use crate::ui::theme::{priority_color, JIRA_BLUE};

const WIDTHS: [Constraint; 7] = [
    Constraint::Length(4),
    Constraint::Percentage(30),
    Constraint::Percentage(30),
    Constraint::Length(10),
    Constraint::Length(9),
    Constraint::Length(12),
    Constraint::Length(13),
];

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let header = TableRow::new(
        std::iter::once(Cell::from("#")).chain(Field::ALL.iter().map(|field| Cell::from(field.header()))),
    )
    .style(
        Style::default()
            .fg(JIRA_BLUE)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<TableRow> = app
        .collection
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let selected = i == app.selected_row;
            let id_cell = Cell::from(Span::styled(
                row.row_id.to_string(),
                Style::default().fg(ratatui::style::Color::DarkGray),
            ));
            let cells = Field::ALL.iter().map(|&field| {
                let focused = selected && field == app.selected_field;
                cell(row, field, focused)
            });
            let style = if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            TableRow::new(std::iter::once(id_cell).chain(cells)).style(style)
        })
        .collect();

    let table = Table::new(rows, WIDTHS).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Cyan))
            .title(format!(
                " Sub-tasks ({}, last id {}) ",
                app.collection.len(),
                app.collection.last_row_id()
            )),
    );

    // The state only drives scrolling; highlighting is done per cell.
    let mut state = TableState::default().with_selected(Some(app.selected_row));
    f.render_stateful_widget(table, area, &mut state);
}

fn cell(row: &Row, field: Field, focused: bool) -> Cell<'static> {
    let text = row.display_value(field).replace('\n', " ⏎ ");
    let mut style = match field {
        Field::Priority => Style::default().fg(priority_color(row.priority)),
        _ => Style::default(),
    };
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let text = if text.is_empty() && field.is_text() {
        if focused {
            " ".repeat(4)
        } else {
            style = style.fg(ratatui::style::Color::DarkGray);
            "-".to_string()
        }
    } else {
        text
    };
    Cell::from(Span::styled(text, style))
}
