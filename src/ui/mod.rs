pub mod command_bar;
pub mod footer;
pub mod help_panel;
pub mod results_panel;
pub mod row_table;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();

    // Determine bottom bar height: command bar (3) when input active, else footer (1)
    let bottom_height = if app.input_active { 3 } else { 1 };

    let results_height = (app.result_lines().len().max(1) as u16 + 2).min(12);
    let help_height = if app.show_help {
        help_panel::STEPS.len() as u16 + 2
    } else {
        0
    };

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),                 // row table
            Constraint::Length(results_height), // results
            Constraint::Length(help_height),    // instructions
            Constraint::Length(bottom_height),  // footer or command bar
        ])
        .split(size);

    row_table::render(f, vertical[0], app);
    results_panel::render(f, vertical[1], app);
    if app.show_help {
        help_panel::render(f, vertical[2]);
    }

    // Bottom bar: command bar when input active, footer otherwise
    if app.input_active {
        command_bar::render(f, vertical[3], app);
    } else {
        footer::render(f, vertical[3], app);
    }
}
