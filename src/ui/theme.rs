use ratatui::style::Color;

use crate::model::row::Priority;

pub const JIRA_BLUE: Color = Color::Rgb(0x00, 0x52, 0xCC);

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Blocker => Color::Red,
        Priority::Critical => Color::LightRed,
        Priority::Major => Color::Yellow,
        Priority::Minor => Color::Blue,
        Priority::Trivial => Color::Gray,
        Priority::Inherit => Color::DarkGray,
    }
}
