use std::time::Instant;

use anyhow::Result;

use crate::event::KeyAction;
use crate::model::collection::Collection;
use crate::model::row::{Field, Row, RowEdit, RowId};
use crate::session::Session;

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Tick,
    Quit,
}

pub struct App {
    pub collection: Collection,
    pub selected_row: usize,
    pub selected_field: Field,
    pub show_help: bool,
    pub input_active: bool,
    pub input_buffer: String,
    pub input_cursor: usize,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    input_target: Option<(RowId, Field)>,
    session: Session,
}

impl App {
    pub fn new(mut session: Session) -> Result<Self> {
        let collection = session.load()?;
        Ok(Self {
            collection,
            selected_row: 0,
            selected_field: Field::Summary,
            show_help: true,
            input_active: false,
            input_buffer: String::new(),
            input_cursor: 0,
            flash_message: None,
            should_quit: false,
            input_target: None,
            session,
        })
    }

    pub fn update(&mut self, action: Action) {
        // Clear flash message after 3 seconds
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => {
                if self.input_active {
                    self.handle_input_key(key);
                } else {
                    self.handle_key(key);
                }
            }
            Action::Tick => {}
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    pub fn result_lines(&self) -> Vec<String> {
        self.collection.result_lines()
    }

    pub fn selected(&self) -> Option<&Row> {
        self.collection.rows().get(self.selected_row)
    }

    fn handle_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Up => {
                if self.selected_row > 0 {
                    self.selected_row -= 1;
                }
            }
            KeyAction::Down => {
                if self.selected_row + 1 < self.collection.len() {
                    self.selected_row += 1;
                }
            }
            KeyAction::Left | KeyAction::BackTab => {
                self.selected_field = self.selected_field.prev();
            }
            KeyAction::Right | KeyAction::Tab => {
                self.selected_field = self.selected_field.next();
            }
            KeyAction::Home => self.selected_field = Field::Summary,
            KeyAction::End => self.selected_field = Field::DevPriority,
            KeyAction::Select | KeyAction::Char(' ') | KeyAction::Char('e') => {
                if self.selected_field.is_text() {
                    self.begin_input();
                } else {
                    self.cycle_selected(true);
                }
            }
            KeyAction::Backspace => self.cycle_selected(false),
            KeyAction::Char('a') => self.add_row(),
            KeyAction::Char('d') => self.delete_selected(),
            KeyAction::Char('R') => self.reset(),
            KeyAction::Char('?') => self.show_help = !self.show_help,
            KeyAction::Char('q') => self.should_quit = true,
            KeyAction::Escape => self.show_help = false,
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Select => self.commit_input(),
            KeyAction::Escape => self.close_input(),
            KeyAction::Char(c) => {
                let at = byte_index(&self.input_buffer, self.input_cursor);
                self.input_buffer.insert(at, c);
                self.input_cursor += 1;
            }
            KeyAction::Backspace => {
                if self.input_cursor > 0 {
                    self.input_cursor -= 1;
                    let at = byte_index(&self.input_buffer, self.input_cursor);
                    self.input_buffer.remove(at);
                }
            }
            KeyAction::Delete => {
                if self.input_cursor < self.input_buffer.chars().count() {
                    let at = byte_index(&self.input_buffer, self.input_cursor);
                    self.input_buffer.remove(at);
                }
            }
            KeyAction::Left => self.input_cursor = self.input_cursor.saturating_sub(1),
            KeyAction::Right => {
                self.input_cursor = (self.input_cursor + 1).min(self.input_buffer.chars().count());
            }
            KeyAction::Home => self.input_cursor = 0,
            KeyAction::End => self.input_cursor = self.input_buffer.chars().count(),
            _ => {}
        }
    }

    fn begin_input(&mut self) {
        let field = self.selected_field;
        let Some((row_id, value)) = self
            .selected()
            .map(|row| (row.row_id, row.display_value(field).to_string()))
        else {
            return;
        };
        self.input_buffer = value;
        self.input_cursor = self.input_buffer.chars().count();
        self.input_target = Some((row_id, field));
        self.input_active = true;
    }

    fn commit_input(&mut self) {
        let value = std::mem::take(&mut self.input_buffer);
        if let Some((row_id, field)) = self.input_target {
            let edit = match field {
                Field::Summary => Some(RowEdit::Summary(value)),
                Field::Description => Some(RowEdit::Description(value)),
                _ => None,
            };
            if let Some(edit) = edit {
                self.apply_edit(row_id, edit);
            }
        }
        self.close_input();
    }

    fn close_input(&mut self) {
        self.input_active = false;
        self.input_buffer.clear();
        self.input_cursor = 0;
        self.input_target = None;
    }

    fn cycle_selected(&mut self, forward: bool) {
        let field = self.selected_field;
        let Some((row_id, edit)) = self
            .selected()
            .and_then(|row| row.cycle(field, forward).map(|edit| (row.row_id, edit)))
        else {
            return;
        };
        self.apply_edit(row_id, edit);
    }

    fn apply_edit(&mut self, row_id: RowId, edit: RowEdit) {
        let unchanged = self.collection.get(row_id).map(|row| {
            let mut edited = row.clone();
            edited.apply(edit.clone());
            edited == *row
        });
        if unchanged != Some(false) {
            return;
        }
        let field = edit.field();
        self.collection.update_field(row_id, edit);
        self.session
            .log()
            .record("edited", Some(row_id), Some(field.header()));
        self.save();
    }

    fn add_row(&mut self) {
        let row_id = self.collection.add_row();
        self.selected_row = self.collection.len().saturating_sub(1);
        self.selected_field = Field::Summary;
        self.session.record("added", Some(row_id));
        self.save();
    }

    fn delete_selected(&mut self) {
        let Some(row_id) = self.selected().map(|r| r.row_id) else {
            return;
        };
        match self.collection.delete_row(row_id) {
            Ok(()) => {
                self.selected_row = self
                    .selected_row
                    .min(self.collection.len().saturating_sub(1));
                self.session.record("deleted", Some(row_id));
                self.save();
            }
            Err(e) => {
                self.session.record("delete-rejected", Some(row_id));
                self.flash(e.to_string());
            }
        }
    }

    fn reset(&mut self) {
        self.collection = Collection::reset();
        self.selected_row = 0;
        self.selected_field = Field::Summary;
        self.session.record("reset", None);
        self.flash("Reset to a single row".into());
        self.save();
    }

    fn save(&mut self) {
        if let Err(e) = self.session.save(&self.collection) {
            self.flash(format!("Save failed: {e:#}"));
        }
    }

    fn flash(&mut self, message: String) {
        self.flash_message = Some((message, Instant::now()));
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
