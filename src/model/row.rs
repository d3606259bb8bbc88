use serde::{Deserialize, Serialize};
use std::fmt;

pub type RowId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    #[serde(rename = "@inherit")]
    Inherit,
    Blocker,
    Critical,
    Major,
    Minor,
    Trivial,
}

impl Priority {
    pub const ALL: [Priority; 6] = [
        Priority::Inherit,
        Priority::Blocker,
        Priority::Critical,
        Priority::Major,
        Priority::Minor,
        Priority::Trivial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Inherit => "@inherit",
            Priority::Blocker => "blocker",
            Priority::Critical => "critical",
            Priority::Major => "major",
            Priority::Minor => "minor",
            Priority::Trivial => "trivial",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Inherit => "Inherit",
            Priority::Blocker => "Blocker",
            Priority::Critical => "Critical",
            Priority::Major => "Major",
            Priority::Minor => "Minor",
            Priority::Trivial => "Trivial",
        }
    }

    /// Accepts the wire value (`@inherit`, `major`) or the label, any case.
    pub fn parse(s: &str) -> Option<Priority> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s) || p.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Assignee {
    #[default]
    #[serde(rename = "@current")]
    CurrentUser,
    #[serde(rename = "@inherit")]
    Inherit,
}

impl Assignee {
    pub const ALL: [Assignee; 2] = [Assignee::CurrentUser, Assignee::Inherit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Assignee::CurrentUser => "@current",
            Assignee::Inherit => "@inherit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Assignee::CurrentUser => "Me",
            Assignee::Inherit => "Inherit",
        }
    }

    pub fn parse(s: &str) -> Option<Assignee> {
        Assignee::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s) || a.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JIRA only offers "inherit from parent" here; the single-variant enum keeps
/// the wire value closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FixVersion {
    #[default]
    #[serde(rename = "@inherit")]
    Inherit,
}

impl FixVersion {
    pub const ALL: [FixVersion; 1] = [FixVersion::Inherit];

    pub fn as_str(&self) -> &'static str {
        match self {
            FixVersion::Inherit => "@inherit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FixVersion::Inherit => "Inherit",
        }
    }
}

impl fmt::Display for FixVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DevPriority {
    #[default]
    #[serde(rename = "@inherit")]
    Inherit,
}

impl DevPriority {
    pub const ALL: [DevPriority; 1] = [DevPriority::Inherit];

    pub fn as_str(&self) -> &'static str {
        match self {
            DevPriority::Inherit => "@inherit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DevPriority::Inherit => "Inherit",
        }
    }
}

impl fmt::Display for DevPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The editable columns of a row, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Summary,
    Description,
    Priority,
    Assignee,
    FixVersion,
    DevPriority,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Summary,
        Field::Description,
        Field::Priority,
        Field::Assignee,
        Field::FixVersion,
        Field::DevPriority,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Field::Summary => "Jira Summary",
            Field::Description => "Description",
            Field::Priority => "Priority",
            Field::Assignee => "Assignee",
            Field::FixVersion => "Fix Version",
            Field::DevPriority => "Dev Priority",
        }
    }

    /// Free-text fields are edited in the command bar; the rest cycle.
    pub fn is_text(&self) -> bool {
        matches!(self, Field::Summary | Field::Description)
    }

    pub fn index(&self) -> usize {
        Field::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    pub fn prev(&self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

/// A single-field change to one row. Carrying the typed value keeps the field
/// name and its value from disagreeing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEdit {
    Summary(String),
    Description(String),
    Priority(Priority),
    Assignee(Assignee),
    FixVersion(FixVersion),
    DevPriority(DevPriority),
}

impl RowEdit {
    pub fn field(&self) -> Field {
        match self {
            RowEdit::Summary(_) => Field::Summary,
            RowEdit::Description(_) => Field::Description,
            RowEdit::Priority(_) => Field::Priority,
            RowEdit::Assignee(_) => Field::Assignee,
            RowEdit::FixVersion(_) => Field::FixVersion,
            RowEdit::DevPriority(_) => Field::DevPriority,
        }
    }

    fn apply(self, row: &mut Row) {
        match self {
            RowEdit::Summary(v) => row.summary = v,
            RowEdit::Description(v) => row.description = v,
            RowEdit::Priority(v) => row.priority = v,
            RowEdit::Assignee(v) => row.assignee = v,
            RowEdit::FixVersion(v) => row.fix_version = v,
            RowEdit::DevPriority(v) => row.dev_priority = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "rowid")]
    pub row_id: RowId,
    pub summary: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: Assignee,
    #[serde(rename = "fixversion")]
    pub fix_version: FixVersion,
    #[serde(rename = "devpriority")]
    pub dev_priority: DevPriority,
}

impl Row {
    pub fn new(row_id: RowId) -> Self {
        Self {
            row_id,
            summary: String::new(),
            description: String::new(),
            priority: Priority::default(),
            assignee: Assignee::default(),
            fix_version: FixVersion::default(),
            dev_priority: DevPriority::default(),
        }
    }

    pub fn apply(&mut self, edit: RowEdit) {
        edit.apply(self);
    }

    /// The line JIRA's "Create multiple sub-tasks" dialog accepts, or `None`
    /// when the summary is empty. Values are substituted as-is.
    pub fn result_line(&self) -> Option<String> {
        if self.summary.is_empty() {
            return None;
        }
        Some(format!(
            "- {} / description:\"{}\" priority:\"{}\" assignee:\"{}\" fixversion:\"{}\" cfield:\"DevPriority:{}\"",
            self.summary,
            self.description,
            self.priority,
            self.assignee,
            self.fix_version,
            self.dev_priority,
        ))
    }

    /// Value shown in the table cell for `field`.
    pub fn display_value(&self, field: Field) -> &str {
        match field {
            Field::Summary => &self.summary,
            Field::Description => &self.description,
            Field::Priority => self.priority.label(),
            Field::Assignee => self.assignee.label(),
            Field::FixVersion => self.fix_version.label(),
            Field::DevPriority => self.dev_priority.label(),
        }
    }

    /// The edit that moves a selector field to its next (or previous) option.
    /// Text fields have no options and yield `None`.
    pub fn cycle(&self, field: Field, forward: bool) -> Option<RowEdit> {
        match field {
            Field::Summary | Field::Description => None,
            Field::Priority => Some(RowEdit::Priority(step(&Priority::ALL, self.priority, forward))),
            Field::Assignee => Some(RowEdit::Assignee(step(&Assignee::ALL, self.assignee, forward))),
            Field::FixVersion => Some(RowEdit::FixVersion(step(
                &FixVersion::ALL,
                self.fix_version,
                forward,
            ))),
            Field::DevPriority => Some(RowEdit::DevPriority(step(
                &DevPriority::ALL,
                self.dev_priority,
                forward,
            ))),
        }
    }
}

fn step<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    options[next]
}
