use anyhow::{bail, Context, Result};

use crate::config::AppConfig;
use crate::model::collection::Collection;
use crate::model::row::{Assignee, Priority, RowEdit, RowId};
use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    pub summary: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub assignee: Option<Assignee>,
}

/// `subtasks add`: append a row and print its result line.
pub fn handle_add(config: &AppConfig, args: &[String]) -> Result<()> {
    let add = parse_add_args(args)?;
    let mut session = Session::open(config);
    let mut collection = session.load()?;

    let row_id = apply_add(&mut collection, add);
    session.record("added", Some(row_id));
    session.save(&collection)?;

    if let Some(line) = collection.get(row_id).and_then(|r| r.result_line()) {
        println!("Added row {row_id}:");
        println!("{line}");
    }
    Ok(())
}

pub fn apply_add(collection: &mut Collection, add: AddArgs) -> RowId {
    let row_id = collection.add_row();
    collection.update_field(row_id, RowEdit::Summary(add.summary));
    if let Some(description) = add.description {
        collection.update_field(row_id, RowEdit::Description(description));
    }
    if let Some(priority) = add.priority {
        collection.update_field(row_id, RowEdit::Priority(priority));
    }
    if let Some(assignee) = add.assignee {
        collection.update_field(row_id, RowEdit::Assignee(assignee));
    }
    row_id
}

/// `subtasks print`: the result lines, ready to paste into JIRA.
pub fn handle_print(config: &AppConfig) -> Result<()> {
    let mut session = Session::open(config);
    let collection = session.load()?;
    for line in collection.result_lines() {
        println!("{line}");
    }
    Ok(())
}

pub fn handle_delete(config: &AppConfig, args: &[String]) -> Result<()> {
    let row_id = parse_row_id(args)?;
    let mut session = Session::open(config);
    let mut collection = session.load()?;

    if let Err(e) = apply_delete(&mut collection, row_id) {
        session.record("delete-rejected", Some(row_id));
        return Err(e);
    }
    session.record("deleted", Some(row_id));
    session.save(&collection)?;
    println!("Deleted row {row_id}");
    Ok(())
}

/// The last-row rule wins over an unknown id, same as in the TUI.
pub fn apply_delete(collection: &mut Collection, row_id: RowId) -> Result<()> {
    let before = collection.len();
    collection.delete_row(row_id)?;
    if collection.len() == before {
        bail!("No row with id {row_id}");
    }
    Ok(())
}

pub fn handle_reset(config: &AppConfig) -> Result<()> {
    let mut session = Session::open(config);
    session.record("reset", None);
    session.save(&Collection::reset())?;
    println!("Reset to a single empty row");
    Ok(())
}

/// `subtasks log`: the most recent activity entries.
pub fn handle_log(config: &AppConfig) -> Result<()> {
    let session = Session::open(config);
    for event in session.log().read_events(Some(50)) {
        let mut line = format!("{} {:<18}", event.timestamp, event.event);
        if let Some(row_id) = event.row_id {
            line.push_str(&format!(" row {row_id}"));
        }
        if let Some(msg) = &event.message {
            line.push_str(&format!(" {msg}"));
        }
        println!("{line}");
    }
    Ok(())
}

fn parse_row_id(args: &[String]) -> Result<RowId> {
    let Some(raw) = args.first() else {
        bail!("Usage: subtasks delete <rowid>");
    };
    raw.parse::<RowId>()
        .with_context(|| format!("Invalid row id: {raw}"))
}

/// Parse `subtasks add` arguments.
///
/// Supported forms:
///   subtasks add "Write the migration"
///   subtasks add Write the migration
///   subtasks add "Write the migration" -d "Backfill old rows" -p major -a inherit
pub fn parse_add_args(args: &[String]) -> Result<AddArgs> {
    if args.is_empty() {
        bail!("Usage: subtasks add <summary> [-d <description>] [-p <priority>] [-a <assignee>]\n\nExamples:\n  subtasks add \"Write the migration\"\n  subtasks add \"Write the migration\" -d \"Backfill old rows\" -p major");
    }

    let mut summary_parts: Vec<String> = Vec::new();
    let mut description: Option<String> = None;
    let mut priority: Option<Priority> = None;
    let mut assignee: Option<Assignee> = None;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            flag @ ("-d" | "--desc" | "--description" | "-p" | "--priority" | "-a"
            | "--assignee") => {
                i += 1;
                let Some(value) = args.get(i) else {
                    bail!("Missing value for {flag} flag");
                };
                match flag {
                    "-d" | "--desc" | "--description" => description = Some(value.clone()),
                    "-p" | "--priority" => {
                        priority = Some(Priority::parse(value).with_context(|| {
                            format!(
                                "Unknown priority {value:?} (expected one of: {})",
                                Priority::ALL.map(|p| p.as_str()).join(", ")
                            )
                        })?);
                    }
                    _ => {
                        assignee = Some(Assignee::parse(value).with_context(|| {
                            format!("Unknown assignee {value:?} (expected @current/me or @inherit)")
                        })?);
                    }
                }
            }
            _ => {
                summary_parts.push(args[i].clone());
            }
        }
        i += 1;
    }

    let summary = summary_parts.join(" ");
    if summary.is_empty() {
        bail!("Sub-task summary cannot be empty");
    }

    Ok(AddArgs {
        summary,
        description,
        priority,
        assignee,
    })
}

pub fn print_help() {
    println!("subtasks: draft JIRA sub-tasks and print them in bulk-import form\n");
    println!("USAGE:");
    println!("  subtasks                  Launch the editor");
    println!("  subtasks add <summary>    Append a sub-task");
    println!("  subtasks print            Print the result lines");
    println!("  subtasks delete <rowid>   Delete a row");
    println!("  subtasks reset            Start over with one empty row");
    println!("  subtasks log              Show recent activity");
    println!();
    println!("ADD OPTIONS:");
    println!("  -d, --desc <text>         Description");
    println!("  -p, --priority <p>        @inherit, blocker, critical, major, minor, trivial");
    println!("  -a, --assignee <a>        @current (me) or @inherit");
    println!();
    println!("Paste the printed lines into More → Create multiple sub-tasks on the parent issue.");
}
