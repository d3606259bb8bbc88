use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::row::{Row, RowEdit, RowId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("Cannot delete the last row")]
    LastRowDeletionRejected,
}

/// The ordered set of sub-task drafts plus the id counter.
///
/// Always holds at least one row. `last_row_id` only grows, so ids of deleted
/// rows are never handed out again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(alias = "jiras")]
    rows: Vec<Row>,
    #[serde(rename = "lastRowId")]
    last_row_id: RowId,
}

impl Default for Collection {
    fn default() -> Self {
        Self::reset()
    }
}

impl Collection {
    /// A single blank row with id 0.
    pub fn reset() -> Self {
        Self {
            rows: vec![Row::new(0)],
            last_row_id: 0,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn last_row_id(&self) -> RowId {
        self.last_row_id
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, row_id: RowId) -> Option<&Row> {
        self.rows.iter().find(|r| r.row_id == row_id)
    }

    /// Appends a blank row and returns its id.
    pub fn add_row(&mut self) -> RowId {
        let row_id = self.last_row_id + 1;
        self.rows.push(Row::new(row_id));
        self.last_row_id = row_id;
        row_id
    }

    /// Removes the row with `row_id`. Refused when it would leave the
    /// collection empty; an unknown id is a no-op.
    ///
    /// Loaded snapshots are not re-checked, so every row sharing `row_id` is
    /// removed and the emptiness check counts what would remain.
    pub fn delete_row(&mut self, row_id: RowId) -> Result<(), CollectionError> {
        if self.rows.len() <= 1 || self.rows.iter().all(|r| r.row_id == row_id) {
            return Err(CollectionError::LastRowDeletionRejected);
        }
        self.rows.retain(|r| r.row_id != row_id);
        Ok(())
    }

    /// Applies `edit` to the row with `row_id`. Returns false if no row
    /// matched, in which case nothing changed.
    pub fn update_field(&mut self, row_id: RowId, edit: RowEdit) -> bool {
        match self.rows.iter_mut().find(|r| r.row_id == row_id) {
            Some(row) => {
                row.apply(edit);
                true
            }
            None => false,
        }
    }

    /// Result lines for every row with a summary, in display order.
    pub fn result_lines(&self) -> Vec<String> {
        self.rows.iter().filter_map(Row::result_line).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::{Assignee, Priority};
    use std::collections::HashSet;

    fn assert_invariants(c: &Collection) {
        assert!(!c.rows().is_empty(), "collection became empty");
        let ids: HashSet<RowId> = c.rows().iter().map(|r| r.row_id).collect();
        assert_eq!(ids.len(), c.len(), "duplicate row ids in {c:?}");
        let max = c.rows().iter().map(|r| r.row_id).max().unwrap();
        assert!(c.last_row_id() >= max);
    }

    #[test]
    fn reset_is_canonical() {
        let json = serde_json::to_value(Collection::reset()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rows": [{
                    "rowid": 0,
                    "summary": "",
                    "description": "",
                    "priority": "@inherit",
                    "assignee": "@current",
                    "fixversion": "@inherit",
                    "devpriority": "@inherit",
                }],
                "lastRowId": 0,
            })
        );
    }

    #[test]
    fn add_row_appends_with_next_id() {
        let mut c = Collection::reset();
        assert_eq!(c.add_row(), 1);
        assert_eq!(c.add_row(), 2);
        let ids: Vec<RowId> = c.rows().iter().map(|r| r.row_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(c.last_row_id(), 2);
        assert_eq!(c.get(2), Some(&Row::new(2)));
    }

    #[test]
    fn delete_last_row_is_rejected_and_unchanged() {
        let mut c = Collection::reset();
        let before = c.clone();
        assert_eq!(c.delete_row(0), Err(CollectionError::LastRowDeletionRejected));
        assert_eq!(c, before);
    }

    #[test]
    fn delete_last_row_rejected_even_for_unknown_id() {
        let mut c = Collection::reset();
        assert!(c.delete_row(42).is_err());
    }

    #[test]
    fn delete_refuses_to_empty_duplicate_id_snapshot() {
        let raw = serde_json::json!({
            "rows": [Row::new(1), Row::new(1)],
            "lastRowId": 1,
        });
        let mut c: Collection = serde_json::from_value(raw).unwrap();
        let before = c.clone();

        assert_eq!(c.delete_row(1), Err(CollectionError::LastRowDeletionRejected));
        assert_eq!(c, before);
    }

    #[test]
    fn delete_removes_every_duplicate_when_others_remain() {
        let raw = serde_json::json!({
            "rows": [Row::new(1), Row::new(2), Row::new(1)],
            "lastRowId": 2,
        });
        let mut c: Collection = serde_json::from_value(raw).unwrap();

        c.delete_row(1).unwrap();
        let ids: Vec<RowId> = c.rows().iter().map(|r| r.row_id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn delete_keeps_counter() {
        let mut c = Collection::reset();
        c.add_row();
        c.add_row();
        c.delete_row(2).unwrap();
        assert_eq!(c.last_row_id(), 2);
        assert_eq!(c.len(), 2);
        assert!(c.get(2).is_none());
    }

    #[test]
    fn delete_unknown_id_leaves_rows() {
        let mut c = Collection::reset();
        c.add_row();
        let before = c.clone();
        c.delete_row(99).unwrap();
        assert_eq!(c, before);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut c = Collection::reset();
        let a = c.add_row();
        let b = c.add_row();
        c.delete_row(b).unwrap();
        c.delete_row(a).unwrap();
        let next = c.add_row();
        assert!(next > b);
        assert_eq!(next, 3);
    }

    #[test]
    fn invariants_hold_over_mixed_sequence() {
        let mut c = Collection::reset();
        let mut last = c.last_row_id();
        // Deterministic mix of adds and deletes, including attempts to empty it.
        for step in 0..200u64 {
            if step % 3 == 0 || step % 7 == 0 {
                let target = c.rows()[(step as usize) % c.len()].row_id;
                let _ = c.delete_row(target);
            } else {
                c.add_row();
            }
            if step % 11 == 0 {
                while c.len() > 1 {
                    let id = c.rows()[0].row_id;
                    c.delete_row(id).unwrap();
                }
                assert!(c.delete_row(c.rows()[0].row_id).is_err());
            }
            assert_invariants(&c);
            assert!(c.last_row_id() >= last, "counter went backwards");
            last = c.last_row_id();
        }
    }

    #[test]
    fn update_field_touches_only_target_row() {
        let mut c = Collection::reset();
        c.add_row();
        c.add_row();
        c.add_row();
        c.update_field(1, RowEdit::Priority(Priority::Critical));
        let before = c.clone();

        assert!(c.update_field(2, RowEdit::Summary("Fix bug".into())));

        assert_eq!(c.last_row_id(), before.last_row_id());
        for (after, orig) in c.rows().iter().zip(before.rows()) {
            if orig.row_id == 2 {
                assert_eq!(after.summary, "Fix bug");
                let mut expected = orig.clone();
                expected.summary = "Fix bug".into();
                assert_eq!(after, &expected);
            } else {
                assert_eq!(after, orig);
            }
        }
        assert_eq!(
            serde_json::to_string(&c.rows()[1]).unwrap(),
            serde_json::to_string(&before.rows()[1]).unwrap()
        );
    }

    #[test]
    fn update_unknown_row_is_noop() {
        let mut c = Collection::reset();
        let before = c.clone();
        assert!(!c.update_field(5, RowEdit::Assignee(Assignee::Inherit)));
        assert_eq!(c, before);
    }

    #[test]
    fn result_lines_skip_blank_summaries_and_keep_order() {
        let mut c = Collection::reset();
        let a = c.add_row();
        let b = c.add_row();
        c.update_field(b, RowEdit::Summary("second".into()));
        c.update_field(0, RowEdit::Summary("first".into()));
        c.update_field(a, RowEdit::Description("no summary".into()));

        let lines = c.result_lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("- first / "));
        assert!(lines[1].starts_with("- second / "));
    }

    #[test]
    fn json_round_trip_preserves_everything() {
        let mut c = Collection::reset();
        let id = c.add_row();
        c.add_row();
        c.delete_row(0).unwrap();
        c.update_field(id, RowEdit::Summary("Write docs".into()));
        c.update_field(id, RowEdit::Description("line one\nline \"two\"".into()));
        c.update_field(id, RowEdit::Priority(Priority::Minor));
        c.update_field(id, RowEdit::Assignee(Assignee::Inherit));

        let bytes = serde_json::to_vec(&c).unwrap();
        let back: Collection = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn accepts_browser_snapshot_layout() {
        let raw = r#"{
            "jiras": [
                {"rowid":0,"summary":"A","description":"","priority":"blocker",
                 "assignee":"@inherit","fixversion":"@inherit","devpriority":"@inherit"},
                {"rowid":4,"summary":"","description":"d","priority":"@inherit",
                 "assignee":"@current","fixversion":"@inherit","devpriority":"@inherit"}
            ],
            "lastRowId": 6
        }"#;
        let c: Collection = serde_json::from_str(raw).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.last_row_id(), 6);
        assert_eq!(c.get(0).unwrap().priority, Priority::Blocker);
        assert_eq!(c.get(4).unwrap().description, "d");
    }

    #[test]
    fn error_message_is_user_facing() {
        assert_eq!(
            CollectionError::LastRowDeletionRejected.to_string(),
            "Cannot delete the last row"
        );
    }
}
