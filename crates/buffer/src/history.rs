// Chunk: docs/chunks/undo_history - Grouped undo/redo history

//! Linear undo/redo history of grouped primitive edits.
//!
//! The history is one sequence of committed [`UndoGroup`]s plus a pointer.
//! Groups before the pointer are applied (undoable), groups from the pointer
//! on are undone (redoable). Recording a new edit while redoable groups exist
//! discards them.
//!
//! Edits are collected into an *open* group between [`UndoHistory::begin_group`]
//! and [`UndoHistory::flush_group`]. Begin/flush pairs nest: only the outermost
//! flush commits. An edit recorded while no group is open becomes a committed
//! group of its own.
//!
//! The history never touches text. Replaying records against the document is
//! the job of [`TextBuffer`](crate::TextBuffer).

use tracing::debug;

use crate::action::{ActionKind, EditKind};
use crate::types::Position;

/// One primitive edit as it was applied to the document.
///
/// For an insert, `start..end` is the span the text occupies after the edit.
/// For a delete, `start..end` is the span the text occupied before the edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRecord {
    pub kind: EditKind,
    pub start: Position,
    pub end: Position,
    pub text: String,
    pub action: ActionKind,
}

/// An atomic, user-undoable unit of one or more primitive edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoGroup {
    records: Vec<EditRecord>,
}

impl UndoGroup {
    /// Records in the order they were applied.
    pub fn records(&self) -> &[EditRecord] {
        &self.records
    }

    /// The action this group is presented as.
    ///
    /// Auto-indent side effects never name a group unless they are all it holds.
    pub fn action(&self) -> Option<ActionKind> {
        self.records
            .iter()
            .rev()
            .map(|r| r.action)
            .find(|a| *a != ActionKind::AutoIndent)
            .or_else(|| self.records.last().map(|r| r.action))
    }

    fn is_mergeable(&self) -> bool {
        !self.records.is_empty() && self.records.iter().all(|r| r.action.is_mergeable())
    }
}

#[derive(Debug)]
struct OpenGroup {
    records: Vec<EditRecord>,
    depth: usize,
}

/// The undo/redo history of one document.
#[derive(Debug)]
pub struct UndoHistory {
    groups: Vec<UndoGroup>,
    /// Number of groups currently applied.
    position: usize,
    open: Option<OpenGroup>,
    /// Pointer value at the last save; `None` once that state is unreachable.
    saved_position: Option<usize>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            position: 0,
            open: None,
            saved_position: Some(0),
        }
    }

    /// Opens an undo group, or nests inside the one already open.
    ///
    /// With `merge`, the trailing committed group is reopened instead of
    /// starting a new one, provided nothing is redoable and that group holds
    /// only typing (and its auto-indent side effects).
    pub fn begin_group(&mut self, merge: bool) {
        if let Some(open) = self.open.as_mut() {
            open.depth += 1;
            return;
        }

        let can_merge = merge
            && self.position == self.groups.len()
            && self.groups.last().is_some_and(UndoGroup::is_mergeable);

        let records = if can_merge {
            let group = self.groups.pop().map(|g| g.records).unwrap_or_default();
            if self.saved_position == Some(self.position) {
                // The save point sat at the end of the reopened group.
                self.saved_position = None;
            }
            self.position -= 1;
            debug!(records = group.len(), "reopened trailing undo group for merge");
            group
        } else {
            debug!("opened undo group");
            Vec::new()
        };

        self.open = Some(OpenGroup { records, depth: 1 });
    }

    /// Closes the innermost open group; the outermost close commits it.
    ///
    /// Committing a group with no records creates no history entry.
    pub fn flush_group(&mut self) {
        let Some(open) = self.open.as_mut() else {
            return;
        };
        if open.depth > 1 {
            open.depth -= 1;
            return;
        }
        self.commit_open();
    }

    /// Returns true while a group is open.
    pub fn is_group_open(&self) -> bool {
        self.open.is_some()
    }

    fn commit_open(&mut self) {
        let Some(open) = self.open.take() else {
            return;
        };
        if open.records.is_empty() {
            debug!("discarded empty undo group");
            return;
        }
        debug!(records = open.records.len(), "committed undo group");
        self.groups.push(UndoGroup {
            records: open.records,
        });
        self.position = self.groups.len();
    }

    /// Appends a record to the open group, or commits it as its own group.
    pub fn record(&mut self, record: EditRecord) {
        self.discard_redo();
        match self.open.as_mut() {
            Some(open) => open.records.push(record),
            None => {
                self.groups.push(UndoGroup {
                    records: vec![record],
                });
                self.position = self.groups.len();
            }
        }
    }

    fn discard_redo(&mut self) {
        if self.position < self.groups.len() {
            debug!(
                discarded = self.groups.len() - self.position,
                "discarding redoable groups"
            );
            self.groups.truncate(self.position);
            if self.saved_position.is_some_and(|saved| saved > self.position) {
                self.saved_position = None;
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0 || self.open.as_ref().is_some_and(|o| !o.records.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        self.position < self.groups.len()
            && self.open.as_ref().map_or(true, |o| o.records.is_empty())
    }

    /// Moves the pointer back one group and returns that group's records.
    ///
    /// An open group is committed first so that it is the one undone.
    pub fn step_undo(&mut self) -> Option<Vec<EditRecord>> {
        self.commit_open();
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        Some(self.groups[self.position].records.clone())
    }

    /// Moves the pointer forward one group and returns that group's records.
    pub fn step_redo(&mut self) -> Option<Vec<EditRecord>> {
        if self.open.as_ref().is_some_and(|o| !o.records.is_empty()) {
            return None;
        }
        let group = self.groups.get(self.position)?;
        self.position += 1;
        Some(group.records.clone())
    }

    /// Label of the group the next undo would revert.
    pub fn undo_description(&self) -> Option<&'static str> {
        let index = self.position.checked_sub(1)?;
        self.groups[index].action().map(ActionKind::description)
    }

    /// Label of the group the next redo would reapply.
    pub fn redo_description(&self) -> Option<&'static str> {
        self.groups
            .get(self.position)
            .and_then(UndoGroup::action)
            .map(ActionKind::description)
    }

    /// Records the current state as the saved one.
    pub fn mark_saved(&mut self) {
        self.saved_position = Some(self.position);
    }

    /// Returns true when the document differs from the last saved state.
    pub fn is_modified(&self) -> bool {
        self.open.as_ref().is_some_and(|o| !o.records.is_empty())
            || self.saved_position != Some(self.position)
    }

    /// Committed groups, oldest first.
    pub fn groups(&self) -> &[UndoGroup] {
        &self.groups
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(line: usize, col: usize, text: &str, action: ActionKind) -> EditRecord {
        EditRecord {
            kind: EditKind::Insert,
            start: Position::new(line, col),
            end: Position::new(line, col + text.chars().count()),
            text: text.to_string(),
            action,
        }
    }

    fn typed(col: usize, ch: &str) -> EditRecord {
        insert(0, col, ch, ActionKind::Typing)
    }

    // ==================== Grouping ====================

    #[test]
    fn test_record_outside_group_commits_immediately() {
        let mut history = UndoHistory::new();
        history.record(typed(0, "a"));
        history.record(typed(1, "b"));
        assert_eq!(history.groups().len(), 2);
        assert!(history.can_undo());
    }

    #[test]
    fn test_group_collects_records_until_flush() {
        let mut history = UndoHistory::new();
        history.begin_group(false);
        history.record(typed(0, "a"));
        history.record(typed(1, "b"));
        assert!(history.groups().is_empty());
        history.flush_group();
        assert_eq!(history.groups().len(), 1);
        assert_eq!(history.groups()[0].records().len(), 2);
    }

    #[test]
    fn test_empty_group_creates_no_entry() {
        let mut history = UndoHistory::new();
        history.begin_group(false);
        history.flush_group();
        assert!(history.groups().is_empty());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_nested_groups_commit_at_outermost_flush() {
        let mut history = UndoHistory::new();
        history.begin_group(false);
        history.record(typed(0, "a"));
        history.begin_group(false);
        history.record(typed(1, "b"));
        history.flush_group();
        assert!(history.is_group_open());
        history.flush_group();
        assert!(!history.is_group_open());
        assert_eq!(history.groups().len(), 1);
    }

    // ==================== Merging ====================

    #[test]
    fn test_merge_appends_to_trailing_typing_group() {
        let mut history = UndoHistory::new();
        for (i, ch) in ["a", "b", "c"].iter().enumerate() {
            history.begin_group(true);
            history.record(typed(i, ch));
            history.flush_group();
        }
        assert_eq!(history.groups().len(), 1);
        assert_eq!(history.groups()[0].records().len(), 3);
    }

    #[test]
    fn test_merge_refused_after_non_typing_group() {
        let mut history = UndoHistory::new();
        history.begin_group(true);
        history.record(typed(0, "a"));
        history.flush_group();
        history.record(insert(0, 1, "xyz", ActionKind::Paste));
        history.begin_group(true);
        history.record(typed(4, "b"));
        history.flush_group();
        assert_eq!(history.groups().len(), 3);
    }

    #[test]
    fn test_merge_refused_when_redo_available() {
        let mut history = UndoHistory::new();
        history.begin_group(true);
        history.record(typed(0, "a"));
        history.flush_group();
        history.begin_group(true);
        history.record(typed(1, "b"));
        history.flush_group();
        // Both merged; undo then type again.
        history.step_undo();
        history.begin_group(true);
        history.record(typed(0, "z"));
        history.flush_group();
        assert_eq!(history.groups().len(), 1);
        assert_eq!(history.groups()[0].records()[0].text, "z");
    }

    // ==================== Undo / Redo ====================

    #[test]
    fn test_undo_redo_moves_pointer() {
        let mut history = UndoHistory::new();
        history.record(typed(0, "a"));
        history.record(typed(1, "b"));

        let undone = history.step_undo().unwrap();
        assert_eq!(undone[0].text, "b");
        assert!(history.can_redo());

        let redone = history.step_redo().unwrap();
        assert_eq!(redone[0].text, "b");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_empty_stacks_return_none() {
        let mut history = UndoHistory::new();
        assert!(history.step_undo().is_none());
        assert!(history.step_redo().is_none());
    }

    #[test]
    fn test_new_edit_after_undo_discards_redo() {
        let mut history = UndoHistory::new();
        history.record(typed(0, "a"));
        history.record(typed(1, "b"));
        history.step_undo();
        history.record(typed(1, "c"));
        assert!(!history.can_redo());
        assert_eq!(history.groups().len(), 2);
        assert_eq!(history.groups()[1].records()[0].text, "c");
    }

    #[test]
    fn test_undo_commits_open_group_first() {
        let mut history = UndoHistory::new();
        history.begin_group(false);
        history.record(typed(0, "a"));
        let undone = history.step_undo().unwrap();
        assert_eq!(undone.len(), 1);
        assert!(!history.is_group_open());
    }

    // ==================== Descriptions ====================

    #[test]
    fn test_descriptions_skip_auto_indent() {
        let mut history = UndoHistory::new();
        history.begin_group(false);
        history.record(typed(0, "\n"));
        history.record(insert(1, 0, "    ", ActionKind::AutoIndent));
        history.flush_group();
        assert_eq!(history.undo_description(), Some("typing"));
        assert_eq!(history.redo_description(), None);
        history.step_undo();
        assert_eq!(history.undo_description(), None);
        assert_eq!(history.redo_description(), Some("typing"));
    }

    // ==================== Modified state ====================

    #[test]
    fn test_modified_tracks_save_point() {
        let mut history = UndoHistory::new();
        assert!(!history.is_modified());
        history.record(typed(0, "a"));
        assert!(history.is_modified());
        history.mark_saved();
        assert!(!history.is_modified());
        history.record(typed(1, "b"));
        assert!(history.is_modified());
        history.step_undo();
        assert!(!history.is_modified());
    }

    #[test]
    fn test_save_point_lost_when_redo_discarded() {
        let mut history = UndoHistory::new();
        history.record(typed(0, "a"));
        history.mark_saved();
        history.step_undo();
        history.record(typed(0, "b"));
        history.step_undo();
        assert!(history.is_modified());
    }

    #[test]
    fn test_merge_into_saved_group_is_modified() {
        let mut history = UndoHistory::new();
        history.begin_group(true);
        history.record(typed(0, "a"));
        history.flush_group();
        history.mark_saved();
        history.begin_group(true);
        history.record(typed(1, "b"));
        history.flush_group();
        assert!(history.is_modified());
    }
}
