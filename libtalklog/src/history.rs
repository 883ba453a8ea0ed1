//! Undo/redo history over post snapshots
//!
//! A linear stack of immutable deep copies of a post with a cursor into it.
//! Committing after an undo discards every entry past the cursor before
//! appending (branch truncation), so redo history is lost on any new edit.
//! One history instance is scoped to one editing session.

use crate::types::Post;

/// Linear undo/redo stack of post snapshots
///
/// `commit` is the only mutating entry point: callers apply an edit and
/// commit the result in one call, rather than updating state and pushing
/// history as two separately orderable steps. Entries are clones of owned
/// data, so a stored snapshot never shares structure with the live post.
#[derive(Debug)]
pub struct EditHistory {
    entries: Vec<Post>,
    /// Index of the current entry, or -1 while empty
    cursor: isize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: -1,
        }
    }

    /// Create a history seeded with an initial snapshot
    ///
    /// Used when opening a stored session so the first undo returns to the
    /// loaded state.
    pub fn seeded(initial: &Post) -> Self {
        let mut history = Self::new();
        history.commit(initial);
        history
    }

    /// Record a committed mutation
    ///
    /// Truncates any redo entries past the cursor, appends a deep copy of
    /// `post` and moves the cursor to the tail. Called once per committed
    /// document mutation, not per keystroke.
    pub fn commit(&mut self, post: &Post) {
        self.entries.truncate((self.cursor + 1) as usize);
        self.entries.push(post.clone());
        self.cursor = self.entries.len() as isize - 1;
    }

    /// Step back one entry
    ///
    /// Returns the snapshot to apply, or `None` at the boundary (silent
    /// no-op, not an error).
    pub fn undo(&mut self) -> Option<Post> {
        if self.cursor <= 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor as usize].clone())
    }

    /// Step forward one entry
    ///
    /// Returns the snapshot to apply, or `None` at the tail.
    pub fn redo(&mut self) -> Option<Post> {
        if self.cursor >= self.entries.len() as isize - 1 {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor as usize].clone())
    }

    /// Whether an undo step is available
    ///
    /// UI affordances must be enabled exactly when this is true.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo step is available
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len() as isize - 1
    }

    /// The snapshot at the cursor, if any
    pub fn current(&self) -> Option<&Post> {
        if self.cursor < 0 {
            return None;
        }
        self.entries.get(self.cursor as usize)
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True while no snapshot has been committed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Post {
        Post::new().set_title(title)
    }

    #[test]
    fn test_empty_history() {
        let mut history = EditHistory::new();

        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_commit_moves_cursor_to_tail() {
        let mut history = EditHistory::new();
        history.commit(&titled("A"));
        history.commit(&titled("B"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.current().unwrap().title, "B");
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = EditHistory::new();
        history.commit(&titled("A"));
        history.commit(&titled("B"));

        assert_eq!(history.undo().unwrap().title, "A");
        assert_eq!(history.redo().unwrap().title, "B");
        // redo at the tail is a no-op, current stays at B
        assert!(history.redo().is_none());
        assert_eq!(history.current().unwrap().title, "B");
    }

    #[test]
    fn test_undo_at_first_entry_is_noop() {
        let mut history = EditHistory::new();
        history.commit(&titled("A"));

        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.current().unwrap().title, "A");
    }

    #[test]
    fn test_branch_truncation() {
        let mut history = EditHistory::new();
        history.commit(&titled("A"));
        history.commit(&titled("B"));
        history.commit(&titled("C"));

        history.undo();
        history.undo();
        assert_eq!(history.current().unwrap().title, "A");

        history.commit(&titled("D"));

        // B and C are discarded
        assert_eq!(history.len(), 2);
        assert_eq!(history.current().unwrap().title, "D");
        assert!(!history.can_redo());
        assert_eq!(history.undo().unwrap().title, "A");
        assert_eq!(history.redo().unwrap().title, "D");
    }

    #[test]
    fn test_snapshots_are_independent_of_live_post() {
        let mut history = EditHistory::new();
        let mut live = titled("A").add_block(crate::types::BlockKind::Text);
        history.commit(&live);

        let id = live.content[0].id.clone();
        live = live.update_block_value(&id, "mutated after commit");

        assert_eq!(history.current().unwrap().content[0].value, crate::types::TEXT_PLACEHOLDER);
        assert_eq!(live.content[0].value, "mutated after commit");
    }

    #[test]
    fn test_seeded_history_undoes_to_loaded_state() {
        let loaded = titled("loaded");
        let mut history = EditHistory::seeded(&loaded);
        history.commit(&titled("edited"));

        assert_eq!(history.undo().unwrap().title, "loaded");
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_can_flags_track_cursor() {
        let mut history = EditHistory::new();
        history.commit(&titled("A"));
        history.commit(&titled("B"));
        history.commit(&titled("C"));

        assert!(history.can_undo());
        assert!(!history.can_redo());

        history.undo();
        assert!(history.can_undo());
        assert!(history.can_redo());

        history.undo();
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }
}
