//! Session repository
//!
//! Owns the mapping from session id to the live post and its edit history,
//! with explicit load/save lifecycle calls. One editing session is active
//! per `EditorSession`; the history is bound to that session's lifetime and
//! is rebuilt on open.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::db::{Database, Session};
use crate::error::{Result, TalklogError};
use crate::history::EditHistory;
use crate::types::Post;

/// One session's live post plus its undo/redo history
///
/// `commit` is the single mutating entry point: it applies the post and
/// records the snapshot in one call, so state and history cannot drift.
#[derive(Debug)]
pub struct EditorSession {
    id: String,
    post: Post,
    history: EditHistory,
}

impl EditorSession {
    fn new(id: String, post: Post) -> Self {
        let history = EditHistory::seeded(&post);
        Self { id, post, history }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The live post
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// Apply a committed mutation
    ///
    /// Replaces the live post and pushes the snapshot. Called once per
    /// committed document mutation (add/delete/rewrite), not per keystroke;
    /// text edits are committed by the caller on blur.
    pub fn commit(&mut self, post: Post) {
        self.history.commit(&post);
        self.post = post;
    }

    /// Step the live post back one snapshot; no-op at the boundary
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.post = snapshot;
                true
            }
            None => false,
        }
    }

    /// Step the live post forward one snapshot; no-op at the tail
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.post = snapshot;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

/// Repository of editing sessions
///
/// Persists sessions through [`Database`] and keeps the open ones in
/// memory. Opening loads the stored post and seeds a fresh history; saving
/// writes the live post back; closing drops the in-memory state (and its
/// history) without saving.
pub struct SessionRepository {
    db: Arc<Database>,
    open: HashMap<String, EditorSession>,
}

impl SessionRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            open: HashMap::new(),
        }
    }

    /// Create a new empty session, persist it, and open it for editing
    pub async fn create(&mut self) -> Result<&mut EditorSession> {
        let now = Utc::now().timestamp();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            post: Post::new(),
            created_at: now,
            updated_at: now,
        };
        self.db.create_session(&session).await?;
        debug!(session_id = %session.id, "created session");

        let editor = EditorSession::new(session.id.clone(), session.post);
        Ok(self.open.entry(session.id).or_insert(editor))
    }

    /// Open a stored session for editing
    ///
    /// Re-opening an already open session keeps its in-memory state and
    /// history rather than reloading.
    pub async fn open(&mut self, session_id: &str) -> Result<&mut EditorSession> {
        if !self.open.contains_key(session_id) {
            let session = self.db.get_session(session_id).await?.ok_or_else(|| {
                TalklogError::InvalidInput(format!("Session not found: {}", session_id))
            })?;
            debug!(session_id = %session.id, "opened session");
            self.open.insert(
                session.id.clone(),
                EditorSession::new(session.id, session.post),
            );
        }
        self.open.get_mut(session_id).ok_or_else(|| {
            TalklogError::InvalidInput(format!("Session not found: {}", session_id))
        })
    }

    /// Access an open session without touching the store
    pub fn get_open(&mut self, session_id: &str) -> Option<&mut EditorSession> {
        self.open.get_mut(session_id)
    }

    /// Persist an open session's live post
    ///
    /// Fails with `InvalidInput` if the stored row has been deleted since
    /// the session was opened, rather than dropping the edits silently.
    pub async fn save(&self, session_id: &str) -> Result<()> {
        let editor = self.open.get(session_id).ok_or_else(|| {
            TalklogError::InvalidInput(format!("Session not open: {}", session_id))
        })?;
        let updated = self
            .db
            .update_session_post(session_id, editor.post(), Utc::now().timestamp())
            .await?;
        if !updated {
            return Err(TalklogError::InvalidInput(format!(
                "Session not found: {}",
                session_id
            )));
        }
        debug!(session_id, "saved session");
        Ok(())
    }

    /// Drop an open session's in-memory state without saving
    pub fn close(&mut self, session_id: &str) {
        self.open.remove(session_id);
    }

    /// List stored sessions, most recently updated first
    pub async fn list(&self, limit: usize) -> Result<Vec<Session>> {
        self.db.list_sessions(limit).await
    }

    /// Delete a session from the store and drop any open state
    pub async fn delete(&mut self, session_id: &str) -> Result<()> {
        self.open.remove(session_id);
        let removed = self.db.delete_session(session_id).await?;
        if !removed {
            return Err(TalklogError::InvalidInput(format!(
                "Session not found: {}",
                session_id
            )));
        }
        debug!(session_id, "deleted session");
        Ok(())
    }
}
