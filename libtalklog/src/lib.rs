//! TalkLog - turn a conversation log into an editable blog draft
//!
//! This library provides the post document model (typed content blocks),
//! the undo/redo edit history, the clipboard serializer, and the session
//! repository used by the TalkLog tools.

pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod export;
pub mod history;
pub mod logging;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use db::{Database, Session};
pub use error::{Result, TalklogError};
pub use export::ClipboardPayload;
pub use history::EditHistory;
pub use session::{EditorSession, SessionRepository};
pub use types::{Block, BlockKind, Post};
