//! Database operations for TalkLog
//!
//! Sessions are stored one row each, with the post serialized to a JSON
//! blob. The database never inspects post structure; the JSON form of
//! [`Post`](crate::types::Post) is the persistence contract.

use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::path::Path;

use crate::error::{DbError, Result};
use crate::types::Post;

/// A stored editing session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub post: Post,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection
    pub async fn new(db_path: &str) -> Result<Self> {
        // Expand path and create parent directories
        let expanded_path = shellexpand::tilde(db_path).to_string();
        let path = Path::new(&expanded_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(DbError::IoError)?;
        }

        // Forward slashes work on both Windows and Unix in SQLite URLs.
        // mode=rwc creates the database file if it doesn't exist.
        let db_url = format!("sqlite://{}?mode=rwc", expanded_path.replace('\\', "/"));

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(DbError::SqlxError)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(DbError::MigrationError)?;

        Ok(Self { pool })
    }

    /// Insert a new session
    pub async fn create_session(&self, session: &Session) -> Result<()> {
        let post_json = serde_json::to_string(&session.post).map_err(DbError::CorruptPost)?;

        sqlx::query(
            r#"
            INSERT INTO sessions (id, title, post, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.id)
        .bind(&session.title)
        .bind(post_json)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DbError::SqlxError)?;

        Ok(())
    }

    /// Overwrite the stored post for a session; returns whether a row was
    /// updated
    pub async fn update_session_post(
        &self,
        session_id: &str,
        post: &Post,
        updated_at: i64,
    ) -> Result<bool> {
        let post_json = serde_json::to_string(post).map_err(DbError::CorruptPost)?;

        let result = sqlx::query(
            r#"
            UPDATE sessions SET title = ?, post = ?, updated_at = ? WHERE id = ?
            "#,
        )
        .bind(&post.title)
        .bind(post_json)
        .bind(updated_at)
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(DbError::SqlxError)?;

        Ok(result.rows_affected() > 0)
    }

    /// Get a session by ID
    pub async fn get_session(&self, session_id: &str) -> Result<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, post, created_at, updated_at
            FROM sessions WHERE id = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::SqlxError)?;

        row.map(row_to_session).transpose()
    }

    /// List sessions, most recently updated first
    pub async fn list_sessions(&self, limit: usize) -> Result<Vec<Session>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, post, created_at, updated_at
            FROM sessions
            ORDER BY updated_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(DbError::SqlxError)?;

        rows.into_iter().map(row_to_session).collect()
    }

    /// Delete a session; returns whether a row was removed
    pub async fn delete_session(&self, session_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions WHERE id = ?
            "#,
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(DbError::SqlxError)?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_session(row: sqlx::sqlite::SqliteRow) -> Result<Session> {
    let post_json: String = row.get("post");
    let post: Post = serde_json::from_str(&post_json).map_err(DbError::CorruptPost)?;

    Ok(Session {
        id: row.get("id"),
        title: row.get("title"),
        post,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Block, BlockKind};
    use tempfile::TempDir;

    async fn setup_db() -> (Database, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Database::new(db_path.to_str().unwrap()).await.unwrap();
        (db, temp_dir)
    }

    fn sample_session() -> Session {
        let post = Post {
            title: "Lunch log".to_string(),
            content: vec![Block::with_value(BlockKind::Text, "We ate well")],
            tags: vec!["food".to_string()],
        };
        let now = chrono::Utc::now().timestamp();
        Session {
            id: uuid::Uuid::new_v4().to_string(),
            title: post.title.clone(),
            post,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let (db, _tmp) = setup_db().await;
        let session = sample_session();

        db.create_session(&session).await.unwrap();
        let fetched = db.get_session(&session.id).await.unwrap().unwrap();

        assert_eq!(fetched, session);
    }

    #[tokio::test]
    async fn test_get_missing_session() {
        let (db, _tmp) = setup_db().await;

        let fetched = db.get_session("no-such-id").await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_update_session_post() {
        let (db, _tmp) = setup_db().await;
        let session = sample_session();
        db.create_session(&session).await.unwrap();

        let revised = session.post.set_title("Dinner log");
        let updated = db
            .update_session_post(&session.id, &revised, session.updated_at + 5)
            .await
            .unwrap();
        assert!(updated);

        let fetched = db.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(fetched.post.title, "Dinner log");
        assert_eq!(fetched.title, "Dinner log");
        assert_eq!(fetched.updated_at, session.updated_at + 5);
    }

    #[tokio::test]
    async fn test_update_missing_session_reports_no_rows() {
        let (db, _tmp) = setup_db().await;

        let updated = db
            .update_session_post("no-such-id", &Post::new(), 0)
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_list_sessions_orders_by_updated_at() {
        let (db, _tmp) = setup_db().await;

        let mut older = sample_session();
        older.updated_at -= 100;
        let newer = sample_session();

        db.create_session(&older).await.unwrap();
        db.create_session(&newer).await.unwrap();

        let listed = db.list_sessions(10).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }

    #[tokio::test]
    async fn test_list_sessions_respects_limit() {
        let (db, _tmp) = setup_db().await;

        for _ in 0..3 {
            db.create_session(&sample_session()).await.unwrap();
        }

        let listed = db.list_sessions(2).await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let (db, _tmp) = setup_db().await;
        let session = sample_session();
        db.create_session(&session).await.unwrap();

        assert!(db.delete_session(&session.id).await.unwrap());
        assert!(db.get_session(&session.id).await.unwrap().is_none());
        assert!(!db.delete_session(&session.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_post_round_trips_through_json_blob() {
        let (db, _tmp) = setup_db().await;

        let mut session = sample_session();
        session.post = session
            .post
            .add_block(BlockKind::Quote)
            .add_block(BlockKind::Divider)
            .add_tag("travel");
        db.create_session(&session).await.unwrap();

        let fetched = db.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(fetched.post, session.post);
    }
}
