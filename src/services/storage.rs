use anyhow::Result;
use chrono::Local;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// One persisted chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: i64,
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub source: String,
    pub timestamp: String,
}

/// SQLite-backed persistence port for the widget: chat history plus a small
/// key-value table for UI preferences (theme flag, user profile). The core
/// resolver and completion client never touch this; it is owned by the
/// serving layer.
pub struct SqliteStorage {
    conn: Connection,
    session_id: String,
}

impl SqliteStorage {
    /// Creates or opens the database.
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = db_path.unwrap_or_else(|| {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".config/ai-grow/history.db")
        });

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        log::info!("📦 History database opened: {}", db_path.display());

        Self::init_schema(&conn)?;

        let session_id = Uuid::new_v4().to_string();
        log::info!("📍 Session ID: {}", session_id);

        Ok(Self { conn, session_id })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS chat_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                source TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_chat_session_id ON chat_history(session_id)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        log::info!("✓ Storage schema initialized");
        Ok(())
    }

    /// Appends one message to the current session's history.
    pub fn save_message(&self, role: &str, content: &str, source: &str) -> Result<()> {
        let timestamp = Local::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO chat_history (session_id, role, content, source, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![&self.session_id, role, content, source, &timestamp],
        )?;

        let preview: String = content.chars().take(50).collect();
        log::debug!("💾 Saved message: {} - {}", role, preview);
        Ok(())
    }

    /// Loads the full history of the current session, oldest first.
    pub fn load_session_history(&self) -> Result<Vec<StoredMessage>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, role, content, source, timestamp
             FROM chat_history
             WHERE session_id = ?1
             ORDER BY id ASC",
        )?;

        let messages = stmt.query_map(params![&self.session_id], |row| {
            Ok(StoredMessage {
                id: row.get(0)?,
                session_id: row.get(1)?,
                role: row.get(2)?,
                content: row.get(3)?,
                source: row.get(4)?,
                timestamp: row.get(5)?,
            })
        })?;

        let mut result = Vec::new();
        for msg in messages {
            result.push(msg?);
        }

        Ok(result)
    }

    /// Deletes the current session's history, returning how many rows went.
    pub fn clear_session_history(&self) -> Result<usize> {
        let affected = self.conn.execute(
            "DELETE FROM chat_history WHERE session_id = ?1",
            params![&self.session_id],
        )?;

        log::warn!("🗑️  Cleared {} messages from the current session", affected);
        Ok(affected)
    }

    /// Total number of messages across all sessions.
    pub fn message_count(&self) -> Result<usize> {
        let count: usize =
            self.conn
                .query_row("SELECT COUNT(*) FROM chat_history", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Stores a UI preference, overwriting any previous value.
    pub fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }
}
