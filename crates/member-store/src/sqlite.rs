//! SQLite member store, either file-backed or held in memory.

use crate::error::StoreError;
use crate::store::MemberStore;
use crate::types::*;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task;
use tracing::{debug, info, instrument};

/// Path value that selects a private in-memory database.
pub const MEMORY_PATH: &str = ":memory:";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS members (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    aka TEXT NOT NULL,
    name TEXT NOT NULL,
    student_id TEXT NOT NULL UNIQUE,
    faculty TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    discord_name TEXT NOT NULL,
    level TEXT NOT NULL,
    interests TEXT NOT NULL,
    experience TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;

const SELECT_COLUMNS: &str = "SELECT id, aka, name, student_id, faculty, email, discord_name, \
     level, interests, experience, created_at FROM members";

/// SQLite-backed member store.
///
/// A single connection is opened at construction and shared for the life of
/// the store, so an in-memory database keeps its rows between requests.
/// The `UNIQUE` columns are the uniqueness constraint for both strategies.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    strategy: UniquenessStrategy,
    location: PathBuf,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    ///
    /// Pass [`MEMORY_PATH`] for an in-memory database.
    pub async fn open(
        path: impl AsRef<Path>,
        strategy: UniquenessStrategy,
    ) -> Result<Self, StoreError> {
        let location = path.as_ref().to_path_buf();
        let open_path = location.clone();

        let conn = task::spawn_blocking(move || -> Result<Connection, StoreError> {
            let conn = if open_path == Path::new(MEMORY_PATH) {
                Connection::open_in_memory()?
            } else {
                if let Some(parent) = open_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        StoreError::Backend(format!("Failed to create {:?}: {}", parent, e))
                    })?;
                }
                Connection::open(&open_path)?
            };
            conn.busy_timeout(Duration::from_secs(5))?;
            conn.execute_batch(SCHEMA)?;
            Ok(conn)
        })
        .await??;

        info!(location = ?location, %strategy, "SQLite member store ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            strategy,
            location,
        })
    }

    /// Open a private in-memory database.
    pub async fn in_memory(strategy: UniquenessStrategy) -> Result<Self, StoreError> {
        Self::open(MEMORY_PATH, strategy).await
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Run `f` against the shared connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Backend("SQLite connection lock poisoned".into()))?;
            f(&guard)
        })
        .await?
    }
}

fn registration_from_row(row: &Row<'_>) -> rusqlite::Result<Registration> {
    let interests: String = row.get(8)?;
    Ok(Registration {
        id: row.get(0)?,
        aka: row.get(1)?,
        name: row.get(2)?,
        student_id: row.get(3)?,
        faculty: row.get(4)?,
        email: row.get(5)?,
        discord_name: row.get(6)?,
        level: row.get(7)?,
        interests: split_interests(&interests),
        experience: row.get(9)?,
        created_at: row.get(10)?,
    })
}

#[async_trait]
impl MemberStore for SqliteStore {
    fn strategy(&self) -> UniquenessStrategy {
        self.strategy
    }

    #[instrument(skip(self))]
    async fn find_by_student_id_or_email(
        &self,
        student_id: &str,
        email: &str,
    ) -> Result<Option<Registration>, StoreError> {
        let student_id = student_id.to_string();
        let email = email.to_string();

        self.with_conn(move |conn| {
            let sql = format!("{} WHERE student_id = ?1 OR email = ?2 LIMIT 1", SELECT_COLUMNS);
            Ok(conn
                .query_row(&sql, params![student_id, email], registration_from_row)
                .optional()?)
        })
        .await
    }

    #[instrument(skip(self, registration), fields(student_id = %registration.student_id))]
    async fn insert(&self, registration: &NewRegistration) -> Result<PersistedId, StoreError> {
        let r = registration.clone();

        let id = self
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO members (aka, name, student_id, faculty, email, discord_name, \
                     level, interests, experience, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        r.aka,
                        r.name,
                        r.student_id,
                        r.faculty,
                        r.email,
                        r.discord_name,
                        r.level,
                        join_interests(&r.interests),
                        r.experience,
                        r.created_at,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        debug!(id, "Inserted member");
        Ok(id)
    }

    async fn get(&self, id: PersistedId) -> Result<Option<Registration>, StoreError> {
        self.with_conn(move |conn| {
            let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
            Ok(conn
                .query_row(&sql, params![id], registration_from_row)
                .optional()?)
        })
        .await
    }

    async fn count(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))?;
            Ok(usize::try_from(count).unwrap_or_default())
        })
        .await
    }
}
