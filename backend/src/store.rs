//! Relational persistence for task rows.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use shared::{Task, TaskStatus};
use sqlx::{
    sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow},
    Row,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt timestamp in column '{column}': {source}")]
    Timestamp {
        column: &'static str,
        #[source]
        source: chrono::ParseError,
    },
}

/// A task row that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl NewTask {
    fn with_id(self, id: i64) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            completed: self.completed,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

/// Storage backend for tasks. Every method is a single statement, so a
/// failed write never leaves a partial row behind.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    async fn get(&self, id: i64) -> Result<Option<Task>, StoreError>;

    /// Persists a new row and returns it with the id the database assigned.
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Overwrites the row with `task.id`. Returns false if no such row exists.
    async fn update(&self, task: &Task) -> Result<bool, StoreError>;

    /// Returns false if no such row exists.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}

/// SQLite-backed task store
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    /// Connects to `url` and creates the `tarefas` table if needed.
    ///
    /// In-memory databases live and die with their connection, so those get a
    /// single connection that is never recycled.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = options.connect(url).await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS tarefas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                titulo TEXT NOT NULL,
                descricao TEXT NOT NULL,
                status TEXT NOT NULL,
                concluida INTEGER NOT NULL DEFAULT 0,
                criada_em TEXT NOT NULL,
                concluida_em TEXT
            )
            ",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:").await
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(column: &'static str, text: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| StoreError::Timestamp { column, source })
}

fn task_from_row(row: &SqliteRow) -> Result<Task, StoreError> {
    let status: String = row.try_get("status")?;
    let created_at: String = row.try_get("criada_em")?;
    let completed_at: Option<String> = row.try_get("concluida_em")?;

    Ok(Task {
        id: row.try_get("id")?,
        title: row.try_get("titulo")?,
        description: row.try_get("descricao")?,
        status: TaskStatus::parse(&status).unwrap_or_default(),
        completed: row.try_get("concluida")?,
        created_at: parse_timestamp("criada_em", &created_at)?,
        completed_at: completed_at
            .as_deref()
            .map(|text| parse_timestamp("concluida_em", text))
            .transpose()?,
    })
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT id, titulo, descricao, status, concluida, criada_em, concluida_em
            FROM tarefas
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(task_from_row).collect()
    }

    async fn get(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let row = sqlx::query(
            r"
            SELECT id, titulo, descricao, status, concluida, criada_em, concluida_em
            FROM tarefas
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(task_from_row).transpose()
    }

    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        let result = sqlx::query(
            r"
            INSERT INTO tarefas (titulo, descricao, status, concluida, criada_em, concluida_em)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.label())
        .bind(task.completed)
        .bind(format_timestamp(&task.created_at))
        .bind(task.completed_at.as_ref().map(format_timestamp))
        .execute(&self.pool)
        .await?;

        Ok(task.with_id(result.last_insert_rowid()))
    }

    async fn update(&self, task: &Task) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r"
            UPDATE tarefas
            SET titulo = ?1,
                descricao = ?2,
                status = ?3,
                concluida = ?4,
                criada_em = ?5,
                concluida_em = ?6
            WHERE id = ?7
            ",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.label())
        .bind(task.completed)
        .bind(format_timestamp(&task.created_at))
        .bind(task.completed_at.as_ref().map(format_timestamp))
        .bind(task.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tarefas WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tarefas")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}
