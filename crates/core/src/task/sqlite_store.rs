//! SQLite task storage implementation
//!
//! The schema declares `name` and `dueDate` UNIQUE, so the database has the
//! final word on duplicates even when two requests race past the use-case
//! checks. Queries run on the blocking pool.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::date::to_iso;
use super::filter::{Column, FilterBy, TaskQuery};
use super::model::{NewTask, Task};
use super::repository::TaskRepository;
use super::{duplicate_due_date, duplicate_name};
use crate::{Error, Result};

const TASK_COLUMNS: &str = "id, name, completed, dueDate";

/// SQLite-backed task store
#[derive(Clone)]
pub struct SqliteTaskStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTaskStore {
    /// Open (or create) the database file and apply the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        tracing::info!("Opened task database at {:?}", path);
        Self::with_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrate(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking pool
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| Error::Storage("Task database lock poisoned".to_string()))?;
            f(&conn)
        })
        .await
        .map_err(|e| Error::Storage(format!("Task database worker failed: {}", e)))?
    }
}

fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;

        CREATE TABLE IF NOT EXISTS task (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          name TEXT NOT NULL UNIQUE,
          completed INTEGER NOT NULL DEFAULT 0,
          dueDate TEXT UNIQUE
        );
        "#,
    )?;
    tracing::info!("Task schema ready");
    Ok(())
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let due_date = row
        .get::<_, Option<String>>(3)?
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))
        })
        .transpose()?;

    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        completed: row.get(2)?,
        due_date,
    })
}

/// Translate UNIQUE violations into the duplicate error for that column
fn map_write_error(err: rusqlite::Error, task: &NewTask) -> Error {
    if let rusqlite::Error::SqliteFailure(failure, Some(message)) = &err {
        if failure.code == ErrorCode::ConstraintViolation {
            if message.contains("task.name") {
                return duplicate_name(&task.name);
            }
            if message.contains("task.dueDate") {
                return duplicate_due_date();
            }
        }
    }
    Error::Database(err)
}

fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn column_sql(column: Column) -> &'static str {
    match column {
        Column::Name => "name",
        Column::Completed => "completed",
        Column::DueDate => "dueDate",
    }
}

/// Build the listing statement; values are always bound, never inlined
fn list_sql(query: &TaskQuery) -> (String, Vec<Value>) {
    let mut sql = format!("SELECT {} FROM task", TASK_COLUMNS);
    let mut values = Vec::new();

    match &query.filter {
        Some(FilterBy::Name(pattern)) => {
            sql.push_str(" WHERE name LIKE ?1 ESCAPE '\\'");
            values.push(Value::Text(format!("%{}%", escape_like(pattern))));
        }
        Some(FilterBy::Completed(completed)) => {
            sql.push_str(" WHERE completed = ?1");
            values.push(Value::Integer(i64::from(*completed)));
        }
        Some(FilterBy::DueDate { from, to }) => {
            sql.push_str(" WHERE dueDate BETWEEN ?1 AND ?2");
            values.push(Value::Text(to_iso(from)));
            values.push(Value::Text(to_iso(to)));
        }
        None => {}
    }

    let mut keys: Vec<String> = query
        .order_by
        .iter()
        .flatten()
        .map(|order| {
            let direction = if order.decreasing { "DESC" } else { "ASC" };
            format!("{} {}", column_sql(order.column), direction)
        })
        .collect();
    keys.push("id ASC".to_string());
    sql.push_str(" ORDER BY ");
    sql.push_str(&keys.join(", "));

    (sql, values)
}

#[async_trait]
impl TaskRepository for SqliteTaskStore {
    async fn create_task(&self, task: NewTask) -> Result<Task> {
        self.with_conn(move |conn| {
            conn.query_row(
                &format!(
                    "INSERT INTO task (name, completed, dueDate) VALUES (?1, ?2, ?3) RETURNING {}",
                    TASK_COLUMNS
                ),
                params![task.name, task.completed, task.due_date.as_ref().map(to_iso)],
                row_to_task,
            )
            .map_err(|e| map_write_error(e, &task))
        })
        .await
    }

    async fn get_task_by_name(&self, name: &str) -> Result<Option<Task>> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            Ok(conn
                .query_row(
                    &format!("SELECT {} FROM task WHERE name = ?1", TASK_COLUMNS),
                    params![name],
                    row_to_task,
                )
                .optional()?)
        })
        .await
    }

    async fn get_task_by_due_date(&self, due_date: DateTime<Utc>) -> Result<Option<Task>> {
        self.with_conn(move |conn| {
            Ok(conn
                .query_row(
                    &format!("SELECT {} FROM task WHERE dueDate = ?1", TASK_COLUMNS),
                    params![to_iso(&due_date)],
                    row_to_task,
                )
                .optional()?)
        })
        .await
    }

    async fn delete_task(&self, id: i64) -> Result<Option<Task>> {
        self.with_conn(move |conn| {
            Ok(conn
                .query_row(
                    &format!("DELETE FROM task WHERE id = ?1 RETURNING {}", TASK_COLUMNS),
                    params![id],
                    row_to_task,
                )
                .optional()?)
        })
        .await
    }

    async fn update_task(&self, id: i64, task: NewTask) -> Result<Option<Task>> {
        self.with_conn(move |conn| {
            conn.query_row(
                &format!(
                    "UPDATE task SET name = ?1, completed = ?2, dueDate = ?3 WHERE id = ?4 RETURNING {}",
                    TASK_COLUMNS
                ),
                params![task.name, task.completed, task.due_date.as_ref().map(to_iso), id],
                row_to_task,
            )
            .optional()
            .map_err(|e| map_write_error(e, &task))
        })
        .await
    }

    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let (sql, values) = list_sql(query);
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let tasks = stmt
                .query_map(params_from_iter(values.iter()), row_to_task)?
                .collect::<rusqlite::Result<Vec<Task>>>()?;
            Ok(tasks)
        })
        .await
    }
}
