//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::filter::TaskQuery;
use super::model::{NewTask, Task};
use crate::Result;

/// Repository interface for task CRUD operations
///
/// Implementations must enforce uniqueness of `name` and of non-null
/// `due_date` themselves and report a violation as `Error::Duplicate`.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Store a new task and return it with its assigned ID
    async fn create_task(&self, task: NewTask) -> Result<Task>;

    /// Find the task with exactly this name
    async fn get_task_by_name(&self, name: &str) -> Result<Option<Task>>;

    /// Find the task due at exactly this instant
    async fn get_task_by_due_date(&self, due_date: DateTime<Utc>) -> Result<Option<Task>>;

    /// Delete a task, returning the removed row
    async fn delete_task(&self, id: i64) -> Result<Option<Task>>;

    /// Replace every field of a task, returning the updated row
    async fn update_task(&self, id: i64, task: NewTask) -> Result<Option<Task>>;

    /// List tasks matching the query, in the query's order
    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>>;
}
