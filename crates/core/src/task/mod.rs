//! Task module
//!
//! This module contains the task entity, its validation, list queries and
//! the storage backends.

pub mod date;
mod filter;
mod memory_store;
mod model;
mod repository;
mod sqlite_store;
mod validation;

pub use filter::{Column, FilterBy, OrderBy, TaskQuery};
pub use memory_store::MemoryTaskStore;
pub use model::*;
pub use repository::TaskRepository;
pub use sqlite_store::SqliteTaskStore;
pub use validation::TaskFields;

/// Error raised when a name is already taken
pub(crate) fn duplicate_name(name: &str) -> crate::Error {
    crate::Error::Duplicate(format!("Duplicated task name '{}'", name))
}

/// Error raised when a due date is already taken
pub(crate) fn duplicate_due_date() -> crate::Error {
    crate::Error::Duplicate("Cannot schedule two tasks for the same time".to_string())
}
