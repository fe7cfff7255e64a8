//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
}

/// A validated task that has not been assigned an ID yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Create a new, not completed task without due date
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completed: false,
            due_date: None,
        }
    }

    /// Set the completed flag
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Attach the ID assigned by a store
    pub fn into_task(self, id: i64) -> Task {
        Task {
            id,
            name: self.name,
            completed: self.completed,
            due_date: self.due_date,
        }
    }
}
