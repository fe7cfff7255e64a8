use std::sync::Arc;

use crate::task::{duplicate_due_date, duplicate_name, NewTask, Task, TaskRepository};
use crate::Result;

/// Create a task after checking that its name and due date are free
#[derive(Clone)]
pub struct CreateTask {
    repo: Arc<dyn TaskRepository>,
}

impl CreateTask {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, task: NewTask) -> Result<Task> {
        if self.repo.get_task_by_name(&task.name).await?.is_some() {
            return Err(duplicate_name(&task.name));
        }

        if let Some(due_date) = task.due_date {
            if self.repo.get_task_by_due_date(due_date).await?.is_some() {
                return Err(duplicate_due_date());
            }
        }

        let created = self.repo.create_task(task).await?;
        tracing::info!("Created task {} '{}'", created.id, created.name);
        Ok(created)
    }
}
