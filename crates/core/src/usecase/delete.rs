use std::sync::Arc;

use crate::task::{Task, TaskRepository};
use crate::Result;

/// Delete a task by ID; `None` means there was no such task
#[derive(Clone)]
pub struct DeleteTask {
    repo: Arc<dyn TaskRepository>,
}

impl DeleteTask {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: i64) -> Result<Option<Task>> {
        let deleted = self.repo.delete_task(id).await?;
        if deleted.is_some() {
            tracing::info!("Deleted task {}", id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{MemoryTaskStore, NewTask};

    #[tokio::test]
    async fn test_delete_existing_and_missing() {
        let store = Arc::new(MemoryTaskStore::new());
        let task = store.create_task(NewTask::new("task")).await.unwrap();
        let delete = DeleteTask::new(store.clone());

        assert_eq!(delete.execute(task.id).await.unwrap(), Some(task.clone()));
        assert!(delete.execute(task.id).await.unwrap().is_none());
        assert!(store.get_task_by_name("task").await.unwrap().is_none());
    }
}
