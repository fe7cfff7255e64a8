use std::sync::Arc;

use crate::task::date::to_localized;
use crate::task::{NewTask, Task, TaskRepository};
use crate::{Error, Result};

/// Replace all fields of a task
///
/// The name and due date may stay the same as the task's own, but must not
/// belong to a different task. `None` means there was no task with that ID.
#[derive(Clone)]
pub struct UpdateTask {
    repo: Arc<dyn TaskRepository>,
}

impl UpdateTask {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: i64, task: NewTask) -> Result<Option<Task>> {
        if let Some(existing) = self.repo.get_task_by_name(&task.name).await? {
            if existing.id != id {
                return Err(Error::Duplicate(format!(
                    "Task with name '{}' already existis",
                    task.name
                )));
            }
        }

        if let Some(due_date) = task.due_date {
            if let Some(existing) = self.repo.get_task_by_due_date(due_date).await? {
                if existing.id != id {
                    return Err(Error::Duplicate(format!(
                        "Due date {} already exists.",
                        to_localized(&due_date)
                    )));
                }
            }
        }

        let updated = self.repo.update_task(id, task).await?;
        if let Some(task) = &updated {
            tracing::info!("Updated task {} '{}'", task.id, task.name);
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::RecordingStore;
    use chrono::{DateTime, TimeZone, Utc};

    fn due(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2032, 7, day, 14, 0, 0).unwrap()
    }

    async fn seeded() -> (Arc<RecordingStore>, Task, Task) {
        let store = Arc::new(RecordingStore::default());
        let first = store
            .inner
            .create_task(NewTask::new("first").with_due_date(due(1)))
            .await
            .unwrap();
        let second = store
            .inner
            .create_task(NewTask::new("second").with_due_date(due(2)))
            .await
            .unwrap();
        (store, first, second)
    }

    #[tokio::test]
    async fn test_replaces_all_fields() {
        let (store, first, _) = seeded().await;
        let update = UpdateTask::new(store);

        let updated = update
            .execute(first.id, NewTask::new("first").with_completed(true))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, first.id);
        assert!(updated.completed);
        assert!(updated.due_date.is_none());
    }

    #[tokio::test]
    async fn test_name_owned_by_other_task_is_rejected() {
        let (store, first, _) = seeded().await;
        let update = UpdateTask::new(store.clone());

        let err = update
            .execute(first.id, NewTask::new("second"))
            .await
            .unwrap_err();

        assert!(matches!(
            &err,
            Error::Duplicate(msg) if msg == "Task with name 'second' already existis"
        ));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_due_date_owned_by_other_task_is_rejected() {
        let (store, first, _) = seeded().await;
        let update = UpdateTask::new(store.clone());

        let err = update
            .execute(first.id, NewTask::new("first").with_due_date(due(2)))
            .await
            .unwrap_err();

        assert!(matches!(
            &err,
            Error::Duplicate(msg) if msg == "Due date 7/2/2032, 2:00:00 PM already exists."
        ));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_missing_task_returns_none() {
        let (store, _, _) = seeded().await;
        let update = UpdateTask::new(store);

        let result = update.execute(42, NewTask::new("new name")).await.unwrap();
        assert!(result.is_none());
    }
}
