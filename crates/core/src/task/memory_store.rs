//! In-memory task storage implementation
//!
//! Keeps tasks in a map guarded by a lock. Nothing survives a restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::filter::TaskQuery;
use super::model::{NewTask, Task};
use super::repository::TaskRepository;
use super::{duplicate_due_date, duplicate_name};
use crate::Result;

struct MemoryState {
    tasks: BTreeMap<i64, Task>,
    next_id: i64,
}

impl MemoryState {
    fn others(&self, exclude_id: Option<i64>) -> impl Iterator<Item = &Task> + '_ {
        self.tasks
            .values()
            .filter(move |t| Some(t.id) != exclude_id)
    }

    /// Reject a task whose name or due date belongs to another task
    fn check_unique(&self, task: &NewTask, exclude_id: Option<i64>) -> Result<()> {
        if self.others(exclude_id).any(|t| t.name == task.name) {
            return Err(duplicate_name(&task.name));
        }
        if task.due_date.is_some()
            && self
                .others(exclude_id)
                .any(|t| t.due_date == task.due_date)
        {
            return Err(duplicate_due_date());
        }
        Ok(())
    }
}

/// In-memory task store
pub struct MemoryTaskStore {
    state: RwLock<MemoryState>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                tasks: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskStore {
    async fn create_task(&self, task: NewTask) -> Result<Task> {
        let mut state = self.state.write().await;
        state.check_unique(&task, None)?;

        let id = state.next_id;
        state.next_id += 1;
        let task = task.into_task(id);
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn get_task_by_name(&self, name: &str) -> Result<Option<Task>> {
        let state = self.state.read().await;
        Ok(state.tasks.values().find(|t| t.name == name).cloned())
    }

    async fn get_task_by_due_date(&self, due_date: DateTime<Utc>) -> Result<Option<Task>> {
        let state = self.state.read().await;
        Ok(state
            .tasks
            .values()
            .find(|t| t.due_date == Some(due_date))
            .cloned())
    }

    async fn delete_task(&self, id: i64) -> Result<Option<Task>> {
        let mut state = self.state.write().await;
        Ok(state.tasks.remove(&id))
    }

    async fn update_task(&self, id: i64, task: NewTask) -> Result<Option<Task>> {
        let mut state = self.state.write().await;
        if !state.tasks.contains_key(&id) {
            return Ok(None);
        }
        state.check_unique(&task, Some(id))?;

        let task = task.into_task(id);
        state.tasks.insert(id, task.clone());
        Ok(Some(task))
    }

    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        let state = self.state.read().await;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| query.matches(t))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| query.compare(a, b));
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Column, FilterBy, OrderBy};
    use crate::Error;
    use chrono::TimeZone;

    fn due(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 3, day, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = MemoryTaskStore::new();

        let first = store.create_task(NewTask::new("Task 1")).await.unwrap();
        let second = store.create_task(NewTask::new("Task 2")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.name, "Task 2");
    }

    #[tokio::test]
    async fn test_lookup_by_name_and_due_date() {
        let store = MemoryTaskStore::new();
        store
            .create_task(NewTask::new("dated").with_due_date(due(1)))
            .await
            .unwrap();

        let by_name = store.get_task_by_name("dated").await.unwrap().unwrap();
        assert_eq!(by_name.due_date, Some(due(1)));
        assert!(store.get_task_by_name("other").await.unwrap().is_none());

        let by_date = store.get_task_by_due_date(due(1)).await.unwrap().unwrap();
        assert_eq!(by_date.id, by_name.id);
        assert!(store.get_task_by_due_date(due(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_uniqueness_is_enforced() {
        let store = MemoryTaskStore::new();
        store
            .create_task(NewTask::new("task").with_due_date(due(1)))
            .await
            .unwrap();

        let result = store.create_task(NewTask::new("task")).await;
        match result.unwrap_err() {
            Error::Duplicate(msg) => assert_eq!(msg, "Duplicated task name 'task'"),
            e => panic!("Expected Duplicate error, got: {:?}", e),
        }

        let result = store
            .create_task(NewTask::new("other").with_due_date(due(1)))
            .await;
        assert!(matches!(result, Err(Error::Duplicate(_))));

        // Several tasks may have no due date
        store.create_task(NewTask::new("a")).await.unwrap();
        store.create_task(NewTask::new("b")).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_task() {
        let store = MemoryTaskStore::new();
        let task = store.create_task(NewTask::new("to delete")).await.unwrap();

        let deleted = store.delete_task(task.id).await.unwrap();
        assert_eq!(deleted, Some(task.clone()));

        assert!(store.delete_task(task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_task() {
        let store = MemoryTaskStore::new();
        let task = store
            .create_task(NewTask::new("original").with_due_date(due(1)))
            .await
            .unwrap();

        // Keeping its own name and date is not a conflict
        let updated = store
            .update_task(
                task.id,
                NewTask::new("original").with_completed(true).with_due_date(due(1)),
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.completed);

        let missing = store.update_task(99, NewTask::new("x")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_into_taken_name_fails() {
        let store = MemoryTaskStore::new();
        store.create_task(NewTask::new("a")).await.unwrap();
        let b = store.create_task(NewTask::new("b")).await.unwrap();

        let result = store.update_task(b.id, NewTask::new("a")).await;
        assert!(matches!(result, Err(Error::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_list_with_filter_and_order() {
        let store = MemoryTaskStore::new();
        store
            .create_task(NewTask::new("beta").with_completed(true).with_due_date(due(1)))
            .await
            .unwrap();
        store
            .create_task(NewTask::new("alpha").with_completed(true).with_due_date(due(2)))
            .await
            .unwrap();
        store
            .create_task(NewTask::new("alpha two").with_completed(true))
            .await
            .unwrap();
        store.create_task(NewTask::new("gamma")).await.unwrap();

        let all = store.list_tasks(&TaskQuery::default()).await.unwrap();
        assert_eq!(all.len(), 4);

        let query = TaskQuery::default()
            .with_filter(FilterBy::Completed(true))
            .with_order(OrderBy::asc(Column::Name))
            .with_order(OrderBy::desc(Column::DueDate));
        let names: Vec<String> = store
            .list_tasks(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["alpha", "alpha two", "beta"]);

        let query = TaskQuery::default().with_filter(FilterBy::DueDate {
            from: due(2),
            to: due(5),
        });
        let tasks = store.list_tasks(&query).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "alpha");
    }
}
