use std::sync::Arc;

use crate::task::{Task, TaskQuery, TaskRepository};
use crate::Result;

/// List tasks; filtering and ordering are left to the repository
#[derive(Clone)]
pub struct ListTasks {
    repo: Arc<dyn TaskRepository>,
}

impl ListTasks {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, query: &TaskQuery) -> Result<Vec<Task>> {
        self.repo.list_tasks(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Column, FilterBy, MemoryTaskStore, NewTask, OrderBy};

    #[tokio::test]
    async fn test_lists_everything_without_query() {
        let store = Arc::new(MemoryTaskStore::new());
        for name in ["c", "a", "b"] {
            store.create_task(NewTask::new(name)).await.unwrap();
        }
        let list = ListTasks::new(store);

        let names: Vec<String> = list
            .execute(&TaskQuery::default())
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_passes_query_through() {
        let store = Arc::new(MemoryTaskStore::new());
        store
            .create_task(NewTask::new("b").with_completed(true))
            .await
            .unwrap();
        store.create_task(NewTask::new("x")).await.unwrap();
        store
            .create_task(NewTask::new("a").with_completed(true))
            .await
            .unwrap();
        let list = ListTasks::new(store);

        let query = TaskQuery::default()
            .with_filter(FilterBy::Completed(true))
            .with_order(OrderBy::asc(Column::Name));
        let names: Vec<String> = list
            .execute(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
