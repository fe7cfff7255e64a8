//! Task use cases
//!
//! Each use case owns a handle to the repository and applies the business
//! rules that sit between a validated task and the store.

mod create;
mod delete;
mod list;
mod update;

use std::sync::Arc;

use crate::task::TaskRepository;

pub use create::CreateTask;
pub use delete::DeleteTask;
pub use list::ListTasks;
pub use update::UpdateTask;

/// All task use cases wired to one repository
#[derive(Clone)]
pub struct TaskUseCases {
    pub create: CreateTask,
    pub delete: DeleteTask,
    pub update: UpdateTask,
    pub list: ListTasks,
}

impl TaskUseCases {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self {
            create: CreateTask::new(Arc::clone(&repo)),
            delete: DeleteTask::new(Arc::clone(&repo)),
            update: UpdateTask::new(Arc::clone(&repo)),
            list: ListTasks::new(repo),
        }
    }
}
