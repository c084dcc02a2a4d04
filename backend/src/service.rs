//! Task lifecycle rules.
//!
//! The service is the only place that decides what a valid task looks like:
//! id discipline for create/update, description defaulting, the partial
//! merge applied by updates, and the `completed` / `completedAt` state
//! derived from the status.

use std::sync::Arc;

use chrono::Utc;
use shared::{Task, TaskRequest};
use tracing::info;

use crate::error::TaskError;
use crate::store::{NewTask, TaskStore};

pub type SharedService = Arc<TaskService>;

pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Task, TaskError> {
        self.store.get(id).await?.ok_or(TaskError::NotFound(id))
    }

    pub async fn create(&self, input: TaskRequest) -> Result<Task, TaskError> {
        if input.target_id() != 0 {
            return Err(TaskError::invalid(
                "Id must be 0 for creating a new task. Use PUT /api/tasks/update to update an existing task.",
            ));
        }

        let description = input
            .description_text()
            .or(input.title_text())
            .ok_or_else(|| TaskError::invalid("Descricao or Titulo is required"))?
            .to_string();

        let new_task = NewTask {
            title: input.title.unwrap_or_default(),
            description,
            status: input.status.unwrap_or_default(),
            completed: false,
            created_at: input.created_at.unwrap_or_else(Utc::now),
            completed_at: None,
        };

        let task = self.store.insert(new_task).await?;
        info!(id = task.id, status = %task.status, "task created");
        Ok(task)
    }

    pub async fn update(&self, input: TaskRequest) -> Result<Task, TaskError> {
        let id = input.target_id();
        if id == 0 {
            return Err(TaskError::invalid(
                "Id is required for updating a task. Use POST /api/tasks/create to create a new task.",
            ));
        }

        let mut task = self.get(id).await?;
        let was_completed = task.completed;
        merge(&mut task, &input);

        if task.status.is_completed() {
            task.completed = true;
            task.completed_at = match (input.completed_at, was_completed) {
                (Some(at), _) => Some(at),
                (None, true) => task.completed_at.or_else(|| Some(Utc::now())),
                (None, false) => Some(Utc::now()),
            };
        } else {
            task.completed = false;
        }

        if !self.store.update(&task).await? {
            return Err(TaskError::NotFound(id));
        }

        info!(id, status = %task.status, completed = task.completed, "task updated");
        Ok(task)
    }

    pub async fn delete(&self, id: i64) -> Result<(), TaskError> {
        if id == 0 {
            return Err(TaskError::invalid("Id is required for deleting a task"));
        }

        if !self.store.delete(id).await? {
            return Err(TaskError::NotFound(id));
        }

        info!(id, "task deleted");
        Ok(())
    }
}

/// Applies the non-blank fields of `input` onto `task`. The title itself is
/// never rewritten; a title without a description replaces the description.
fn merge(task: &mut Task, input: &TaskRequest) {
    if let Some(description) = input.description_text().or(input.title_text()) {
        task.description = description.to_string();
    }

    if let Some(status) = &input.status {
        task.status = status.clone();
    }

    if let Some(created_at) = input.created_at {
        task.created_at = created_at;
    }
}
