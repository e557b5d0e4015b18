use crate::error::{AppError, Result};
use crate::models::{NewTask, Task, TaskUpdate};
use crate::repositories::{CategoryRepository, TaskRepository};
use std::sync::Arc;

pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    category_repository: Arc<dyn CategoryRepository>,
}

impl TaskService {
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        category_repository: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            repository,
            category_repository,
        }
    }

    pub async fn get_tasks(&self, user_id: i64) -> Result<Vec<Task>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn get_tasks_by_category(&self, category_id: i64, user_id: i64) -> Result<Vec<Task>> {
        let tasks = self.repository.list_by_category(category_id).await?;
        Ok(tasks.into_iter().filter(|t| t.user_id == user_id).collect())
    }

    pub async fn get_task_by_id(&self, id: i64, user_id: i64) -> Result<Task> {
        match self.repository.get_by_id(id).await? {
            Some(task) if task.user_id == user_id => Ok(task),
            _ => Err(AppError::NotFound("task not found".to_string())),
        }
    }

    // The category is not checked against the owner here
    pub async fn store_task(&self, task: NewTask) -> Result<Task> {
        if task.title.trim().is_empty() || task.category_id <= 0 {
            return Err(AppError::Validation("invalid task request".to_string()));
        }

        self.repository.create(task).await
    }

    pub async fn update_task(&self, update: TaskUpdate) -> Result<()> {
        self.get_task_by_id(update.id, update.user_id).await?;

        if let Some(category_id) = update.category_id {
            let category = self
                .category_repository
                .get_by_id(category_id)
                .await?
                .ok_or_else(|| {
                    AppError::Validation(format!("category {} does not exist", category_id))
                })?;

            if category.kind.is_empty() {
                return Err(AppError::Validation(format!(
                    "category {} has no type",
                    category_id
                )));
            }
            if category.user_id != update.user_id {
                return Err(AppError::Validation(format!(
                    "category {} belongs to another user",
                    category_id
                )));
            }
        }

        if self.repository.update(update).await? {
            Ok(())
        } else {
            Err(AppError::NotFound("task not found".to_string()))
        }
    }

    /// Deleting an id that matches no row succeeds.
    pub async fn delete_task(&self, id: i64, user_id: i64) -> Result<()> {
        if let Some(task) = self.repository.get_by_id(id).await? {
            if task.user_id != user_id {
                return Err(AppError::NotFound("task not found".to_string()));
            }
            self.repository.delete(id).await?;
        }

        Ok(())
    }
}
