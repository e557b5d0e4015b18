use crate::error::{AppError, Result};
use crate::models::{Category, CategoryData};
use crate::repositories::{CategoryRepository, TaskRepository};
use std::sync::Arc;

pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
    task_repository: Arc<dyn TaskRepository>,
}

impl CategoryService {
    pub fn new(
        repository: Arc<dyn CategoryRepository>,
        task_repository: Arc<dyn TaskRepository>,
    ) -> Self {
        Self {
            repository,
            task_repository,
        }
    }

    pub async fn get_categories(&self, user_id: i64) -> Result<Vec<Category>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn store_category(&self, user_id: i64, kind: &str) -> Result<Category> {
        if kind.trim().is_empty() {
            return Err(AppError::Validation("invalid category request".to_string()));
        }

        self.repository.create(user_id, kind).await
    }

    pub async fn get_category_by_id(&self, id: i64) -> Result<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("category not found".to_string()))
    }

    /// Delete a category together with its tasks.
    ///
    /// Tasks go first, one statement each, then the category. A failure
    /// part way leaves the rows already deleted gone.
    pub async fn delete_category(&self, id: i64, user_id: i64) -> Result<()> {
        match self.get_category_by_id(id).await {
            Ok(category) if category.user_id != user_id => {
                return Err(AppError::NotFound("category not found".to_string()));
            }
            Ok(_) => {}
            Err(AppError::NotFound(_)) => return Ok(()),
            Err(e) => return Err(e),
        }

        let tasks = self.task_repository.list_by_category(id).await?;
        for task in &tasks {
            self.task_repository.delete(task.id).await?;
        }

        self.repository.delete(id).await?;
        tracing::debug!("Deleted category {} and {} task(s)", id, tasks.len());

        Ok(())
    }

    pub async fn get_categories_with_tasks(&self, user_id: i64) -> Result<Vec<CategoryData>> {
        let categories = self.repository.list_by_user(user_id).await?;
        let tasks = self.task_repository.list_by_user(user_id).await?;

        Ok(CategoryData::from_parts(categories, tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::repositories::category_repository::MockCategoryRepository;
    use crate::repositories::task_repository::MockTaskRepository;
    use crate::repositories::{SqliteCategoryRepository, SqliteTaskRepository};
    use crate::test_utils::{create_test_category, create_test_pool, create_test_task, create_test_user};
    use chrono::Utc;
    use mockall::predicate::*;

    fn category(id: i64, user_id: i64) -> Category {
        Category {
            id,
            kind: "Todo".to_string(),
            user_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn task(id: i64, category_id: i64) -> Task {
        Task {
            id,
            title: "t".to_string(),
            description: "d".to_string(),
            category_id,
            user_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn test_store_category_rejects_blank_type() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo.expect_create().never();

        let service = CategoryService::new(Arc::new(mock_repo), Arc::new(MockTaskRepository::new()));

        let result = service.store_category(1, "  ").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_category_by_id() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(3))
            .returning(|id| Box::pin(async move { Ok(Some(category(id, 1))) }));
        mock_repo
            .expect_get_by_id()
            .with(eq(4))
            .returning(|_| Box::pin(async { Ok(None) }));

        let service = CategoryService::new(Arc::new(mock_repo), Arc::new(MockTaskRepository::new()));

        assert_eq!(service.get_category_by_id(3).await.unwrap().id, 3);
        assert!(matches!(
            service.get_category_by_id(4).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_foreign_category_is_refused() {
        let mut mock_repo = MockCategoryRepository::new();
        let mut mock_tasks = MockTaskRepository::new();

        mock_repo
            .expect_get_by_id()
            .with(eq(7))
            .returning(|id| Box::pin(async move { Ok(Some(category(id, 2))) }));
        mock_repo.expect_delete().never();
        mock_tasks.expect_delete().never();

        let service = CategoryService::new(Arc::new(mock_repo), Arc::new(mock_tasks));

        let result = service.delete_category(7, 1).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_category_removes_tasks_first() {
        let mut mock_repo = MockCategoryRepository::new();
        let mut mock_tasks = MockTaskRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_get_by_id()
            .returning(|id| Box::pin(async move { Ok(Some(category(id, 1))) }));
        mock_tasks
            .expect_list_by_category()
            .with(eq(7))
            .returning(|id| Box::pin(async move { Ok(vec![task(1, id), task(2, id)]) }));
        mock_tasks
            .expect_delete()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Ok(1) }));
        mock_repo
            .expect_delete()
            .with(eq(7))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Ok(1) }));

        let service = CategoryService::new(Arc::new(mock_repo), Arc::new(mock_tasks));

        service.delete_category(7, 1).await.expect("delete succeeds");
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_ok() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));
        mock_repo.expect_delete().never();

        let service = CategoryService::new(Arc::new(mock_repo), Arc::new(MockTaskRepository::new()));

        assert!(service.delete_category(99, 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_categories_with_tasks_from_database() {
        let pool = create_test_pool().await;
        let service = CategoryService::new(
            Arc::new(SqliteCategoryRepository::new(pool.clone())),
            Arc::new(SqliteTaskRepository::new(pool.clone())),
        );
        let user_id = create_test_user(&pool, "test@example.com", "password")
            .await
            .unwrap();
        let todo = create_test_category(&pool, user_id, "Todo").await.unwrap();
        let done = create_test_category(&pool, user_id, "Done").await.unwrap();
        create_test_task(&pool, user_id, done, "ship it").await.unwrap();

        let board = service.get_categories_with_tasks(user_id).await.unwrap();

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].id, todo);
        assert!(board[0].tasks.is_empty());
        assert_eq!(board[1].tasks.len(), 1);
        assert_eq!(board[1].tasks[0].title, "ship it");
    }
}
