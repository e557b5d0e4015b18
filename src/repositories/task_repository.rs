use crate::error::Result;
use crate::models::{timestamp_from_epoch, NewTask, Task, TaskUpdate};
use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TaskRepository: Send + Sync {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Task>>;
    async fn list_by_category(&self, category_id: i64) -> Result<Vec<Task>>;
    async fn create(&self, task: NewTask) -> Result<Task>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Task>>;
    async fn update(&self, update: TaskUpdate) -> Result<bool>;
    async fn delete(&self, id: i64) -> Result<u64>;
}

#[derive(FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: String,
    category_id: i64,
    user_id: i64,
    created_at: i64,
    updated_at: i64,
    deleted_at: Option<i64>,
}

impl From<TaskRow> for Task {
    fn from(r: TaskRow) -> Self {
        Task {
            id: r.id,
            title: r.title,
            description: r.description,
            category_id: r.category_id,
            user_id: r.user_id,
            created_at: timestamp_from_epoch(r.created_at),
            updated_at: timestamp_from_epoch(r.updated_at),
            deleted_at: r.deleted_at.map(timestamp_from_epoch),
        }
    }
}

const TASK_COLUMNS: &str =
    "id, title, description, category_id, user_id, created_at, updated_at, deleted_at";

pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE user_id = ? ORDER BY id ASC",
            TASK_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn list_by_category(&self, category_id: i64) -> Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE category_id = ? ORDER BY id ASC",
            TASK_COLUMNS
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        let now = chrono::Utc::now().timestamp();
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            r#"
            INSERT INTO tasks (title, description, category_id, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.category_id)
        .bind(task.user_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "SELECT {} FROM tasks WHERE id = ?",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    async fn update(&self, update: TaskUpdate) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = COALESCE(?, title),
                description = COALESCE(?, description),
                category_id = COALESCE(?, category_id),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(update.title)
        .bind(update.description)
        .bind(update.category_id)
        .bind(chrono::Utc::now().timestamp())
        .bind(update.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
