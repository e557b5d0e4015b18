use crate::error::Result;
use crate::models::{timestamp_from_epoch, Category};
use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait CategoryRepository: Send + Sync {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Category>>;
    async fn create(&self, user_id: i64, kind: &str) -> Result<Category>;
    async fn create_many(&self, user_id: i64, kinds: Vec<String>) -> Result<()>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Category>>;
    async fn delete(&self, id: i64) -> Result<u64>;
}

#[derive(FromRow)]
struct CategoryRow {
    id: i64,
    #[sqlx(rename = "type")]
    kind: String,
    user_id: i64,
    created_at: i64,
    updated_at: i64,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category {
            id: r.id,
            kind: r.kind,
            user_id: r.user_id,
            created_at: timestamp_from_epoch(r.created_at),
            updated_at: timestamp_from_epoch(r.updated_at),
        }
    }
}

pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, type, user_id, created_at, updated_at
            FROM categories
            WHERE user_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create(&self, user_id: i64, kind: &str) -> Result<Category> {
        let now = chrono::Utc::now().timestamp();
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (type, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, type, user_id, created_at, updated_at
            "#,
        )
        .bind(kind)
        .bind(user_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn create_many(&self, user_id: i64, kinds: Vec<String>) -> Result<()> {
        if kinds.is_empty() {
            return Ok(());
        }

        let now = chrono::Utc::now().timestamp();
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO categories (type, user_id, created_at, updated_at) ");
        builder.push_values(kinds, |mut row, kind| {
            row.push_bind(kind)
                .push_bind(user_id)
                .push_bind(now)
                .push_bind(now);
        });

        builder.build().execute(&self.pool).await?;

        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, type, user_id, created_at, updated_at FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Category::from))
    }

    async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
