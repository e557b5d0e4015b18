pub mod test_helpers {
    use crate::config::session::{key_from_secret_bytes, CookieConfig};
    use crate::AppState;
    use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
    use tempfile::NamedTempFile;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when the pool must be shared with a spawned server
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        email: &str,
        password: &str,
    ) -> Result<i64, sqlx::Error> {
        use argon2::{
            password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
            Argon2,
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
            })?
            .to_string();

        let result = sqlx::query("INSERT INTO users (fullname, email, password) VALUES (?, ?, ?)")
            .bind("Test User")
            .bind(email)
            .bind(password_hash)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Create a test category for testing
    pub async fn create_test_category(
        pool: &SqlitePool,
        user_id: i64,
        kind: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO categories (type, user_id) VALUES (?, ?)")
            .bind(kind)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Create a test task for testing
    pub async fn create_test_task(
        pool: &SqlitePool,
        user_id: i64,
        category_id: i64,
        title: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (title, description, category_id, user_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(title)
        .bind("Test task description")
        .bind(category_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Fixed signing key so tests can mint their own session cookies
    pub fn test_cookie_key() -> axum_extra::extract::cookie::Key {
        key_from_secret_bytes(b"kanban test signing secret")
    }

    /// Application state over `pool` whose pages call the API at `base_url`
    pub fn test_state(
        pool: SqlitePool,
        base_url: &str,
    ) -> Result<AppState, crate::client::ClientError> {
        AppState::new(pool, base_url, CookieConfig::default(), test_cookie_key())
    }
}

// Re-export commonly used test functions at module level for convenience
// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}

#[cfg(test)]
pub async fn create_test_user(
    pool: &sqlx::SqlitePool,
    email: &str,
    password: &str,
) -> Result<i64, sqlx::Error> {
    test_helpers::insert_test_user(pool, email, password).await
}

#[cfg(test)]
pub use test_helpers::{create_test_category, create_test_task};
