use crate::error::AppError;
use crate::models::{User, DEFAULT_CATEGORIES};
use crate::repositories::category_repository::CategoryRepository;
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("wrong email or password")]
    InvalidCredential,
    #[error("email already exists")]
    EmailTaken,
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
    #[error("Failed to seed default categories: {0}")]
    CategorySeeding(AppError),
}

impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::UserNotFound => AppError::NotFound("user not found".to_string()),
            UserServiceError::InvalidCredential => AppError::InvalidCredential,
            UserServiceError::EmailTaken => AppError::Conflict("email already exists".to_string()),
            UserServiceError::RepositoryError(RepositoryError::Database(e)) => AppError::Database(e),
            UserServiceError::CategorySeeding(e) => e,
            other => AppError::Internal(other.to_string()),
        }
    }
}

pub struct RegisterRequest {
    pub fullname: String,
    pub email: String,
    pub password: String,
}

pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    category_repository: Arc<dyn CategoryRepository>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        category_repository: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            repository,
            category_repository,
        }
    }

    /// Create the account and seed its four default categories.
    ///
    /// The two writes are independent: when seeding fails the user row is
    /// kept and the error is returned.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, UserServiceError> {
        if self.repository.find_by_email(&request.email).await?.is_some() {
            return Err(UserServiceError::EmailTaken);
        }

        let password_hash = hash_password(&request.password)?;

        let user = match self
            .repository
            .create_user(&request.fullname, &request.email, &password_hash)
            .await
        {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists) => return Err(UserServiceError::EmailTaken),
            Err(e) => return Err(UserServiceError::RepositoryError(e)),
        };

        let kinds = DEFAULT_CATEGORIES.iter().map(|k| k.to_string()).collect();
        self.category_repository
            .create_many(user.id, kinds)
            .await
            .map_err(UserServiceError::CategorySeeding)?;

        tracing::info!("Registered user {} with default categories", user.id);
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<i64, UserServiceError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or(UserServiceError::UserNotFound)?;

        if !self.verify_password(&request.password, &user.password) {
            return Err(UserServiceError::InvalidCredential);
        }

        Ok(user.id)
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<User, UserServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserServiceError::UserNotFound)
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserServiceError> {
        Ok(self.repository.find_by_email(email).await?)
    }

    pub async fn list_users(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<User>, UserServiceError> {
        Ok(self.repository.list_users(limit, offset).await?)
    }

    /// Removes the user row only; categories and tasks stay behind.
    pub async fn delete_user(&self, id: i64) -> Result<(), UserServiceError> {
        Ok(self.repository.delete_user(id).await?)
    }

    pub fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        if let Ok(parsed_hash) = PasswordHash::new(password_hash) {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        } else {
            false
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, UserServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserServiceError::HashingError(e.to_string()))
}
