pub mod category_repository;
pub mod task_repository;
pub mod user_repository;

pub use category_repository::{CategoryRepository, SqliteCategoryRepository};
pub use task_repository::{SqliteTaskRepository, TaskRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
