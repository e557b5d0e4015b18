pub mod category_service;
pub mod task_service;
pub mod user_service;

pub use category_service::CategoryService;
pub use task_service::TaskService;
pub use user_service::{LoginRequest, RegisterRequest, UserService, UserServiceError};
