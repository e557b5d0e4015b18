pub mod category;
pub mod response;
pub mod task;
pub mod user;

pub use category::{Category, CategoryData, CategoryRequest, DEFAULT_CATEGORIES};
pub use response::{
    CategoryIdResponse, ErrorResponse, MessageResponse, TaskIdResponse, UserIdResponse,
};
pub use task::{NewTask, Task, TaskCategoryRequest, TaskRequest, TaskUpdate};
pub use user::{User, UserLogin, UserRegister};

use chrono::{DateTime, Utc};

/// Rows store timestamps as unix seconds.
pub(crate) fn timestamp_from_epoch(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
