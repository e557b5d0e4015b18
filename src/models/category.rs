use crate::models::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seeded for every new account, in board order.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Todo", "In Progress", "Done", "Backlog"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

// Dashboard column: a category with its tasks attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryData {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub tasks: Vec<Task>,
}

impl CategoryData {
    /// Attach every task to the category it references.
    ///
    /// Category order and task order are preserved. Tasks pointing at a
    /// category that is not in `categories` are dropped.
    pub fn from_parts(categories: Vec<Category>, tasks: Vec<Task>) -> Vec<CategoryData> {
        categories
            .into_iter()
            .map(|category| CategoryData {
                tasks: tasks
                    .iter()
                    .filter(|task| task.category_id == category.id)
                    .cloned()
                    .collect(),
                id: category.id,
                kind: category.kind,
            })
            .collect()
    }
}
