use super::{page_error, PageResult};
use crate::auth::middleware::AuthUser;
use crate::models::{CategoryData, Task};
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

/// One board column with the ids its move links point at.
pub struct CategoryColumn {
    pub id: i64,
    pub kind: String,
    pub tasks: Vec<Task>,
    pub prev_id: i64,
    pub next_id: i64,
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub columns: Vec<CategoryColumn>,
}

/// The first column's previous is itself, as is the last column's next.
pub fn board_columns(board: Vec<CategoryData>) -> Vec<CategoryColumn> {
    let ids: Vec<i64> = board.iter().map(|c| c.id).collect();

    board
        .into_iter()
        .enumerate()
        .map(|(idx, category)| CategoryColumn {
            prev_id: if idx == 0 { category.id } else { ids[idx - 1] },
            next_id: ids.get(idx + 1).copied().unwrap_or(category.id),
            id: category.id,
            kind: category.kind,
            tasks: category.tasks,
        })
        .collect()
}

pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> PageResult<DashboardTemplate> {
    let board = state
        .api_client
        .get_categories_with_tasks(&user.session)
        .await
        .map_err(page_error)?;

    Ok(DashboardTemplate {
        columns: board_columns(board),
    })
}
