//! Task API endpoints
//!
//! List query, CRUD and bulk operations over the task service.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use td_core::query::{CategoryFilter, FilterSpec, SortKey, StatusFilter};
use td_core::task::{NewTask, TaskPatch};
use td_core::wire::{
    messages, BulkRequest, BulkResponse, MessageResponse, TaskListResponse, TaskResponse,
};

use crate::error::ApiResult;
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

// ============================================================================
// Request types
// ============================================================================

/// Raw query string; every field is parsed leniently so bad values fall back
/// to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, alias = "sortBy")]
    pub sort: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl ListTasksQuery {
    fn into_spec(self, default_page_size: usize) -> FilterSpec {
        FilterSpec {
            status: self
                .status
                .as_deref()
                .map(StatusFilter::parse_lenient)
                .unwrap_or_default(),
            category: self
                .category
                .as_deref()
                .map(CategoryFilter::parse_lenient)
                .unwrap_or_default(),
            search: self.search.unwrap_or_default(),
            sort: self
                .sort
                .as_deref()
                .map(SortKey::parse_lenient)
                .unwrap_or_default(),
            page: self
                .page
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(1),
            page_size: self
                .limit
                .and_then(|l| l.trim().parse().ok())
                .unwrap_or(default_page_size),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - Filtered, sorted, paginated list
async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<TaskListResponse>> {
    state.simulate_latency().await;
    let spec = query.into_spec(state.default_page_size());
    let page = state.tasks().list(&spec).await?;
    Ok(Json(page.into()))
}

/// POST /api/tasks - Create a new task
async fn create_task(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewTask>,
) -> ApiResult<Json<TaskResponse>> {
    state.simulate_latency().await;
    let task = state.tasks().create(req).await?;
    Ok(Json(TaskResponse {
        success: true,
        message: messages::TASK_CREATED.to_string(),
        task,
    }))
}

/// GET /api/tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks().get(id).await?;
    Ok(Json(TaskResponse {
        success: true,
        message: String::new(),
        task,
    }))
}

/// PUT /api/tasks/{id} - Partial update
async fn update_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
    AppJson(patch): AppJson<TaskPatch>,
) -> ApiResult<Json<TaskResponse>> {
    state.simulate_latency().await;
    let task = state.tasks().update(id, patch).await?;
    Ok(Json(TaskResponse {
        success: true,
        message: messages::TASK_UPDATED.to_string(),
        task,
    }))
}

/// DELETE /api/tasks/{id} - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<u64>,
) -> ApiResult<Json<MessageResponse>> {
    state.simulate_latency().await;
    state.tasks().delete(id).await?;
    Ok(Json(MessageResponse::ok(messages::TASK_DELETED)))
}

/// POST /api/tasks/bulk-complete - Mark the listed tasks completed
async fn bulk_complete(
    State(state): State<AppState>,
    AppJson(req): AppJson<BulkRequest>,
) -> ApiResult<Json<BulkResponse>> {
    state.simulate_latency().await;
    let count = state.tasks().bulk_complete(&req.task_ids).await?;
    Ok(Json(BulkResponse {
        success: true,
        message: messages::bulk_completed(count),
        count,
    }))
}

/// POST /api/tasks/bulk-delete - Delete the listed tasks
async fn bulk_delete(
    State(state): State<AppState>,
    AppJson(req): AppJson<BulkRequest>,
) -> ApiResult<Json<BulkResponse>> {
    state.simulate_latency().await;
    let count = state.tasks().bulk_delete(&req.task_ids).await?;
    Ok(Json(BulkResponse {
        success: true,
        message: messages::bulk_deleted(count),
        count,
    }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/bulk-complete", post(bulk_complete))
        .route("/api/tasks/bulk-delete", post(bulk_delete))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
