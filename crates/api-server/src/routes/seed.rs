//! Demo data reset

use axum::{extract::State, routing::post, Json, Router};

use td_core::wire::{messages, SeedResponse};

use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/seed - Replace all tasks with the demo set
async fn seed(State(state): State<AppState>) -> ApiResult<Json<SeedResponse>> {
    let tasks_count = state.tasks().seed().await?;
    Ok(Json(SeedResponse {
        success: true,
        message: messages::DATA_SEEDED.to_string(),
        tasks_count,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/seed", post(seed))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::ServerConfig;
    use crate::state::AppState;

    #[tokio::test]
    async fn seed_resets_tasks() {
        let state = AppState::new(&ServerConfig::default());
        let app = super::router().with_state(state.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/seed")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["tasksCount"], 5);
        assert_eq!(state.tasks().count().await.unwrap(), 5);
    }
}
