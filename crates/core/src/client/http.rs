//! HTTP client for the task server

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::api::{Mutation, TaskApi};
use crate::error::Error;
use crate::query::{FilterSpec, TaskPage};
use crate::task::{NewTask, Task, TaskPatch};
use crate::wire::{
    AuthResponse, BulkRequest, BulkResponse, MessageResponse, SeedResponse, TaskListResponse,
    TaskResponse, UserProfile,
};
use crate::Result;

/// Client for the `/api` endpoints
#[derive(Debug, Clone)]
pub struct TaskApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl TaskApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Log in with the given credentials
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp: AuthResponse = self.send(self.http.post(self.url("/login")).json(&body)).await?;
        Ok(resp.user)
    }

    pub async fn logout(&self) -> Result<()> {
        let _: MessageResponse = self.send(self.http.post(self.url("/logout"))).await?;
        Ok(())
    }

    /// Reset the server's tasks to the demo data set
    pub async fn seed(&self) -> Result<usize> {
        let resp: SeedResponse = self.send(self.http.post(self.url("/seed"))).await?;
        Ok(resp.tasks_count)
    }

    async fn bulk(&self, path: &str, ids: &[u64]) -> Result<Mutation<usize>> {
        let body = BulkRequest {
            task_ids: ids.to_vec(),
        };
        let resp: BulkResponse = self.send(self.http.post(self.url(path)).json(&body)).await?;
        Ok(Mutation {
            message: resp.message,
            value: resp.count,
        })
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        decode_body(status, &body)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        body: &B,
    ) -> Result<T> {
        self.send(request.json(body)).await
    }
}

/// Turn a response into `T`, or into `Error::Api` carrying the server's
/// message when the status is not a success.
fn decode_body<T: DeserializeOwned>(status: reqwest::StatusCode, body: &[u8]) -> Result<T> {
    if !status.is_success() {
        let message = serde_json::from_slice::<MessageResponse>(body)
            .map(|failure| failure.message)
            .unwrap_or_else(|_| status.to_string());
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(serde_json::from_slice(body)?)
}

/// Encode a filter spec as the list endpoint's query string
pub fn list_query_string(spec: &FilterSpec) -> String {
    spec.to_query_pairs()
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(&value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl TaskApi for TaskApiClient {
    async fn list(&self, spec: &FilterSpec) -> Result<TaskPage> {
        let url = format!("{}?{}", self.url("/tasks"), list_query_string(spec));
        debug!(%url, "Fetching tasks");
        let resp: TaskListResponse = self.send(self.http.get(url)).await?;
        Ok(resp.into())
    }

    async fn create(&self, fields: &NewTask) -> Result<Mutation<Task>> {
        let resp: TaskResponse = self
            .send_json(self.http.post(self.url("/tasks")), fields)
            .await?;
        Ok(Mutation {
            message: resp.message,
            value: resp.task,
        })
    }

    async fn update(&self, id: u64, patch: &TaskPatch) -> Result<Mutation<Task>> {
        let resp: TaskResponse = self
            .send_json(self.http.put(self.url(&format!("/tasks/{}", id))), patch)
            .await?;
        Ok(Mutation {
            message: resp.message,
            value: resp.task,
        })
    }

    async fn delete(&self, id: u64) -> Result<Mutation<()>> {
        let resp: MessageResponse = self
            .send(self.http.delete(self.url(&format!("/tasks/{}", id))))
            .await?;
        Ok(Mutation {
            message: resp.message,
            value: (),
        })
    }

    async fn bulk_complete(&self, ids: &[u64]) -> Result<Mutation<usize>> {
        self.bulk("/tasks/bulk-complete", ids).await
    }

    async fn bulk_delete(&self, ids: &[u64]) -> Result<Mutation<usize>> {
        self.bulk("/tasks/bulk-delete", ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{CategoryFilter, SortKey, StatusFilter};
    use crate::task::TaskCategory;

    #[test]
    fn query_string_encodes_search() {
        let spec = FilterSpec {
            status: StatusFilter::Active,
            category: CategoryFilter::Only(TaskCategory::Work),
            search: "milk & eggs".into(),
            sort: SortKey::DueDate,
            page: 2,
            page_size: 10,
        };
        assert_eq!(
            list_query_string(&spec),
            "status=Active&category=Work&search=milk%20%26%20eggs&sort=dueDate&page=2&limit=10"
        );
    }

    #[test]
    fn failure_body_becomes_api_error() {
        let body = br#"{"success":false,"message":"No tasks selected"}"#;
        match decode_body::<BulkResponse>(reqwest::StatusCode::BAD_REQUEST, body) {
            Err(Error::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "No tasks selected");
            }
            other => panic!("Expected API error, got: {:?}", other),
        }

        match decode_body::<BulkResponse>(reqwest::StatusCode::BAD_GATEWAY, b"upstream down") {
            Err(Error::Api { message, .. }) => assert_eq!(message, "502 Bad Gateway"),
            other => panic!("Expected API error, got: {:?}", other),
        }
    }

    #[test]
    fn malformed_success_body_is_a_serialization_error() {
        let result = decode_body::<BulkResponse>(reqwest::StatusCode::OK, b"<html>");
        assert!(matches!(result, Err(Error::Serialization(_))));

        let ok: BulkResponse = decode_body(
            reqwest::StatusCode::OK,
            br#"{"success":true,"message":"2 task(s) deleted successfully!","count":2}"#,
        )
        .unwrap();
        assert_eq!(ok.count, 2);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = TaskApiClient::new("http://127.0.0.1:3000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
        assert_eq!(client.url("/tasks"), "http://127.0.0.1:3000/api/tasks");
    }
}
