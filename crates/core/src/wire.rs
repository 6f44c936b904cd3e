//! JSON bodies exchanged over the HTTP boundary
//!
//! Shared by the server routes and the client so both sides agree on the
//! `{ success, message, ... }` envelope.

use serde::{Deserialize, Deserializer, Serialize};

use crate::query::TaskPage;
use crate::task::Task;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListResponse {
    pub success: bool,
    pub tasks: Vec<Task>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl From<TaskPage> for TaskListResponse {
    fn from(page: TaskPage) -> Self {
        Self {
            success: true,
            tasks: page.tasks,
            total: page.total,
            page: page.page,
            total_pages: page.total_pages,
        }
    }
}

impl From<TaskListResponse> for TaskPage {
    fn from(resp: TaskListResponse) -> Self {
        Self {
            tasks: resp.tasks,
            total: resp.total,
            page: resp.page,
            total_pages: resp.total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub task: Task,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRequest {
    #[serde(default, deserialize_with = "ids_or_empty")]
    pub task_ids: Vec<u64>,
}

/// Anything other than an array of ids counts as an empty selection
fn ids_or_empty<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Ids {
        List(Vec<u64>),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Ids::deserialize(deserializer)? {
        Ids::List(ids) => ids,
        Ids::Other(_) => Vec::new(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse {
    pub success: bool,
    pub message: String,
    pub tasks_count: usize,
}

/// Public view of a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub user: UserProfile,
}

/// Success messages carried in response envelopes
pub mod messages {
    pub const TASK_CREATED: &str = "Task created successfully!";
    pub const TASK_UPDATED: &str = "Task updated successfully!";
    pub const TASK_DELETED: &str = "Task deleted successfully!";
    pub const DATA_SEEDED: &str = "Data seeded successfully!";

    pub fn bulk_completed(count: usize) -> String {
        format!("{} task(s) marked as complete!", count)
    }

    pub fn bulk_deleted(count: usize) -> String {
        format!("{} task(s) deleted successfully!", count)
    }
}
