//! Task API interface used by the dashboard

use async_trait::async_trait;

use crate::query::{FilterSpec, TaskPage};
use crate::task::{NewTask, Task, TaskPatch};
use crate::Result;

/// Outcome of a successful mutation, with the server's message
#[derive(Debug, Clone)]
pub struct Mutation<T> {
    pub message: String,
    pub value: T,
}

/// Operations the dashboard performs against the task server
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list(&self, spec: &FilterSpec) -> Result<TaskPage>;

    async fn create(&self, fields: &NewTask) -> Result<Mutation<Task>>;

    async fn update(&self, id: u64, patch: &TaskPatch) -> Result<Mutation<Task>>;

    async fn delete(&self, id: u64) -> Result<Mutation<()>>;

    /// Returns the number of ids targeted
    async fn bulk_complete(&self, ids: &[u64]) -> Result<Mutation<usize>>;

    /// Returns the number of ids targeted
    async fn bulk_delete(&self, ids: &[u64]) -> Result<Mutation<usize>>;
}
