//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{NewTask, Task, TaskPatch};
use crate::Result;

/// Repository interface for task storage
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task, assigning its id and creation time.
    ///
    /// Fails with `DuplicateName` when a task with the same name
    /// (case-insensitive) already exists.
    async fn create(&self, fields: NewTask) -> Result<Task>;

    /// Get a task by ID
    async fn find_by_id(&self, id: u64) -> Result<Option<Task>>;

    /// All tasks in insertion order
    async fn all(&self) -> Result<Vec<Task>>;

    /// Merge a patch onto an existing task
    async fn update(&self, id: u64, patch: TaskPatch) -> Result<Option<Task>>;

    /// Remove every task whose id is listed; returns how many were removed
    async fn remove(&self, ids: &[u64]) -> Result<usize>;

    /// Mark every listed task completed; returns how many matched
    async fn set_completed(&self, ids: &[u64]) -> Result<usize>;

    /// Replace the whole collection and restart the id counter after it
    async fn replace_all(&self, tasks: Vec<Task>) -> Result<()>;
}
