//! In-memory task storage
//!
//! Keeps tasks in insertion order together with the id counter, both behind
//! one lock so id assignment and the duplicate-name check stay serial.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::model::{NewTask, Task, TaskPatch};
use super::repository::TaskRepository;
use crate::{Error, Result};

struct Inner {
    tasks: Vec<Task>,
    next_id: u64,
}

/// In-memory task store
pub struct MemoryTaskStore {
    inner: RwLock<Inner>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                tasks: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Number of stored tasks
    pub async fn len(&self) -> usize {
        self.inner.read().await.tasks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskStore {
    async fn create(&self, fields: NewTask) -> Result<Task> {
        let mut inner = self.inner.write().await;
        let lowered = fields.name.to_lowercase();
        if inner
            .tasks
            .iter()
            .any(|t| t.name.to_lowercase() == lowered)
        {
            return Err(Error::DuplicateName(fields.name));
        }

        let task = Task {
            id: inner.next_id,
            name: fields.name,
            description: fields.description.filter(|d| !d.is_empty()),
            priority: fields.priority.unwrap_or_default(),
            category: fields.category.unwrap_or_default(),
            due_date: fields.due_date,
            completed: false,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Task>> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn all(&self) -> Result<Vec<Task>> {
        Ok(self.inner.read().await.tasks.clone())
    }

    async fn update(&self, id: u64, patch: TaskPatch) -> Result<Option<Task>> {
        let mut inner = self.inner.write().await;
        Ok(inner.tasks.iter_mut().find(|t| t.id == id).map(|task| {
            task.apply(patch);
            task.clone()
        }))
    }

    async fn remove(&self, ids: &[u64]) -> Result<usize> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| !ids.contains(&t.id));
        Ok(before - inner.tasks.len())
    }

    async fn set_completed(&self, ids: &[u64]) -> Result<usize> {
        let mut inner = self.inner.write().await;
        let mut matched = 0;
        for task in inner.tasks.iter_mut().filter(|t| ids.contains(&t.id)) {
            task.completed = true;
            matched += 1;
        }
        Ok(matched)
    }

    async fn replace_all(&self, tasks: Vec<Task>) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        inner.tasks = tasks;
        Ok(())
    }
}
