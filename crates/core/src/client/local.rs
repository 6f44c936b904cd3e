//! In-process `TaskApi` backed directly by a `TaskService`

use async_trait::async_trait;

use super::api::{Mutation, TaskApi};
use crate::query::{FilterSpec, TaskPage};
use crate::task::{NewTask, Task, TaskPatch, TaskService};
use crate::wire::messages;
use crate::Result;

#[async_trait]
impl TaskApi for TaskService {
    async fn list(&self, spec: &FilterSpec) -> Result<TaskPage> {
        TaskService::list(self, spec).await
    }

    async fn create(&self, fields: &NewTask) -> Result<Mutation<Task>> {
        let task = TaskService::create(self, fields.clone()).await?;
        Ok(Mutation {
            message: messages::TASK_CREATED.to_string(),
            value: task,
        })
    }

    async fn update(&self, id: u64, patch: &TaskPatch) -> Result<Mutation<Task>> {
        let task = TaskService::update(self, id, patch.clone()).await?;
        Ok(Mutation {
            message: messages::TASK_UPDATED.to_string(),
            value: task,
        })
    }

    async fn delete(&self, id: u64) -> Result<Mutation<()>> {
        TaskService::delete(self, id).await?;
        Ok(Mutation {
            message: messages::TASK_DELETED.to_string(),
            value: (),
        })
    }

    async fn bulk_complete(&self, ids: &[u64]) -> Result<Mutation<usize>> {
        let count = TaskService::bulk_complete(self, ids).await?;
        Ok(Mutation {
            message: messages::bulk_completed(count),
            value: count,
        })
    }

    async fn bulk_delete(&self, ids: &[u64]) -> Result<Mutation<usize>> {
        let count = TaskService::bulk_delete(self, ids).await?;
        Ok(Mutation {
            message: messages::bulk_deleted(count),
            value: count,
        })
    }
}
