//! Task mutation and query operations
//!
//! Validates input, then delegates to the repository. This is the only
//! layer request handlers talk to.

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate, Utc};
use tracing::{debug, info};

use super::model::{NewTask, Task, TaskCategory, TaskPatch, TaskPriority, MIN_NAME_LEN};
use super::repository::TaskRepository;
use crate::query::{run_query, FilterSpec, TaskPage};
use crate::{Error, Result};

#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    /// Filtered, sorted and paginated view of the store
    pub async fn list(&self, spec: &FilterSpec) -> Result<TaskPage> {
        let snapshot = self.repo.all().await?;
        let page = run_query(&snapshot, spec);
        debug!(
            total = page.total,
            page = page.page,
            returned = page.tasks.len(),
            "Task query"
        );
        Ok(page)
    }

    /// Number of tasks in the store
    pub async fn count(&self) -> Result<usize> {
        Ok(self.repo.all().await?.len())
    }

    pub async fn get(&self, id: u64) -> Result<Task> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(Error::TaskNotFound(id))
    }

    pub async fn create(&self, mut fields: NewTask) -> Result<Task> {
        fields.name = validate_name(&fields.name)?;
        fields.description = fields.description.map(|d| d.trim().to_string());

        let task = self.repo.create(fields).await?;
        info!(id = task.id, name = %task.name, "Task created");
        Ok(task)
    }

    /// Merge the provided fields onto an existing task.
    ///
    /// Name uniqueness is only checked at creation time.
    pub async fn update(&self, id: u64, mut patch: TaskPatch) -> Result<Task> {
        if let Some(name) = patch.name.as_deref() {
            patch.name = Some(validate_name(name)?);
        }

        let task = self
            .repo
            .update(id, patch)
            .await?
            .ok_or(Error::TaskNotFound(id))?;
        info!(id, "Task updated");
        Ok(task)
    }

    pub async fn set_completed(&self, id: u64, completed: bool) -> Result<Task> {
        self.update(id, TaskPatch::completed(completed)).await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        if self.repo.remove(&[id]).await? == 0 {
            return Err(Error::TaskNotFound(id));
        }
        info!(id, "Task deleted");
        Ok(())
    }

    /// Mark the listed tasks completed. Unknown ids are skipped; the
    /// returned count is the number of ids targeted.
    pub async fn bulk_complete(&self, ids: &[u64]) -> Result<usize> {
        if ids.is_empty() {
            return Err(Error::EmptySelection);
        }
        let matched = self.repo.set_completed(ids).await?;
        info!(targeted = ids.len(), matched, "Bulk complete");
        Ok(ids.len())
    }

    /// Remove the listed tasks. Unknown ids are skipped; the returned count
    /// is the number of ids targeted.
    pub async fn bulk_delete(&self, ids: &[u64]) -> Result<usize> {
        if ids.is_empty() {
            return Err(Error::EmptySelection);
        }
        let removed = self.repo.remove(ids).await?;
        info!(targeted = ids.len(), removed, "Bulk delete");
        Ok(ids.len())
    }

    /// Replace everything with the demo data set
    pub async fn seed(&self) -> Result<usize> {
        let tasks = demo_tasks(Local::now().date_naive());
        let count = tasks.len();
        self.repo.replace_all(tasks).await?;
        info!(count, "Task store seeded");
        Ok(count)
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(Error::Validation(format!(
            "Task name must be at least {} characters",
            MIN_NAME_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Five demo tasks with due dates relative to `today`
pub fn demo_tasks(today: NaiveDate) -> Vec<Task> {
    let now = Utc::now();
    let entry = |id: u64,
                 name: &str,
                 description: &str,
                 priority: TaskPriority,
                 category: TaskCategory,
                 due_in_days: Option<i64>,
                 completed: bool| Task {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        priority,
        category,
        due_date: due_in_days.map(|days| today + Duration::days(days)),
        completed,
        created_at: now,
    };

    vec![
        entry(
            1,
            "Complete project documentation",
            "Write comprehensive docs for the new feature",
            TaskPriority::High,
            TaskCategory::Work,
            Some(2),
            false,
        ),
        entry(
            2,
            "Buy groceries",
            "Milk, eggs, bread, vegetables",
            TaskPriority::Medium,
            TaskCategory::Shopping,
            Some(1),
            false,
        ),
        entry(
            3,
            "Review pull requests",
            "Check and merge pending PRs",
            TaskPriority::High,
            TaskCategory::Work,
            Some(-1),
            true,
        ),
        entry(
            4,
            "Call dentist",
            "Schedule annual checkup appointment",
            TaskPriority::Low,
            TaskCategory::Personal,
            Some(7),
            false,
        ),
        entry(
            5,
            "Update resume",
            "Add recent projects and skills",
            TaskPriority::Medium,
            TaskCategory::Personal,
            None,
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{CategoryFilter, StatusFilter};
    use crate::task::MemoryTaskStore;

    fn service() -> TaskService {
        TaskService::new(Arc::new(MemoryTaskStore::new()))
    }

    async fn seed_three(svc: &TaskService) {
        svc.create(
            NewTask::new("Finish report")
                .with_description("Quarterly Work summary")
                .with_priority(TaskPriority::High)
                .with_category(TaskCategory::Work),
        )
        .await
        .unwrap();
        svc.create(
            NewTask::new("Call mom")
                .with_priority(TaskPriority::Medium)
                .with_category(TaskCategory::Personal),
        )
        .await
        .unwrap();
        svc.create(
            NewTask::new("Buy milk")
                .with_priority(TaskPriority::Low)
                .with_category(TaskCategory::Shopping),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_short_name_rejected_and_store_unchanged() {
        let svc = service();
        for name in ["", "ab", "  x  "] {
            let err = svc.create(NewTask::new(name)).await.unwrap_err();
            assert!(err.is_validation(), "{name:?} should fail validation");
        }
        assert_eq!(svc.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_trims_and_defaults() {
        let svc = service();
        let task = svc
            .create(NewTask::new("  Water plants  ").with_description(""))
            .await
            .unwrap();
        assert_eq!(task.name, "Water plants");
        assert!(task.description.is_none());
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.category, TaskCategory::Personal);
        assert!(!task.completed);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let svc = service();
        svc.create(NewTask::new("Alpha")).await.unwrap();
        let err = svc.create(NewTask::new("alpha")).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
        assert_eq!(svc.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_and_skips_uniqueness() {
        let svc = service();
        let alpha = svc.create(NewTask::new("Alpha")).await.unwrap();
        svc.create(NewTask::new("Beta")).await.unwrap();

        let updated = svc
            .update(
                alpha.id,
                TaskPatch {
                    name: Some("Beta".into()),
                    priority: Some(TaskPriority::Low),
                    ..TaskPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Beta");
        assert_eq!(updated.priority, TaskPriority::Low);
        assert_eq!(updated.category, alpha.category);
        assert_eq!(updated.created_at, alpha.created_at);
    }

    #[tokio::test]
    async fn test_update_rejects_short_name() {
        let svc = service();
        let task = svc.create(NewTask::new("Alpha")).await.unwrap();
        let err = svc
            .update(
                task.id,
                TaskPatch {
                    name: Some("A".into()),
                    ..TaskPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(svc.get(task.id).await.unwrap().name, "Alpha");
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let svc = service();
        assert!(matches!(
            svc.set_completed(9, true).await.unwrap_err(),
            Error::TaskNotFound(9)
        ));
        assert!(matches!(
            svc.delete(9).await.unwrap_err(),
            Error::TaskNotFound(9)
        ));
    }

    #[tokio::test]
    async fn test_delete_decreases_total_by_one() {
        let svc = service();
        seed_three(&svc).await;
        let before = svc.list(&FilterSpec::default()).await.unwrap().total;

        let alpha = svc.create(NewTask::new("Alpha")).await.unwrap();
        assert_eq!(svc.list(&FilterSpec::default()).await.unwrap().total, before + 1);

        svc.delete(alpha.id).await.unwrap();
        assert_eq!(svc.list(&FilterSpec::default()).await.unwrap().total, before);
    }

    #[tokio::test]
    async fn test_empty_bulk_operations_fail() {
        let svc = service();
        seed_three(&svc).await;

        assert!(matches!(
            svc.bulk_complete(&[]).await.unwrap_err(),
            Error::EmptySelection
        ));
        assert!(matches!(
            svc.bulk_delete(&[]).await.unwrap_err(),
            Error::EmptySelection
        ));

        let page = svc.list(&FilterSpec::default()).await.unwrap();
        assert_eq!(page.total, 3);
        assert!(page.tasks.iter().all(|t| !t.completed));
    }

    #[tokio::test]
    async fn test_bulk_complete_then_filter_completed() {
        let svc = service();
        let a = svc.create(NewTask::new("First task")).await.unwrap();
        let b = svc.create(NewTask::new("Second task")).await.unwrap();

        let targeted = svc.bulk_complete(&[a.id, b.id]).await.unwrap();
        assert_eq!(targeted, 2);
        assert!(svc.get(a.id).await.unwrap().completed);
        assert!(svc.get(b.id).await.unwrap().completed);

        let spec = FilterSpec {
            status: StatusFilter::Completed,
            ..FilterSpec::default()
        };
        assert_eq!(svc.list(&spec).await.unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_bulk_ops_report_targeted_count() {
        let svc = service();
        let a = svc.create(NewTask::new("Only task")).await.unwrap();

        assert_eq!(svc.bulk_complete(&[a.id, 40, 41]).await.unwrap(), 3);
        assert_eq!(svc.bulk_delete(&[a.id, 40]).await.unwrap(), 2);
        assert_eq!(svc.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_category_and_reset_scenario() {
        let svc = service();
        seed_three(&svc).await;

        let search = FilterSpec {
            search: "Work".into(),
            ..FilterSpec::default()
        };
        let page = svc.list(&search).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.tasks[0].priority, TaskPriority::High);
        assert_eq!(page.tasks[0].category, TaskCategory::Work);

        let personal = FilterSpec {
            category: CategoryFilter::Only(TaskCategory::Personal),
            ..FilterSpec::default()
        };
        assert_eq!(svc.list(&personal).await.unwrap().total, 1);

        assert_eq!(svc.list(&FilterSpec::default()).await.unwrap().total, 3);
    }

    #[tokio::test]
    async fn test_seed_replaces_tasks_and_counter() {
        let svc = service();
        svc.create(NewTask::new("Leftover")).await.unwrap();

        assert_eq!(svc.seed().await.unwrap(), 5);
        assert_eq!(svc.count().await.unwrap(), 5);

        let next = svc.create(NewTask::new("After seed")).await.unwrap();
        assert_eq!(next.id, 6);

        let completed = FilterSpec {
            status: StatusFilter::Completed,
            ..FilterSpec::default()
        };
        let page = svc.list(&completed).await.unwrap();
        assert_eq!(page.tasks[0].name, "Review pull requests");
    }

    #[test]
    fn test_demo_tasks_due_dates_relative() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let tasks = demo_tasks(today);
        assert_eq!(tasks.len(), 5);
        assert_eq!(tasks[0].due_date, NaiveDate::from_ymd_opt(2026, 10, 21));
        assert_eq!(tasks[2].due_date, NaiveDate::from_ymd_opt(2026, 10, 18));
        assert!(tasks[4].due_date.is_none());
    }
}
