//! Task model definitions

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Minimum length of a task name, after trimming
pub const MIN_NAME_LEN: usize = 3;

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Ordering weight; higher sorts first
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    Work,
    Personal,
    Shopping,
    Others,
}

impl TaskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Shopping => "Shopping",
            Self::Others => "Others",
        }
    }

    /// Lenient parse used for query strings; `None` for unknown values
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Work" => Some(Self::Work),
            "Personal" => Some(Self::Personal),
            "Shopping" => Some(Self::Shopping),
            "Others" => Some(Self::Others),
            _ => None,
        }
    }
}

impl Default for TaskCategory {
    fn default() -> Self {
        Self::Personal
    }
}

/// A task record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Description or the empty string
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Apply a patch field by field; omitted fields are left untouched
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description.filter(|d| !d.is_empty());
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Fields accepted when creating a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Missing names deserialize as empty and fail length validation
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Partial update of a task.
///
/// `description` and `due_date` are double options: `None` leaves the field
/// alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch that only flips the completion flag
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// A present key (even `null`) yields `Some`; a missing key falls back to `default`.
fn explicit_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task {
            id: 1,
            name: "Buy groceries".into(),
            description: Some("Milk, eggs".into()),
            priority: TaskPriority::Medium,
            category: TaskCategory::Shopping,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1),
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_task_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["name"], "Buy groceries");
        assert_eq!(value["priority"], "Medium");
        assert_eq!(value["category"], "Shopping");
        assert_eq!(value["dueDate"], "2026-03-01");
        assert_eq!(value["completed"], false);
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_patch_distinguishes_null_from_missing() {
        let patch: TaskPatch = serde_json::from_str(r#"{"dueDate": null}"#).unwrap();
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(patch.description, None);

        let patch: TaskPatch = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        assert_eq!(patch.due_date, None);
        assert_eq!(patch.completed, Some(true));
    }

    #[test]
    fn test_apply_leaves_omitted_fields() {
        let mut task = sample();
        task.apply(TaskPatch {
            priority: Some(TaskPriority::High),
            ..TaskPatch::default()
        });
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.name, "Buy groceries");
        assert_eq!(task.description.as_deref(), Some("Milk, eggs"));
        assert!(task.due_date.is_some());
    }

    #[test]
    fn test_apply_clears_due_date() {
        let mut task = sample();
        task.apply(TaskPatch {
            due_date: Some(None),
            description: Some(Some(String::new())),
            ..TaskPatch::default()
        });
        assert!(task.due_date.is_none());
        assert!(task.description.is_none());
    }

    #[test]
    fn test_priority_rank() {
        assert!(TaskPriority::High.rank() > TaskPriority::Medium.rank());
        assert!(TaskPriority::Medium.rank() > TaskPriority::Low.rank());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(TaskCategory::parse("Work"), Some(TaskCategory::Work));
        assert_eq!(TaskCategory::parse("All"), None);
        assert_eq!(TaskCategory::parse("bogus"), None);
    }
}
