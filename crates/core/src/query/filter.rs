//! Filter settings for task list queries

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskCategory};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Completion status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Unknown values fall back to `All`
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim() {
            "Active" => Self::Active,
            "Completed" => Self::Completed,
            _ => Self::All,
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Category filter: everything, or one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(TaskCategory),
}

impl CategoryFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.as_str(),
        }
    }

    /// Unknown values fall back to `All`
    pub fn parse_lenient(value: &str) -> Self {
        TaskCategory::parse(value).map_or(Self::All, Self::Only)
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => task.category == category,
        }
    }
}

/// Sort key for the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    Priority,
    DueDate,
    #[default]
    CreatedAt,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
            Self::CreatedAt => "createdAt",
        }
    }

    /// Display name, as shown in the sort picker
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Priority => "Priority",
            Self::DueDate => "Due Date",
            Self::CreatedAt => "Date Created",
        }
    }

    /// Unknown values fall back to `CreatedAt`
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim() {
            "name" => Self::Name,
            "priority" => Self::Priority,
            "dueDate" => Self::DueDate,
            _ => Self::CreatedAt,
        }
    }
}

/// Everything that drives a single list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub search: String,
    pub sort: SortKey,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            category: CategoryFilter::All,
            search: String::new(),
            sort: SortKey::CreatedAt,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterSpec {
    /// Page clamped to at least 1
    pub fn effective_page(&self) -> usize {
        self.page.max(1)
    }

    /// Page size clamped to `1..=MAX_PAGE_SIZE`
    pub fn effective_page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Query string pairs in the order the list endpoint documents them
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("status", self.status.as_str().to_string()),
            ("category", self.category.as_str().to_string()),
            ("search", self.search.clone()),
            ("sort", self.sort.as_str().to_string()),
            ("page", self.effective_page().to_string()),
            ("limit", self.effective_page_size().to_string()),
        ]
    }
}
