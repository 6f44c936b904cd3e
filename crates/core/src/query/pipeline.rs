//! Filter, sort and paginate a task snapshot

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::filter::{FilterSpec, SortKey};
use crate::task::Task;

/// One page of query results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    /// Tasks matching the filters, before pagination
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Run the full pipeline over a snapshot. Never fails.
pub fn run_query(snapshot: &[Task], spec: &FilterSpec) -> TaskPage {
    let mut matching = filter_tasks(snapshot, spec);
    sort_tasks(&mut matching, spec.sort);
    paginate(matching, spec.effective_page(), spec.effective_page_size())
}

/// Status, then category, then search
pub fn filter_tasks(snapshot: &[Task], spec: &FilterSpec) -> Vec<Task> {
    let needle = spec.search.trim().to_lowercase();
    snapshot
        .iter()
        .filter(|t| spec.status.matches(t))
        .filter(|t| spec.category.matches(t))
        .filter(|t| {
            needle.is_empty()
                || t.name.to_lowercase().contains(&needle)
                || t.description_text().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Stable sort; equal keys keep their input order
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::Name => tasks.sort_by_cached_key(|t| t.name.to_lowercase()),
        SortKey::Priority => tasks.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank())),
        SortKey::DueDate => tasks.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
        SortKey::CreatedAt => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

/// Slice `[(page-1)*size, page*size)`; out of range gives an empty page
pub fn paginate(tasks: Vec<Task>, page: usize, page_size: usize) -> TaskPage {
    let page_size = page_size.max(1);
    let total = tasks.len();
    let total_pages = total.div_ceil(page_size);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let tasks = tasks.into_iter().skip(start).take(page_size).collect();

    TaskPage {
        tasks,
        total,
        page,
        total_pages,
    }
}
