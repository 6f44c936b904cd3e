//! Dashboard controller
//!
//! Owns the filter state, selection and last rendered page, and re-queries
//! the task API whenever something changes. Search input is debounced, and
//! every query carries a sequence number so a slow response can never
//! replace the page produced by a newer query.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::api::TaskApi;
use super::debounce::{Debouncer, SEARCH_DEBOUNCE};
use super::filter_state::FilterState;
use super::notify::Notification;
use super::selection::{HeaderCheckbox, SelectionTracker};
use crate::query::{CategoryFilter, FilterSpec, SortKey, StatusFilter, TaskPage, DEFAULT_PAGE_SIZE};
use crate::task::{NewTask, Task, TaskPatch, MIN_NAME_LEN};
use crate::{Error, Result};

#[derive(Default)]
struct View {
    filters: FilterState,
    page: Option<TaskPage>,
    selection: SelectionTracker,
    applied_seq: u64,
    search_input: String,
    notifications: Vec<Notification>,
}

impl View {
    fn page_ids(&self) -> Vec<u64> {
        self.page
            .as_ref()
            .map(|p| p.tasks.iter().map(|t| t.id).collect())
            .unwrap_or_default()
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

struct Inner<A> {
    api: A,
    view: Mutex<View>,
    issued: AtomicU64,
    debouncer: Debouncer,
}

impl<A: TaskApi> Inner<A> {
    async fn refresh(&self) -> bool {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let spec = self.view.lock().await.filters.spec().clone();
        let result = self.api.list(&spec).await;

        let mut view = self.view.lock().await;
        if seq <= view.applied_seq {
            debug!(seq, applied = view.applied_seq, "Dropping stale task page");
            return false;
        }
        view.applied_seq = seq;

        match result {
            Ok(page) => {
                view.page = Some(page);
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to load tasks");
                view.notify(Notification::error("Error", "Failed to load tasks"));
                false
            }
        }
    }
}

/// Client-side dashboard state driving a `TaskApi`
pub struct Dashboard<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for Dashboard<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: TaskApi + 'static> Dashboard<A> {
    pub fn new(api: A) -> Self {
        Self::with_page_size(api, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(api: A, page_size: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                view: Mutex::new(View {
                    filters: FilterState::new(page_size),
                    ..View::default()
                }),
                issued: AtomicU64::new(0),
                debouncer: Debouncer::new(SEARCH_DEBOUNCE),
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Re-run the list query with the current filters.
    ///
    /// Returns `false` when the response was stale or the query failed.
    pub async fn refresh(&self) -> bool {
        self.inner.refresh().await
    }

    // ---------------------------------------------------------------------
    // Filters
    // ---------------------------------------------------------------------

    pub async fn filters(&self) -> FilterSpec {
        self.inner.view.lock().await.filters.spec().clone()
    }

    /// Raw text currently in the search box, committed or not
    pub async fn search_input(&self) -> String {
        self.inner.view.lock().await.search_input.clone()
    }

    pub async fn set_status(&self, status: StatusFilter) -> bool {
        self.inner.view.lock().await.filters.set_status(status);
        self.refresh().await
    }

    pub async fn set_category(&self, category: CategoryFilter) -> bool {
        self.inner.view.lock().await.filters.set_category(category);
        self.refresh().await
    }

    pub async fn set_sort(&self, sort: SortKey) -> bool {
        {
            let mut view = self.inner.view.lock().await;
            view.filters.set_sort(sort);
            view.notify(Notification::info(
                "Tasks sorted",
                format!("Sorted by {}", sort.label()),
            ));
        }
        self.refresh().await
    }

    /// Record a keystroke in the search box. The query runs once input has
    /// been quiet for the debounce window; earlier pending queries are
    /// cancelled.
    pub async fn type_search(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.view.lock().await.search_input = text.clone();

        let inner = Arc::clone(&self.inner);
        self.inner.debouncer.schedule(async move {
            inner.view.lock().await.filters.commit_search(&text);
            inner.refresh().await;
        });
    }

    pub fn search_pending(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    pub async fn reset_filters(&self) -> bool {
        self.inner.debouncer.cancel();
        {
            let mut view = self.inner.view.lock().await;
            view.filters.reset();
            view.search_input.clear();
            view.notify(Notification::info("Filters reset", ""));
        }
        self.refresh().await
    }

    pub async fn next_page(&self) -> bool {
        let moved = {
            let mut view = self.inner.view.lock().await;
            let total_pages = view.page.as_ref().map_or(0, |p| p.total_pages);
            view.filters.next_page(total_pages)
        };
        moved && self.refresh().await
    }

    pub async fn prev_page(&self) -> bool {
        let moved = self.inner.view.lock().await.filters.prev_page();
        moved && self.refresh().await
    }

    /// Last page applied from the server
    pub async fn page(&self) -> Option<TaskPage> {
        self.inner.view.lock().await.page.clone()
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    pub async fn toggle_selection(&self, id: u64, checked: bool) {
        self.inner.view.lock().await.selection.toggle(id, checked);
    }

    /// Select or deselect every task on the rendered page
    pub async fn select_all(&self, checked: bool) {
        let mut view = self.inner.view.lock().await;
        let ids = view.page_ids();
        view.selection.set_page(&ids, checked);
    }

    pub async fn clear_selection(&self) {
        self.inner.view.lock().await.selection.clear();
    }

    pub async fn selected_ids(&self) -> Vec<u64> {
        self.inner.view.lock().await.selection.ids()
    }

    pub async fn header_checkbox(&self) -> HeaderCheckbox {
        let view = self.inner.view.lock().await;
        view.selection.header_state(&view.page_ids())
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    pub async fn create_task(&self, fields: NewTask) -> Result<Task> {
        if fields.name.trim().chars().count() < MIN_NAME_LEN {
            let err = Error::Validation(format!(
                "Task name must be at least {} characters",
                MIN_NAME_LEN
            ));
            self.notify(Notification::error("Validation error", err.user_message()))
                .await;
            return Err(err);
        }

        match self.inner.api.create(&fields).await {
            Ok(done) => {
                self.notify(Notification::success("Task added!", done.message))
                    .await;
                self.refresh().await;
                Ok(done.value)
            }
            Err(e) => Err(self.fail("Failed to add task", e).await),
        }
    }

    pub async fn update_task(&self, id: u64, patch: TaskPatch) -> Result<Task> {
        match self.inner.api.update(id, &patch).await {
            Ok(done) => {
                self.notify(Notification::success("Task updated!", done.message))
                    .await;
                self.refresh().await;
                Ok(done.value)
            }
            Err(e) => Err(self.fail("Failed to update task", e).await),
        }
    }

    pub async fn toggle_complete(&self, id: u64, completed: bool) -> Result<Task> {
        match self
            .inner
            .api
            .update(id, &TaskPatch::completed(completed))
            .await
        {
            Ok(done) => {
                let title = if completed {
                    "Task completed!"
                } else {
                    "Task reopened"
                };
                self.notify(Notification::success(title, "")).await;
                self.refresh().await;
                Ok(done.value)
            }
            Err(e) => Err(self.fail("Failed to update task", e).await),
        }
    }

    pub async fn delete_task(&self, id: u64) -> Result<()> {
        match self.inner.api.delete(id).await {
            Ok(done) => {
                self.notify(Notification::success("Task deleted!", done.message))
                    .await;
                self.refresh().await;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to delete task", e).await),
        }
    }

    /// Complete every selected task. With nothing selected no request is
    /// sent and `Ok(0)` is returned.
    pub async fn bulk_complete(&self) -> Result<usize> {
        let ids = self.selected_ids().await;
        if ids.is_empty() {
            return Ok(0);
        }
        match self.inner.api.bulk_complete(&ids).await {
            Ok(done) => {
                self.after_bulk(Notification::success("Tasks completed!", done.message))
                    .await;
                Ok(done.value)
            }
            Err(e) => Err(self.fail("Failed to complete tasks", e).await),
        }
    }

    /// Delete every selected task. With nothing selected no request is sent
    /// and `Ok(0)` is returned.
    pub async fn bulk_delete(&self) -> Result<usize> {
        let ids = self.selected_ids().await;
        if ids.is_empty() {
            return Ok(0);
        }
        match self.inner.api.bulk_delete(&ids).await {
            Ok(done) => {
                self.after_bulk(Notification::success("Tasks deleted!", done.message))
                    .await;
                Ok(done.value)
            }
            Err(e) => Err(self.fail("Failed to delete tasks", e).await),
        }
    }

    async fn after_bulk(&self, notification: Notification) {
        {
            let mut view = self.inner.view.lock().await;
            view.selection.clear();
            view.notify(notification);
        }
        self.refresh().await;
    }

    // ---------------------------------------------------------------------
    // Notifications
    // ---------------------------------------------------------------------

    /// Drain pending notifications, oldest first
    pub async fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut self.inner.view.lock().await.notifications)
    }

    async fn notify(&self, notification: Notification) {
        self.inner.view.lock().await.notify(notification);
    }

    async fn fail(&self, title: &str, err: Error) -> Error {
        warn!(error = %err, "{}", title);
        self.notify(Notification::error(title, err.user_message()))
            .await;
        err
    }
}
