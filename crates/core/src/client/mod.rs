//! Client-side dashboard core
//!
//! Filter state, debounced search, bulk selection and the HTTP client that
//! talks to the task server.

mod api;
mod dashboard;
mod debounce;
mod filter_state;
mod http;
mod local;
mod notify;
mod selection;

pub use api::{Mutation, TaskApi};
pub use dashboard::Dashboard;
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use filter_state::FilterState;
pub use http::{list_query_string, TaskApiClient};
pub use notify::{NoticeLevel, Notification};
pub use selection::{HeaderCheckbox, SelectionTracker};
