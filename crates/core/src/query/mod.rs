//! Task list queries
//!
//! Filtering, sorting and pagination over a task snapshot.

mod filter;
mod pipeline;

pub use filter::*;
pub use pipeline::{filter_tasks, paginate, run_query, sort_tasks, TaskPage};
