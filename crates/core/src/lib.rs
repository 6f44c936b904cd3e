//! Core library for the task dashboard
//!
//! This crate contains the core business logic, including:
//! - Task storage and mutations
//! - The list query pipeline (filter, sort, paginate)
//! - Client-side filter state, selection tracking and HTTP client

pub mod client;
pub mod error;
pub mod query;
pub mod task;
pub mod wire;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
