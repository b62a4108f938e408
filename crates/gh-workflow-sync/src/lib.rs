//! Run history synchronization
//!
//! Keeps the workflow run history of the selected repository and branch
//! fresh. The [`SyncController`] starts a refresh whenever the selected
//! [`SyncContext`] changes, when asked to, or when a mutating operation
//! raises the [`ForceRefresh`] signal, and publishes [`RunHistory`]
//! snapshots for rendering.

pub mod context;
pub mod controller;
pub mod history;
pub mod signal;
pub mod status;

pub use context::SyncContext;
pub use controller::SyncController;
pub use history::{format_duration, RefreshState, RunHistory, RunRow};
pub use signal::ForceRefresh;
pub use status::{TaskStatus, TaskStatusType};
