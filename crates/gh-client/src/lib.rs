//! GitHub Actions API client
//!
//! This crate provides everything the application needs to talk to the
//! GitHub Actions REST API, layered bottom-up:
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │  classifier::triggerable_workflows()             │
//! │  (which workflows declare workflow_dispatch)     │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - list_repositories() / get_repository()        │
//! │  - list_workflow_runs() / list_workflows()       │
//! │  - trigger_workflow() / rerun_*() / cancel_run() │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │   RestClient    │────────►│      Transport      │
//! │ (typed calls)   │         │ (auth, status, JSON)│
//! └─────────────────┘         └─────────────────────┘
//!                                       │
//!                                       ▼
//!                             ┌─────────────────────┐
//!                             │  HttpBackend trait  │
//!                             │  (ReqwestBackend)   │
//!                             └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{GitHubClient, ReqwestBackend, RestClient, Transport};
//! use std::sync::Arc;
//!
//! # async fn example() -> gh_client::Result<()> {
//! let backend = ReqwestBackend::new(gh_client::REQUEST_TIMEOUT)?;
//! let transport = Transport::new(Arc::new(backend), gh_client::DEFAULT_API_URL, "token");
//! let client = RestClient::new(transport);
//!
//! let runs = client.list_workflow_runs("acme/widgets", "main").await?;
//! let dispatchable = gh_client::triggerable_workflows(&client, "acme/widgets").await?;
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod client;
pub mod error;
pub mod rest_client;
pub mod token;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

/// Default GitHub host (public GitHub)
pub const DEFAULT_HOST: &str = "github.com";

pub use classifier::{declares_manual_dispatch, triggerable_workflows};
pub use client::{GitHubClient, DEFAULT_REPOSITORY_LIMIT};
pub use error::{ClientError, Result};
pub use rest_client::RestClient;
pub use token::TokenResolver;
pub use transport::{
    ApiRequest, HttpBackend, HttpRequest, HttpResponse, ReqwestBackend, Transport,
    DEFAULT_API_URL, REQUEST_TIMEOUT,
};
pub use types::{
    Actor, Branch, Repository, RunLogs, Workflow, WorkflowRun, WorkflowRunConclusion,
    WorkflowRunStatus,
};

/// URL of a run's page on the web UI
///
/// # Example
///
/// ```
/// assert_eq!(
///     gh_client::run_page_url("acme/widgets", 42),
///     "https://github.com/acme/widgets/actions/runs/42"
/// );
/// ```
pub fn run_page_url(repository: &str, run_id: u64) -> String {
    format!(
        "https://{}/{}/actions/runs/{}",
        DEFAULT_HOST, repository, run_id
    )
}
