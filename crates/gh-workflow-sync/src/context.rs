//! Sync context
//!
//! The (repository, branch) pair whose run history is on screen.

use std::fmt;

/// Repository and branch selected for history display
///
/// Values are immutable; selecting something else means creating a new
/// context and publishing it on the change channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyncContext {
    /// Repository as `owner/name`
    pub repository: String,
    /// Branch name
    pub branch: String,
}

impl SyncContext {
    /// Create a new context
    pub fn new(repository: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            branch: branch.into(),
        }
    }

    /// Web URL of a run of this context's repository
    pub fn run_url(&self, run_id: u64) -> String {
        gh_client::run_page_url(&self.repository, run_id)
    }
}

impl fmt::Display for SyncContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.repository, self.branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_equality() {
        let context = SyncContext::new("acme/widgets", "main");
        assert_eq!(context.to_string(), "acme/widgets@main");
        assert_eq!(context, SyncContext::new("acme/widgets", "main"));
        assert_ne!(context, SyncContext::new("acme/widgets", "develop"));
        assert_ne!(context, SyncContext::new("acme/gadgets", "main"));
    }

    #[test]
    fn test_run_url() {
        let context = SyncContext::new("acme/widgets", "main");
        assert_eq!(
            context.run_url(7),
            "https://github.com/acme/widgets/actions/runs/7"
        );
    }
}
