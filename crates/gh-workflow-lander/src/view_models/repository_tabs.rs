//! Repository Tabs View Model

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTabsViewModel {
    /// Tab titles, `owner/name@branch`
    pub titles: Vec<String>,
    pub selected: usize,
}

impl RepositoryTabsViewModel {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            titles: state.repositories.iter().map(ToString::to_string).collect(),
            selected: state.selected_repository,
        }
    }
}
