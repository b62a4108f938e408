//! View models
//!
//! Pre-computed presentation data, derived from [`AppState`](crate::state::AppState)
//! so the widgets only lay things out.

mod history;
mod repository_tabs;
mod status_bar;

pub use history::HistoryViewModel;
pub use repository_tabs::RepositoryTabsViewModel;
pub use status_bar::StatusBarViewModel;
