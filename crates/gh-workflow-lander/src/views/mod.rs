use ratatui::{
    layout::{Constraint, Layout},
    Frame,
};

use crate::keymap::Keymap;
use crate::state::AppState;
use crate::view_models::{HistoryViewModel, RepositoryTabsViewModel, StatusBarViewModel};

mod history_view;
mod key_hints;
mod repository_tabs_view;
mod status_bar;

/// Render the whole screen: tabs, run table, key hints and status bar
pub fn render(state: &AppState, keymap: &Keymap, frame: &mut Frame) {
    let [tabs_area, table_area, hints_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    repository_tabs_view::render(&RepositoryTabsViewModel::from_state(state), tabs_area, frame);
    history_view::render(&HistoryViewModel::from_state(state), table_area, frame);
    frame.render_widget(key_hints::KeyHintsWidget(keymap), hints_area);
    frame.render_widget(
        status_bar::StatusBarWidget(&StatusBarViewModel::from_state(state)),
        status_area,
    );
}
