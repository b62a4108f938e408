use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Tabs,
    Frame,
};

use crate::view_models::RepositoryTabsViewModel;

pub fn render(vm: &RepositoryTabsViewModel, area: Rect, frame: &mut Frame) {
    if vm.titles.is_empty() {
        return;
    }

    let tabs = Tabs::new(vm.titles.iter().map(String::as_str))
        .select(vm.selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    frame.render_widget(tabs, area);
}
