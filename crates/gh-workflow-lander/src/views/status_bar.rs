//! Status Bar Widget
//!
//! Renders the status bar at the bottom of the screen.
//! Format: `[timestamp] emoji message                     [source]`

use crate::view_models::StatusBarViewModel;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Widget for rendering the status bar
pub struct StatusBarWidget<'a>(pub &'a StatusBarViewModel);

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let vm = self.0;

        if area.height < 1 || area.width < 4 {
            return;
        }

        let right = area.x + area.width;
        let mut x = area.x + 1;

        if !vm.timestamp.is_empty() {
            let ts_str = format!("[{}] ", vm.timestamp);
            buf.set_string(x, area.y, &ts_str, vm.metadata_style);
            x += ts_str.chars().count() as u16;
        }

        buf.set_string(x, area.y, format!("{} ", vm.emoji), vm.message_style);
        x += 3; // emoji renders two cells wide

        let source_str = if vm.source.is_empty() {
            String::new()
        } else {
            format!("[{}]", vm.source)
        };
        let source_width = source_str.chars().count() as u16;

        let available = right.saturating_sub(x + source_width + 2) as usize;
        let message: String = if vm.message.chars().count() > available {
            let mut truncated: String = vm.message.chars().take(available.saturating_sub(1)).collect();
            truncated.push('…');
            truncated
        } else {
            vm.message.clone()
        };
        if x < right {
            buf.set_string(x, area.y, &message, vm.message_style);
        }

        if source_width > 0 && area.x + source_width + 1 < right {
            buf.set_string(right - source_width - 1, area.y, &source_str, vm.metadata_style);
        }
    }
}
