use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::keymap::Keymap;
use crate::keymap::HINTED_COMMANDS;

/// One-line list of the most useful keys
pub struct KeyHintsWidget<'a>(pub &'a Keymap);

impl Widget for KeyHintsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(Color::DarkGray);

        let spans: Vec<Span> = HINTED_COMMANDS
            .iter()
            .filter_map(|command| Some((self.0.hint_for(*command)?, command.title())))
            .flat_map(|(key, title)| {
                [
                    Span::styled(format!(" {}", key), key_style),
                    Span::styled(format!(" {} ", title), text_style),
                ]
            })
            .collect();

        Line::from(spans).render(area, buf);
    }
}
