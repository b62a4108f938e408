use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::view_models::HistoryViewModel;

const WIDTHS: [Constraint; 6] = [
    Constraint::Percentage(18),
    Constraint::Percentage(32),
    Constraint::Percentage(14),
    Constraint::Length(19),
    Constraint::Length(15),
    Constraint::Length(10),
];

pub fn render(vm: &HistoryViewModel, area: Rect, frame: &mut Frame) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(vm.title.as_str())
        .border_style(Style::default().fg(Color::DarkGray));

    if let Some(placeholder) = vm.placeholder {
        let paragraph = Paragraph::new(placeholder)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(HistoryViewModel::HEADERS)
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = vm.rows.iter().map(|row| {
        Row::new(row.cells.iter().enumerate().map(|(column, text)| {
            let cell = Cell::from(text.as_str());
            if column == 4 {
                cell.style(Style::default().fg(row.conclusion_color))
            } else {
                cell
            }
        }))
    });

    let table = Table::new(rows, WIDTHS)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut table_state = TableState::default().with_selected(vm.selected);
    frame.render_stateful_widget(table, area, &mut table_state);
}
