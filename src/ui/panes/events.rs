//! Event list pane rendering

use super::utils::{border_style, clamp_scroll, event_color, event_label};
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the list of events visited so far, newest last
pub fn render_events_pane(
    frame: &mut Frame,
    area: Rect,
    visited: &[Snapshot],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Events ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if visited.is_empty() {
        let paragraph = Paragraph::new("(no instructions found)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let last = visited.len() - 1;

    let all_items: Vec<ListItem> = visited
        .iter()
        .enumerate()
        .map(|(idx, snap)| {
            let color = event_color(&snap.event.kind);
            let label_style = if idx == last {
                Style::default()
                    .bg(color)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<6}", event_label(&snap.event.kind)), label_style),
                Span::raw(" "),
                Span::styled(snap.event.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            ]))
        })
        .collect();

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    clamp_scroll(scroll_offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
