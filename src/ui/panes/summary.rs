//! Summary pane: answers for both modes, live scan state, token statistics

use super::utils::border_style;
use crate::interpreter::ScanReport;
use crate::parser::ast::ConditionalState;
use crate::parser::lexer::TokenKind;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Data needed to render the summary pane
pub struct SummaryRenderData<'a> {
    pub report: &'a ScanReport,
    pub current: Option<&'a Snapshot>,
    pub unconditional_sum: u64,
    pub conditional_sum: u64,
}

fn row(label: &str, value: String, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<16}", label),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, value_style),
    ])
}

/// Render the summary pane
pub fn render_summary_pane(
    frame: &mut Frame,
    area: Rect,
    data: SummaryRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let value = Style::default().fg(DEFAULT_THEME.fg);
    let strong = Style::default()
        .fg(DEFAULT_THEME.success)
        .add_modifier(Modifier::BOLD);

    let (state, running_total) = data
        .current
        .map_or((ConditionalState::Enabled, 0), |snap| (snap.state, snap.running_total));
    let state_style = if state.is_enabled() {
        Style::default().fg(DEFAULT_THEME.success)
    } else {
        Style::default().fg(DEFAULT_THEME.error)
    };

    let mut lines = vec![
        row("mode", data.report.mode.to_string(), value),
        row("state", state.to_string(), state_style),
        row("running total", running_total.to_string(), strong),
        Line::default(),
        row("unconditional", data.unconditional_sum.to_string(), value),
        row("conditional", data.conditional_sum.to_string(), value),
        Line::default(),
    ];

    for kind in TokenKind::ALL {
        lines.push(row(
            &kind.to_string(),
            data.report.token_count(kind).to_string(),
            Style::default().fg(DEFAULT_THEME.number),
        ));
    }
    lines.push(row(
        "tokens",
        data.report.total_tokens().to_string(),
        value,
    ));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    super::utils::clamp_scroll(scroll_offset, lines.len(), visible_height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
