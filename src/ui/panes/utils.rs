//! Shared styling helpers for the panes

use crate::parser::ast::{ConditionalState, ScanEventKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Color, Modifier, Style};

/// Border style for a pane, brighter when focused
pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Accent color for a scan decision
pub fn event_color(kind: &ScanEventKind) -> Color {
    match kind {
        ScanEventKind::Accepted(_) => DEFAULT_THEME.success,
        ScanEventKind::Suppressed(_) => DEFAULT_THEME.secondary,
        ScanEventKind::Rejected => DEFAULT_THEME.error,
        ScanEventKind::Directive(_) => DEFAULT_THEME.directive,
    }
}

/// Short label shown next to each event
pub fn event_label(kind: &ScanEventKind) -> &'static str {
    match kind {
        ScanEventKind::Accepted(_) => "ACCEPT",
        ScanEventKind::Suppressed(_) => "SKIP",
        ScanEventKind::Rejected => "REJECT",
        ScanEventKind::Directive(ConditionalState::Enabled) => "DO",
        ScanEventKind::Directive(ConditionalState::Disabled) => "DONT",
    }
}

/// Clamp a list scroll offset so the last page stays full
pub fn clamp_scroll(offset: &mut usize, total_items: usize, visible_height: usize) {
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *offset = (*offset).min(max_scroll);
    } else {
        *offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_scroll() {
        let mut offset = usize::MAX;
        clamp_scroll(&mut offset, 30, 10);
        assert_eq!(offset, 20);

        let mut offset = 5;
        clamp_scroll(&mut offset, 3, 10);
        assert_eq!(offset, 0);
    }
}
