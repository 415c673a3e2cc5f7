//! Source pane rendering with token highlighting
//!
//! This module renders the scanned text with the decision under the cursor
//! marked in place.
//!
//! # Features
//!
//! - Token coloring driven by the real lexer, so what is colored as `mul` is
//!   exactly what the parser saw as `mul`
//! - The current event's token range drawn in the event's accent color
//! - Current line highlighting, kept at a fixed visual row while stepping
//! - Line numbering

use super::utils::{border_style, event_color};
use crate::parser::ast::ScanEvent;
use crate::parser::lexer::{Lexer, Token};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

impl SourceScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            target_line_row: None,
        }
    }
}

impl Default for SourceScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    pub current_event: Option<&'a ScanEvent>,
}

fn token_style(token: &Token) -> Style {
    match token {
        Token::Mul(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        Token::Do(_) | Token::Dont(_) => Style::default().fg(DEFAULT_THEME.directive),
        Token::Digit(..) => Style::default().fg(DEFAULT_THEME.number),
        Token::LParen(_) | Token::RParen(_) | Token::Comma(_) => {
            Style::default().fg(DEFAULT_THEME.primary)
        }
        Token::Other(..) => Style::default().fg(DEFAULT_THEME.comment),
    }
}

/// Style every character of `line`, then overlay `marked` (1-based columns,
/// end exclusive) and merge runs of equal style into spans.
fn highlight_line(line: &str, marked: Option<(usize, usize)>, mark_color: Color) -> Line<'static> {
    let chars: Vec<char> = line.chars().collect();
    let mut styles = vec![Style::default(); chars.len()];

    for token in Lexer::new(line) {
        let start = token.location().column - 1;
        let end = (start + token.width()).min(chars.len());
        for style in &mut styles[start..end] {
            *style = token_style(&token);
        }
    }

    if let Some((from, to)) = marked {
        let from = from.saturating_sub(1).min(chars.len());
        let to = to.saturating_sub(1).min(chars.len()).max(from);
        for style in &mut styles[from..to] {
            *style = style
                .bg(mark_color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD);
        }
    }

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (ch, style) in chars.into_iter().zip(styles) {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    Line::from(spans)
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<&str> = data.source_code.lines().collect();
    let total_lines = lines.len();
    let current_line = data.current_event.map_or(0, |e| e.start.line);

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if current_line > 0 && current_line <= total_lines {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);

        if total_lines > visible_height {
            let max_scroll = total_lines - visible_height;
            scroll_state.offset = scroll_state.offset.min(max_scroll);
        } else {
            scroll_state.offset = 0;
        }
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == current_line;

            let (marked, mark_color) = match data.current_event {
                Some(event) if is_current => {
                    let end = if event.end.line == event.start.line {
                        event.end.column
                    } else {
                        usize::MAX
                    };
                    (Some((event.start.column, end)), event_color(&event.kind))
                }
                _ => (None, DEFAULT_THEME.fg),
            };

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content = highlight_line(line, marked, mark_color);
            if is_current {
                for span in &mut content.spans {
                    if span.style.bg.is_none() {
                        span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                    }
                }
            }

            let mut final_spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            final_spans.extend(content.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
