//! Main TUI application state and logic

use crate::interpreter::{conditional_sum, scan, unconditional_sum, ScanReport};
use crate::parser::ast::ScanMode;
use crate::snapshot::ScanHistory;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use super::panes::{SourceRenderData, SourceScrollState, SummaryRenderData};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Events,
    Summary,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> events -> summary)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Events,
            FocusedPane::Events => FocusedPane::Summary,
            FocusedPane::Summary => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Summary,
            FocusedPane::Events => FocusedPane::Source,
            FocusedPane::Summary => FocusedPane::Events,
        }
    }
}

/// The main application state
pub struct App {
    /// The text being scanned
    pub source_code: String,

    /// Result of scanning `source_code` in the current mode
    pub report: ScanReport,

    /// Steppable view over `report`
    pub history: ScanHistory,

    /// Answers for both modes, computed once
    pub unconditional_sum: u64,
    pub conditional_sum: u64,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub events_scroll: usize,
    pub summary_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app scanning `source_code` in `mode`
    pub fn new(source_code: String, mode: ScanMode) -> Self {
        let report = scan(&source_code, mode);
        let history = ScanHistory::from_report(&report);
        let now = Instant::now();

        // The report already holds the active mode's answer
        let (unconditional, conditional) = match mode {
            ScanMode::Unconditional => (report.sum(), conditional_sum(&source_code)),
            ScanMode::Conditional => (unconditional_sum(&source_code), report.sum()),
        };

        App {
            unconditional_sum: unconditional,
            conditional_sum: conditional,
            source_code,
            report,
            history,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::new(),
            events_scroll: 0,
            summary_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: now,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_millis(500) {
                if self.history.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                    self.events_scroll = usize::MAX;
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Right column: Events (top) | Summary (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let current = self.history.current();

        super::panes::render_source_pane(
            frame,
            columns[0],
            SourceRenderData {
                source_code: &self.source_code,
                current_event: current.map(|snap| &snap.event),
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_events_pane(
            frame,
            right_rows[0],
            self.history.visited(),
            self.focused_pane == FocusedPane::Events,
            &mut self.events_scroll,
        );

        super::panes::render_summary_pane(
            frame,
            right_rows[1],
            SummaryRenderData {
                report: &self.report,
                current,
                unconditional_sum: self.unconditional_sum,
                conditional_sum: self.conditional_sum,
            },
            self.focused_pane == FocusedPane::Summary,
            &mut self.summary_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.history.position(),
            self.history.len(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Char('n') => {
                self.is_playing = false;
                match self.history.step_to_next_accepted() {
                    Ok(()) => {
                        self.status_message = "Next accepted instruction".to_string();
                        self.events_scroll = usize::MAX;
                    }
                    Err(e) => self.status_message = format!("Cannot step forward: {}", e),
                }
            }
            KeyCode::Char('m') => {
                self.is_playing = false;
                self.set_mode(self.history.mode().toggled());
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Events => {
                    self.events_scroll = self.events_scroll.saturating_sub(1);
                }
                FocusedPane::Summary => {
                    self.summary_scroll = self.summary_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Events => {
                    self.events_scroll = self.events_scroll.saturating_add(1);
                }
                FocusedPane::Summary => {
                    self.summary_scroll = self.summary_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    self.status_message = if self.is_playing {
                        "Playing...".to_string()
                    } else {
                        "Paused".to_string()
                    };
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.history.jump_to_end();
                self.status_message = "Jumped to end".to_string();
                self.events_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.history.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
                self.events_scroll = 0;
            }
            _ => {}
        }
    }

    /// Rescan the text in `mode` and restart stepping from the first event
    pub fn set_mode(&mut self, mode: ScanMode) {
        self.report = scan(&self.source_code, mode);
        self.history = ScanHistory::from_report(&self.report);
        self.events_scroll = 0;
        self.status_message = format!("Switched to {} mode", mode);
    }

    fn step_forward(&mut self) {
        match self.history.step_forward() {
            Ok(()) => {
                self.status_message = "Stepped forward".to_string();
                self.events_scroll = usize::MAX;
            }
            Err(e) => self.status_message = format!("Cannot step forward: {}", e),
        }
    }

    fn step_backward(&mut self) {
        match self.history.step_backward() {
            Ok(()) => {
                self.status_message = "Stepped backward".to_string();
                self.events_scroll = usize::MAX;
            }
            Err(e) => self.status_message = format!("Cannot step backward: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_mode_toggle_rescans() {
        let mut app = App::new("don't()mul(2,3)".to_string(), ScanMode::Unconditional);
        assert_eq!(app.report.sum(), 6);

        press(&mut app, KeyCode::Char('m'));

        assert_eq!(app.history.mode(), ScanMode::Conditional);
        assert_eq!(app.report.sum(), 0);
        assert_eq!(app.conditional_sum, 0);
        assert_eq!(app.unconditional_sum, 6);
    }

    #[test]
    fn test_both_answers_in_either_starting_mode() {
        let source = "mul(2,3)don't()mul(4,5)";
        for mode in [ScanMode::Unconditional, ScanMode::Conditional] {
            let app = App::new(source.to_string(), mode);
            assert_eq!(app.unconditional_sum, 26, "mode: {:?}", mode);
            assert_eq!(app.conditional_sum, 6, "mode: {:?}", mode);
        }
    }

    #[test]
    fn test_stepping_keys() {
        let mut app = App::new("mul(1,2)mul(3,4)mul(5,6)".to_string(), ScanMode::Conditional);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.history.position(), 1);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.history.position(), 2);
        press(&mut app, KeyCode::Right);
        assert!(app.status_message.starts_with("Cannot step forward"));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.history.position(), 0);
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = App::new(String::new(), ScanMode::Conditional);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Events);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
