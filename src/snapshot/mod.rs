// Scan history for stepping through parser decisions

use crate::interpreter::ScanReport;
use crate::parser::ast::{ConditionalState, ScanEvent, ScanEventKind, ScanMode};
use std::fmt;

/// State of the scan right after one event was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub event: ScanEvent,
    pub state: ConditionalState,
    pub running_total: u64,
    pub accepted: usize,
}

/// Error returned when stepping past either end of the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    AtStart,
    AtEnd,
    Empty,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::AtStart => write!(f, "already at the first event"),
            HistoryError::AtEnd => write!(f, "already at the last event"),
            HistoryError::Empty => write!(f, "no events to step through"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Ordered snapshots of a scan with a movable cursor
#[derive(Debug, Clone)]
pub struct ScanHistory {
    mode: ScanMode,
    snapshots: Vec<Snapshot>,
    position: usize,
}

impl ScanHistory {
    /// Build the history by replaying the report's events in order.
    pub fn from_report(report: &ScanReport) -> Self {
        let mut state = ConditionalState::Enabled;
        let mut running_total = 0;
        let mut accepted = 0;

        let snapshots = report
            .events
            .iter()
            .map(|event| {
                match event.kind {
                    ScanEventKind::Accepted(ins) => {
                        running_total += ins.product();
                        accepted += 1;
                    }
                    ScanEventKind::Directive(new_state) => state = new_state,
                    ScanEventKind::Suppressed(_) | ScanEventKind::Rejected => {}
                }
                Snapshot {
                    event: *event,
                    state,
                    running_total,
                    accepted,
                }
            })
            .collect();

        ScanHistory {
            mode: report.mode,
            snapshots,
            position: 0,
        }
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Snapshot under the cursor, `None` when the scan made no decisions
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.position)
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Snapshots up to and including the cursor
    pub fn visited(&self) -> &[Snapshot] {
        let end = (self.position + 1).min(self.snapshots.len());
        &self.snapshots[..end]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.snapshots.len()
    }

    pub fn step_forward(&mut self) -> Result<(), HistoryError> {
        if self.snapshots.is_empty() {
            return Err(HistoryError::Empty);
        }
        if self.is_at_end() {
            return Err(HistoryError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), HistoryError> {
        if self.snapshots.is_empty() {
            return Err(HistoryError::Empty);
        }
        if self.position == 0 {
            return Err(HistoryError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    /// Move to the next accepted instruction, staying put if there is none
    pub fn step_to_next_accepted(&mut self) -> Result<(), HistoryError> {
        let next = self
            .snapshots
            .iter()
            .enumerate()
            .skip(self.position + 1)
            .find(|(_, snap)| snap.event.is_accepted())
            .map(|(i, _)| i)
            .ok_or(HistoryError::AtEnd)?;
        self.position = next;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.snapshots.len().saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::scan;

    const SAMPLE: &str =
        "xmul(2,4)&mul[3,7]!^don't()_mul(5,5)+mul(32,64](mul(11,8)undo()?mul(8,5))";

    #[test]
    fn test_running_total_follows_events() {
        let history = ScanHistory::from_report(&scan(SAMPLE, ScanMode::Conditional));

        let last = history.get(history.len() - 1).unwrap();
        assert_eq!(last.running_total, 48);
        assert_eq!(last.accepted, 2);
        assert_eq!(last.state, ConditionalState::Enabled);

        let first = history.current().unwrap();
        assert_eq!(first.running_total, 8);
    }

    #[test]
    fn test_stepping_bounds() {
        let report = scan("mul(1,2)mul(3,4)", ScanMode::Unconditional);
        let mut history = ScanHistory::from_report(&report);

        assert_eq!(history.step_backward(), Err(HistoryError::AtStart));
        assert!(history.step_forward().is_ok());
        assert_eq!(history.step_forward(), Err(HistoryError::AtEnd));
        assert_eq!(history.visited().len(), 2);

        history.rewind_to_start();
        assert_eq!(history.position(), 0);
        history.jump_to_end();
        assert_eq!(history.current().unwrap().running_total, 14);
    }

    #[test]
    fn test_step_to_next_accepted_skips_other_events() {
        let report = scan("mul(1,1)mul[don't()mul(2,2)do()mul(3,3)", ScanMode::Conditional);
        let mut history = ScanHistory::from_report(&report);

        history.step_to_next_accepted().unwrap();
        assert_eq!(history.current().unwrap().running_total, 10);
        assert_eq!(history.step_to_next_accepted(), Err(HistoryError::AtEnd));
    }

    #[test]
    fn test_empty_history() {
        let mut history = ScanHistory::from_report(&scan("", ScanMode::Conditional));

        assert!(history.is_empty());
        assert!(history.current().is_none());
        assert!(history.visited().is_empty());
        assert_eq!(history.step_forward(), Err(HistoryError::Empty));
        history.jump_to_end();
        assert_eq!(history.position(), 0);
    }
}
