//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Scanned text with token coloring and the current decision marked
//! - [`events`]: Parser decisions visited so far
//! - [`summary`]: Answers for both modes, live state and token statistics
//! - [`status`]: Status bar with keybindings and stepping position
//! - `utils`: Shared styling helpers
//!
//! Each pane module exports a primary `render_*` function; panes hold no state
//! of their own beyond the scroll offsets the app passes in.

mod utils;

pub mod events;
pub mod source;
pub mod status;
pub mod summary;

pub use events::render_events_pane;
pub use source::{render_source_pane, SourceRenderData, SourceScrollState};
pub use status::render_status_bar;
pub use summary::{render_summary_pane, SummaryRenderData};
