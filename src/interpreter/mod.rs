//! Scan orchestration
//!
//! This module composes the lexer and parser into the entry points callers
//! actually use:
//! - [`engine`]: `unconditional_sum`, `conditional_sum`, and the fuller
//!   [`scan`](engine::scan) that keeps every parser decision
//!
//! # Execution Model
//!
//! Every call lexes and parses from scratch. Nothing is cached between calls,
//! so repeated calls on the same text return identical results.

pub mod engine;

pub use engine::{
    conditional_sum, extract_instructions, scan, sum_products, tokenize, unconditional_sum,
    ScanReport,
};
