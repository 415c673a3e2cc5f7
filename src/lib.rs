//! # Introduction
//!
//! mulscan pulls `mul(X,Y)` instructions out of corrupted memory dumps: text
//! where the real instructions are buried in arbitrary noise. It can also
//! honor `do` / `don't` directives that switch later instructions on and off.
//!
//! ## Pipeline
//!
//! ```text
//! Text → Lexer → Tokens → Parser → Scan events → Sum / Viewer
//! ```
//!
//! 1. [`parser`] — tokenises the text and recognizes instructions and
//!    directives, recovering silently from malformed candidates.
//! 2. [`interpreter`] — composes the two into [`unconditional_sum`] and
//!    [`conditional_sum`], plus a fuller [`interpreter::scan`].
//! 3. [`snapshot`] — a steppable history of parser decisions with running
//!    totals.
//! 4. [`ui`] — ratatui-based viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```rust
//! use mulscan::{conditional_sum, unconditional_sum};
//!
//! let memory = "xmul(2,4)&mul[3,7]!^don't()_mul(5,5)+mul(32,64](mul(11,8)undo()?mul(8,5))";
//!
//! assert_eq!(unconditional_sum(memory), 161);
//! assert_eq!(conditional_sum(memory), 48);
//! ```

pub mod interpreter;
pub mod parser;
pub mod snapshot;
pub mod ui;

pub use interpreter::{conditional_sum, extract_instructions, unconditional_sum};
pub use parser::ast::{ConditionalState, Instruction, ScanMode};
