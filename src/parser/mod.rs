//! Instruction extraction from corrupted memory
//!
//! This module turns raw text into accepted instructions:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → instructions and scan events)
//! - [`ast`]: Instruction, state and event definitions
//!
//! # Recognized forms
//!
//! - `mul(X,Y)` where `X` and `Y` are 1–3 digit literals, with no whitespace
//! - `do` and `don't`, which enable and disable later instructions in
//!   conditional mode
//!
//! Everything else is noise and is skipped without complaint.
//!
//! # Parser Implementation
//!
//! Hand-written scanner with one token of lookahead inside an operand. No
//! external parser generator or regex dependencies.

pub mod ast;
pub mod lexer;
pub mod parser;
