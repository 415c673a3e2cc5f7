//! Values produced by the parser
//!
//! There is no tree here: the grammar is a single flat instruction form, so
//! the "AST" of a scan is just an ordered list of [`Instruction`]s plus the
//! conditional state the parser threads while producing them.

use std::fmt;

/// Largest number of digits an operand literal may have.
pub const MAX_OPERAND_DIGITS: usize = 3;

/// Source location for error reporting and highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The location `width` columns to the right on the same line.
    pub fn shifted(self, width: usize) -> Self {
        Self {
            line: self.line,
            column: self.column + width,
        }
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An accepted `mul(left,right)` instruction.
///
/// Both operands come from literals of at most [`MAX_OPERAND_DIGITS`] digits,
/// so each is in `0..=999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub left: u32,
    pub right: u32,
}

impl Instruction {
    pub fn new(left: u32, right: u32) -> Self {
        Self { left, right }
    }

    pub fn product(&self) -> u64 {
        u64::from(self.left) * u64::from(self.right)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mul({},{})", self.left, self.right)
    }
}

/// Whether multiply instructions currently count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConditionalState {
    #[default]
    Enabled,
    Disabled,
}

impl ConditionalState {
    pub fn is_enabled(self) -> bool {
        self == ConditionalState::Enabled
    }
}

impl fmt::Display for ConditionalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionalState::Enabled => write!(f, "enabled"),
            ConditionalState::Disabled => write!(f, "disabled"),
        }
    }
}

/// How the parser treats `do` / `don't` directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanMode {
    /// Directives are consumed but ignored; every well-formed instruction counts.
    Unconditional,
    /// Directives toggle [`ConditionalState`], which gates instructions.
    Conditional,
}

impl ScanMode {
    pub fn honors_conditionals(self) -> bool {
        matches!(self, ScanMode::Conditional)
    }

    /// The other mode, used by the viewer's mode toggle.
    pub fn toggled(self) -> Self {
        match self {
            ScanMode::Unconditional => ScanMode::Conditional,
            ScanMode::Conditional => ScanMode::Unconditional,
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Unconditional => write!(f, "unconditional"),
            ScanMode::Conditional => write!(f, "conditional"),
        }
    }
}

/// One decision the parser made while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEventKind {
    /// Well-formed instruction that counts toward the sum.
    Accepted(Instruction),
    /// Well-formed instruction seen while disabled.
    Suppressed(Instruction),
    /// A `mul` keyword whose argument list did not match.
    Rejected,
    /// A directive that set the conditional state (conditional mode only).
    Directive(ConditionalState),
}

/// A parser decision together with the source range of the tokens it inspected.
///
/// `end` is exclusive and sits on the line of the last inspected token, since
/// no token spans a newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanEvent {
    pub kind: ScanEventKind,
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl ScanEvent {
    pub fn instruction(&self) -> Option<Instruction> {
        match self.kind {
            ScanEventKind::Accepted(ins) | ScanEventKind::Suppressed(ins) => Some(ins),
            ScanEventKind::Rejected | ScanEventKind::Directive(_) => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.kind, ScanEventKind::Accepted(_))
    }
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ScanEventKind::Accepted(ins) => write!(f, "{} {} = {}", self.start, ins, ins.product()),
            ScanEventKind::Suppressed(ins) => write!(f, "{} {} (disabled)", self.start, ins),
            ScanEventKind::Rejected => write!(f, "{} malformed mul", self.start),
            ScanEventKind::Directive(ConditionalState::Enabled) => write!(f, "{} do", self.start),
            ScanEventKind::Directive(ConditionalState::Disabled) => {
                write!(f, "{} don't", self.start)
            }
        }
    }
}
