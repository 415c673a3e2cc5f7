//! Instruction parser
//!
//! This module provides the [`Parser`] struct, which walks the token stream
//! produced by the [`Lexer`](crate::parser::lexer::Lexer) and recognizes
//! `mul(X,Y)` instructions along with `do` / `don't` directives.
//!
//! # Recovery
//!
//! Input is mostly noise, so a failed match is not an error. When a `mul`
//! keyword is not followed by a well-formed argument list, the attempt stops
//! at the first token that does not fit. That token is left in place and the
//! scan resumes on it, so `mul(mul(2,3)` still yields `mul(2,3)` and a
//! `don't` that cuts a candidate short still switches the state. The cursor
//! never rewinds past the tokens that did match.
//!
//! # Conditional state
//!
//! The enabled/disabled flag is owned by the parser for the duration of a
//! single scan, starting from the value passed in. In
//! [`ScanMode::Unconditional`] directives are still consumed but never
//! change it.

use crate::parser::ast::{
    ConditionalState, Instruction, ScanEvent, ScanEventKind, ScanMode, SourceLocation,
    MAX_OPERAND_DIGITS,
};
use crate::parser::lexer::{Token, TokenKind};
use tracing::trace;

/// Scanning parser over a borrowed token slice
pub struct Parser<'t> {
    tokens: &'t [Token],
    position: usize,
    mode: ScanMode,
    state: ConditionalState,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token], mode: ScanMode) -> Self {
        Self::with_state(tokens, mode, ConditionalState::Enabled)
    }

    /// Create a parser that starts in `initial` rather than enabled.
    pub fn with_state(tokens: &'t [Token], mode: ScanMode, initial: ConditionalState) -> Self {
        Self {
            tokens,
            position: 0,
            mode,
            state: initial,
        }
    }

    /// Conditional state as of the current cursor position.
    pub fn state(&self) -> ConditionalState {
        self.state
    }

    /// Parse every remaining token and return the accepted instructions.
    pub fn parse_instructions(&mut self) -> Vec<Instruction> {
        self.by_ref()
            .filter_map(|event| match event.kind {
                ScanEventKind::Accepted(ins) => Some(ins),
                _ => None,
            })
            .collect()
    }

    /// Parse every remaining token and return every decision made.
    pub fn parse_events(&mut self) -> Vec<ScanEvent> {
        self.by_ref().collect()
    }

    /// Advance to the next decision point.
    ///
    /// Tokens that are neither keywords nor part of a candidate are skipped
    /// silently. Returns `None` at end of input.
    fn next_event(&mut self) -> Option<ScanEvent> {
        loop {
            let token = *self.advance()?;
            let start = token.location();

            match token {
                Token::Mul(_) => {
                    let kind = match self.parse_multiply() {
                        Some(ins) if self.state.is_enabled() => ScanEventKind::Accepted(ins),
                        Some(ins) => ScanEventKind::Suppressed(ins),
                        None => {
                            trace!(location = %start, "rejected mul candidate");
                            ScanEventKind::Rejected
                        }
                    };
                    return Some(self.event(kind, start));
                }
                Token::Do(_) if self.mode.honors_conditionals() => {
                    self.state = ConditionalState::Enabled;
                    return Some(self.event(ScanEventKind::Directive(self.state), start));
                }
                Token::Dont(_) if self.mode.honors_conditionals() => {
                    self.state = ConditionalState::Disabled;
                    return Some(self.event(ScanEventKind::Directive(self.state), start));
                }
                Token::Do(_)
                | Token::Dont(_)
                | Token::Digit(..)
                | Token::Comma(_)
                | Token::LParen(_)
                | Token::RParen(_)
                | Token::Other(..) => {}
            }
        }
    }

    /// Match `(X,Y)` right after a `mul` keyword.
    ///
    /// On failure the token that did not fit is still unread.
    fn parse_multiply(&mut self) -> Option<Instruction> {
        if !self.match_kind(TokenKind::LeftParen) {
            return None;
        }

        let left = self.parse_operand()?;

        if !self.match_kind(TokenKind::Separator) {
            return None;
        }

        let right = self.parse_operand()?;

        if !self.match_kind(TokenKind::RightParen) {
            return None;
        }

        Some(Instruction::new(left, right))
    }

    /// Read a literal of one to [`MAX_OPERAND_DIGITS`] digits.
    ///
    /// A fourth digit is left unread for the caller to trip over.
    fn parse_operand(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;

        for _ in 0..MAX_OPERAND_DIGITS {
            match self.peek_token() {
                Some(Token::Digit(c, _)) => {
                    value = Some(value.unwrap_or(0) * 10 + c.to_digit(10)?);
                    self.advance();
                }
                _ => break,
            }
        }

        value
    }

    fn event(&self, kind: ScanEventKind, start: SourceLocation) -> ScanEvent {
        ScanEvent {
            kind,
            start,
            end: self.previous_end_location().unwrap_or(start),
        }
    }

    // ===== Helper methods =====

    fn peek_token(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    /// Consume the next token only if it is of the given kind.
    fn match_kind(&mut self, kind: TokenKind) -> bool {
        match self.peek_token() {
            Some(token) if token.kind() == kind => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    fn previous_end_location(&self) -> Option<SourceLocation> {
        self.position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(Token::end_location)
    }
}

impl Iterator for Parser<'_> {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

/// Parse `tokens` from the enabled state and return the accepted instructions.
pub fn parse(tokens: &[Token], mode: ScanMode) -> Vec<Instruction> {
    Parser::new(tokens, mode).parse_instructions()
}
