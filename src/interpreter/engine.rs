// Scan engine: lexer + parser composed into sums

use crate::parser::ast::{ConditionalState, Instruction, ScanEvent, ScanMode};
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::parser::parser::Parser;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Everything one scan of a text produced
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Mode the scan ran in
    pub mode: ScanMode,

    /// Every parser decision, in source order
    pub events: Vec<ScanEvent>,

    /// Number of tokens of each kind
    pub token_counts: FxHashMap<TokenKind, usize>,

    /// Conditional state after the last token
    pub final_state: ConditionalState,
}

impl ScanReport {
    /// Accepted instructions, in source order
    pub fn instructions(&self) -> Vec<Instruction> {
        self.events
            .iter()
            .filter(|e| e.is_accepted())
            .filter_map(ScanEvent::instruction)
            .collect()
    }

    /// Sum of the products of all accepted instructions
    pub fn sum(&self) -> u64 {
        sum_products(&self.instructions())
    }

    pub fn token_count(&self, kind: TokenKind) -> usize {
        self.token_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_tokens(&self) -> usize {
        self.token_counts.values().sum()
    }
}

/// Lex `text` and return its full token stream
pub fn tokenize(text: &str) -> Vec<Token> {
    Lexer::new(text).tokenize()
}

/// Extract the instructions `mode` accepts from `text`
pub fn extract_instructions(text: &str, mode: ScanMode) -> Vec<Instruction> {
    let tokens = tokenize(text);
    let instructions = Parser::new(&tokens, mode).parse_instructions();
    debug!(
        %mode,
        tokens = tokens.len(),
        accepted = instructions.len(),
        "extracted instructions"
    );
    instructions
}

/// Run a full scan of `text`, keeping every decision for inspection
pub fn scan(text: &str, mode: ScanMode) -> ScanReport {
    let tokens = tokenize(text);

    let mut token_counts = FxHashMap::default();
    for token in &tokens {
        *token_counts.entry(token.kind()).or_insert(0) += 1;
    }

    let mut parser = Parser::new(&tokens, mode);
    let events = parser.parse_events();
    let final_state = parser.state();

    debug!(%mode, tokens = tokens.len(), events = events.len(), "scan complete");

    ScanReport {
        mode,
        events,
        token_counts,
        final_state,
    }
}

/// Sum of `left * right` over every instruction
pub fn sum_products(instructions: &[Instruction]) -> u64 {
    instructions.iter().map(Instruction::product).sum()
}

/// Sum of products of every well-formed `mul`, ignoring `do` / `don't`
pub fn unconditional_sum(text: &str) -> u64 {
    sum_products(&extract_instructions(text, ScanMode::Unconditional))
}

/// Sum of products of the `mul`s left enabled by `do` / `don't`
pub fn conditional_sum(text: &str) -> u64 {
    sum_products(&extract_instructions(text, ScanMode::Conditional))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ONE: &str =
        "xmul(2,4)%&mul[3,7]!@^do_not_mul(5,5)+mul(32,64]then(mul(11,8)mul(8,5))";
    const SAMPLE_TWO: &str =
        "xmul(2,4)&mul[3,7]!^don't()_mul(5,5)+mul(32,64](mul(11,8)undo()?mul(8,5))";

    #[test]
    fn test_simple_sums() {
        assert_eq!(unconditional_sum("mul(2,4)"), 8);
        assert_eq!(unconditional_sum("mul(20,4)"), 80);
        assert_eq!(unconditional_sum("mul(2,40)"), 80);
        assert_eq!(unconditional_sum("mul(20,40)"), 800);
        assert_eq!(unconditional_sum("mul(200,40)"), 8000);
        assert_eq!(unconditional_sum("mul(200,400)"), 80000);
    }

    #[test]
    fn test_sample_one() {
        assert_eq!(unconditional_sum(SAMPLE_ONE), 161);
    }

    #[test]
    fn test_sample_two() {
        assert_eq!(conditional_sum(SAMPLE_TWO), 48);
        assert_eq!(unconditional_sum(SAMPLE_TWO), 161);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(unconditional_sum(""), 0);
        assert_eq!(conditional_sum(""), 0);
        assert!(scan("", ScanMode::Conditional).events.is_empty());
    }

    #[test]
    fn test_report_matches_sum() {
        let report = scan(SAMPLE_TWO, ScanMode::Conditional);

        assert_eq!(report.sum(), 48);
        assert_eq!(
            report.instructions(),
            vec![Instruction::new(2, 4), Instruction::new(8, 5)]
        );
        assert_eq!(report.final_state, ConditionalState::Enabled);
        assert_eq!(report.token_count(TokenKind::Mul), 6);
        assert_eq!(report.token_count(TokenKind::Dont), 1);
        assert_eq!(report.token_count(TokenKind::Do), 1);
    }

    #[test]
    fn test_token_counts_cover_input_without_keywords() {
        let report = scan("a(1,2)b", ScanMode::Unconditional);

        assert_eq!(report.total_tokens(), 7);
        assert_eq!(report.token_count(TokenKind::Digit), 2);
        assert_eq!(report.token_count(TokenKind::Other), 2);
        assert_eq!(report.token_count(TokenKind::Mul), 0);
    }
}
