//! Lexer (tokenizer) for corrupted instruction memory
//!
//! Converts raw text into a flat [`Token`] stream consumed by the parser.
//! Nothing is skipped: every character ends up in exactly one token, and the
//! only multi-character tokens are the keywords `mul`, `do` and `don't`.
//! Digits are emitted one per token; assembling operands is the parser's job
//! because it alone knows the three-digit limit.

use super::ast::SourceLocation;
use std::fmt;

const MUL: &str = "mul";
const DO: &str = "do";
const DONT: &str = "don't";

// Keyword widths in characters, which is what the cursor counts
const MUL_WIDTH: usize = 3;
const DO_WIDTH: usize = 2;
const DONT_WIDTH: usize = 5;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that the viewer can
/// highlight the tokens a scan decision covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // Keywords
    Mul(SourceLocation),
    Do(SourceLocation),
    Dont(SourceLocation),

    // Single characters
    Digit(char, SourceLocation),
    Comma(SourceLocation),  // ,
    LParen(SourceLocation), // (
    RParen(SourceLocation), // )

    // Anything else, kept so the stream covers the whole input
    Other(char, SourceLocation),
}

/// The closed set of token kinds, without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Mul,
    Do,
    Dont,
    Digit,
    Separator,
    LeftParen,
    RightParen,
    Other,
}

impl TokenKind {
    pub const ALL: [TokenKind; 8] = [
        TokenKind::Mul,
        TokenKind::Do,
        TokenKind::Dont,
        TokenKind::Digit,
        TokenKind::Separator,
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::Other,
    ];
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Mul => "MUL",
            TokenKind::Do => "DO",
            TokenKind::Dont => "DONT",
            TokenKind::Digit => "DIGIT",
            TokenKind::Separator => "SEP",
            TokenKind::LeftParen => "LEFT_PARENS",
            TokenKind::RightParen => "RIGHT_PARENS",
            TokenKind::Other => "OTHER",
        };
        f.write_str(name)
    }
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Mul(loc)
            | Token::Do(loc)
            | Token::Dont(loc)
            | Token::Digit(_, loc)
            | Token::Comma(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::Other(_, loc) => *loc,
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Mul(_) => TokenKind::Mul,
            Token::Do(_) => TokenKind::Do,
            Token::Dont(_) => TokenKind::Dont,
            Token::Digit(..) => TokenKind::Digit,
            Token::Comma(_) => TokenKind::Separator,
            Token::LParen(_) => TokenKind::LeftParen,
            Token::RParen(_) => TokenKind::RightParen,
            Token::Other(..) => TokenKind::Other,
        }
    }

    /// Number of source characters this token covers.
    pub fn width(&self) -> usize {
        match self {
            Token::Mul(_) => MUL_WIDTH,
            Token::Do(_) => DO_WIDTH,
            Token::Dont(_) => DONT_WIDTH,
            Token::Digit(..)
            | Token::Comma(_)
            | Token::LParen(_)
            | Token::RParen(_)
            | Token::Other(..) => 1,
        }
    }

    /// Location just past the last character of this token.
    pub fn end_location(&self) -> SourceLocation {
        self.location().shifted(self.width())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Digit(c, _) => write!(f, "{}", c),
            Token::Other(c, _) => write!(f, "<{}, {}>", TokenKind::Other, c.escape_debug()),
            _ => write!(f, "{}", self.kind()),
        }
    }
}

/// Lexer for instruction memory
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Get next token, or `None` once the input is exhausted
    fn next_token(&mut self) -> Option<Token> {
        let loc = self.current_location();

        if self.matches_word(MUL) {
            self.advance_chars(MUL_WIDTH);
            return Some(Token::Mul(loc));
        }
        if self.matches_word(DO) {
            // `don't` shares the `do` prefix and wins when it is complete
            if self.matches_word(DONT) {
                self.advance_chars(DONT_WIDTH);
                return Some(Token::Dont(loc));
            }
            self.advance_chars(DO_WIDTH);
            return Some(Token::Do(loc));
        }

        let token = match self.advance()? {
            c @ '0'..='9' => Token::Digit(c, loc),
            '(' => Token::LParen(loc),
            ')' => Token::RParen(loc),
            ',' => Token::Comma(loc),
            c => Token::Other(c, loc),
        };
        Some(token)
    }

    /// Check whether `word` starts at the current position.
    ///
    /// Lookahead past the end of input simply fails to match.
    fn matches_word(&self, word: &str) -> bool {
        word.chars()
            .enumerate()
            .all(|(i, expected)| self.peek_ahead(i) == Some(expected))
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn advance_chars(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind()).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Lexer::new("mul(2,4)").tokenize();

        assert!(matches!(tokens[0], Token::Mul(_)));
        assert!(matches!(tokens[1], Token::LParen(_)));
        assert!(matches!(tokens[2], Token::Digit('2', _)));
        assert!(matches!(tokens[3], Token::Comma(_)));
        assert!(matches!(tokens[4], Token::Digit('4', _)));
        assert!(matches!(tokens[5], Token::RParen(_)));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("don't()do()mul"),
            vec![
                TokenKind::Dont,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Do,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Mul,
            ]
        );
    }

    #[test]
    fn test_do_inside_words() {
        // "undo" and "do_not" both contain a bare `do`
        assert_eq!(
            kinds("undo_not"),
            vec![
                TokenKind::Other,
                TokenKind::Other,
                TokenKind::Do,
                TokenKind::Other,
                TokenKind::Other,
                TokenKind::Other,
                TokenKind::Other,
            ]
        );
    }

    #[test]
    fn test_partial_dont_is_do() {
        assert_eq!(
            kinds("don'"),
            vec![TokenKind::Do, TokenKind::Other, TokenKind::Other]
        );
    }

    #[test]
    fn test_truncated_keywords_at_end() {
        assert_eq!(kinds("mu"), vec![TokenKind::Other, TokenKind::Other]);
        assert_eq!(kinds("d"), vec![TokenKind::Other]);
        assert_eq!(kinds("do"), vec![TokenKind::Do]);
        assert!(kinds("").is_empty());
    }

    #[test]
    fn test_one_token_per_character_without_keywords() {
        let source = "x%&[3,7]!@^_+(11)8 \n?é";
        let tokens = Lexer::new(source).tokenize();

        assert_eq!(tokens.len(), source.chars().count());
        assert!(tokens.iter().all(|t| t.width() == 1));
    }

    #[test]
    fn test_keyword_widths_match_spelling() {
        assert_eq!(MUL_WIDTH, MUL.chars().count());
        assert_eq!(DO_WIDTH, DO.chars().count());
        assert_eq!(DONT_WIDTH, DONT.chars().count());

        let tokens = Lexer::new("don'tdomulx").tokenize();
        assert_eq!(tokens[0].end_location(), SourceLocation::new(1, 6));
        assert_eq!(tokens[1].location(), SourceLocation::new(1, 6));
        assert_eq!(tokens[1].end_location(), SourceLocation::new(1, 8));
        assert_eq!(tokens[2].end_location(), SourceLocation::new(1, 11));
        assert_eq!(tokens[3].location(), SourceLocation::new(1, 11));
    }

    #[test]
    fn test_other_carries_character() {
        let tokens = Lexer::new("x]").tokenize();
        assert!(matches!(tokens[0], Token::Other('x', _)));
        assert!(matches!(tokens[1], Token::Other(']', _)));
    }

    #[test]
    fn test_locations_track_lines() {
        let tokens = Lexer::new("ab\nmul(").tokenize();

        assert_eq!(tokens[2].location(), SourceLocation::new(1, 3));
        assert_eq!(tokens[3].location(), SourceLocation::new(2, 1));
        assert_eq!(tokens[3].end_location(), SourceLocation::new(2, 4));
        assert_eq!(tokens[4].location(), SourceLocation::new(2, 4));
    }

    #[test]
    fn test_display_matches_token_dump_format() {
        let rendered: Vec<String> = Lexer::new("mul(1,x)don't")
            .map(|t| t.to_string())
            .collect();
        assert_eq!(
            rendered,
            vec!["MUL", "LEFT_PARENS", "1", "SEP", "<OTHER, x>", "RIGHT_PARENS", "DONT"]
        );
    }
}
