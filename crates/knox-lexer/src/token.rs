//! Token definitions for Knox.

use std::fmt;

use logos::Logos;
use smol_str::SmolStr;

/// A 1-based source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Position used for tokens that were not read from a source file.
    pub fn synthetic() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Whether this position points into real source text.
    pub fn is_synthetic(&self) -> bool {
        self.line == 0
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::synthetic()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A token with its kind, literal text and location.
///
/// For string literals `literal` holds the unescaped contents without the
/// surrounding quotes; for every other kind it is the source slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub literal: SmolStr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: std::ops::Range<usize>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Position,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        literal: impl Into<SmolStr>,
        span: std::ops::Range<usize>,
        position: Position,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
            position,
        }
    }

    /// Create a token that has no source location.
    pub fn synthetic(kind: TokenKind, literal: impl Into<SmolStr>) -> Self {
        Self::new(kind, literal, 0..0, Position::synthetic())
    }
}

/// Token kinds for Knox.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[logos(skip r"[ \t\f]+")]
pub enum TokenKind {
    // ========================================================================
    // Keywords
    // ========================================================================
    #[token("class")]
    Class,
    #[token("func")]
    Func,
    #[token("var")]
    Var,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("return")]
    Return,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("new")]
    New,
    #[token("nil")]
    Nil,
    #[token("self")]
    SelfKw,
    #[token("void")]
    Void,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // ========================================================================
    // Operators
    // ========================================================================
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    #[token("==")]
    EqEq,
    #[token("!=")]
    Ne,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,

    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,

    #[token("=")]
    Eq,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // ========================================================================
    // Delimiters
    // ========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // ========================================================================
    // Literals
    // ========================================================================
    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // ========================================================================
    // Whitespace and Comments
    // ========================================================================
    #[regex(r"\n|\r\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", skip_block_comment)]
    BlockComment,

    /// End of file
    Eof,
}

impl TokenKind {
    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Func
                | TokenKind::Var
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::New
                | TokenKind::Nil
                | TokenKind::SelfKw
                | TokenKind::Void
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Check if this token is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Nil
        )
    }

    /// Check if this token is trivia (comments, etc.)
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Keywords that start a jump statement.
    pub fn is_jump(&self) -> bool {
        matches!(
            self,
            TokenKind::Return | TokenKind::Break | TokenKind::Continue
        )
    }
}

// ============================================================================
// Helper functions for lexing
// ============================================================================

/// Strip the quotes from a string literal and resolve escape sequences.
pub(crate) fn unescape_string(s: &str) -> SmolStr {
    let s = s
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s);

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some(c) => {
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    SmolStr::from(result)
}

fn skip_block_comment(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    let remainder = lex.remainder();
    let mut chars = remainder.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '*' {
            if let Some((_, '/')) = chars.peek() {
                lex.bump(i + 2);
                return logos::Skip;
            }
        }
    }

    // Unclosed comment - bump to end
    lex.bump(remainder.len());
    logos::Skip
}

#[cfg(test)]
mod tests {
    use super::*;
    use logos::Logos;

    #[test]
    fn test_keywords() {
        let mut lex = TokenKind::lexer("class func var self void nil");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Class)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Func)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Var)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::SelfKw)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Void)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Nil)));
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let mut lex = TokenKind::lexer("classy returned");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ident)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ident)));
    }

    #[test]
    fn test_numbers() {
        let mut lex = TokenKind::lexer("42 3.15");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Int)));
        assert_eq!(lex.slice(), "42");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Float)));
        assert_eq!(lex.slice(), "3.15");
    }

    #[test]
    fn test_operators() {
        let mut lex = TokenKind::lexer("+ - == != <= >= && || ! = .");
        assert_eq!(lex.next(), Some(Ok(TokenKind::Plus)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Minus)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::EqEq)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ne)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Le)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Ge)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::AndAnd)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::OrOr)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Bang)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Eq)));
        assert_eq!(lex.next(), Some(Ok(TokenKind::Dot)));
    }

    #[test]
    fn test_unescape_string() {
        assert_eq!(unescape_string(r#""hello""#), "hello");
        assert_eq!(unescape_string(r#""a\nb\"c""#), "a\nb\"c");
        assert_eq!(unescape_string(r#""keep \q""#), "keep \\q");
    }

    #[test]
    fn test_jump_keywords() {
        assert!(TokenKind::Return.is_jump());
        assert!(TokenKind::Break.is_jump());
        assert!(!TokenKind::If.is_jump());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 14).to_string(), "3:14");
        assert!(Position::synthetic().is_synthetic());
    }
}
