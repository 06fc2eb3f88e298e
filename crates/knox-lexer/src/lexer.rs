//! High-level lexer interface.

use crate::error::LexError;
use crate::token::{unescape_string, Position, Token, TokenKind};
use logos::Logos;
use smol_str::SmolStr;

/// A lexer for Knox source code.
///
/// Wraps the logos-generated lexer, attaches literal text and line/column
/// positions, and drops comments.
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, TokenKind>,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
    peeked: Option<Result<Token, LexError>>,
    /// Track if we've emitted EOF
    done: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'source str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            inner: TokenKind::lexer(source),
            line_starts,
            peeked: None,
            done: false,
        }
    }

    /// Peek at the next token without consuming it.
    pub fn peek(&mut self) -> Option<&Result<Token, LexError>> {
        if self.peeked.is_none() {
            self.peeked = self.next_inner();
        }
        self.peeked.as_ref()
    }

    /// Get the source text.
    pub fn source(&self) -> &'source str {
        self.inner.source()
    }

    /// Translate a byte offset into a 1-based line and column.
    pub fn position_of(&self, offset: usize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = self.line_starts[line];
        let end = offset.min(self.source().len());
        let column = self.source().get(start..end).map_or(0, |s| s.chars().count());

        Position::new(line as u32 + 1, column as u32 + 1)
    }

    fn next_inner(&mut self) -> Option<Result<Token, LexError>> {
        loop {
            match self.inner.next() {
                Some(Ok(kind)) => {
                    // Skip trivia (comments)
                    if kind.is_trivia() {
                        continue;
                    }

                    let span = self.inner.span();
                    let slice = self.inner.slice();
                    let literal = match kind {
                        TokenKind::String => unescape_string(slice),
                        _ => SmolStr::from(slice),
                    };
                    let position = self.position_of(span.start);
                    return Some(Ok(Token::new(kind, literal, span, position)));
                }
                Some(Err(())) => {
                    let span = self.inner.span();
                    let position = self.position_of(span.start);
                    return Some(Err(LexError::UnexpectedChar {
                        text: self.inner.slice().to_string(),
                        span,
                        position,
                    }));
                }
                None => {
                    if !self.done {
                        self.done = true;
                        let pos = self.source().len();
                        let position = self.position_of(pos);
                        return Some(Ok(Token::new(TokenKind::Eof, "", pos..pos, position)));
                    }
                    return None;
                }
            }
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(peeked) = self.peeked.take() {
            return Some(peeked);
        }
        self.next_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn significant(source: &str) -> Vec<Token> {
        Lexer::new(source)
            .filter_map(|r| r.ok())
            .filter(|t| !matches!(t.kind, TokenKind::Newline))
            .collect()
    }

    #[test]
    fn test_simple_tokenization() {
        let tokens = significant("x = 42");

        assert_eq!(tokens.len(), 4); // x, =, 42, EOF
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].literal, "x");
        assert_eq!(tokens[1].kind, TokenKind::Eq);
        assert_eq!(tokens[2].kind, TokenKind::Int);
        assert_eq!(tokens[2].literal, "42");
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_function_declaration() {
        let source = "func main() void {\n    return\n}\n";
        let tokens = significant(source);

        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Func,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Void,
                TokenKind::LBrace,
                TokenKind::Return,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_class_snapshot() {
        let source = "class Point {\n    var x int = 0\n    func len() float { return self.x }\n}";
        let listing = significant(source)
            .iter()
            .map(|t| format!("{} {:?} {}", t.position, t.kind, t.literal).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        insta::assert_snapshot!(listing, @r"
        1:1 Class class
        1:7 Ident Point
        1:13 LBrace {
        2:5 Var var
        2:9 Ident x
        2:11 Ident int
        2:15 Eq =
        2:17 Int 0
        3:5 Func func
        3:10 Ident len
        3:13 LParen (
        3:14 RParen )
        3:16 Ident float
        3:22 LBrace {
        3:24 Return return
        3:31 SelfKw self
        3:35 Dot .
        3:36 Ident x
        3:38 RBrace }
        4:1 RBrace }
        4:2 Eof
        ");
    }

    #[test]
    fn test_positions() {
        let source = "var a int\n  a = 1\n";
        let tokens = significant(source);

        assert_eq!(tokens[0].position, Position::new(1, 1));
        assert_eq!(tokens[1].position, Position::new(1, 5));
        // second line: `a` after two spaces
        assert_eq!(tokens[3].literal, "a");
        assert_eq!(tokens[3].position, Position::new(2, 3));
        assert_eq!(tokens[5].position, Position::new(2, 7));
    }

    #[test]
    fn test_string_literal_is_unescaped() {
        let tokens = significant(r#"print("hi\tthere")"#);

        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].literal, "hi\tthere");
        assert_eq!(tokens[2].span, 6..17);
    }

    #[test]
    fn test_comments_skipped() {
        let source = r#"
            // This is a comment
            x = 42 // inline comment
            /* block
               comment */
            y = 10
        "#;
        let idents: Vec<_> = significant(source)
            .into_iter()
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.literal)
            .collect();

        assert_eq!(idents, vec!["x", "y"]);
    }

    #[test]
    fn test_unexpected_character() {
        let results: Vec<_> = Lexer::new("a\n  @").collect();
        let err = results
            .iter()
            .find_map(|r| r.as_ref().err())
            .cloned()
            .expect("lexer should report '@'");

        assert_eq!(err.span(), 4..5);
        assert_eq!(err.position(), Position::new(2, 3));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("a b");
        let peeked = lexer.peek().cloned();
        assert_eq!(peeked, lexer.next());
        assert_eq!(lexer.next().and_then(Result::ok).map(|t| t.literal), Some("b".into()));
    }

    #[test]
    fn test_eof_emitted_once() {
        let tokens: Vec<_> = Lexer::new("").collect();
        assert_eq!(tokens.len(), 1);
        assert!(matches!(&tokens[0], Ok(t) if t.kind == TokenKind::Eof));
    }
}
