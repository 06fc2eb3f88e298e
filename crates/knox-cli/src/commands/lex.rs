//! Lex command - tokenize a file.

use knox_lexer::{LexError, Lexer, Token};
use std::fs;
use std::path::Path;

pub fn run(file: &Path) -> miette::Result<()> {
    let source = fs::read_to_string(file)
        .map_err(|e| miette::miette!("Failed to read {}: {}", file.display(), e))?;

    println!("Tokenizing: {}\n", file.display());

    let mut token_count = 0;
    let mut error_count = 0;

    for result in Lexer::new(&source) {
        match result {
            Ok(token) => {
                println!("{}", format_token(&token));
                token_count += 1;
            }
            Err(err) => {
                println!("{}", format_error(file, &err));
                error_count += 1;
            }
        }
    }

    println!("\n{} tokens, {} errors", token_count, error_count);
    tracing::debug!(token_count, error_count, "lexed {}", file.display());

    if error_count > 0 {
        Err(miette::miette!("{} lexer errors", error_count))
    } else {
        Ok(())
    }
}

/// One line per token: position, kind, literal.
pub(crate) fn format_token(token: &Token) -> String {
    let text = token.literal.as_str();
    let text_display = if text.chars().count() > 40 {
        format!("{}...", text.chars().take(40).collect::<String>())
    } else {
        text.to_string()
    };

    format!(
        "{:>4}:{:<4}  {:12}  {:?}",
        token.position.line,
        token.position.column,
        format!("{:?}", token.kind),
        text_display
    )
}

pub(crate) fn format_error(file: &Path, err: &LexError) -> String {
    format!("  {}:{}: error: {}", file.display(), err.position(), err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knox_lexer::{Position, TokenKind};

    #[test]
    fn test_format_token() {
        let token = Token::new(TokenKind::Ident, "main", 5..9, Position::new(1, 6));
        assert_eq!(format_token(&token), "   1:6     Ident         \"main\"");
    }

    #[test]
    fn test_long_literal_is_truncated() {
        let literal = "x".repeat(50);
        let token = Token::new(TokenKind::String, literal.as_str(), 0..52, Position::new(1, 1));
        let line = format_token(&token);
        assert!(line.ends_with(&format!("\"{}...\"", "x".repeat(40))), "{line}");
    }

    #[test]
    fn test_format_error() {
        let (_, errors) = knox_lexer::tokenize("var a\n  $");
        let line = format_error(Path::new("main.kx"), &errors[0]);
        assert_eq!(line, "  main.kx:2:3: error: unexpected character \"$\" at 2:3");
    }
}
