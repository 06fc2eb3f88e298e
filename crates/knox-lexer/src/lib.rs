//! # Knox Lexer
//!
//! Tokenizes Knox source code into a stream of tokens.
//!
//! Every token carries its kind, its literal text and a line/column
//! position. The AST keeps a copy of the token that started each node for
//! diagnostics.
//!
//! ## Example
//!
//! ```
//! use knox_lexer::{Lexer, TokenKind};
//!
//! let source = "var x int = 42";
//! let tokens: Vec<_> = Lexer::new(source).filter_map(Result::ok).collect();
//!
//! assert_eq!(tokens[0].kind, TokenKind::Var);
//! assert_eq!(tokens[1].literal, "x");
//! assert_eq!(tokens[1].position.column, 5);
//! ```

mod error;
mod lexer;
mod token;

pub use error::LexError;
pub use lexer::Lexer;
pub use token::{Position, Token, TokenKind};

/// Tokenize source code into a vector of tokens.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    for result in lexer {
        match result {
            Ok(token) => tokens.push(token),
            Err(err) => errors.push(err),
        }
    }

    (tokens, errors)
}
