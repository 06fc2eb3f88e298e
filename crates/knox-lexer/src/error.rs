//! Lexer error definitions.

use thiserror::Error;

use crate::token::Position;

/// A lexer error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character {text:?} at {position}")]
    UnexpectedChar {
        text: String,
        span: std::ops::Range<usize>,
        position: Position,
    },
}

impl LexError {
    /// Get the span of this error.
    pub fn span(&self) -> std::ops::Range<usize> {
        match self {
            LexError::UnexpectedChar { span, .. } => span.clone(),
        }
    }

    /// Get the line and column of this error.
    pub fn position(&self) -> Position {
        match self {
            LexError::UnexpectedChar { position, .. } => *position,
        }
    }
}
