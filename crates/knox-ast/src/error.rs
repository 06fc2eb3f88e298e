//! AST error definitions.

use knox_lexer::Position;
use thiserror::Error;

use crate::kind::{Arity, NodeKind};

/// An error raised while building or querying a tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AstError {
    #[error("{kind} at {position} takes {expected}, found {found}")]
    Arity {
        kind: NodeKind,
        expected: Arity,
        found: usize,
        position: Position,
    },

    #[error("{kind} at {position}: child {index} must be {expected}, found {found}")]
    ChildKind {
        kind: NodeKind,
        index: usize,
        expected: &'static str,
        found: NodeKind,
        position: Position,
    },

    #[error("{kind} at {position} takes IDENT/VARTYPE pairs, found {found} children")]
    Unpaired {
        kind: NodeKind,
        found: usize,
        position: Position,
    },

    #[error("`{keyword}` at {position} cannot carry values")]
    JumpValues { keyword: String, position: Position },

    #[error("{kind} does not open a scope but a symbol table was attached")]
    UnexpectedScope { kind: NodeKind },

    #[error("{kind} opens a scope but no symbol table was attached")]
    MissingScope { kind: NodeKind },

    #[error("{kind} has no scope")]
    NoScope { kind: NodeKind },

    #[error("unknown node kind `{0}`")]
    UnknownKind(String),
}

impl AstError {
    /// The kind of the node the error is about, if any.
    pub fn kind(&self) -> Option<NodeKind> {
        match self {
            AstError::Arity { kind, .. }
            | AstError::ChildKind { kind, .. }
            | AstError::Unpaired { kind, .. }
            | AstError::UnexpectedScope { kind }
            | AstError::MissingScope { kind }
            | AstError::NoScope { kind } => Some(*kind),
            AstError::JumpValues { .. } => Some(NodeKind::JumpStatement),
            AstError::UnknownKind(_) => None,
        }
    }

    /// Source location of the offending node, if known.
    pub fn position(&self) -> Option<Position> {
        match self {
            AstError::Arity { position, .. }
            | AstError::ChildKind { position, .. }
            | AstError::Unpaired { position, .. }
            | AstError::JumpValues { position, .. } => Some(*position),
            _ => None,
        }
    }
}
