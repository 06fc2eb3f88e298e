//! CLI commands.

pub mod kinds;
pub mod lex;
pub mod tree;
