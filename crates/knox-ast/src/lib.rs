//! # Knox AST
//!
//! Abstract Syntax Tree definitions for the Knox programming language.
//!
//! Every construct is a [`Node`]: a [`NodeKind`] tag, the token the parser
//! built it from, an ordered list of owned children, and, for `PROGRAM` and
//! `BLOCK`, a [`SymbolTable`]. Each kind has a fixed child contract, enforced
//! when the node is built, so later passes can rely on positions such as
//! "child 3 of a `FUNCDECL` is its body".
//!
//! ## Example
//!
//! ```
//! use knox_ast::Node;
//! use knox_lexer::{Token, TokenKind};
//!
//! let x = Node::var_ref(Token::synthetic(TokenKind::Ident, "x"), vec![]).unwrap();
//! let five = Node::int(Token::synthetic(TokenKind::Int, "5"));
//! let sum = Node::binary_op(Token::synthetic(TokenKind::Plus, "+"), x, five).unwrap();
//!
//! assert_eq!(sum.dump(), " BINARYOP +\n> VARREF x\n> INT 5\n");
//! ```

mod error;
mod kind;
mod node;
mod print;
mod shape;
mod symbols;

#[cfg(test)]
mod testing;

pub use error::AstError;
pub use kind::{Arity, NodeKind};
pub use node::{Node, Preorder};
pub use print::{print_tree, render_tree, write_tree, PrintOptions, TreeDisplay};
pub use symbols::{Symbol, SymbolKind, SymbolTable};
