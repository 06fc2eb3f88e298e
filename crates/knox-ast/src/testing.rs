//! Tree-building shorthands for unit tests.

use knox_lexer::{Position, Token, TokenKind};

use crate::node::Node;
use crate::symbols::{Symbol, SymbolKind, SymbolTable};

pub(crate) fn tok(kind: TokenKind, literal: &str) -> Token {
    Token::synthetic(kind, literal)
}

pub(crate) fn op(literal: &str) -> Token {
    let kind = match literal {
        "-" => TokenKind::Minus,
        "*" => TokenKind::Star,
        "/" => TokenKind::Slash,
        "<" => TokenKind::Lt,
        "==" => TokenKind::EqEq,
        "!" => TokenKind::Bang,
        _ => TokenKind::Plus,
    };
    tok(kind, literal)
}

pub(crate) fn int(literal: &str) -> Node {
    Node::int(tok(TokenKind::Int, literal))
}

pub(crate) fn ident(name: &str) -> Node {
    Node::ident(tok(TokenKind::Ident, name))
}

pub(crate) fn var(name: &str) -> Node {
    Node::var_ref(tok(TokenKind::Ident, name), Vec::new()).unwrap()
}

pub(crate) fn ty(name: &str) -> Node {
    Node::var_type(tok(TokenKind::Ident, name), Vec::new()).unwrap()
}

pub(crate) fn void() -> Node {
    Node::void(tok(TokenKind::Void, "void"))
}

/// `var <name> int` with no initializer.
pub(crate) fn field(name: &str) -> Node {
    Node::var_decl(tok(TokenKind::Var, "var"), vec![(ident(name), ty("int"))], None).unwrap()
}

pub(crate) fn expr(inner: Node) -> Node {
    let token = inner.token().clone();
    Node::expression(token, inner).unwrap()
}

pub(crate) fn scope(names: &[&str]) -> SymbolTable {
    names
        .iter()
        .map(|name| Symbol::new(*name, SymbolKind::Variable, Position::synthetic()))
        .collect()
}

pub(crate) fn block(statements: Vec<Node>, names: &[&str]) -> Node {
    Node::block(tok(TokenKind::LBrace, "{"), statements, scope(names)).unwrap()
}

pub(crate) fn params(pairs: Vec<(Node, Node)>) -> Node {
    Node::param_list(tok(TokenKind::LParen, "("), pairs).unwrap()
}

pub(crate) fn returns(types: Vec<Node>) -> Node {
    Node::return_list(tok(TokenKind::Void, "void"), types).unwrap()
}

pub(crate) fn ret(values: Vec<Node>) -> Node {
    Node::return_statement(tok(TokenKind::Return, "return"), values).unwrap()
}

pub(crate) fn func(name: &str, body: Node) -> Node {
    Node::func_decl(
        tok(TokenKind::Func, "func"),
        ident(name),
        params(Vec::new()),
        returns(Vec::new()),
        body,
    )
    .unwrap()
}
