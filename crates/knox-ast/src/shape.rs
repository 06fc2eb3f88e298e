//! Child shape rules for every node kind.
//!
//! All constructors funnel through [`check`]; a node that exists has passed it.

use knox_lexer::{Token, TokenKind};

use crate::error::AstError;
use crate::kind::NodeKind;
use crate::node::Node;

const EXPRESSION: &str = "an expression";
const STATEMENT: &str = "a statement";
const DECLARATION: &str = "FUNCDECL, CLASS or VARDECL";
const MEMBER: &str = "FUNCDECL or VARDECL";
const ASSIGN_TARGET: &str = "VARREF, DOTOP, INDEXOP or SELF";
const RETURN_TYPE: &str = "VARTYPE or VOID";

/// Validate `children` and scope presence against the contract of `kind`.
pub(crate) fn check(
    kind: NodeKind,
    token: &Token,
    children: &[Node],
    has_scope: bool,
) -> Result<(), AstError> {
    if kind.is_scope_defining() && !has_scope {
        return Err(AstError::MissingScope { kind });
    }
    if !kind.is_scope_defining() && has_scope {
        return Err(AstError::UnexpectedScope { kind });
    }

    let expected = kind.arity();
    if !expected.accepts(children.len()) {
        return Err(AstError::Arity {
            kind,
            expected,
            found: children.len(),
            position: token.position,
        });
    }

    let rule = Rule {
        kind,
        token,
        children,
    };

    match kind {
        NodeKind::Program => rule.all(DECLARATION, NodeKind::is_declaration),
        NodeKind::Class => rule.all(MEMBER, |k| {
            matches!(k, NodeKind::FuncDecl | NodeKind::VarDecl)
        }),
        NodeKind::Block => rule.all(STATEMENT, NodeKind::is_statement),
        NodeKind::Expression
        | NodeKind::UnaryOp
        | NodeKind::LeftExpr
        | NodeKind::BinaryOp
        | NodeKind::IndexOp
        | NodeKind::DotOp
        | NodeKind::VarRef
        | NodeKind::FuncCall
        | NodeKind::List => rule.all(EXPRESSION, NodeKind::is_expression),
        NodeKind::VarDecl => {
            let pairs = if children.len() % 2 == 1 {
                rule.at(children.len() - 1, EXPRESSION, NodeKind::is_expression)?;
                children.len() - 1
            } else {
                children.len()
            };
            rule.pairs(pairs)
        }
        NodeKind::VarType => rule.all("VARTYPE", |k| k == NodeKind::VarType),
        NodeKind::ReturnList => rule.all(RETURN_TYPE, |k| {
            matches!(k, NodeKind::VarType | NodeKind::Void)
        }),
        NodeKind::VarAssign => {
            let last = children.len() - 1;
            rule.at(last, EXPRESSION, NodeKind::is_expression)?;
            rule.range(0..last, ASSIGN_TARGET, NodeKind::is_assign_target)
        }
        NodeKind::FuncDecl => {
            rule.exact(0, NodeKind::Ident)?;
            rule.exact(1, NodeKind::ParamList)?;
            rule.exact(2, NodeKind::ReturnList)?;
            rule.exact(3, NodeKind::Block)
        }
        NodeKind::ParamList => {
            if children.len() % 2 == 1 {
                return Err(AstError::Unpaired {
                    kind,
                    found: children.len(),
                    position: token.position,
                });
            }
            rule.pairs(children.len())
        }
        NodeKind::IfStatement => {
            let mut branches = children.len();
            if branches % 2 == 1 {
                branches -= 1;
                rule.exact(branches, NodeKind::Block)?;
            }
            for i in (0..branches).step_by(2) {
                rule.at(i, EXPRESSION, NodeKind::is_expression)?;
                rule.exact(i + 1, NodeKind::Block)?;
            }
            Ok(())
        }
        NodeKind::ForStatement => {
            rule.exact(0, NodeKind::VarDecl)?;
            rule.at(1, EXPRESSION, NodeKind::is_expression)?;
            rule.exact(2, NodeKind::Block)
        }
        NodeKind::WhileStatement => {
            rule.at(0, EXPRESSION, NodeKind::is_expression)?;
            rule.exact(1, NodeKind::Block)
        }
        NodeKind::JumpStatement => {
            if token.kind != TokenKind::Return && !children.is_empty() {
                return Err(AstError::JumpValues {
                    keyword: token.literal.to_string(),
                    position: token.position,
                });
            }
            rule.all(EXPRESSION, NodeKind::is_expression)
        }
        NodeKind::New => rule.exact(0, NodeKind::VarType),
        NodeKind::Int
        | NodeKind::Float
        | NodeKind::String
        | NodeKind::Bool
        | NodeKind::Nil
        | NodeKind::SelfRef
        | NodeKind::Void
        | NodeKind::Ident => Ok(()),
    }
}

struct Rule<'a> {
    kind: NodeKind,
    token: &'a Token,
    children: &'a [Node],
}

impl Rule<'_> {
    fn at(
        &self,
        index: usize,
        expected: &'static str,
        accepts: impl Fn(NodeKind) -> bool,
    ) -> Result<(), AstError> {
        let found = self.children[index].kind();
        if accepts(found) {
            Ok(())
        } else {
            Err(AstError::ChildKind {
                kind: self.kind,
                index,
                expected,
                found,
                position: self.token.position,
            })
        }
    }

    fn exact(&self, index: usize, expected: NodeKind) -> Result<(), AstError> {
        self.at(index, expected.as_str(), |k| k == expected)
    }

    fn range(
        &self,
        indices: std::ops::Range<usize>,
        expected: &'static str,
        accepts: impl Fn(NodeKind) -> bool,
    ) -> Result<(), AstError> {
        indices
            .into_iter()
            .try_for_each(|i| self.at(i, expected, &accepts))
    }

    fn all(
        &self,
        expected: &'static str,
        accepts: impl Fn(NodeKind) -> bool,
    ) -> Result<(), AstError> {
        self.range(0..self.children.len(), expected, accepts)
    }

    /// `(IDENT, VARTYPE)` pairs over the first `len` children.
    fn pairs(&self, len: usize) -> Result<(), AstError> {
        for i in (0..len).step_by(2) {
            self.exact(i, NodeKind::Ident)?;
            self.exact(i + 1, NodeKind::VarType)?;
        }
        Ok(())
    }
}
