//! The closed set of syntactic categories a node can belong to.

use std::fmt;
use std::str::FromStr;

use crate::error::AstError;

/// How many children a node of a given kind may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// No children.
    Leaf,
    /// Exactly this many children.
    Exact(usize),
    /// At least this many children.
    AtLeast(usize),
    /// Any number of children, including zero.
    Any,
}

impl Arity {
    /// Whether `count` children satisfy this arity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Leaf => count == 0,
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Leaf => f.write_str("no children"),
            Arity::Exact(1) => f.write_str("exactly 1 child"),
            Arity::Exact(n) => write!(f, "exactly {n} children"),
            Arity::AtLeast(1) => f.write_str("at least 1 child"),
            Arity::AtLeast(n) => write!(f, "at least {n} children"),
            Arity::Any => f.write_str("any number of children"),
        }
    }
}

/// Node kinds.
///
/// Every consumer matches on this exhaustively, so adding a kind is a
/// compile error everywhere it is not yet handled.
///
/// Loaded trees name their kinds by tag and go through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum NodeKind {
    /// Compilation unit. One child per top-level declaration.
    Program,
    /// Class declaration. One child per method or field.
    Class,
    /// Statement sequence.
    Block,
    /// Wraps a tree of operators and primaries.
    Expression,
    BinaryOp,
    UnaryOp,
    IndexOp,
    DotOp,
    /// `(IDENT, VARTYPE)` pairs followed by an optional initializer.
    VarDecl,
    /// Base type in the token, type arguments as children.
    VarType,
    /// Targets followed by the assigned expression.
    VarAssign,
    /// Name, parameters, returns, body.
    FuncDecl,
    ParamList,
    ReturnList,
    /// `(condition, BLOCK)` pairs and an optional trailing else block.
    IfStatement,
    /// Declaration, condition, body.
    ForStatement,
    WhileStatement,
    /// `return`, `break` or `continue`, told apart by the token.
    JumpStatement,
    /// Variable name in the token, index expressions as children.
    VarRef,
    /// Callee name in the token, arguments as children.
    FuncCall,
    LeftExpr,
    New,
    List,
    Int,
    Float,
    String,
    Bool,
    Nil,
    #[cfg_attr(feature = "serde", serde(rename = "SELF"))]
    SelfRef,
    Void,
    Ident,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 31] = [
        NodeKind::Program,
        NodeKind::Class,
        NodeKind::Block,
        NodeKind::Expression,
        NodeKind::BinaryOp,
        NodeKind::UnaryOp,
        NodeKind::IndexOp,
        NodeKind::DotOp,
        NodeKind::VarDecl,
        NodeKind::VarType,
        NodeKind::VarAssign,
        NodeKind::FuncDecl,
        NodeKind::ParamList,
        NodeKind::ReturnList,
        NodeKind::IfStatement,
        NodeKind::ForStatement,
        NodeKind::WhileStatement,
        NodeKind::JumpStatement,
        NodeKind::VarRef,
        NodeKind::FuncCall,
        NodeKind::LeftExpr,
        NodeKind::New,
        NodeKind::List,
        NodeKind::Int,
        NodeKind::Float,
        NodeKind::String,
        NodeKind::Bool,
        NodeKind::Nil,
        NodeKind::SelfRef,
        NodeKind::Void,
        NodeKind::Ident,
    ];

    /// The upper-case tag used in tree dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Program => "PROGRAM",
            NodeKind::Class => "CLASS",
            NodeKind::Block => "BLOCK",
            NodeKind::Expression => "EXPRESSION",
            NodeKind::BinaryOp => "BINARYOP",
            NodeKind::UnaryOp => "UNARYOP",
            NodeKind::IndexOp => "INDEXOP",
            NodeKind::DotOp => "DOTOP",
            NodeKind::VarDecl => "VARDECL",
            NodeKind::VarType => "VARTYPE",
            NodeKind::VarAssign => "VARASSIGN",
            NodeKind::FuncDecl => "FUNCDECL",
            NodeKind::ParamList => "PARAMLIST",
            NodeKind::ReturnList => "RETURNLIST",
            NodeKind::IfStatement => "IFSTATEMENT",
            NodeKind::ForStatement => "FORSTATEMENT",
            NodeKind::WhileStatement => "WHILESTATEMENT",
            NodeKind::JumpStatement => "JUMPSTATEMENT",
            NodeKind::VarRef => "VARREF",
            NodeKind::FuncCall => "FUNCCALL",
            NodeKind::LeftExpr => "LEFTEXPR",
            NodeKind::New => "NEW",
            NodeKind::List => "LIST",
            NodeKind::Int => "INT",
            NodeKind::Float => "FLOAT",
            NodeKind::String => "STRING",
            NodeKind::Bool => "BOOL",
            NodeKind::Nil => "NIL",
            NodeKind::SelfRef => "SELF",
            NodeKind::Void => "VOID",
            NodeKind::Ident => "IDENT",
        }
    }

    /// Child count rule for this kind.
    pub fn arity(self) -> Arity {
        match self {
            NodeKind::Program
            | NodeKind::Class
            | NodeKind::Block
            | NodeKind::VarType
            | NodeKind::ParamList
            | NodeKind::ReturnList
            | NodeKind::JumpStatement
            | NodeKind::VarRef
            | NodeKind::FuncCall
            | NodeKind::List => Arity::Any,
            NodeKind::VarDecl | NodeKind::VarAssign | NodeKind::IfStatement => Arity::AtLeast(2),
            NodeKind::Expression | NodeKind::UnaryOp | NodeKind::LeftExpr | NodeKind::New => {
                Arity::Exact(1)
            }
            NodeKind::BinaryOp
            | NodeKind::IndexOp
            | NodeKind::DotOp
            | NodeKind::WhileStatement => Arity::Exact(2),
            NodeKind::ForStatement => Arity::Exact(3),
            NodeKind::FuncDecl => Arity::Exact(4),
            NodeKind::Int
            | NodeKind::Float
            | NodeKind::String
            | NodeKind::Bool
            | NodeKind::Nil
            | NodeKind::SelfRef
            | NodeKind::Void
            | NodeKind::Ident => Arity::Leaf,
        }
    }

    /// One-line description of the children this kind expects.
    pub fn contract(self) -> &'static str {
        match self {
            NodeKind::Program => "one FUNCDECL, CLASS or VARDECL per top-level declaration",
            NodeKind::Class => "one FUNCDECL or VARDECL per member",
            NodeKind::Block => "one statement per child",
            NodeKind::Expression => "a single expression",
            NodeKind::BinaryOp => "left and right operand",
            NodeKind::UnaryOp => "operand",
            NodeKind::IndexOp => "base and index expression",
            NodeKind::DotOp => "base and member",
            NodeKind::VarDecl => "IDENT/VARTYPE pairs, then an optional initializer",
            NodeKind::VarType => "VARTYPE type arguments; base type in the token",
            NodeKind::VarAssign => "one or more targets, then one expression",
            NodeKind::FuncDecl => "IDENT, PARAMLIST, RETURNLIST, BLOCK",
            NodeKind::ParamList => "IDENT/VARTYPE pairs",
            NodeKind::ReturnList => "one VARTYPE per return value, or VOID",
            NodeKind::IfStatement => "condition/BLOCK pairs, then an optional else BLOCK",
            NodeKind::ForStatement => "VARDECL, condition, BLOCK",
            NodeKind::WhileStatement => "condition, BLOCK",
            NodeKind::JumpStatement => "none, except return which takes expressions",
            NodeKind::VarRef => "index expressions; name in the token",
            NodeKind::FuncCall => "argument expressions; name in the token",
            NodeKind::LeftExpr => "a single expression",
            NodeKind::New => "a single VARTYPE",
            NodeKind::List => "element expressions",
            NodeKind::Int
            | NodeKind::Float
            | NodeKind::String
            | NodeKind::Bool
            | NodeKind::Nil
            | NodeKind::SelfRef
            | NodeKind::Void
            | NodeKind::Ident => "leaf; value in the token",
        }
    }

    /// Terminal kinds.
    pub fn is_leaf(self) -> bool {
        self.arity() == Arity::Leaf
    }

    /// Kinds that own a symbol table.
    pub fn is_scope_defining(self) -> bool {
        matches!(self, NodeKind::Program | NodeKind::Block)
    }

    /// Kinds that can stand where a value is expected.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            NodeKind::Expression
                | NodeKind::BinaryOp
                | NodeKind::UnaryOp
                | NodeKind::IndexOp
                | NodeKind::DotOp
                | NodeKind::VarRef
                | NodeKind::FuncCall
                | NodeKind::LeftExpr
                | NodeKind::New
                | NodeKind::List
                | NodeKind::Int
                | NodeKind::Float
                | NodeKind::String
                | NodeKind::Bool
                | NodeKind::Nil
                | NodeKind::SelfRef
                | NodeKind::Ident
        )
    }

    /// Kinds allowed as direct children of a block.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::VarDecl
                | NodeKind::VarAssign
                | NodeKind::IfStatement
                | NodeKind::ForStatement
                | NodeKind::WhileStatement
                | NodeKind::JumpStatement
                | NodeKind::Expression
                | NodeKind::LeftExpr
                | NodeKind::FuncCall
                | NodeKind::Block
        )
    }

    /// Kinds allowed at the top level of a program.
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::FuncDecl | NodeKind::Class | NodeKind::VarDecl
        )
    }

    /// Kinds that can be assigned to.
    pub fn is_assign_target(self) -> bool {
        matches!(
            self,
            NodeKind::VarRef | NodeKind::DotOp | NodeKind::IndexOp | NodeKind::SelfRef
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AstError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip_through_from_str() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert!(matches!(
            "TERNARY".parse::<NodeKind>(),
            Err(AstError::UnknownKind(tag)) if tag == "TERNARY"
        ));
    }

    #[test]
    fn test_only_program_and_block_define_scopes() {
        let scoped: Vec<_> = NodeKind::ALL
            .into_iter()
            .filter(|k| k.is_scope_defining())
            .collect();
        assert_eq!(scoped, vec![NodeKind::Program, NodeKind::Block]);
    }

    #[test]
    fn test_leaves() {
        let leaves: Vec<_> = NodeKind::ALL
            .into_iter()
            .filter(|k| k.is_leaf())
            .map(NodeKind::as_str)
            .collect();
        assert_eq!(
            leaves,
            vec!["INT", "FLOAT", "STRING", "BOOL", "NIL", "SELF", "VOID", "IDENT"]
        );
    }

    #[test]
    fn test_arity_accepts() {
        assert!(Arity::Exact(4).accepts(4));
        assert!(!Arity::Exact(4).accepts(3));
        assert!(Arity::AtLeast(2).accepts(5));
        assert!(!Arity::AtLeast(2).accepts(1));
        assert!(Arity::Leaf.accepts(0));
        assert!(!Arity::Leaf.accepts(1));
        assert!(Arity::Any.accepts(0));
    }

    #[test]
    fn test_arity_display() {
        assert_eq!(Arity::Exact(4).to_string(), "exactly 4 children");
        assert_eq!(Arity::Exact(1).to_string(), "exactly 1 child");
        assert_eq!(Arity::AtLeast(2).to_string(), "at least 2 children");
    }
}
