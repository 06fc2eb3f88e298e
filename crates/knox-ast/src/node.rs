//! The recursive tree node and its constructors.

use knox_lexer::{Position, Token, TokenKind};

use crate::error::AstError;
use crate::kind::NodeKind;
use crate::shape;
use crate::symbols::SymbolTable;

/// A node in the syntax tree.
///
/// A node owns its children and, for scope-opening kinds, its symbol table.
/// Nodes are built once through the constructors below, which reject any
/// child list that breaks the contract of the node's kind, and are never
/// modified afterwards. Passes that need to annotate nodes keep side tables
/// keyed by node address.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawNode"))]
pub struct Node {
    kind: NodeKind,
    token: Token,
    children: Vec<Node>,
    scope: Option<SymbolTable>,
}

// ============================================================================
// Construction
// ============================================================================

impl Node {
    /// Build a node of any kind from an already assembled child list.
    ///
    /// Prefer the kind-specific constructors; this one exists for tools that
    /// only learn the kind at runtime. It fails on any child count, child
    /// kind or scope mismatch rather than adjusting the input.
    pub fn new(
        kind: NodeKind,
        token: Token,
        children: Vec<Node>,
        scope: Option<SymbolTable>,
    ) -> Result<Node, AstError> {
        if let Err(err) = shape::check(kind, &token, &children, scope.is_some()) {
            tracing::debug!(%kind, literal = %token.literal, "rejected node: {err}");
            return Err(err);
        }

        Ok(Node {
            kind,
            token,
            children,
            scope,
        })
    }

    fn leaf(kind: NodeKind, token: Token) -> Node {
        debug_assert!(kind.is_leaf());
        Node {
            kind,
            token,
            children: Vec::new(),
            scope: None,
        }
    }

    fn composite(kind: NodeKind, token: Token, children: Vec<Node>) -> Result<Node, AstError> {
        Node::new(kind, token, children, None)
    }

    /// Compilation unit with its global scope.
    pub fn program(
        token: Token,
        declarations: Vec<Node>,
        scope: SymbolTable,
    ) -> Result<Node, AstError> {
        Node::new(NodeKind::Program, token, declarations, Some(scope))
    }

    pub fn class(token: Token, members: Vec<Node>) -> Result<Node, AstError> {
        Node::composite(NodeKind::Class, token, members)
    }

    /// Statement sequence with the names it declares.
    pub fn block(
        token: Token,
        statements: Vec<Node>,
        scope: SymbolTable,
    ) -> Result<Node, AstError> {
        Node::new(NodeKind::Block, token, statements, Some(scope))
    }

    pub fn expression(token: Token, inner: Node) -> Result<Node, AstError> {
        Node::composite(NodeKind::Expression, token, vec![inner])
    }

    /// The operator is the token.
    pub fn binary_op(op: Token, left: Node, right: Node) -> Result<Node, AstError> {
        Node::composite(NodeKind::BinaryOp, op, vec![left, right])
    }

    pub fn unary_op(op: Token, operand: Node) -> Result<Node, AstError> {
        Node::composite(NodeKind::UnaryOp, op, vec![operand])
    }

    pub fn index_op(token: Token, base: Node, index: Node) -> Result<Node, AstError> {
        Node::composite(NodeKind::IndexOp, token, vec![base, index])
    }

    pub fn dot_op(token: Token, base: Node, member: Node) -> Result<Node, AstError> {
        Node::composite(NodeKind::DotOp, token, vec![base, member])
    }

    /// `var a int, b int = ...`: one `(IDENT, VARTYPE)` pair per variable.
    pub fn var_decl(
        token: Token,
        variables: Vec<(Node, Node)>,
        initializer: Option<Node>,
    ) -> Result<Node, AstError> {
        let mut children = flatten_pairs(variables);
        children.extend(initializer);
        Node::composite(NodeKind::VarDecl, token, children)
    }

    /// `name` is the base type; `args` are its type arguments.
    pub fn var_type(name: Token, args: Vec<Node>) -> Result<Node, AstError> {
        Node::composite(NodeKind::VarType, name, args)
    }

    pub fn var_assign(token: Token, targets: Vec<Node>, value: Node) -> Result<Node, AstError> {
        let mut children = targets;
        children.push(value);
        Node::composite(NodeKind::VarAssign, token, children)
    }

    pub fn func_decl(
        token: Token,
        name: Node,
        params: Node,
        returns: Node,
        body: Node,
    ) -> Result<Node, AstError> {
        Node::composite(NodeKind::FuncDecl, token, vec![name, params, returns, body])
    }

    pub fn param_list(token: Token, params: Vec<(Node, Node)>) -> Result<Node, AstError> {
        Node::composite(NodeKind::ParamList, token, flatten_pairs(params))
    }

    pub fn return_list(token: Token, types: Vec<Node>) -> Result<Node, AstError> {
        Node::composite(NodeKind::ReturnList, token, types)
    }

    /// `if`, any `else if`s as further `(condition, block)` branches, and an
    /// optional final `else` block.
    pub fn if_statement(
        token: Token,
        branches: Vec<(Node, Node)>,
        else_block: Option<Node>,
    ) -> Result<Node, AstError> {
        let mut children = flatten_pairs(branches);
        children.extend(else_block);
        Node::composite(NodeKind::IfStatement, token, children)
    }

    pub fn for_statement(
        token: Token,
        init: Node,
        condition: Node,
        body: Node,
    ) -> Result<Node, AstError> {
        Node::composite(NodeKind::ForStatement, token, vec![init, condition, body])
    }

    pub fn while_statement(token: Token, condition: Node, body: Node) -> Result<Node, AstError> {
        Node::composite(NodeKind::WhileStatement, token, vec![condition, body])
    }

    /// `break`, `continue` or a bare `return`.
    pub fn jump_statement(token: Token) -> Result<Node, AstError> {
        Node::composite(NodeKind::JumpStatement, token, Vec::new())
    }

    pub fn return_statement(token: Token, values: Vec<Node>) -> Result<Node, AstError> {
        Node::composite(NodeKind::JumpStatement, token, values)
    }

    /// `name` is the variable; `indices` are subscripts applied to it.
    pub fn var_ref(name: Token, indices: Vec<Node>) -> Result<Node, AstError> {
        Node::composite(NodeKind::VarRef, name, indices)
    }

    pub fn func_call(name: Token, args: Vec<Node>) -> Result<Node, AstError> {
        Node::composite(NodeKind::FuncCall, name, args)
    }

    pub fn left_expr(token: Token, inner: Node) -> Result<Node, AstError> {
        Node::composite(NodeKind::LeftExpr, token, vec![inner])
    }

    pub fn new_object(token: Token, ty: Node) -> Result<Node, AstError> {
        Node::composite(NodeKind::New, token, vec![ty])
    }

    pub fn list(token: Token, elements: Vec<Node>) -> Result<Node, AstError> {
        Node::composite(NodeKind::List, token, elements)
    }

    pub fn int(token: Token) -> Node {
        Node::leaf(NodeKind::Int, token)
    }

    pub fn float(token: Token) -> Node {
        Node::leaf(NodeKind::Float, token)
    }

    pub fn string(token: Token) -> Node {
        Node::leaf(NodeKind::String, token)
    }

    pub fn bool(token: Token) -> Node {
        Node::leaf(NodeKind::Bool, token)
    }

    pub fn nil(token: Token) -> Node {
        Node::leaf(NodeKind::Nil, token)
    }

    pub fn self_ref(token: Token) -> Node {
        Node::leaf(NodeKind::SelfRef, token)
    }

    pub fn void(token: Token) -> Node {
        Node::leaf(NodeKind::Void, token)
    }

    pub fn ident(token: Token) -> Node {
        Node::leaf(NodeKind::Ident, token)
    }
}

fn flatten_pairs(pairs: Vec<(Node, Node)>) -> Vec<Node> {
    pairs.into_iter().flat_map(|(a, b)| [a, b]).collect()
}

// ============================================================================
// Inspection
// ============================================================================

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The token this node was built from.
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn literal(&self) -> &str {
        &self.token.literal
    }

    pub fn position(&self) -> Position {
        self.token.position
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The symbol table of a scope-opening node.
    pub fn scope(&self) -> Result<&SymbolTable, AstError> {
        self.scope
            .as_ref()
            .ok_or(AstError::NoScope { kind: self.kind })
    }

    pub fn has_scope(&self) -> bool {
        self.scope.is_some()
    }

    /// Whether this is a `return` jump.
    pub fn is_return(&self) -> bool {
        self.kind == NodeKind::JumpStatement && self.token.kind == TokenKind::Return
    }

    fn when(&self, kinds: &[NodeKind]) -> Option<&[Node]> {
        kinds.contains(&self.kind).then_some(self.children.as_slice())
    }

    fn nth_when(&self, kind: NodeKind, index: usize) -> Option<&Node> {
        self.when(&[kind]).and_then(|c| c.get(index))
    }

    /// Length of the prefix made of pairs, dropping an odd trailing child.
    fn paired_len(&self) -> usize {
        self.children.len() - self.children.len() % 2
    }
}

// ============================================================================
// Typed accessors
// ============================================================================

impl Node {
    /// Left operand of a BINARYOP.
    pub fn left(&self) -> Option<&Node> {
        self.nth_when(NodeKind::BinaryOp, 0)
    }

    /// Right operand of a BINARYOP.
    pub fn right(&self) -> Option<&Node> {
        self.nth_when(NodeKind::BinaryOp, 1)
    }

    pub fn operand(&self) -> Option<&Node> {
        self.nth_when(NodeKind::UnaryOp, 0)
    }

    /// Base of an INDEXOP or DOTOP.
    pub fn base(&self) -> Option<&Node> {
        self.when(&[NodeKind::IndexOp, NodeKind::DotOp])
            .and_then(|c| c.first())
    }

    pub fn index(&self) -> Option<&Node> {
        self.nth_when(NodeKind::IndexOp, 1)
    }

    pub fn member(&self) -> Option<&Node> {
        self.nth_when(NodeKind::DotOp, 1)
    }

    /// Wrapped expression of an EXPRESSION or LEFTEXPR.
    pub fn inner(&self) -> Option<&Node> {
        self.when(&[NodeKind::Expression, NodeKind::LeftExpr])
            .and_then(|c| c.first())
    }

    /// Loop condition of a FORSTATEMENT or WHILESTATEMENT.
    pub fn condition(&self) -> Option<&Node> {
        match self.kind {
            NodeKind::ForStatement => self.children.get(1),
            NodeKind::WhileStatement => self.children.first(),
            _ => None,
        }
    }

    /// Body block of a FUNCDECL, FORSTATEMENT or WHILESTATEMENT.
    pub fn body(&self) -> Option<&Node> {
        match self.kind {
            NodeKind::FuncDecl
            | NodeKind::ForStatement
            | NodeKind::WhileStatement => self.children.last(),
            _ => None,
        }
    }

    /// Name identifier of a FUNCDECL.
    pub fn name(&self) -> Option<&Node> {
        self.nth_when(NodeKind::FuncDecl, 0)
    }

    pub fn params(&self) -> Option<&Node> {
        self.nth_when(NodeKind::FuncDecl, 1)
    }

    pub fn returns(&self) -> Option<&Node> {
        self.nth_when(NodeKind::FuncDecl, 2)
    }

    /// Declaration of a FORSTATEMENT.
    pub fn init(&self) -> Option<&Node> {
        self.nth_when(NodeKind::ForStatement, 0)
    }

    /// `(IDENT, VARTYPE)` pairs of a VARDECL or PARAMLIST.
    pub fn pairs(&self) -> Option<std::slice::ChunksExact<'_, Node>> {
        self.when(&[NodeKind::VarDecl, NodeKind::ParamList])
            .map(|c| c[..self.paired_len()].chunks_exact(2))
    }

    /// Initializer of a VARDECL, if present.
    pub fn initializer(&self) -> Option<&Node> {
        self.when(&[NodeKind::VarDecl])
            .filter(|c| c.len() % 2 == 1)
            .and_then(|c| c.last())
    }

    /// Type arguments of a VARTYPE.
    pub fn type_args(&self) -> Option<&[Node]> {
        self.when(&[NodeKind::VarType])
    }

    /// Type of a NEW.
    pub fn new_type(&self) -> Option<&Node> {
        self.nth_when(NodeKind::New, 0)
    }

    /// Entries of a RETURNLIST.
    pub fn return_types(&self) -> Option<&[Node]> {
        self.when(&[NodeKind::ReturnList])
    }

    /// Targets of a VARASSIGN.
    pub fn targets(&self) -> Option<&[Node]> {
        self.when(&[NodeKind::VarAssign])
            .map(|c| &c[..c.len() - 1])
    }

    /// Assigned expression of a VARASSIGN.
    pub fn value(&self) -> Option<&Node> {
        self.when(&[NodeKind::VarAssign]).and_then(|c| c.last())
    }

    /// `(condition, block)` branches of an IFSTATEMENT.
    pub fn branches(&self) -> Option<std::slice::ChunksExact<'_, Node>> {
        self.when(&[NodeKind::IfStatement])
            .map(|c| c[..self.paired_len()].chunks_exact(2))
    }

    /// Trailing `else` block of an IFSTATEMENT.
    pub fn else_block(&self) -> Option<&Node> {
        self.when(&[NodeKind::IfStatement])
            .filter(|c| c.len() % 2 == 1)
            .and_then(|c| c.last())
    }

    /// Values carried by a `return`.
    pub fn return_values(&self) -> Option<&[Node]> {
        self.when(&[NodeKind::JumpStatement])
    }

    pub fn indices(&self) -> Option<&[Node]> {
        self.when(&[NodeKind::VarRef])
    }

    pub fn args(&self) -> Option<&[Node]> {
        self.when(&[NodeKind::FuncCall])
    }

    pub fn elements(&self) -> Option<&[Node]> {
        self.when(&[NodeKind::List])
    }

    pub fn members(&self) -> Option<&[Node]> {
        self.when(&[NodeKind::Class])
    }

    pub fn statements(&self) -> Option<&[Node]> {
        self.when(&[NodeKind::Block])
    }

    pub fn declarations(&self) -> Option<&[Node]> {
        self.when(&[NodeKind::Program])
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// Pre-order iterator over a tree, yielding each node with its depth.
///
/// Uses an explicit stack, so tree depth is bounded by memory rather than
/// by the thread's call stack.
pub struct Preorder<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

impl Node {
    /// Visit this node and its descendants, parents first, left to right.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            stack: vec![(0, self)],
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Depth of the deepest node below this one; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.preorder().map(|(depth, _)| depth).max().unwrap_or(0)
    }
}

// ============================================================================
// Deserialization
// ============================================================================

/// Unchecked wire form of a node; converting it runs the shape check.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawNode {
    kind: String,
    token: Token,
    #[serde(default)]
    children: Vec<Node>,
    #[serde(default)]
    scope: Option<SymbolTable>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawNode> for Node {
    type Error = AstError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let kind = raw.kind.parse::<NodeKind>()?;
        Node::new(kind, raw.token, raw.children, raw.scope)
    }
}
