//! Human-readable tree dumps for debugging.
//!
//! One line per node in pre-order: a depth marker repeated once per level,
//! the node kind and the token literal. Nodes that own a symbol table are
//! followed by a `Symbols (N): ...` line listing the bound names in the
//! order they were inserted.
//!
//! ```text
//!  PROGRAM
//! Symbols (1): main
//! > FUNCDECL func
//! >> IDENT main
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::node::Node;

/// Dump settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Repeated once per nesting level at the start of each line.
    pub marker: char,
    /// Emit the `Symbols` line after scope-opening nodes.
    pub show_scopes: bool,
    /// Append ` @line:column` for nodes read from source.
    pub show_positions: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            marker: '>',
            show_scopes: true,
            show_positions: false,
        }
    }
}

/// A tree paired with dump settings; its `Display` output is the dump.
pub struct TreeDisplay<'a> {
    root: &'a Node,
    options: &'a PrintOptions,
}

impl<'a> TreeDisplay<'a> {
    pub fn new(root: &'a Node, options: &'a PrintOptions) -> Self {
        Self { root, options }
    }
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, node) in self.root.preorder() {
            for _ in 0..depth {
                write!(f, "{}", self.options.marker)?;
            }
            write!(f, " {}", node.kind())?;

            let literal = node.literal();
            if !literal.is_empty() {
                f.write_str(" ")?;
                write_literal(f, literal)?;
            }

            let position = node.position();
            if self.options.show_positions && !position.is_synthetic() {
                write!(f, " @{position}")?;
            }
            writeln!(f)?;

            if !self.options.show_scopes {
                continue;
            }
            if let Ok(scope) = node.scope() {
                write!(f, "Symbols ({}):", scope.len())?;
                for name in scope.names() {
                    write!(f, " {name}")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Control characters are escaped so every node stays on one line; quotes
/// and other printable text are written as is.
fn write_literal(f: &mut fmt::Formatter<'_>, literal: &str) -> fmt::Result {
    for c in literal.chars() {
        if c.is_control() {
            write!(f, "{}", c.escape_default())?;
        } else {
            write!(f, "{c}")?;
        }
    }
    Ok(())
}

/// Write the dump of `root` to `out`.
///
/// Errors from the sink are returned unchanged.
pub fn write_tree<W: Write>(
    out: &mut W,
    root: &Node,
    options: &PrintOptions,
) -> io::Result<()> {
    tracing::trace!(nodes = root.node_count(), "writing tree dump");
    write!(out, "{}", TreeDisplay::new(root, options))
}

/// Render the dump of `root` into a string.
pub fn render_tree(root: &Node, options: &PrintOptions) -> String {
    TreeDisplay::new(root, options).to_string()
}

/// Dump `root` to stdout with default options, followed by a blank line.
pub fn print_tree(root: &Node) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_tree(&mut out, root, &PrintOptions::default())?;
    writeln!(out)
}

impl Node {
    /// Dump this subtree with default options.
    pub fn dump(&self) -> String {
        render_tree(self, &PrintOptions::default())
    }
}
