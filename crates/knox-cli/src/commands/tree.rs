//! Tree command - load a JSON syntax tree and print it.

use knox_ast::{write_tree, Node, PrintOptions};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn run(file: &Path, options: &PrintOptions) -> miette::Result<()> {
    let json = fs::read_to_string(file)
        .map_err(|e| miette::miette!("Failed to read {}: {}", file.display(), e))?;

    let root = load_tree(&json)
        .map_err(|e| miette::miette!("{}: {}", file.display(), e))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_tree(&mut out, &root, options)
        .and_then(|()| writeln!(out))
        .map_err(|e| miette::miette!("Failed to write tree: {}", e))?;

    println!("{} nodes, depth {}", root.node_count(), root.depth());
    Ok(())
}

/// Parse a JSON tree; every node goes through the same shape checks as the
/// constructors.
///
/// Nesting is not capped: the stack grows on the heap as the reader descends.
pub(crate) fn load_tree(json: &str) -> Result<Node, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let root = Node::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    tracing::debug!(kind = %root.kind(), nodes = root.node_count(), "loaded tree");
    Ok(root)
}
