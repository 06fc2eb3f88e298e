//! Kinds command - list the node kind taxonomy.

use knox_ast::NodeKind;

pub fn run() -> miette::Result<()> {
    print!("{}", format_kinds());
    Ok(())
}

/// One line per kind: tag, arity, scope marker, child contract.
pub(crate) fn format_kinds() -> String {
    let mut out = String::new();
    for kind in NodeKind::ALL {
        let scope = if kind.is_scope_defining() { "scope" } else { "" };
        let line = format!(
            "{:<15} {:<24} {:<5} {}",
            kind.as_str(),
            kind.arity().to_string(),
            scope,
            kind.contract()
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_listed_once() {
        let listing = format_kinds();
        assert_eq!(listing.lines().count(), NodeKind::ALL.len());
        for kind in NodeKind::ALL {
            let hits = listing
                .lines()
                .filter(|line| line.split_whitespace().next() == Some(kind.as_str()))
                .count();
            assert_eq!(hits, 1, "{kind}");
        }
    }

    #[test]
    fn test_funcdecl_line() {
        let listing = format_kinds();
        let line = listing
            .lines()
            .find(|line| line.starts_with("FUNCDECL "))
            .unwrap();
        insta::assert_snapshot!(line, @"FUNCDECL        exactly 4 children             IDENT, PARAMLIST, RETURNLIST, BLOCK");
    }

    #[test]
    fn test_scope_kinds_marked() {
        let marked: Vec<_> = format_kinds()
            .lines()
            .filter(|line| line.split_whitespace().any(|word| word == "scope"))
            .map(|line| line.split_whitespace().next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(marked, vec!["PROGRAM", "BLOCK"]);
    }
}
