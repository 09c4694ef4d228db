//! Tree-sitter helpers shared by the language parsers.

use agentscan_core::errors::ParseError;
use tree_sitter::{Node, Parser, Tree};

use crate::scanner::language_detect::Language;

/// Parse `source` with a fresh parser for `language`.
pub(crate) fn parse_tree(language: Language, source: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.ts_language())
        .map_err(|e| ParseError::GrammarLoad {
            language: language.name().to_string(),
            message: e.to_string(),
        })?;
    parser.parse(source, None).ok_or_else(|| ParseError::NoTree {
        language: language.name().to_string(),
    })
}

/// A root that is itself an error node means nothing was recognized.
///
/// Checked after import syntax so a broken import is reported as such.
pub(crate) fn ensure_valid_root(root: Node<'_>, language: Language) -> Result<(), ParseError> {
    if root.is_error() {
        return Err(ParseError::InvalidSource {
            language: language.name().to_string(),
        });
    }
    Ok(())
}

pub(crate) fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

/// 1-indexed line of the node start.
pub(crate) fn line(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

/// 1-indexed column of the node start.
pub(crate) fn column(node: Node<'_>) -> u32 {
    node.start_position().column as u32 + 1
}

/// Visit every node in preorder without recursion.
pub(crate) fn walk_preorder<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Reject import statements the grammar could not tokenize.
///
/// An import node containing an error, or an error region that swallowed an
/// `import` keyword, makes the file's import table unreliable.
pub(crate) fn check_import_syntax(
    node: Node<'_>,
    source: &str,
    import_kinds: &[&str],
) -> Result<(), ParseError> {
    let malformed = if import_kinds.contains(&node.kind()) {
        node.has_error()
    } else if node.is_error() {
        let mut cursor = node.walk();
        let has_import_keyword = node
            .children(&mut cursor)
            .any(|child| child.kind() == "import");
        has_import_keyword
    } else {
        false
    };

    if malformed {
        return Err(ParseError::MalformedImport {
            line: line(node),
            column: column(node),
            text: text(node, source).lines().next().unwrap_or_default().trim().to_string(),
        });
    }
    Ok(())
}

/// Value of a string literal without interpolation, or `None`.
///
/// Handles Python `string` (string_start / string_content / string_end) and
/// JS/TS `string` (string_fragment / escape_sequence) plus plain template
/// strings.
pub(crate) fn string_literal(node: Node<'_>, source: &str) -> Option<String> {
    match node.kind() {
        "string" | "template_string" => {
            let mut value = String::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "string_content" | "string_fragment" | "escape_sequence" => {
                        value.push_str(text(child, source))
                    }
                    "string_start" | "string_end" => {}
                    _ => return None,
                }
            }
            Some(value)
        }
        _ => None,
    }
}

/// First named argument of a call's argument list.
pub(crate) fn first_argument<'t>(call: Node<'t>) -> Option<Node<'t>> {
    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let first = args
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    first
}
