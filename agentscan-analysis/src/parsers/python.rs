//! Python import extraction and structural view.

use agentscan_core::errors::ParseError;
use smallvec::smallvec;
use tree_sitter::Node;

use super::syntax::{
    check_import_syntax, column, ensure_valid_root, first_argument, line, parse_tree,
    string_literal, text, walk_preorder,
};
use super::traits::LanguageParser;
use super::types::{
    CallSite, Chain, ImportBinding, ImportedSymbol, ScopeEvent, SiteKind, SourceFacts,
};
use crate::scanner::language_detect::Language;

const IMPORT_KINDS: &[&str] = &[
    "import_statement",
    "import_from_statement",
    "future_import_statement",
];

/// Python parser.
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for PythonParser {
    fn language(&self) -> Language {
        Language::Python
    }

    fn extract(&self, source: &str) -> Result<SourceFacts, ParseError> {
        let tree = parse_tree(Language::Python, source)?;
        let root = tree.root_node();
        let mut facts = SourceFacts::new(Language::Python);
        let mut failure: Option<ParseError> = None;

        walk_preorder(root, |node| {
            if failure.is_some() {
                return;
            }
            if let Err(e) = check_import_syntax(node, source, IMPORT_KINDS) {
                failure = Some(e);
                return;
            }
            match node.kind() {
                "import_statement" => extract_import(node, source, &mut facts.imports),
                "import_from_statement" => extract_from_import(node, source, &mut facts.imports),
                "assignment" => {
                    if let Some(binding) = extract_dynamic_import(node, source) {
                        facts.imports.push(binding);
                    }
                }
                "call" => {
                    if let Some(site) = call_site(node, source) {
                        facts.call_sites.push(site);
                    }
                }
                "decorator" => {
                    if let Some(site) = bare_decorator_site(node, source) {
                        facts.call_sites.push(site);
                    }
                }
                _ => {}
            }
        });

        if let Some(e) = failure {
            return Err(e);
        }
        ensure_valid_root(root, Language::Python)?;

        collect_scope_events(root, source, &mut facts.scope_events);
        facts.sort();
        Ok(facts)
    }
}

/// `import a.b` / `import a.b as x`
fn extract_import(node: Node<'_>, source: &str, out: &mut Vec<ImportBinding>) {
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        let (module_path, local_alias) = match name.kind() {
            "dotted_name" => {
                let path = text(name, source).to_string();
                (path.clone(), path)
            }
            "aliased_import" => {
                let Some(path) = name.child_by_field_name("name") else {
                    continue;
                };
                let Some(alias) = name.child_by_field_name("alias") else {
                    continue;
                };
                (text(path, source).to_string(), text(alias, source).to_string())
            }
            _ => continue,
        };
        out.push(ImportBinding {
            module_path,
            imported_symbol: ImportedSymbol::Module,
            local_alias,
            line: line(node),
            offset: node.start_byte(),
        });
    }
}

/// `from m import s1, s2 as y` / `from m import *` / `from .pkg import s`
fn extract_from_import(node: Node<'_>, source: &str, out: &mut Vec<ImportBinding>) {
    let Some(module) = node.child_by_field_name("module_name") else {
        return;
    };
    let module_path: String = text(module, source)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let mut cursor = node.walk();
    let wildcard = node
        .children(&mut cursor)
        .any(|child| child.kind() == "wildcard_import");
    if wildcard {
        out.push(ImportBinding {
            module_path,
            imported_symbol: ImportedSymbol::Wildcard,
            local_alias: "*".to_string(),
            line: line(node),
            offset: node.start_byte(),
        });
        return;
    }

    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        let (symbol, local_alias) = match name.kind() {
            "dotted_name" => {
                let symbol = text(name, source).to_string();
                (symbol.clone(), symbol)
            }
            "aliased_import" => {
                let (Some(symbol), Some(alias)) = (
                    name.child_by_field_name("name"),
                    name.child_by_field_name("alias"),
                ) else {
                    continue;
                };
                (text(symbol, source).to_string(), text(alias, source).to_string())
            }
            _ => continue,
        };
        out.push(ImportBinding {
            module_path: module_path.clone(),
            imported_symbol: ImportedSymbol::Named(symbol),
            local_alias,
            line: line(node),
            offset: node.start_byte(),
        });
    }
}

enum DynamicImport {
    ImportModule,
    DunderImport,
}

fn dynamic_import_kind(call: Node<'_>, source: &str) -> Option<DynamicImport> {
    let function = call.child_by_field_name("function")?;
    let chain = callee_chain(function, source)?;
    match chain.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["importlib", "import_module"] | ["import_module"] => Some(DynamicImport::ImportModule),
        ["__import__"] => Some(DynamicImport::DunderImport),
        _ => None,
    }
}

/// `x = importlib.import_module("m")` / `x = __import__("m")`
fn extract_dynamic_import(node: Node<'_>, source: &str) -> Option<ImportBinding> {
    let left = node.child_by_field_name("left")?;
    let right = node.child_by_field_name("right")?;
    if left.kind() != "identifier" || right.kind() != "call" {
        return None;
    }
    let kind = dynamic_import_kind(right, source)?;
    let local_alias = text(left, source).to_string();

    let literal = first_argument(right).and_then(|arg| string_literal(arg, source));
    let Some(module_path) = literal.filter(|m| !m.is_empty()) else {
        return Some(ImportBinding::unresolved(
            local_alias,
            line(node),
            node.start_byte(),
        ));
    };

    // `__import__("a.b")` evaluates to the top-level package.
    let module_path = match kind {
        DynamicImport::ImportModule => module_path,
        DynamicImport::DunderImport => module_path
            .split('.')
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    Some(ImportBinding {
        module_path,
        imported_symbol: ImportedSymbol::Module,
        local_alias,
        line: line(node),
        offset: node.start_byte(),
    })
}

/// Identifier / attribute chain; anything else is not a resolvable callee.
fn callee_chain(node: Node<'_>, source: &str) -> Option<Chain> {
    match node.kind() {
        "identifier" => Some(smallvec![text(node, source).to_string()]),
        "attribute" => {
            let mut chain = callee_chain(node.child_by_field_name("object")?, source)?;
            chain.push(text(node.child_by_field_name("attribute")?, source).to_string());
            Some(chain)
        }
        _ => None,
    }
}

fn call_site(node: Node<'_>, source: &str) -> Option<CallSite> {
    let function = node.child_by_field_name("function")?;
    let callee = callee_chain(function, source)?;
    let kind = match node.parent() {
        Some(parent) if parent.kind() == "decorator" => SiteKind::Decorator,
        _ => SiteKind::Call,
    };
    Some(CallSite {
        callee,
        kind,
        offset: node.start_byte(),
        line: line(node),
        column: column(node),
    })
}

/// `@tool` without arguments. `@tool(...)` is reported through its call node.
fn bare_decorator_site(node: Node<'_>, source: &str) -> Option<CallSite> {
    let expr = node.named_child(0)?;
    if expr.kind() == "call" {
        return None;
    }
    let callee = callee_chain(expr, source)?;
    Some(CallSite {
        callee,
        kind: SiteKind::Decorator,
        offset: expr.start_byte(),
        line: line(expr),
        column: column(expr),
    })
}

/// Module-level definitions and assignments, applied after their statement.
fn collect_scope_events(root: Node<'_>, source: &str, out: &mut Vec<ScopeEvent>) {
    let mut cursor = root.walk();
    for stmt in root.named_children(&mut cursor) {
        match stmt.kind() {
            "class_definition" | "function_definition" => shadow_definition(stmt, source, out),
            "decorated_definition" => {
                if let Some(def) = stmt.child_by_field_name("definition") {
                    shadow_definition(def, source, out);
                }
            }
            "expression_statement" => {
                let Some(expr) = stmt.named_child(0) else {
                    continue;
                };
                if expr.kind() == "assignment" || expr.kind() == "augmented_assignment" {
                    assignment_event(expr, source, out);
                }
            }
            _ => {}
        }
    }
}

fn shadow_definition(def: Node<'_>, source: &str, out: &mut Vec<ScopeEvent>) {
    if let Some(name) = def.child_by_field_name("name") {
        out.push(ScopeEvent::Shadow {
            name: text(name, source).to_string(),
            offset: def.end_byte(),
        });
    }
}

fn assignment_event(node: Node<'_>, source: &str, out: &mut Vec<ScopeEvent>) {
    let Some(left) = node.child_by_field_name("left") else {
        return;
    };
    let right = node.child_by_field_name("right");

    if left.kind() != "identifier" {
        shadow_targets(left, node.end_byte(), source, out);
        return;
    }

    let name = text(left, source).to_string();
    if node.kind() == "assignment" {
        if let Some(right) = right {
            if right.kind() == "call" && dynamic_import_kind(right, source).is_some() {
                return;
            }
            if let Some(target) = callee_chain(right, source) {
                out.push(ScopeEvent::Alias {
                    name,
                    target,
                    line: line(node),
                    offset: node.end_byte(),
                });
                return;
            }
        }
    }
    out.push(ScopeEvent::Shadow {
        name,
        offset: node.end_byte(),
    });
}

/// Names rebound by an assignment target. Attribute and subscript targets
/// mutate an existing object and bind nothing.
fn shadow_targets(target: Node<'_>, offset: usize, source: &str, out: &mut Vec<ScopeEvent>) {
    match target.kind() {
        "identifier" => out.push(ScopeEvent::Shadow {
            name: text(target, source).to_string(),
            offset,
        }),
        "pattern_list" | "tuple_pattern" | "list_pattern" | "list_splat_pattern"
        | "parenthesized_expression" | "tuple" | "list" => {
            let mut cursor = target.walk();
            for child in target.named_children(&mut cursor) {
                shadow_targets(child, offset, source, out);
            }
        }
        _ => {}
    }
}
