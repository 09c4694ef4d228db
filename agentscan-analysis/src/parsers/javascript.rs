//! JavaScript / TypeScript / TSX import extraction and structural view.
//!
//! The three grammars share node kinds for everything this module reads, so
//! one parser serves all of them.

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

const IMPORT_KINDS: &[&str] = &["import_statement"];

/// Parser for the ECMAScript family.
#[derive(Debug, Clone, Copy)]
pub struct JavaScriptParser {
    language: Language,
}

impl JavaScriptParser {
    pub fn javascript() -> Self {
        Self {
            language: Language::JavaScript,
        }
    }

    pub fn typescript() -> Self {
        Self {
            language: Language::TypeScript,
        }
    }

    pub fn tsx() -> Self {
        Self {
            language: Language::Tsx,
        }
    }
}

impl LanguageParser for JavaScriptParser {
    fn language(&self) -> Language {
        self.language
    }

    fn extract(&self, source: &str) -> Result<SourceFacts, ParseError> {
        let tree = parse_tree(self.language, source)?;
        let root = tree.root_node();
        let mut facts = SourceFacts::new(self.language);
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
                "variable_declarator" => extract_require(node, source, &mut facts.imports),
                "call_expression" => {
                    if let Some(site) = call_site(node, source) {
                        facts.call_sites.push(site);
                    }
                }
                "new_expression" => {
                    if let Some(site) = new_site(node, source) {
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
        ensure_valid_root(root, self.language)?;

        collect_scope_events(root, source, &mut facts.scope_events);
        facts.sort();
        Ok(facts)
    }
}

fn binding(
    module_path: &str,
    imported_symbol: ImportedSymbol,
    local_alias: &str,
    stmt: Node<'_>,
) -> ImportBinding {
    ImportBinding {
        module_path: module_path.to_string(),
        imported_symbol,
        local_alias: local_alias.to_string(),
        line: line(stmt),
        offset: stmt.start_byte(),
    }
}

/// Static `import` statements, including TS `import x = require("m")`.
fn extract_import(node: Node<'_>, source: &str, out: &mut Vec<ImportBinding>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();

    if let Some(require) = children
        .iter()
        .find(|c| c.kind() == "import_require_clause")
    {
        let mut cursor = require.walk();
        let parts: Vec<Node<'_>> = require.named_children(&mut cursor).collect();
        let module = require
            .child_by_field_name("source")
            .or_else(|| parts.iter().copied().find(|c| c.kind() == "string"))
            .and_then(|s| string_literal(s, source));
        let alias = parts.iter().copied().find(|c| c.kind() == "identifier");
        if let (Some(module), Some(alias)) = (module, alias) {
            out.push(binding(&module, ImportedSymbol::Module, text(alias, source), node));
        }
        return;
    }

    let Some(module_path) = node
        .child_by_field_name("source")
        .and_then(|s| string_literal(s, source))
    else {
        return;
    };

    let Some(clause) = children.iter().find(|c| c.kind() == "import_clause") else {
        // Side-effect import: `import "m"`.
        out.push(binding(&module_path, ImportedSymbol::Module, &module_path, node));
        return;
    };

    let mut cursor = clause.walk();
    for part in clause.named_children(&mut cursor) {
        match part.kind() {
            // Default import: the local identifier names the export.
            "identifier" => {
                let local = text(part, source);
                out.push(binding(
                    &module_path,
                    ImportedSymbol::Named(local.to_string()),
                    local,
                    node,
                ));
            }
            "namespace_import" => {
                let mut inner = part.walk();
                let alias = part
                    .named_children(&mut inner)
                    .find(|c| c.kind() == "identifier");
                if let Some(alias) = alias {
                    out.push(binding(
                        &module_path,
                        ImportedSymbol::Module,
                        text(alias, source),
                        node,
                    ));
                }
            }
            "named_imports" => {
                let mut inner = part.walk();
                for spec in part.named_children(&mut inner) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    let Some(name) = spec.child_by_field_name("name") else {
                        continue;
                    };
                    let symbol = string_literal(name, source)
                        .unwrap_or_else(|| text(name, source).to_string());
                    let local = spec
                        .child_by_field_name("alias")
                        .map(|a| text(a, source).to_string())
                        .unwrap_or_else(|| symbol.clone());
                    out.push(binding(
                        &module_path,
                        ImportedSymbol::Named(symbol),
                        &local,
                        node,
                    ));
                }
            }
            _ => {}
        }
    }
}

/// What a declarator's initializer loads.
enum Loader<'t> {
    /// `require(...)` or `await import(...)`; the argument node.
    Module(Option<Node<'t>>),
    /// `require("m").Member`
    Member(Option<Node<'t>>, Node<'t>),
}

fn is_require(call: Node<'_>, source: &str) -> bool {
    call.kind() == "call_expression"
        && call
            .child_by_field_name("function")
            .is_some_and(|f| f.kind() == "identifier" && text(f, source) == "require")
}

fn is_dynamic_import(call: Node<'_>) -> bool {
    call.kind() == "call_expression"
        && call
            .child_by_field_name("function")
            .is_some_and(|f| f.kind() == "import")
}

fn loader_of<'t>(value: Node<'t>, source: &str) -> Option<Loader<'t>> {
    match value.kind() {
        "call_expression" if is_require(value, source) || is_dynamic_import(value) => {
            Some(Loader::Module(first_argument(value)))
        }
        "await_expression" => {
            let inner = value.named_child(0)?;
            is_dynamic_import(inner).then(|| Loader::Module(first_argument(inner)))
        }
        "member_expression" => {
            let object = value.child_by_field_name("object")?;
            let property = value.child_by_field_name("property")?;
            is_require(object, source).then(|| Loader::Member(first_argument(object), property))
        }
        _ => None,
    }
}

/// `const x = require("m")`, `const { a, b: c } = await import("m")`,
/// `const X = require("m").X`.
fn extract_require(node: Node<'_>, source: &str, out: &mut Vec<ImportBinding>) {
    let (Some(name), Some(value)) = (
        node.child_by_field_name("name"),
        node.child_by_field_name("value"),
    ) else {
        return;
    };
    let Some(loader) = loader_of(value, source) else {
        return;
    };

    let (argument, member) = match loader {
        Loader::Module(arg) => (arg, None),
        Loader::Member(arg, property) => (arg, Some(text(property, source).to_string())),
    };
    let module_path = argument
        .and_then(|arg| string_literal(arg, source))
        .filter(|m| !m.is_empty());

    let locals: Vec<(String, Option<String>)> = match name.kind() {
        "identifier" => vec![(text(name, source).to_string(), member.clone())],
        "object_pattern" => destructured_names(name, source),
        _ => return,
    };

    for (local, symbol) in locals {
        let Some(ref module_path) = module_path else {
            out.push(ImportBinding::unresolved(
                local,
                line(node),
                node.start_byte(),
            ));
            continue;
        };
        let imported_symbol = match (&member, symbol) {
            (None, None) => ImportedSymbol::Module,
            (_, Some(symbol)) => ImportedSymbol::Named(symbol),
            (Some(member), None) => ImportedSymbol::Named(member.clone()),
        };
        out.push(binding(module_path, imported_symbol, &local, node));
    }
}

/// `{ a, b: c }` → `[("a", Some("a")), ("c", Some("b"))]`
fn destructured_names(pattern: Node<'_>, source: &str) -> Vec<(String, Option<String>)> {
    let mut names = Vec::new();
    let mut cursor = pattern.walk();
    for prop in pattern.named_children(&mut cursor) {
        match prop.kind() {
            "shorthand_property_identifier_pattern" => {
                let name = text(prop, source).to_string();
                names.push((name.clone(), Some(name)));
            }
            "pair_pattern" => {
                let (Some(key), Some(value)) = (
                    prop.child_by_field_name("key"),
                    prop.child_by_field_name("value"),
                ) else {
                    continue;
                };
                if value.kind() == "identifier" {
                    names.push((
                        text(value, source).to_string(),
                        Some(text(key, source).to_string()),
                    ));
                }
            }
            "object_assignment_pattern" => {
                if let Some(left) = prop.child_by_field_name("left") {
                    let name = text(left, source).to_string();
                    names.push((name.clone(), Some(name)));
                }
            }
            _ => {}
        }
    }
    names
}

fn callee_chain(node: Node<'_>, source: &str) -> Option<Chain> {
    match node.kind() {
        "identifier" => Some(smallvec![text(node, source).to_string()]),
        "member_expression" => {
            let mut chain = callee_chain(node.child_by_field_name("object")?, source)?;
            let property = node.child_by_field_name("property")?;
            if property.kind() != "property_identifier" {
                return None;
            }
            chain.push(text(property, source).to_string());
            Some(chain)
        }
        _ => None,
    }
}

fn site(callee: Chain, kind: SiteKind, node: Node<'_>) -> CallSite {
    CallSite {
        callee,
        kind,
        offset: node.start_byte(),
        line: line(node),
        column: column(node),
    }
}

fn call_site(node: Node<'_>, source: &str) -> Option<CallSite> {
    let callee = callee_chain(node.child_by_field_name("function")?, source)?;
    let kind = match node.parent() {
        Some(parent) if parent.kind() == "decorator" => SiteKind::Decorator,
        _ => SiteKind::Call,
    };
    Some(site(callee, kind, node))
}

fn new_site(node: Node<'_>, source: &str) -> Option<CallSite> {
    let callee = callee_chain(node.child_by_field_name("constructor")?, source)?;
    Some(site(callee, SiteKind::New, node))
}

fn bare_decorator_site(node: Node<'_>, source: &str) -> Option<CallSite> {
    let expr = node.named_child(0)?;
    if expr.kind() == "call_expression" {
        return None;
    }
    let callee = callee_chain(expr, source)?;
    Some(site(callee, SiteKind::Decorator, expr))
}

/// Top-level declarations and assignments, applied after their statement.
fn collect_scope_events(root: Node<'_>, source: &str, out: &mut Vec<ScopeEvent>) {
    let mut cursor = root.walk();
    for stmt in root.named_children(&mut cursor) {
        let stmt = if stmt.kind() == "export_statement" {
            match stmt.child_by_field_name("declaration") {
                Some(decl) => decl,
                None => continue,
            }
        } else {
            stmt
        };
        match stmt.kind() {
            "class_declaration"
            | "abstract_class_declaration"
            | "function_declaration"
            | "generator_function_declaration" => {
                if let Some(name) = stmt.child_by_field_name("name") {
                    out.push(ScopeEvent::Shadow {
                        name: text(name, source).to_string(),
                        offset: stmt.end_byte(),
                    });
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut inner = stmt.walk();
                for declarator in stmt.named_children(&mut inner) {
                    if declarator.kind() == "variable_declarator" {
                        declarator_event(declarator, stmt.end_byte(), source, out);
                    }
                }
            }
            "expression_statement" => {
                let Some(expr) = stmt.named_child(0) else {
                    continue;
                };
                if expr.kind() == "assignment_expression" {
                    assignment_event(expr, source, out);
                }
            }
            _ => {}
        }
    }
}

fn declarator_event(node: Node<'_>, offset: usize, source: &str, out: &mut Vec<ScopeEvent>) {
    let Some(name) = node.child_by_field_name("name") else {
        return;
    };
    let value = node.child_by_field_name("value");
    if value.is_some_and(|v| loader_of(v, source).is_some()) {
        return;
    }
    if name.kind() != "identifier" {
        shadow_pattern(name, offset, source, out);
        return;
    }
    let target = value.and_then(|v| callee_chain(v, source));
    push_binding_event(name, target, node, offset, source, out);
}

fn assignment_event(node: Node<'_>, source: &str, out: &mut Vec<ScopeEvent>) {
    let Some(left) = node.child_by_field_name("left") else {
        return;
    };
    if left.kind() != "identifier" {
        return;
    }
    let target = node
        .child_by_field_name("right")
        .and_then(|v| callee_chain(v, source));
    push_binding_event(left, target, node, node.end_byte(), source, out);
}

fn push_binding_event(
    name: Node<'_>,
    target: Option<Chain>,
    stmt: Node<'_>,
    offset: usize,
    source: &str,
    out: &mut Vec<ScopeEvent>,
) {
    let name = text(name, source).to_string();
    out.push(match target {
        Some(target) => ScopeEvent::Alias {
            name,
            target,
            line: line(stmt),
            offset,
        },
        None => ScopeEvent::Shadow { name, offset },
    });
}

fn shadow_pattern(pattern: Node<'_>, offset: usize, source: &str, out: &mut Vec<ScopeEvent>) {
    walk_preorder(pattern, |n| {
        if matches!(
            n.kind(),
            "identifier" | "shorthand_property_identifier_pattern"
        ) {
            out.push(ScopeEvent::Shadow {
                name: text(n, source).to_string(),
                offset,
            });
        }
    });
}
