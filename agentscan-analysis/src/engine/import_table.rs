//! Order-sensitive alias table.
//!
//! The matcher feeds bindings and scope events in source order; each lookup
//! sees exactly the bindings in effect at that point (last write wins).

use agentscan_core::FxHashMap;
use smallvec::{smallvec, SmallVec};

use super::types::ResolvedTarget;
use crate::parsers::types::{ImportBinding, ImportedSymbol};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Bound {
        module_path: String,
        symbol: ImportedSymbol,
    },
    /// Dynamic import with a non-literal module.
    Unresolved,
    /// Rebound to a local, non-import value.
    Local,
}

/// Local name → what it currently refers to.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    aliases: FxHashMap<String, Entry>,
    /// Module paths of `from m import *`, oldest first.
    wildcards: Vec<String>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, binding: &ImportBinding) {
        if binding.imported_symbol == ImportedSymbol::Wildcard {
            if !binding.is_unresolved() {
                self.wildcards.retain(|m| m != &binding.module_path);
                self.wildcards.push(binding.module_path.clone());
            }
            return;
        }
        let entry = if binding.is_unresolved() {
            Entry::Unresolved
        } else {
            if let Some(package) = implicit_package(binding) {
                // `import a.b` also binds `a`.
                self.aliases.insert(
                    package.to_string(),
                    Entry::Bound {
                        module_path: package.to_string(),
                        symbol: ImportedSymbol::Module,
                    },
                );
            }
            Entry::Bound {
                module_path: binding.module_path.clone(),
                symbol: binding.imported_symbol.clone(),
            }
        };
        self.aliases.insert(binding.local_alias.clone(), entry);
    }

    /// `name` no longer refers to an import.
    pub fn shadow(&mut self, name: &str) {
        self.forget_members(name);
        self.aliases.insert(name.to_string(), Entry::Local);
    }

    /// `name = target`: `name` refers to whatever `target` resolves to now,
    /// or is shadowed if `target` does not resolve.
    pub fn alias(&mut self, name: &str, target: &[String]) {
        let entry = match self.resolve(target).into_iter().next() {
            Some(ResolvedTarget::Module(module_path)) => Entry::Bound {
                module_path,
                symbol: ImportedSymbol::Module,
            },
            Some(ResolvedTarget::Symbol {
                module_path,
                symbol,
            }) => Entry::Bound {
                module_path,
                symbol: ImportedSymbol::Named(symbol),
            },
            None => Entry::Local,
        };
        self.forget_members(name);
        self.aliases.insert(name.to_string(), entry);
    }

    /// Drop dotted aliases rooted at `name` (`a.b` after `a` is rebound).
    fn forget_members(&mut self, name: &str) {
        let prefix = format!("{name}.");
        self.aliases.retain(|key, _| !key.starts_with(&prefix));
    }

    /// Resolve a callee chain, longest alias prefix first.
    ///
    /// Falls back to wildcard imports (latest first) when no prefix is bound.
    /// Shadowed and unresolved aliases resolve to nothing.
    pub fn resolve(&self, chain: &[String]) -> SmallVec<[ResolvedTarget; 1]> {
        if chain.is_empty() {
            return SmallVec::new();
        }
        for split in (1..=chain.len()).rev() {
            let key = chain[..split].join(".");
            let Some(entry) = self.aliases.get(&key) else {
                continue;
            };
            return match entry {
                Entry::Bound {
                    module_path,
                    symbol,
                } => smallvec![resolve_rest(module_path, symbol, &chain[split..])],
                Entry::Unresolved | Entry::Local => SmallVec::new(),
            };
        }
        self.wildcards
            .iter()
            .rev()
            .map(|module_path| resolve_rest(module_path, &ImportedSymbol::Module, chain))
            .collect()
    }
}

/// Top-level package of an unaliased dotted module import.
fn implicit_package(binding: &ImportBinding) -> Option<&str> {
    if binding.imported_symbol != ImportedSymbol::Module
        || binding.local_alias != binding.module_path
    {
        return None;
    }
    let (package, _) = binding.local_alias.split_once('.')?;
    let is_identifier = |segment: &str| {
        !segment.is_empty() && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
    };
    binding
        .local_alias
        .split('.')
        .all(is_identifier)
        .then_some(package)
}

/// Attribute access past the alias: middle segments extend the module path,
/// the last one is the symbol.
fn resolve_rest(module_path: &str, symbol: &ImportedSymbol, rest: &[String]) -> ResolvedTarget {
    let mut path = module_path.to_string();
    if let ImportedSymbol::Named(name) = symbol {
        let Some((last, middle)) = rest.split_last() else {
            return ResolvedTarget::Symbol {
                module_path: path,
                symbol: name.clone(),
            };
        };
        path.push('.');
        path.push_str(name);
        return with_middle(path, middle, last);
    }
    match rest.split_last() {
        Some((last, middle)) => with_middle(path, middle, last),
        None => ResolvedTarget::Module(path),
    }
}

fn with_middle(mut path: String, middle: &[String], last: &str) -> ResolvedTarget {
    for segment in middle {
        path.push('.');
        path.push_str(segment);
    }
    ResolvedTarget::Symbol {
        module_path: path,
        symbol: last.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn binding(module: &str, symbol: ImportedSymbol, alias: &str) -> ImportBinding {
        ImportBinding {
            module_path: module.to_string(),
            imported_symbol: symbol,
            local_alias: alias.to_string(),
            line: 1,
            offset: 0,
        }
    }

    fn symbol(module: &str, name: &str) -> ResolvedTarget {
        ResolvedTarget::Symbol {
            module_path: module.to_string(),
            symbol: name.to_string(),
        }
    }

    #[test]
    fn named_import_resolves_directly() {
        let mut table = ImportTable::new();
        table.bind(&binding("crewai", ImportedSymbol::Named("Agent".into()), "CrewAgent"));
        assert_eq!(
            table.resolve(&chain(&["CrewAgent"])).to_vec(),
            vec![symbol("crewai", "Agent")]
        );
    }

    #[test]
    fn module_import_extends_path_with_attributes() {
        let mut table = ImportTable::new();
        table.bind(&binding("langchain", ImportedSymbol::Module, "langchain"));
        assert_eq!(
            table
                .resolve(&chain(&["langchain", "agents", "AgentExecutor"]))
                .to_vec(),
            vec![symbol("langchain.agents", "AgentExecutor")]
        );
        assert_eq!(
            table.resolve(&chain(&["langchain"])).to_vec(),
            vec![ResolvedTarget::Module("langchain".into())]
        );
    }

    #[test]
    fn dotted_alias_wins_over_shorter_prefix() {
        let mut table = ImportTable::new();
        table.bind(&binding("a", ImportedSymbol::Module, "a"));
        table.bind(&binding("x.y", ImportedSymbol::Module, "a.b"));
        assert_eq!(
            table.resolve(&chain(&["a", "b", "C"])).to_vec(),
            vec![symbol("x.y", "C")]
        );
    }

    #[test]
    fn shadowed_alias_blocks_wildcard_fallback() {
        let mut table = ImportTable::new();
        table.bind(&binding("crewai", ImportedSymbol::Wildcard, "*"));
        assert_eq!(
            table.resolve(&chain(&["Agent"])).to_vec(),
            vec![symbol("crewai", "Agent")]
        );
        table.shadow("Agent");
        assert!(table.resolve(&chain(&["Agent"])).is_empty());
    }

    #[test]
    fn alias_assignment_follows_target() {
        let mut table = ImportTable::new();
        table.bind(&binding("crewai", ImportedSymbol::Named("Agent".into()), "Agent"));
        table.alias("MyAgent", &chain(&["Agent"]));
        assert_eq!(
            table.resolve(&chain(&["MyAgent"])).to_vec(),
            vec![symbol("crewai", "Agent")]
        );
        table.alias("Other", &chain(&["unknown"]));
        assert!(table.resolve(&chain(&["Other"])).is_empty());
    }

    #[test]
    fn dotted_import_binds_top_level_package() {
        let mut table = ImportTable::new();
        table.bind(&binding("langchain.agents", ImportedSymbol::Module, "langchain.agents"));
        assert_eq!(
            table.resolve(&chain(&["langchain", "agents", "AgentExecutor"])).to_vec(),
            vec![symbol("langchain.agents", "AgentExecutor")]
        );
        assert_eq!(
            table.resolve(&chain(&["langchain", "LLMChain"])).to_vec(),
            vec![symbol("langchain", "LLMChain")]
        );
    }

    #[test]
    fn path_like_module_alias_binds_no_package() {
        let mut table = ImportTable::new();
        table.bind(&binding("./setup.js", ImportedSymbol::Module, "./setup.js"));
        table.bind(&binding("x.y", ImportedSymbol::Module, "a.b"));
        assert!(table.resolve(&chain(&["a", "C"])).is_empty());
        assert!(table.resolve(&chain(&["", "C"])).is_empty());
    }

    #[test]
    fn rebinding_root_hides_dotted_aliases() {
        let mut table = ImportTable::new();
        table.bind(&binding("crewai.tools", ImportedSymbol::Module, "crewai.tools"));
        table.shadow("crewai");
        assert!(table
            .resolve(&chain(&["crewai", "tools", "SerperDevTool"]))
            .is_empty());

        table.bind(&binding("crewai.tools", ImportedSymbol::Module, "crewai.tools"));
        table.bind(&binding("autogen", ImportedSymbol::Module, "autogen"));
        table.alias("crewai", &chain(&["autogen"]));
        assert_eq!(
            table.resolve(&chain(&["crewai", "tools", "X"])).to_vec(),
            vec![symbol("autogen.tools", "X")]
        );
    }

    #[test]
    fn unresolved_binding_never_resolves() {
        let mut table = ImportTable::new();
        table.bind(&ImportBinding::unresolved("mod", 1, 0));
        assert!(table.resolve(&chain(&["mod", "Agent"])).is_empty());
    }
}
