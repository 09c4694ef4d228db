//! Facts extracted from a single source file.

use serde::Serialize;
use smallvec::SmallVec;

use crate::scanner::language_detect::Language;

/// Module path carried by a dynamic import whose target is not a literal.
pub const UNRESOLVED_MODULE: &str = "<dynamic>";

/// Identifier chain of a callee, e.g. `["langchain", "agents", "AgentExecutor"]`.
pub type Chain = SmallVec<[String; 4]>;

/// What an import statement brings into scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "symbol", rename_all = "lowercase")]
pub enum ImportedSymbol {
    /// The module object itself (`import a.b`, `import * as ns from "m"`).
    Module,
    /// One named member of the module.
    Named(String),
    /// Every public member (`from m import *`).
    Wildcard,
}

/// One local name bound by an import-like statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportBinding {
    pub module_path: String,
    pub imported_symbol: ImportedSymbol,
    pub local_alias: String,
    /// 1-indexed line of the import statement.
    pub line: u32,
    /// Byte offset used for order-sensitive resolution.
    pub offset: usize,
}

impl ImportBinding {
    /// Binding for a dynamic import whose module could not be determined.
    pub fn unresolved(local_alias: impl Into<String>, line: u32, offset: usize) -> Self {
        Self {
            module_path: UNRESOLVED_MODULE.to_string(),
            imported_symbol: ImportedSymbol::Module,
            local_alias: local_alias.into(),
            line,
            offset,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        self.module_path == UNRESOLVED_MODULE
    }

    /// The named symbol, if this binding imports one.
    pub fn symbol(&self) -> Option<&str> {
        match &self.imported_symbol {
            ImportedSymbol::Named(s) => Some(s),
            _ => None,
        }
    }
}

/// How a construct is invoked at a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    /// `f(...)`
    Call,
    /// `new C(...)`
    New,
    /// `@tool` or `@tool(...)`
    Decorator,
}

/// A call, instantiation, or decorator whose callee is a plain identifier chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub callee: Chain,
    pub kind: SiteKind,
    pub offset: usize,
    /// 1-indexed.
    pub line: u32,
    /// 1-indexed.
    pub column: u32,
}

impl CallSite {
    /// Callee as written, segments joined by `.`.
    pub fn callee_text(&self) -> String {
        self.callee.join(".")
    }
}

/// A module-level statement that changes what a local name refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeEvent {
    /// A definition or assignment of a non-import value.
    Shadow { name: String, offset: usize },
    /// `name = <identifier chain>`; resolved against the table in effect at `offset`.
    Alias {
        name: String,
        target: Chain,
        line: u32,
        offset: usize,
    },
}

impl ScopeEvent {
    pub fn offset(&self) -> usize {
        match self {
            Self::Shadow { offset, .. } | Self::Alias { offset, .. } => *offset,
        }
    }
}

/// Everything the matcher needs to know about one file.
#[derive(Debug, Clone)]
pub struct SourceFacts {
    pub language: Language,
    /// Ordered by offset.
    pub imports: Vec<ImportBinding>,
    /// Ordered by offset.
    pub call_sites: Vec<CallSite>,
    /// Ordered by offset.
    pub scope_events: Vec<ScopeEvent>,
}

impl SourceFacts {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            imports: Vec::new(),
            call_sites: Vec::new(),
            scope_events: Vec::new(),
        }
    }

    /// Restore offset order after a preorder walk.
    pub(crate) fn sort(&mut self) {
        self.imports.sort_by_key(|b| b.offset);
        self.call_sites.sort_by_key(|c| c.offset);
        self.scope_events.sort_by_key(ScopeEvent::offset);
    }
}
