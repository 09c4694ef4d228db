//! Construct matcher: attributes call sites to frameworks.
//!
//! Sweeps the file in source order, replaying import bindings and scope events
//! into an `ImportTable`, and resolves each call site against the table in
//! effect at its offset. Resolved `(module, symbol)` pairs are checked against
//! the registry's import and construct signatures.

use agentscan_core::ConstructRole;
use tracing::debug;

use super::import_table::ImportTable;
use super::types::{truncate_snippet, AmbiguousMatchWarning, ImportEvidence, Match, ResolvedTarget};
use crate::frameworks::descriptor::FrameworkDescriptor;
use crate::frameworks::registry::FrameworkRegistry;
use crate::parsers::types::{CallSite, ImportBinding, ScopeEvent, SourceFacts};
use crate::scanner::language_detect::Language;

/// Specificity of a candidate: exact-symbol import signature, module pattern
/// length, exact construct name. Higher wins.
type Rank = (bool, usize, bool);

struct Candidate<'r> {
    framework: &'r FrameworkDescriptor,
    role: ConstructRole,
    module_path: String,
    symbol: String,
    rank: Rank,
}

enum TableEvent<'f> {
    Bind(&'f ImportBinding),
    Scope(&'f ScopeEvent),
}

impl TableEvent<'_> {
    fn offset(&self) -> usize {
        match self {
            Self::Bind(b) => b.offset,
            Self::Scope(e) => e.offset(),
        }
    }
}

/// Matches a file's call sites against a registry.
pub struct ConstructMatcher<'r> {
    registry: &'r FrameworkRegistry,
    snippet_max_len: usize,
}

impl<'r> ConstructMatcher<'r> {
    pub fn new(registry: &'r FrameworkRegistry, snippet_max_len: usize) -> Self {
        Self {
            registry,
            snippet_max_len,
        }
    }

    /// All construct matches in the file, in source order.
    pub fn match_constructs(&self, facts: &SourceFacts, source: &str) -> Vec<Match> {
        let mut events: Vec<TableEvent<'_>> = facts
            .imports
            .iter()
            .map(TableEvent::Bind)
            .chain(facts.scope_events.iter().map(TableEvent::Scope))
            .collect();
        // Stable: at equal offsets imports apply before scope events.
        events.sort_by_key(|event| event.offset());

        let lines: Vec<&str> = source.lines().collect();
        let mut table = ImportTable::new();
        let mut next_event = 0;
        let mut matches = Vec::new();

        for site in &facts.call_sites {
            while let Some(event) = events.get(next_event) {
                if event.offset() > site.offset {
                    break;
                }
                apply(&mut table, event);
                next_event += 1;
            }

            let targets = table.resolve(&site.callee);
            if targets.is_empty() {
                continue;
            }
            let candidates = self.best_candidates(facts.language, &targets);
            if candidates.is_empty() {
                continue;
            }
            let line_text = lines
                .get(site.line.saturating_sub(1) as usize)
                .copied()
                .unwrap_or_default();
            self.push_matches(site, line_text, candidates, &mut matches);
        }

        matches
    }

    /// Import bindings that fall under a framework's import signatures.
    pub fn import_evidence(&self, facts: &SourceFacts) -> Vec<ImportEvidence> {
        let mut evidence = Vec::new();
        for binding in &facts.imports {
            if binding.is_unresolved() {
                continue;
            }
            for framework in self.registry.lookup_by_import(&binding.module_path) {
                if !framework.supports_language(facts.language) {
                    continue;
                }
                let admitted = framework.import_signatures.iter().any(|sig| match binding.symbol() {
                    Some(symbol) => sig.admits(&binding.module_path, symbol),
                    None => sig.symbol.is_none() && sig.matches_module(&binding.module_path),
                });
                if admitted {
                    evidence.push(ImportEvidence {
                        framework_id: framework.id.clone(),
                        module_path: binding.module_path.clone(),
                        local_alias: binding.local_alias.clone(),
                        line: binding.line,
                    });
                }
            }
        }
        evidence
    }

    /// Candidates sharing the best rank, one per framework.
    fn best_candidates(&self, language: Language, targets: &[ResolvedTarget]) -> Vec<Candidate<'r>> {
        let mut candidates: Vec<Candidate<'r>> = Vec::new();
        for target in targets {
            let ResolvedTarget::Symbol {
                module_path,
                symbol,
            } = target
            else {
                continue;
            };
            for framework in self.registry.lookup_by_import(module_path) {
                if !framework.supports_language(language) {
                    continue;
                }
                let Some(import_sig) = framework.best_import_signature(module_path, symbol) else {
                    continue;
                };
                let Some(construct) = framework.construct_for(symbol) else {
                    continue;
                };
                if candidates.iter().any(|c| c.framework.id == framework.id) {
                    continue;
                }
                candidates.push(Candidate {
                    framework,
                    role: construct.role,
                    module_path: module_path.clone(),
                    symbol: symbol.clone(),
                    rank: (
                        import_sig.symbol.is_some(),
                        import_sig.module.len(),
                        construct.symbol.is_exact(),
                    ),
                });
            }
        }

        let Some(best) = candidates.iter().map(|c| c.rank).max() else {
            return candidates;
        };
        candidates.retain(|c| c.rank == best);
        candidates
    }

    fn push_matches(
        &self,
        site: &CallSite,
        line_text: &str,
        candidates: Vec<Candidate<'r>>,
        out: &mut Vec<Match>,
    ) {
        let callee = site.callee_text();
        let snippet = truncate_snippet(line_text, self.snippet_max_len);
        let tied: Vec<String> = candidates.iter().map(|c| c.framework.id.clone()).collect();
        if tied.len() > 1 {
            debug!(
                callee = %callee,
                line = site.line,
                frameworks = ?tied,
                "ambiguous construct match"
            );
        }

        for candidate in candidates {
            let ambiguity = (tied.len() > 1).then(|| {
                let mut alternatives: Vec<String> = tied
                    .iter()
                    .filter(|id| **id != candidate.framework.id)
                    .cloned()
                    .collect();
                alternatives.sort();
                AmbiguousMatchWarning { alternatives }
            });
            out.push(Match {
                framework_id: candidate.framework.id.clone(),
                role: candidate.role,
                local_alias: callee.clone(),
                symbol: candidate.symbol,
                module_path: candidate.module_path,
                line: site.line,
                column: site.column,
                site: site.kind,
                snippet: snippet.clone(),
                ambiguity,
            });
        }
    }
}

fn apply(table: &mut ImportTable, event: &TableEvent<'_>) {
    match event {
        TableEvent::Bind(binding) => table.bind(binding),
        TableEvent::Scope(ScopeEvent::Shadow { name, .. }) => table.shadow(name),
        TableEvent::Scope(ScopeEvent::Alias { name, target, .. }) => table.alias(name, target),
    }
}
