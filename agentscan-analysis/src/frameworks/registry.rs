//! Framework registry: built-in packs plus configured and custom packs.
//!
//! Built-in packs are embedded at compile time via `include_str!`.
//! Inline packs come from `[[registry.frameworks]]` and custom packs from
//! `custom_packs_dir`; both replace a built-in with the same id.

use std::path::Path;

use agentscan_core::config::RegistryConfig;
use agentscan_core::errors::ConfigurationError;
use agentscan_core::types::framework_spec::FrameworkSpec;
use agentscan_core::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{debug, error, info};

use super::descriptor::FrameworkDescriptor;
use super::diagnostics::RegistryDiagnostics;
use super::loader;

/// Catalog of detectable frameworks, indexed by id and by module root.
#[derive(Debug, Clone, Default)]
pub struct FrameworkRegistry {
    frameworks: Vec<FrameworkDescriptor>,
    by_id: FxHashMap<String, usize>,
    /// First module-path segment → frameworks with an import signature under it.
    by_root: FxHashMap<String, SmallVec<[usize; 2]>>,
    diag: RegistryDiagnostics,
}

impl FrameworkRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in pack.
    ///
    /// Built-in packs ship with the crate; one that fails to compile is logged
    /// and skipped.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, toml_str) in builtin_packs() {
            let result = loader::load_from_str(toml_str, name)
                .and_then(|descriptor| registry.insert(descriptor));
            match result {
                Ok(()) => registry.diag.builtin_packs_loaded += 1,
                Err(e) => error!(pack = %name, error = %e, "failed to load built-in pack"),
            }
        }
        registry.refresh_counts();
        registry
    }

    /// Build a registry from configuration. Any malformed pack fails the whole
    /// construction.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, ConfigurationError> {
        let mut registry = Self::new();

        if config.effective_include_builtins() {
            for (name, toml_str) in builtin_packs() {
                if config.is_builtin_disabled(name) {
                    registry.diag.builtin_packs_disabled += 1;
                    continue;
                }
                registry.insert(loader::load_from_str(toml_str, name)?)?;
                registry.diag.builtin_packs_loaded += 1;
            }
        }

        let mut configured: FxHashSet<String> = FxHashSet::default();

        for spec in &config.frameworks {
            let descriptor = loader::compile(spec)?;
            registry.insert_configured(descriptor, &mut configured)?;
            registry.diag.inline_packs_loaded += 1;
        }

        if let Some(dir) = config.custom_packs_dir.as_deref() {
            for descriptor in load_pack_dir(Path::new(dir))? {
                info!(framework = %descriptor.id, dir = %dir, "loaded custom framework pack");
                registry.insert_configured(descriptor, &mut configured)?;
                registry.diag.custom_packs_loaded += 1;
            }
        }

        registry.refresh_counts();
        debug!("{}", registry.diag.summary());
        Ok(registry)
    }

    /// Build a registry from packs alone (no built-ins).
    pub fn from_specs<'a>(
        specs: impl IntoIterator<Item = &'a FrameworkSpec>,
    ) -> Result<Self, ConfigurationError> {
        let mut registry = Self::new();
        for spec in specs {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    /// Parse and compile a single pack without registering it.
    pub fn load_single(toml_str: &str) -> Result<FrameworkDescriptor, ConfigurationError> {
        loader::load_from_str(toml_str, "<inline>")
    }

    /// Validate and add a pack. Rejects a duplicate id.
    pub fn register(&mut self, spec: &FrameworkSpec) -> Result<(), ConfigurationError> {
        let descriptor = loader::compile(spec)?;
        self.insert(descriptor)?;
        self.refresh_counts();
        Ok(())
    }

    /// Validate and add a pack, replacing any framework with the same id.
    ///
    /// Returns `true` if an existing framework was replaced.
    pub fn register_override(&mut self, spec: &FrameworkSpec) -> Result<bool, ConfigurationError> {
        let descriptor = loader::compile(spec)?;
        let replaced = self.replace_or_insert(descriptor);
        self.refresh_counts();
        Ok(replaced)
    }

    /// All frameworks, in registration order.
    pub fn list_frameworks(&self) -> &[FrameworkDescriptor] {
        &self.frameworks
    }

    pub fn get(&self, id: &str) -> Option<&FrameworkDescriptor> {
        self.by_id.get(id).map(|&idx| &self.frameworks[idx])
    }

    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }

    /// Frameworks with an import signature matching the module path, in
    /// registration order.
    pub fn lookup_by_import(&self, module_path: &str) -> Vec<&FrameworkDescriptor> {
        let root = module_root(module_path);
        if root.is_empty() {
            return Vec::new();
        }
        let Some(indices) = self.by_root.get(root) else {
            return Vec::new();
        };
        indices
            .iter()
            .map(|&idx| &self.frameworks[idx])
            .filter(|fw| fw.matches_module(module_path))
            .collect()
    }

    pub fn diagnostics(&self) -> &RegistryDiagnostics {
        &self.diag
    }

    fn insert(&mut self, descriptor: FrameworkDescriptor) -> Result<(), ConfigurationError> {
        if self.by_id.contains_key(&descriptor.id) {
            return Err(ConfigurationError::DuplicateId { id: descriptor.id });
        }
        let idx = self.frameworks.len();
        self.index(idx, &descriptor);
        self.by_id.insert(descriptor.id.clone(), idx);
        self.frameworks.push(descriptor);
        Ok(())
    }

    /// Configured packs may replace a built-in but not each other.
    fn insert_configured(
        &mut self,
        descriptor: FrameworkDescriptor,
        configured: &mut FxHashSet<String>,
    ) -> Result<(), ConfigurationError> {
        if !configured.insert(descriptor.id.clone()) {
            return Err(ConfigurationError::DuplicateId { id: descriptor.id });
        }
        self.replace_or_insert(descriptor);
        Ok(())
    }

    fn replace_or_insert(&mut self, descriptor: FrameworkDescriptor) -> bool {
        match self.by_id.get(&descriptor.id).copied() {
            Some(idx) => {
                info!(framework = %descriptor.id, "framework pack overridden");
                self.frameworks[idx] = descriptor;
                self.diag.packs_overridden += 1;
                self.rebuild_root_index();
                true
            }
            None => {
                let idx = self.frameworks.len();
                self.index(idx, &descriptor);
                self.by_id.insert(descriptor.id.clone(), idx);
                self.frameworks.push(descriptor);
                false
            }
        }
    }

    fn index(&mut self, idx: usize, descriptor: &FrameworkDescriptor) {
        for sig in &descriptor.import_signatures {
            let entry = self
                .by_root
                .entry(module_root(&sig.module).to_string())
                .or_default();
            if !entry.contains(&idx) {
                entry.push(idx);
            }
        }
    }

    fn rebuild_root_index(&mut self) {
        self.by_root.clear();
        let frameworks = std::mem::take(&mut self.frameworks);
        for (idx, descriptor) in frameworks.iter().enumerate() {
            self.index(idx, descriptor);
        }
        self.frameworks = frameworks;
    }

    fn refresh_counts(&mut self) {
        self.diag.import_signatures = self
            .frameworks
            .iter()
            .map(|fw| fw.import_signatures.len())
            .sum();
        self.diag.construct_signatures = self
            .frameworks
            .iter()
            .map(|fw| fw.construct_signatures.len())
            .sum();
        self.diag.pack_versions = self
            .frameworks
            .iter()
            .filter_map(|fw| fw.version.clone().map(|v| (fw.id.clone(), v)))
            .collect();
    }
}

/// First segment of a module path (`langchain.agents` → `langchain`,
/// `@langchain/core` → `@langchain`).
fn module_root(module_path: &str) -> &str {
    module_path.split(['.', '/']).next().unwrap_or_default()
}

/// Every `*.toml` pack in a directory, in file-name order.
fn load_pack_dir(dir: &Path) -> Result<Vec<FrameworkDescriptor>, ConfigurationError> {
    let io_error = |e: std::io::Error| ConfigurationError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();
    paths.iter().map(|p| loader::load_from_file(p)).collect()
}

/// Built-in framework packs embedded at compile time.
pub fn builtin_packs() -> &'static [(&'static str, &'static str)] {
    &[
        ("langchain", include_str!("packs/langchain.toml")),
        ("langgraph", include_str!("packs/langgraph.toml")),
        ("crewai", include_str!("packs/crewai.toml")),
        ("autogen", include_str!("packs/autogen.toml")),
        ("openai-agents", include_str!("packs/openai_agents.toml")),
        ("llama-index", include_str!("packs/llama_index.toml")),
        ("semantic-kernel", include_str!("packs/semantic_kernel.toml")),
        ("smolagents", include_str!("packs/smolagents.toml")),
        ("pydantic-ai", include_str!("packs/pydantic_ai.toml")),
        ("mastra", include_str!("packs/mastra.toml")),
    ]
}
