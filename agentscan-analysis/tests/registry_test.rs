//! Integration tests for the framework registry.

use agentscan_analysis::frameworks::registry::{builtin_packs, FrameworkRegistry};
use agentscan_analysis::frameworks::SymbolPattern;
use agentscan_analysis::Language;
use agentscan_core::config::{AgentScanConfig, RegistryConfig};
use agentscan_core::errors::ConfigurationError;
use agentscan_core::types::framework_spec::FrameworkSpec;
use agentscan_core::{AgentScanErrorCode, ConstructRole};

const CUSTOM_PACK: &str = r#"
[framework]
id = "acme-agents"
name = "Acme Agents"
languages = ["python"]
version = "0.3.0"

[[imports]]
module = "acme.agents"

[[constructs]]
symbol = "AcmeAgent"
role = "agent"

[[constructs]]
symbol = "*Pipeline"
role = "workflow"
"#;

fn spec(toml_str: &str) -> FrameworkSpec {
    FrameworkSpec::from_toml(toml_str).expect("pack should parse")
}

#[test]
fn test_builtin_packs_load_successfully() {
    let registry = FrameworkRegistry::with_builtins();
    assert_eq!(registry.len(), builtin_packs().len());
    assert!(registry.len() >= 10, "expected at least 10 built-in packs");

    for id in [
        "langchain",
        "langgraph",
        "crewai",
        "autogen",
        "openai-agents",
        "llama-index",
        "semantic-kernel",
        "smolagents",
        "pydantic-ai",
        "mastra",
    ] {
        assert!(registry.get(id).is_some(), "missing built-in pack {id}");
    }

    let diag = registry.diagnostics();
    assert_eq!(diag.builtin_packs_loaded, registry.len());
    assert_eq!(diag.total_packs(), registry.len());
    assert!(diag.import_signatures >= registry.len());
    assert!(diag.construct_signatures > diag.import_signatures);
    assert_eq!(
        diag.pack_versions.get("crewai").map(String::as_str),
        Some("1.0.0")
    );
}

#[test]
fn test_every_builtin_pack_declares_both_signature_kinds() {
    let registry = FrameworkRegistry::with_builtins();
    for fw in registry.list_frameworks() {
        assert!(!fw.import_signatures.is_empty(), "{} has no imports", fw.id);
        assert!(
            !fw.construct_signatures.is_empty(),
            "{} has no constructs",
            fw.id
        );
        assert!(!fw.languages.is_empty(), "{} has no languages", fw.id);
    }
}

#[test]
fn test_single_pack_loads_from_toml() {
    let fw = FrameworkRegistry::load_single(CUSTOM_PACK).expect("should parse");
    assert_eq!(fw.id, "acme-agents");
    assert_eq!(fw.name, "Acme Agents");
    assert_eq!(fw.languages, vec![Language::Python]);
    assert_eq!(fw.version.as_deref(), Some("0.3.0"));
    assert_eq!(fw.import_signatures.len(), 1);
    assert_eq!(fw.construct_signatures.len(), 2);
    assert!(matches!(fw.construct_signatures[1].symbol, SymbolPattern::Glob { .. }));
    assert_eq!(fw.construct_signatures[1].symbol.as_str(), "*Pipeline");
    assert_eq!(fw.construct_signatures[1].role, ConstructRole::Workflow);
}

#[test]
fn test_invalid_packs_are_rejected() {
    let empty_id = r#"
[framework]
id = ""
[[imports]]
module = "x"
[[constructs]]
symbol = "X"
role = "agent"
"#;
    assert_eq!(
        FrameworkRegistry::load_single(empty_id).unwrap_err(),
        ConfigurationError::EmptyId
    );

    let no_constructs = r#"
[framework]
id = "bare"
[[imports]]
module = "bare"
"#;
    assert!(matches!(
        FrameworkRegistry::load_single(no_constructs),
        Err(ConfigurationError::EmptySignatures { kind: "construct", .. })
    ));

    let no_imports = r#"
[framework]
id = "bare"
[[constructs]]
symbol = "X"
role = "agent"
"#;
    assert!(matches!(
        FrameworkRegistry::load_single(no_imports),
        Err(ConfigurationError::EmptySignatures { kind: "import", .. })
    ));

    let bad_role = r#"
[framework]
id = "roles"
[[imports]]
module = "roles"
[[constructs]]
symbol = "X"
role = "wizard"
"#;
    let err = FrameworkRegistry::load_single(bad_role).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_UNKNOWN_ROLE");

    let bad_language = r#"
[framework]
id = "langs"
languages = ["cobol"]
[[imports]]
module = "langs"
[[constructs]]
symbol = "X"
role = "agent"
"#;
    assert!(matches!(
        FrameworkRegistry::load_single(bad_language),
        Err(ConfigurationError::UnknownLanguage { .. })
    ));

    let bad_symbol = r#"
[framework]
id = "symbols"
[[imports]]
module = "symbols"
[[constructs]]
symbol = "Agent("
role = "agent"
"#;
    assert!(matches!(
        FrameworkRegistry::load_single(bad_symbol),
        Err(ConfigurationError::InvalidSignature { .. })
    ));

    let bad_module = r#"
[framework]
id = "modules"
[[imports]]
module = "two words"
[[constructs]]
symbol = "X"
role = "agent"
"#;
    assert!(matches!(
        FrameworkRegistry::load_single(bad_module),
        Err(ConfigurationError::InvalidSignature { .. })
    ));

    let err = FrameworkRegistry::load_single("[framework\nid=").unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_TOML");
}

#[test]
fn test_register_rejects_duplicate_id() {
    let mut registry = FrameworkRegistry::new();
    registry.register(&spec(CUSTOM_PACK)).expect("first registration");
    let err = registry.register(&spec(CUSTOM_PACK)).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::DuplicateId {
            id: "acme-agents".to_string()
        }
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_register_override_replaces_existing_pack() {
    let mut registry = FrameworkRegistry::with_builtins();
    let before = registry.len();

    let replacement = spec(
        r#"
[framework]
id = "crewai"
languages = ["python"]
[[imports]]
module = "crewai_fork"
[[constructs]]
symbol = "Agent"
role = "agent"
"#,
    );
    assert!(registry.register_override(&replacement).expect("valid pack"));
    assert_eq!(registry.len(), before);
    assert!(registry.lookup_by_import("crewai").is_empty());
    let hits: Vec<&str> = registry
        .lookup_by_import("crewai_fork.agents")
        .iter()
        .map(|fw| fw.id.as_str())
        .collect();
    assert_eq!(hits, vec!["crewai"]);
    assert_eq!(registry.diagnostics().packs_overridden, 1);

    assert!(!registry.register_override(&spec(CUSTOM_PACK)).expect("valid pack"));
    assert_eq!(registry.len(), before + 1);
}

#[test]
fn test_lookup_by_import_respects_segment_boundaries() {
    let registry = FrameworkRegistry::with_builtins();

    let ids = |module: &str| -> Vec<String> {
        registry
            .lookup_by_import(module)
            .iter()
            .map(|fw| fw.id.clone())
            .collect()
    };

    assert_eq!(ids("crewai"), vec!["crewai"]);
    assert_eq!(ids("crewai.tools.base"), vec!["crewai"]);
    assert_eq!(ids("crewai_tools"), vec!["crewai"]);
    assert_eq!(ids("langchain_core.tools"), vec!["langchain"]);
    assert_eq!(ids("@mastra/core/agent"), vec!["mastra"]);
    assert_eq!(ids("@langchain/langgraph/prebuilt"), vec!["langgraph"]);
    assert!(ids("crewaix").is_empty());
    assert!(ids("@mastra/memory").is_empty());
    assert!(ids("requests").is_empty());
    assert!(ids("").is_empty());
}

#[test]
fn test_from_config_filters_builtins() {
    let config = RegistryConfig {
        disabled: vec!["crewai".to_string(), "autogen".to_string()],
        ..Default::default()
    };
    let registry = FrameworkRegistry::from_config(&config).expect("valid config");
    assert!(registry.get("crewai").is_none());
    assert!(registry.get("autogen").is_none());
    assert!(registry.get("langchain").is_some());
    assert_eq!(registry.diagnostics().builtin_packs_disabled, 2);

    let config = RegistryConfig {
        disabled: vec!["langchain".to_string()],
        enabled_only: Some(vec!["langchain".to_string(), "mastra".to_string()]),
        ..Default::default()
    };
    let registry = FrameworkRegistry::from_config(&config).expect("valid config");
    let ids: Vec<&str> = registry.list_frameworks().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["langchain", "mastra"]);

    let config = RegistryConfig {
        include_builtins: Some(false),
        ..Default::default()
    };
    let registry = FrameworkRegistry::from_config(&config).expect("valid config");
    assert!(registry.is_empty());
}

#[test]
fn test_from_config_inline_packs() {
    let toml_str = format!(
        r#"
[registry]
include_builtins = false

[[registry.frameworks]]
{}
"#,
        r#"
framework = { id = "acme-agents", languages = ["python"] }
imports = [{ module = "acme.agents" }]
constructs = [{ symbol = "AcmeAgent", role = "agent" }]
"#
    );
    let config = AgentScanConfig::from_toml(&toml_str).expect("valid config");
    let registry = FrameworkRegistry::from_config(&config.registry).expect("valid registry");
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.diagnostics().inline_packs_loaded, 1);
    assert!(registry.get("acme-agents").is_some());
}

#[test]
fn test_from_config_inline_pack_overrides_builtin() {
    let mut config = RegistryConfig::default();
    config.frameworks.push(spec(
        r#"
[framework]
id = "pydantic-ai"
languages = ["python"]
[[imports]]
module = "pydantic_ai"
[[constructs]]
symbol = "Agent"
role = "agent"
"#,
    ));
    let registry = FrameworkRegistry::from_config(&config).expect("valid config");
    assert_eq!(registry.len(), builtin_packs().len());
    let fw = registry.get("pydantic-ai").expect("override present");
    assert_eq!(fw.construct_signatures.len(), 1);
    assert_eq!(registry.diagnostics().packs_overridden, 1);
    assert_eq!(registry.diagnostics().total_packs(), registry.len());
}

#[test]
fn test_from_config_loads_custom_pack_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("acme.toml"), CUSTOM_PACK).expect("write pack");
    std::fs::write(dir.path().join("notes.txt"), "not a pack").expect("write notes");

    let config = RegistryConfig {
        custom_packs_dir: Some(dir.path().display().to_string()),
        ..Default::default()
    };
    let registry = FrameworkRegistry::from_config(&config).expect("valid config");
    assert_eq!(registry.len(), builtin_packs().len() + 1);
    assert_eq!(registry.diagnostics().custom_packs_loaded, 1);
    let hits = registry.lookup_by_import("acme.agents.core");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "acme-agents");
}

#[test]
fn test_from_config_rejects_malformed_custom_pack() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("good.toml"), CUSTOM_PACK).expect("write pack");
    std::fs::write(
        dir.path().join("bad.toml"),
        "[framework]\nid = \"broken\"\n[[imports]]\nmodule = \"broken\"\n",
    )
    .expect("write pack");

    let config = RegistryConfig {
        custom_packs_dir: Some(dir.path().display().to_string()),
        ..Default::default()
    };
    let err = FrameworkRegistry::from_config(&config).unwrap_err();
    assert!(matches!(err, ConfigurationError::EmptySignatures { .. }));
}

#[test]
fn test_from_config_rejects_duplicate_configured_packs() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("acme.toml"), CUSTOM_PACK).expect("write pack");

    let config = RegistryConfig {
        custom_packs_dir: Some(dir.path().display().to_string()),
        frameworks: vec![spec(CUSTOM_PACK)],
        ..Default::default()
    };
    let err = FrameworkRegistry::from_config(&config).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::DuplicateId {
            id: "acme-agents".to_string()
        }
    );
}

#[test]
fn test_from_config_missing_custom_dir_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = RegistryConfig {
        custom_packs_dir: Some(dir.path().join("missing").display().to_string()),
        ..Default::default()
    };
    let err = FrameworkRegistry::from_config(&config).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_IO");
}

#[test]
fn test_json_schema_generation() {
    let schema = agentscan_analysis::frameworks::generate_json_schema();
    let json = serde_json::to_string(&schema).expect("schema serializes");
    assert!(json.contains("FrameworkSpec"));
    assert!(json.contains("constructs"));
    assert!(json.contains("imports"));
}
