//! File findings and the project aggregate.

use agentscan_analysis::aggregation::{aggregate_file, FileFailure, ProjectFinding};
use agentscan_analysis::engine::{ImportEvidence, Match};
use agentscan_analysis::parsers::types::SiteKind;
use agentscan_analysis::{merge_failure, merge_findings, Detector, FileFinding, Language};
use agentscan_core::errors::ParseError;
use agentscan_core::{Confidence, ConstructRole};

fn construct(framework_id: &str, role: ConstructRole, line: u32, column: u32) -> Match {
    Match {
        framework_id: framework_id.to_string(),
        role,
        local_alias: "Agent".to_string(),
        symbol: "Agent".to_string(),
        module_path: framework_id.to_string(),
        line,
        column,
        site: SiteKind::Call,
        snippet: "Agent()".to_string(),
        ambiguity: None,
    }
}

fn evidence(framework_id: &str, line: u32) -> ImportEvidence {
    ImportEvidence {
        framework_id: framework_id.to_string(),
        module_path: framework_id.to_string(),
        local_alias: "Agent".to_string(),
        line,
    }
}

#[test]
fn test_file_finding_orders_and_deduplicates_matches() {
    let finding = aggregate_file(
        "a.py",
        Language::Python,
        vec![
            construct("crewai", ConstructRole::Crew, 9, 1),
            construct("crewai", ConstructRole::Agent, 3, 12),
            construct("autogen", ConstructRole::Agent, 3, 1),
            construct("crewai", ConstructRole::Agent, 3, 30),
        ],
        vec![evidence("crewai", 1), evidence("crewai", 1), evidence("autogen", 2)],
        Confidence::Low,
    );

    let order: Vec<(&str, u32, u32)> = finding
        .matches()
        .iter()
        .map(|m| (m.framework_id.as_str(), m.line, m.column))
        .collect();
    assert_eq!(
        order,
        vec![("autogen", 3, 1), ("crewai", 3, 12), ("crewai", 9, 1)]
    );
    assert_eq!(finding.imports().len(), 2);
    assert_eq!(finding.matches_for("crewai").count(), 2);
}

#[test]
fn test_detected_set_is_derived_from_matches() {
    let finding = FileFinding::new(
        "a.py",
        Language::Python,
        vec![construct("crewai", ConstructRole::Agent, 4, 1)],
        vec![evidence("crewai", 1), evidence("langchain", 2)],
        Confidence::Low,
    );
    let detected: Vec<&str> = finding
        .frameworks_detected()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(detected, vec!["crewai"]);
    assert_eq!(finding.confidence("crewai"), Some(Confidence::High));
    assert_eq!(finding.confidence("langchain"), Some(Confidence::Low));
    assert_eq!(finding.confidence("autogen"), None);

    let detections = finding.detections();
    assert_eq!(detections.len(), 2);
    assert_eq!(detections["crewai"], Confidence::High);
    assert_eq!(detections["langchain"], Confidence::Low);
}

#[test]
fn test_empty_finding() {
    let finding = FileFinding::empty("empty.ts", Language::TypeScript);
    assert_eq!(finding.file_path(), "empty.ts");
    assert_eq!(finding.language(), Language::TypeScript);
    assert!(!finding.has_detections());
    assert!(finding.detections().is_empty());
}

#[test]
fn test_project_aggregate_counts() {
    let detector = Detector::with_builtins();
    let crew = detector
        .scan_file(
            "crew.py",
            include_str!("fixtures/crewai_crew.py"),
            Language::Python,
        )
        .expect("valid source");
    let multi = detector
        .scan_file(
            "multi.py",
            include_str!("fixtures/multi_framework.py"),
            Language::Python,
        )
        .expect("valid source");
    let plain = detector
        .scan_file(
            "plain.py",
            include_str!("fixtures/no_agents.py"),
            Language::Python,
        )
        .expect("valid source");
    let import_only = detector
        .scan_file("import_only.py", "import langgraph\n", Language::Python)
        .expect("valid source");

    let project = [&crew, &multi, &plain, &import_only]
        .into_iter()
        .fold(ProjectFinding::new(), |acc, f| merge_findings(&acc, f));

    assert_eq!(project.files_scanned(), 4);
    assert_eq!(project.files_with_detections(), 3);
    assert_eq!(project.total_matches(), 6 + 5);

    let crewai = project.framework("crewai").expect("crewai summary");
    assert_eq!(crewai.match_count, 6 + 2);
    assert_eq!(crewai.files.len(), 2);
    assert_eq!(crewai.confidence(), Confidence::High);
    assert_eq!(crewai.roles[&ConstructRole::Agent], 3);
    assert_eq!(crewai.roles[&ConstructRole::Task], 2);
    assert_eq!(crewai.roles[&ConstructRole::Crew], 2);
    assert_eq!(crewai.roles[&ConstructRole::Tool], 1);

    let langgraph = project.framework("langgraph").expect("langgraph summary");
    assert_eq!(langgraph.match_count, 0);
    assert_eq!(langgraph.confidence(), Confidence::Low);
    assert_eq!(langgraph.files["import_only.py"], Confidence::Low);

    let ids: Vec<&str> = project.frameworks().keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["autogen", "crewai", "langchain", "langgraph"]);
}

#[test]
fn test_failures_are_recorded_separately() {
    let detector = Detector::with_builtins();
    let good = detector
        .scan_file("ok.py", "from crewai import Agent\nAgent()\n", Language::Python)
        .expect("valid source");
    let error = ParseError::MalformedImport {
        line: 3,
        column: 1,
        text: "from crewai import".to_string(),
    };

    let project = merge_findings(&ProjectFinding::new(), &good);
    let project = merge_failure(&project, "broken.py", &error);

    assert_eq!(project.files_scanned(), 1);
    assert_eq!(project.total_matches(), 1);
    assert_eq!(
        project.failures().iter().collect::<Vec<_>>(),
        vec![&FileFailure {
            file_path: "broken.py".to_string(),
            code: "PARSE_MALFORMED_IMPORT".to_string(),
            message: "Malformed import statement at 3:1: from crewai import".to_string(),
        }]
    );
}

#[test]
fn test_merge_is_pure() {
    let detector = Detector::with_builtins();
    let finding = detector
        .scan_file("a.py", "from crewai import Crew\nCrew()\n", Language::Python)
        .expect("valid source");
    let base = ProjectFinding::new();
    let merged = merge_findings(&base, &finding);
    assert_eq!(base, ProjectFinding::new());
    assert_eq!(merged.files_scanned(), 1);
    assert_eq!(merged, ProjectFinding::from_file(&finding));
}

#[test]
fn test_confidence_is_max_across_files() {
    let high = FileFinding::new(
        "a.py",
        Language::Python,
        vec![construct("crewai", ConstructRole::Agent, 2, 1)],
        vec![evidence("crewai", 1)],
        Confidence::Low,
    );
    let low = FileFinding::new(
        "b.py",
        Language::Python,
        Vec::new(),
        vec![evidence("crewai", 1)],
        Confidence::Low,
    );
    let project = merge_findings(&merge_findings(&ProjectFinding::new(), &low), &high);
    let crewai = project.framework("crewai").expect("crewai summary");
    assert_eq!(crewai.confidence(), Confidence::High);
    assert_eq!(crewai.files["a.py"], Confidence::High);
    assert_eq!(crewai.files["b.py"], Confidence::Low);
}

#[test]
fn test_project_serializes_to_json() {
    let finding = FileFinding::new(
        "a.py",
        Language::Python,
        vec![construct("crewai", ConstructRole::Agent, 2, 1)],
        Vec::new(),
        Confidence::Low,
    );
    let project = ProjectFinding::from_file(&finding);
    let json = serde_json::to_value(&project).expect("serializes");
    assert_eq!(json["files_scanned"], 1);
    assert_eq!(json["frameworks"]["crewai"]["match_count"], 1);
    assert_eq!(json["frameworks"]["crewai"]["files"]["a.py"], "high");
    assert_eq!(json["frameworks"]["crewai"]["roles"]["agent"], 1);
}
