//! Construct roles.

use serde::{Deserialize, Serialize};

/// The first-class agent concept a construct represents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ConstructRole {
    Agent,
    Crew,
    Task,
    Executor,
    Tool,
    /// Graph/flow orchestration objects (e.g. a state graph).
    Workflow,
}

impl ConstructRole {
    /// All roles.
    pub fn all() -> &'static [ConstructRole] {
        &[
            Self::Agent,
            Self::Crew,
            Self::Task,
            Self::Executor,
            Self::Tool,
            Self::Workflow,
        ]
    }

    /// Role name as used in framework packs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Crew => "crew",
            Self::Task => "task",
            Self::Executor => "executor",
            Self::Tool => "tool",
            Self::Workflow => "workflow",
        }
    }

    /// Parse from a pack role string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "agent" => Some(Self::Agent),
            "crew" => Some(Self::Crew),
            "task" => Some(Self::Task),
            "executor" => Some(Self::Executor),
            "tool" => Some(Self::Tool),
            "workflow" => Some(Self::Workflow),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConstructRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
