// ABOUTME: The per-session workflow record and its workflow/phase enums.
// ABOUTME: Serializes to the same JSON the hook scripts have always written.

use serde::{Deserialize, Serialize};

/// Which multi-step procedure the host agent is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Workflow {
    /// No recognised workflow. Also what unrecognised stored values read back as.
    #[default]
    None,
    /// Started by `/ultra-planner`.
    Planner,
    /// Started by `/issue-to-impl`.
    Implementation,
}

impl Workflow {
    /// Tag stored in the session file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Workflow::None => "",
            Workflow::Planner => "ultra-planner",
            Workflow::Implementation => "issue-to-impl",
        }
    }

    /// Short label used in audit records.
    pub fn label(&self) -> &'static str {
        match self {
            Workflow::None => "unknown",
            Workflow::Planner => "plan",
            Workflow::Implementation => "impl",
        }
    }
}

impl From<String> for Workflow {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "ultra-planner" => Workflow::Planner,
            "issue-to-impl" => Workflow::Implementation,
            _ => Workflow::None,
        }
    }
}

impl From<Workflow> for String {
    fn from(workflow: Workflow) -> Self {
        workflow.as_str().to_string()
    }
}

/// Coarse progress marker within a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phase {
    #[default]
    Unknown,
    Initial,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Unknown => "unknown",
            Phase::Initial => "initial",
        }
    }
}

impl From<String> for Phase {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "initial" => Phase::Initial,
            _ => Phase::Unknown,
        }
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        phase.as_str().to_string()
    }
}

/// Persisted workflow state for one session. The session id is the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub workflow: Workflow,
    #[serde(default, rename = "state")]
    pub phase: Phase,
    #[serde(default)]
    pub continuation_count: u32,
}

impl SessionRecord {
    /// A freshly (re)started workflow.
    pub fn started(workflow: Workflow) -> Self {
        Self {
            workflow,
            phase: Phase::Initial,
            continuation_count: 0,
        }
    }
}
