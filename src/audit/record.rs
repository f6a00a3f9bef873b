// ABOUTME: Audit record — one classified tool invocation, rendered as a single text line.
// ABOUTME: Format: [timestamp] [session] [workflow] Tool | target

use std::fmt;

use chrono::{DateTime, Local};

/// What the classifier observed about one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolObservation {
    pub session_id: String,
    pub workflow_label: String,
    pub tool_name: String,
    pub target: String,
}

/// A timestamped observation ready to be appended to the audit log.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub timestamp: DateTime<Local>,
    pub observation: ToolObservation,
}

impl AuditRecord {
    /// Stamp an observation with the current wall-clock time.
    pub fn now(observation: ToolObservation) -> Self {
        Self {
            timestamp: Local::now(),
            observation,
        }
    }

    /// Render as one line, without the trailing newline.
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let obs = &self.observation;
        write!(
            f,
            "[{}] [{}] [{}] {} | {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f"),
            single_line(&obs.session_id),
            single_line(&obs.workflow_label),
            single_line(&obs.tool_name),
            single_line(&obs.target),
        )
    }
}

/// Escape line breaks so a record never spans more than one line.
fn single_line(s: &str) -> String {
    s.replace('\r', "\\r").replace('\n', "\\n")
}
