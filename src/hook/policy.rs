// ABOUTME: Tool permission policy — the extension point for deciding on tool invocations.
// ABOUTME: The only shipped policy allows everything; the hooks observe, they do not enforce.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::{SessionRecord, Workflow};

/// The host-facing answer to a PreToolUse hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionDecision {
    /// Tool call proceeds.
    Allow,
    /// Tool call is refused.
    Deny,
    /// The host asks the user.
    Ask,
}

/// Everything a policy may look at when deciding.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub session_id: &'a str,
    pub tool_name: &'a str,
    pub tool_input: &'a Value,
    pub record: Option<&'a SessionRecord>,
}

impl PolicyContext<'_> {
    pub fn workflow(&self) -> Workflow {
        self.record.map(|r| r.workflow).unwrap_or_default()
    }
}

/// Decides whether a tool invocation may proceed.
pub trait ToolPolicy {
    fn decide(&self, ctx: &PolicyContext<'_>) -> PermissionDecision;
}

/// Allows every tool invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl ToolPolicy for AllowAll {
    fn decide(&self, _ctx: &PolicyContext<'_>) -> PermissionDecision {
        PermissionDecision::Allow
    }
}
