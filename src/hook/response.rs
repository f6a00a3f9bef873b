// ABOUTME: Hook responses written to stdout, and the process exit status that goes with them.
// ABOUTME: Block decisions for bad prompt input; permission decisions for tool calls.

use serde::Serialize;

use crate::hook::policy::PermissionDecision;

/// Outcome signalled through the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }
}

/// JSON object printed on stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HookResponse {
    Block(BlockResponse),
    PreToolUse(PreToolUseResponse),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockDecision {
    Block,
}

/// `{"decision": "block", "reason": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockResponse {
    pub decision: BlockDecision,
    pub reason: String,
}

/// `{"hookSpecificOutput": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreToolUseResponse {
    pub hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    pub permission_decision: PermissionDecision,
}

impl HookResponse {
    pub fn block(reason: impl Into<String>) -> Self {
        HookResponse::Block(BlockResponse {
            decision: BlockDecision::Block,
            reason: reason.into(),
        })
    }

    pub fn pre_tool_use(decision: PermissionDecision) -> Self {
        HookResponse::PreToolUse(PreToolUseResponse {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: "PreToolUse".to_string(),
                permission_decision: decision,
            },
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn block_response_shape() {
        let value = serde_json::to_value(HookResponse::block("No prompt provided.")).unwrap();
        assert_eq!(
            value,
            json!({ "decision": "block", "reason": "No prompt provided." })
        );
    }

    #[test]
    fn allow_response_shape() {
        let value =
            serde_json::to_value(HookResponse::pre_tool_use(PermissionDecision::Allow)).unwrap();
        assert_eq!(
            value,
            json!({
                "hookSpecificOutput": {
                    "hookEventName": "PreToolUse",
                    "permissionDecision": "allow"
                }
            })
        );
    }

    #[test]
    fn exit_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Failure.code(), 1);
    }
}
