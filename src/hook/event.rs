// ABOUTME: Hook input payloads as the host agent sends them on stdin.
// ABOUTME: Unknown fields are ignored; missing fields are validated by the classifier.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Which hook the binary was invoked as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    UserPromptSubmit,
    PreToolUse,
}

impl HookKind {
    /// Parse the raw stdin payload for this hook.
    pub fn parse_event(self, raw: &str) -> serde_json::Result<HookEvent> {
        match self {
            HookKind::UserPromptSubmit => {
                serde_json::from_str(raw).map(HookEvent::PromptSubmitted)
            }
            HookKind::PreToolUse => serde_json::from_str(raw).map(HookEvent::ToolInvoked),
        }
    }
}

/// A single lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum HookEvent {
    PromptSubmitted(PromptSubmitInput),
    ToolInvoked(ToolUseInput),
}

/// Payload of the UserPromptSubmit hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromptSubmitInput {
    pub session_id: Option<String>,
    pub prompt: Option<String>,
}

/// Payload of the PreToolUse hook.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolUseInput {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub session_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tool_name: String,
    #[serde(default = "empty_object")]
    pub tool_input: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// An explicit `null` reads the same as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
