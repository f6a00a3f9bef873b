// ABOUTME: Target descriptors — a short summary of what a tool invocation touches.
// ABOUTME: Closed set of known tool kinds, each with its own extraction rule, plus a fallback.

use std::fmt;

use serde_json::Value;

/// Known tool families, keyed by the host's tool name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    File,
    Shell,
    Search,
    SubAgent,
    Skill,
    WebFetch,
    WebSearch,
    Lsp,
    Questions,
    Todos,
    Other,
}

impl ToolKind {
    pub fn from_tool_name(tool_name: &str) -> Self {
        match tool_name {
            "Read" | "Write" | "Edit" | "NotebookEdit" => ToolKind::File,
            "Bash" => ToolKind::Shell,
            "Grep" | "Glob" => ToolKind::Search,
            "Task" => ToolKind::SubAgent,
            "Skill" => ToolKind::Skill,
            "WebFetch" => ToolKind::WebFetch,
            "WebSearch" => ToolKind::WebSearch,
            "LSP" => ToolKind::Lsp,
            "AskUserQuestion" => ToolKind::Questions,
            "TodoWrite" => ToolKind::Todos,
            _ => ToolKind::Other,
        }
    }
}

/// The fields of a tool payload that describe its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolTarget {
    File {
        file_path: String,
    },
    Shell {
        command: String,
    },
    Search {
        pattern: String,
        path: String,
    },
    SubAgent {
        subagent_type: String,
        description: String,
    },
    Skill {
        skill: String,
        args: String,
    },
    WebFetch {
        url: String,
    },
    WebSearch {
        query: String,
    },
    Lsp {
        operation: String,
        file_path: String,
        line: String,
    },
    Questions {
        headers: Vec<String>,
    },
    Todos {
        count: usize,
    },
    /// Unknown tool: the payload rendered as compact JSON, truncated.
    Other {
        rendered: String,
    },
}

impl ToolTarget {
    /// Extract the target of a tool call from its payload.
    ///
    /// `fallback_len` bounds the rendering of payloads of unknown tools, in characters.
    pub fn from_invocation(tool_name: &str, payload: &Value, fallback_len: usize) -> Self {
        match ToolKind::from_tool_name(tool_name) {
            ToolKind::File => ToolTarget::File {
                file_path: field(payload, "file_path"),
            },
            ToolKind::Shell => ToolTarget::Shell {
                command: field(payload, "command"),
            },
            ToolKind::Search => ToolTarget::Search {
                pattern: field(payload, "pattern"),
                path: field(payload, "path"),
            },
            ToolKind::SubAgent => ToolTarget::SubAgent {
                subagent_type: field(payload, "subagent_type"),
                description: field(payload, "description"),
            },
            ToolKind::Skill => ToolTarget::Skill {
                skill: field(payload, "skill"),
                args: field(payload, "args"),
            },
            ToolKind::WebFetch => ToolTarget::WebFetch {
                url: field(payload, "url"),
            },
            ToolKind::WebSearch => ToolTarget::WebSearch {
                query: field(payload, "query"),
            },
            ToolKind::Lsp => ToolTarget::Lsp {
                operation: field(payload, "operation"),
                file_path: field(payload, "filePath"),
                line: field(payload, "line"),
            },
            ToolKind::Questions => ToolTarget::Questions {
                headers: array(payload, "questions")
                    .iter()
                    .map(|q| field(q, "header"))
                    .collect(),
            },
            ToolKind::Todos => ToolTarget::Todos {
                count: array(payload, "todos").len(),
            },
            ToolKind::Other => ToolTarget::Other {
                rendered: payload.to_string().chars().take(fallback_len).collect(),
            },
        }
    }
}

impl fmt::Display for ToolTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolTarget::File { file_path } => f.write_str(file_path),
            ToolTarget::Shell { command } => f.write_str(command),
            ToolTarget::Search { pattern, path } => {
                write!(f, "pattern={}", pattern)?;
                if !path.is_empty() {
                    write!(f, " path={}", path)?;
                }
                Ok(())
            }
            ToolTarget::SubAgent {
                subagent_type,
                description,
            } => write!(f, "subagent={} desc={}", subagent_type, description),
            ToolTarget::Skill { skill, args } => {
                write!(f, "skill={}", skill)?;
                if !args.is_empty() {
                    write!(f, " args={}", args)?;
                }
                Ok(())
            }
            ToolTarget::WebFetch { url } => f.write_str(url),
            ToolTarget::WebSearch { query } => write!(f, "query={}", query),
            ToolTarget::Lsp {
                operation,
                file_path,
                line,
            } => write!(f, "op={} file={}:{}", operation, file_path, line),
            ToolTarget::Questions { headers } if headers.is_empty() => Ok(()),
            ToolTarget::Questions { headers } => write!(f, "questions={}", headers.join(",")),
            ToolTarget::Todos { count } => write!(f, "todos={}", count),
            ToolTarget::Other { rendered } => f.write_str(rendered),
        }
    }
}

/// Text of a payload field: strings verbatim, other scalars as JSON, absent or null as "".
fn field(payload: &Value, key: &str) -> String {
    match payload.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn array<'a>(payload: &'a Value, key: &str) -> &'a [Value] {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
