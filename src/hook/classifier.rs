// ABOUTME: Event classifier — decides what a hook event means for session state and the audit log.
// ABOUTME: Pure: returns a response plus side-effect requests; the runner performs the I/O.

use crate::audit::ToolObservation;
use crate::config::HookConfig;
use crate::hook::event::{HookEvent, PromptSubmitInput, ToolUseInput};
use crate::hook::policy::{AllowAll, PermissionDecision, PolicyContext, ToolPolicy};
use crate::hook::response::{ExitStatus, HookResponse};
use crate::hook::target::ToolTarget;
use crate::session::{SessionRecord, Workflow};

/// Prompt prefixes that (re)start a workflow, checked in order.
pub const WORKFLOW_TRIGGERS: &[(&str, Workflow)] = &[
    ("/ultra-planner", Workflow::Planner),
    ("/issue-to-impl", Workflow::Implementation),
];

/// Session id used for diagnostics that are not tied to a session.
pub const SYSTEM_SESSION: &str = "SYSTEM";

/// The workflow a prompt starts, if any.
pub fn match_trigger(prompt: &str) -> Option<Workflow> {
    WORKFLOW_TRIGGERS
        .iter()
        .find(|(prefix, _)| prompt.starts_with(prefix))
        .map(|(_, workflow)| *workflow)
}

/// Audit label for the workflow recorded for a session.
pub fn workflow_label(record: Option<&SessionRecord>) -> &'static str {
    record.map(|r| r.workflow).unwrap_or_default().label()
}

/// A side effect the classifier wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the session's record.
    WriteSession {
        session_id: String,
        record: SessionRecord,
    },
    /// Append one audit record.
    Audit(ToolObservation),
    /// Emit a diagnostic log line.
    Diagnostic { session_id: String, message: String },
}

impl Effect {
    fn diagnostic(session_id: &str, message: impl Into<String>) -> Self {
        Effect::Diagnostic {
            session_id: session_id.to_string(),
            message: message.into(),
        }
    }
}

/// What to answer the host, how to exit, and what to do on the side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub response: Option<HookResponse>,
    pub exit: ExitStatus,
    pub effects: Vec<Effect>,
}

impl Classification {
    /// Acknowledge silently.
    pub fn silent(effects: Vec<Effect>) -> Self {
        Self {
            response: None,
            exit: ExitStatus::Success,
            effects,
        }
    }

    /// Reject a prompt-submit event.
    pub fn blocked(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            effects: vec![Effect::diagnostic(
                SYSTEM_SESSION,
                format!("Error in hook input: {}", reason),
            )],
            response: Some(HookResponse::block(reason)),
            exit: ExitStatus::Failure,
        }
    }

    /// Answer a tool call with `decision`.
    pub fn tool_decision(decision: PermissionDecision, effects: Vec<Effect>) -> Self {
        Self {
            response: Some(HookResponse::pre_tool_use(decision)),
            exit: ExitStatus::Success,
            effects,
        }
    }
}

/// Classifies hook events under a fixed configuration and tool policy.
#[derive(Debug, Clone)]
pub struct Classifier<P = AllowAll> {
    config: HookConfig,
    policy: P,
}

impl Classifier<AllowAll> {
    pub fn new(config: HookConfig) -> Self {
        Self::with_policy(config, AllowAll)
    }
}

impl<P: ToolPolicy> Classifier<P> {
    pub fn with_policy(config: HookConfig, policy: P) -> Self {
        Self { config, policy }
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Classify any event. `record` is the session's current state, if loaded.
    pub fn classify(&self, event: &HookEvent, record: Option<&SessionRecord>) -> Classification {
        match event {
            HookEvent::PromptSubmitted(input) => self.on_prompt_submitted(input),
            HookEvent::ToolInvoked(input) => self.on_tool_invoked(input, record),
        }
    }

    /// A prompt was submitted: validate it and (re)start a workflow on a trigger match.
    pub fn on_prompt_submitted(&self, input: &PromptSubmitInput) -> Classification {
        if !self.config.observation_enabled {
            return Classification::silent(vec![Effect::diagnostic(
                SYSTEM_SESSION,
                "Handsoff mode disabled, exiting hook",
            )]);
        }

        let prompt = input.prompt.as_deref().unwrap_or_default();
        let session_id = input.session_id.as_deref().unwrap_or_default();

        // Later checks win, so a payload missing both reports the session id.
        let mut reason = None;
        if prompt.is_empty() {
            reason = Some("No prompt provided.");
        }
        if session_id.is_empty() {
            reason = Some("No session_id provided.");
        }
        if let Some(reason) = reason {
            return Classification::blocked(reason);
        }

        let Some(workflow) = match_trigger(prompt) else {
            return Classification::silent(vec![Effect::diagnostic(
                session_id,
                "No workflow matched, doing nothing.",
            )]);
        };

        let record = SessionRecord::started(workflow);
        Classification::silent(vec![
            Effect::diagnostic(
                session_id,
                format!(
                    "Writing state: workflow={} state={} continuation_count={}",
                    record.workflow.as_str(),
                    record.phase.as_str(),
                    record.continuation_count
                ),
            ),
            Effect::WriteSession {
                session_id: session_id.to_string(),
                record,
            },
        ])
    }

    /// A tool is about to run: record what it targets and answer with the policy's decision.
    pub fn on_tool_invoked(
        &self,
        input: &ToolUseInput,
        record: Option<&SessionRecord>,
    ) -> Classification {
        let decision = self.policy.decide(&PolicyContext {
            session_id: &input.session_id,
            tool_name: &input.tool_name,
            tool_input: &input.tool_input,
            record,
        });

        if !self.config.observation_enabled {
            return Classification::tool_decision(decision, Vec::new());
        }

        let target = ToolTarget::from_invocation(
            &input.tool_name,
            &input.tool_input,
            self.config.fallback_target_len,
        );
        let observation = ToolObservation {
            session_id: input.session_id.clone(),
            workflow_label: workflow_label(record).to_string(),
            tool_name: input.tool_name.clone(),
            target: target.to_string(),
        };
        Classification::tool_decision(decision, vec![Effect::Audit(observation)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;
    use crate::session::Phase;
    use serde_json::json;

    fn enabled() -> HookConfig {
        HookConfig {
            observation_enabled: true,
            ..HookConfig::from_lookup(ConfigFile::default(), |_| None)
        }
    }

    fn prompt(session_id: Option<&str>, prompt: Option<&str>) -> PromptSubmitInput {
        PromptSubmitInput {
            session_id: session_id.map(str::to_string),
            prompt: prompt.map(str::to_string),
        }
    }

    fn tool(tool_name: &str, tool_input: serde_json::Value) -> ToolUseInput {
        ToolUseInput {
            session_id: "s1".to_string(),
            tool_name: tool_name.to_string(),
            tool_input,
        }
    }

    fn writes(c: &Classification) -> Vec<&SessionRecord> {
        c.effects
            .iter()
            .filter_map(|e| match e {
                Effect::WriteSession { record, .. } => Some(record),
                _ => None,
            })
            .collect()
    }

    fn audits(c: &Classification) -> Vec<&ToolObservation> {
        c.effects
            .iter()
            .filter_map(|e| match e {
                Effect::Audit(obs) => Some(obs),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn triggers_match_by_prefix() {
        assert_eq!(
            match_trigger("/ultra-planner build feature X"),
            Some(Workflow::Planner)
        );
        assert_eq!(
            match_trigger("/issue-to-impl 42"),
            Some(Workflow::Implementation)
        );
        assert_eq!(match_trigger("please /ultra-planner"), None);
        assert_eq!(match_trigger("hello"), None);
    }

    #[test]
    fn planner_prompt_starts_workflow() {
        let classifier = Classifier::new(enabled());
        let c = classifier.on_prompt_submitted(&prompt(
            Some("s1"),
            Some("/ultra-planner build feature X"),
        ));

        assert_eq!(c.response, None);
        assert_eq!(c.exit, ExitStatus::Success);
        assert!(c.effects.contains(&Effect::WriteSession {
            session_id: "s1".to_string(),
            record: SessionRecord {
                workflow: Workflow::Planner,
                phase: Phase::Initial,
                continuation_count: 0,
            },
        }));
    }

    #[test]
    fn unrelated_prompt_writes_nothing() {
        let classifier = Classifier::new(enabled());
        let c = classifier.on_prompt_submitted(&prompt(Some("s2"), Some("hello")));
        assert_eq!(c.response, None);
        assert_eq!(c.exit, ExitStatus::Success);
        assert!(writes(&c).is_empty());
    }

    fn diagnostics(c: &Classification) -> Vec<(&str, &str)> {
        c.effects
            .iter()
            .filter_map(|e| match e {
                Effect::Diagnostic {
                    session_id,
                    message,
                } => Some((session_id.as_str(), message.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn unmatched_prompt_logs_under_its_session() {
        let classifier = Classifier::new(enabled());
        let c = classifier.on_prompt_submitted(&prompt(Some("s2"), Some("hello")));
        assert_eq!(
            diagnostics(&c),
            vec![("s2", "No workflow matched, doing nothing.")]
        );
    }

    #[test]
    fn blocked_prompt_logs_under_system() {
        let classifier = Classifier::new(enabled());
        let c = classifier.on_prompt_submitted(&prompt(Some("s1"), None));
        assert_eq!(
            diagnostics(&c),
            vec![(SYSTEM_SESSION, "Error in hook input: No prompt provided.")]
        );
    }

    #[test]
    fn state_write_is_logged_before_it_happens() {
        let classifier = Classifier::new(enabled());
        let c = classifier.on_prompt_submitted(&prompt(Some("s1"), Some("/issue-to-impl 3")));
        assert_eq!(
            diagnostics(&c),
            vec![(
                "s1",
                "Writing state: workflow=issue-to-impl state=initial continuation_count=0"
            )]
        );
        assert!(matches!(c.effects[0], Effect::Diagnostic { .. }));
        assert!(matches!(c.effects[1], Effect::WriteSession { .. }));
    }

    #[test]
    fn disabled_prompt_hook_logs_under_system() {
        let classifier = Classifier::new(HookConfig::default());
        let c = classifier.on_prompt_submitted(&prompt(Some("s1"), Some("/ultra-planner")));
        assert_eq!(
            diagnostics(&c),
            vec![(SYSTEM_SESSION, "Handsoff mode disabled, exiting hook")]
        );
    }

    #[test]
    fn empty_prompt_is_blocked() {
        let classifier = Classifier::new(enabled());
        let c = classifier.on_prompt_submitted(&prompt(Some("s1"), Some("")));
        assert_eq!(c.exit, ExitStatus::Failure);
        assert_eq!(c.response, Some(HookResponse::block("No prompt provided.")));
        assert!(writes(&c).is_empty());
    }

    #[test]
    fn missing_session_id_is_blocked() {
        let classifier = Classifier::new(enabled());
        let c = classifier.on_prompt_submitted(&prompt(None, Some("/ultra-planner x")));
        assert_eq!(c.exit, ExitStatus::Failure);
        assert_eq!(
            c.response,
            Some(HookResponse::block("No session_id provided."))
        );
        assert!(writes(&c).is_empty());
    }

    #[test]
    fn missing_both_reports_session_id() {
        let classifier = Classifier::new(enabled());
        let c = classifier.on_prompt_submitted(&prompt(None, None));
        assert_eq!(
            c.response,
            Some(HookResponse::block("No session_id provided."))
        );
    }

    #[test]
    fn disabled_prompt_hook_does_nothing() {
        let classifier = Classifier::new(HookConfig::default());
        let c = classifier.on_prompt_submitted(&prompt(None, None));
        assert_eq!(c.response, None);
        assert_eq!(c.exit, ExitStatus::Success);
        assert!(writes(&c).is_empty());
    }

    #[test]
    fn tool_call_in_planner_session_is_labelled_plan() {
        let classifier = Classifier::new(enabled());
        let record = SessionRecord::started(Workflow::Planner);
        let c = classifier.on_tool_invoked(
            &tool("Read", json!({"file_path": "/a/b.py"})),
            Some(&record),
        );

        assert_eq!(
            c.response,
            Some(HookResponse::pre_tool_use(PermissionDecision::Allow))
        );
        assert_eq!(c.exit, ExitStatus::Success);
        assert_eq!(
            audits(&c),
            vec![&ToolObservation {
                session_id: "s1".to_string(),
                workflow_label: "plan".to_string(),
                tool_name: "Read".to_string(),
                target: "/a/b.py".to_string(),
            }]
        );
    }

    #[test]
    fn tool_call_without_state_is_unknown() {
        let classifier = Classifier::new(enabled());
        let c = classifier.on_tool_invoked(&tool("Bash", json!({"command": "ls"})), None);
        assert_eq!(audits(&c)[0].workflow_label, "unknown");
        assert_eq!(
            c.response,
            Some(HookResponse::pre_tool_use(PermissionDecision::Allow))
        );
    }

    #[test]
    fn disabled_tool_hook_still_allows() {
        let classifier = Classifier::new(HookConfig::default());
        let c = classifier.on_tool_invoked(&tool("Bash", json!({"command": "ls"})), None);
        assert!(c.effects.is_empty());
        assert_eq!(
            c.response,
            Some(HookResponse::pre_tool_use(PermissionDecision::Allow))
        );
    }

    #[test]
    fn fallback_length_comes_from_config() {
        let config = HookConfig {
            fallback_target_len: 5,
            ..enabled()
        };
        let c = Classifier::new(config)
            .on_tool_invoked(&tool("Unheard", json!({"a": "bcdefg"})), None);
        assert_eq!(audits(&c)[0].target, r#"{"a":"#);
    }

    struct DenyBash;

    impl ToolPolicy for DenyBash {
        fn decide(&self, ctx: &PolicyContext<'_>) -> PermissionDecision {
            if ctx.tool_name == "Bash" && ctx.workflow() == Workflow::Planner {
                PermissionDecision::Deny
            } else {
                PermissionDecision::Allow
            }
        }
    }

    #[test]
    fn custom_policy_decides_tool_calls() {
        let classifier = Classifier::with_policy(enabled(), DenyBash);
        let record = SessionRecord::started(Workflow::Planner);

        let bash = classifier.on_tool_invoked(&tool("Bash", json!({"command": "ls"})), Some(&record));
        assert_eq!(
            bash.response,
            Some(HookResponse::pre_tool_use(PermissionDecision::Deny))
        );
        assert_eq!(audits(&bash).len(), 1);

        let read = classifier.on_tool_invoked(&tool("Read", json!({})), Some(&record));
        assert_eq!(
            read.response,
            Some(HookResponse::pre_tool_use(PermissionDecision::Allow))
        );
    }

    #[test]
    fn classify_dispatches_on_event_kind() {
        let classifier = Classifier::new(enabled());
        let c = classifier.classify(
            &HookEvent::PromptSubmitted(prompt(Some("s1"), Some("/issue-to-impl 7"))),
            None,
        );
        assert_eq!(writes(&c)[0].workflow, Workflow::Implementation);

        let c = classifier.classify(&HookEvent::ToolInvoked(tool("TodoWrite", json!({"todos": []}))), None);
        assert_eq!(audits(&c)[0].target, "todos=0");
    }
}
