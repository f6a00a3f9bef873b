// ABOUTME: Hook runner — wires the classifier to the session store, audit sink, and stdout.
// ABOUTME: Parses one stdin payload, applies the classifier's effects, and returns what to print.

use crate::audit::{AuditRecord, AuditSink, FileAuditSink};
use crate::config::HookConfig;
use crate::hook::{
    AllowAll, Classification, Classifier, Effect, ExitStatus, HookEvent, HookKind,
    PermissionDecision, SYSTEM_SESSION, ToolPolicy,
};
use crate::session::SessionStore;

/// What the process should print and how it should exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutput {
    pub stdout: Option<String>,
    pub exit: ExitStatus,
}

/// Runs a single hook invocation end to end.
pub struct HookRunner<S = FileAuditSink, P = AllowAll> {
    classifier: Classifier<P>,
    store: SessionStore,
    sink: S,
}

impl HookRunner {
    /// Runner with file-backed state and audit log at the configured paths.
    pub fn from_config(config: HookConfig) -> Self {
        let store = SessionStore::new(&config.state_dir);
        let sink = FileAuditSink::new(&config.audit_log);
        Self::new(Classifier::new(config), store, sink)
    }
}

impl<S: AuditSink, P: ToolPolicy> HookRunner<S, P> {
    pub fn new(classifier: Classifier<P>, store: SessionStore, sink: S) -> Self {
        Self {
            classifier,
            store,
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Handle one raw stdin payload for the given hook.
    pub fn run(&mut self, kind: HookKind, raw_input: &str) -> HookOutput {
        let classification = self.classify(kind, raw_input);
        let Classification {
            response,
            exit,
            effects,
        } = classification;

        self.apply(effects);

        let stdout = response.and_then(|r| match r.to_json() {
            Ok(json) => Some(json),
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize hook response");
                None
            }
        });
        HookOutput { stdout, exit }
    }

    fn classify(&self, kind: HookKind, raw_input: &str) -> Classification {
        let observing = self.classifier.config().observation_enabled;

        // A disabled prompt hook exits before looking at its input.
        if kind == HookKind::UserPromptSubmit && !observing {
            return self
                .classifier
                .on_prompt_submitted(&Default::default());
        }

        let event = match kind.parse_event(raw_input) {
            Ok(event) => event,
            Err(err) => return self.malformed_input(kind, &err),
        };

        let record = match &event {
            HookEvent::ToolInvoked(input) if observing => self.store.read(&input.session_id),
            _ => None,
        };
        self.classifier.classify(&event, record.as_ref())
    }

    fn malformed_input(&self, kind: HookKind, err: &serde_json::Error) -> Classification {
        match kind {
            HookKind::UserPromptSubmit => {
                Classification::blocked(format!("Invalid hook input: {}", err))
            }
            // Tool calls are never held up by the observer, even on garbage input.
            HookKind::PreToolUse => Classification::tool_decision(
                PermissionDecision::Allow,
                vec![Effect::Diagnostic {
                    session_id: SYSTEM_SESSION.to_string(),
                    message: format!("Invalid hook input: {}", err),
                }],
            ),
        }
    }

    /// Perform side effects. Failures are logged and otherwise ignored.
    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::WriteSession { session_id, record } => {
                    if let Err(err) = self.store.write(&session_id, &record) {
                        tracing::warn!(
                            session_id = %session_id,
                            error = %err,
                            "failed to write session state"
                        );
                    }
                }
                Effect::Audit(observation) => {
                    let record = AuditRecord::now(observation);
                    if let Err(err) = self.sink.append(&record) {
                        tracing::debug!(
                            session_id = %record.observation.session_id,
                            error = %err,
                            "dropped audit record"
                        );
                    }
                }
                Effect::Diagnostic {
                    session_id,
                    message,
                } => {
                    tracing::info!(session_id = %session_id, "{}", message);
                }
            }
        }
    }
}
