// ABOUTME: Audit module — append-only log of classified tool invocations.
// ABOUTME: Best-effort: a failed append never changes the hook's response.

pub mod record;
pub mod sink;

pub use record::{AuditRecord, ToolObservation};
pub use sink::{AuditSink, FileAuditSink};
