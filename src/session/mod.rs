// ABOUTME: Session module — per-session workflow state persisted between hook invocations.
// ABOUTME: Written by prompt-submit events, read by pre-tool-use events.

pub mod record;
pub mod store;

pub use record::{Phase, SessionRecord, Workflow};
pub use store::SessionStore;
