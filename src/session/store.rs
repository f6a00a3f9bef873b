// ABOUTME: Session state store — one JSON file per session id under the state directory.
// ABOUTME: Writes are atomic (tmp + rename); unreadable or corrupt files read back as no state.

use std::path::{Component, Path, PathBuf};

use crate::error::{HookError, Result};
use crate::session::record::SessionRecord;

/// File-backed store of [`SessionRecord`]s keyed by session id.
#[derive(Debug, Clone)]
pub struct SessionStore {
    state_dir: PathBuf,
}

impl SessionStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Path to the record file for a session id.
    ///
    /// Session ids come from the host and become file names, so anything that
    /// is not a single plain path component is rejected.
    pub fn record_path(&self, session_id: &str) -> Result<PathBuf> {
        let mut components = Path::new(session_id).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None)
                if name == session_id && !session_id.contains('\\') =>
            {
                Ok(self.state_dir.join(format!("{}.json", session_id)))
            }
            _ => Err(HookError::InvalidSessionId(session_id.to_string())),
        }
    }

    /// Replace the record for a session (atomic write via tmp + rename).
    pub fn write(&self, session_id: &str, record: &SessionRecord) -> Result<()> {
        let path = self.record_path(session_id)?;
        std::fs::create_dir_all(&self.state_dir)?;
        let tmp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string(record)?;
        std::fs::write(&tmp_path, &content)?;
        std::fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Load a record, distinguishing "never written" from failures.
    pub fn load(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        let path = self.record_path(session_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let record: SessionRecord = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    /// Last successfully written record, or `None`. Failures count as no state.
    pub fn read(&self, session_id: &str) -> Option<SessionRecord> {
        match self.load(session_id) {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(session_id, error = %err, "ignoring unreadable session state");
                None
            }
        }
    }
}
