// ABOUTME: Configuration loading for the handsoff hooks.
// ABOUTME: Reads ~/.handsoff/config.toml for paths, then HANDSOFF_MODE / HANDSOFF_DEBUG switches.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

/// Environment switch for the whole observation feature.
pub const MODE_ENV: &str = "HANDSOFF_MODE";
/// Environment switch for verbose diagnostic logging.
pub const DEBUG_ENV: &str = "HANDSOFF_DEBUG";

/// File name of the audit log when it lives in the state directory.
pub const AUDIT_FILE_NAME: &str = "tool-used.txt";

/// Values (compared case-insensitively) that turn a switch on.
pub const TRUTHY_TOKENS: &[&str] = &["1", "true", "on", "enable"];

/// Whether an environment value turns a switch on. Absent means off.
pub fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        let v = v.to_lowercase();
        TRUTHY_TOKENS.contains(&v.as_str())
    })
}

/// Contents of the optional config file. Switches are environment-only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub paths: PathsConfig,
    pub audit: AuditConfig,
}

/// Where state, audit records, and diagnostics live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub state_dir: PathBuf,
    /// Defaults to `tool-used.txt` inside `state_dir`.
    pub audit_log: Option<PathBuf>,
    pub debug_log: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(".tmp/hooked-sessions"),
            audit_log: None,
            debug_log: PathBuf::from(".tmp/hook-debug.log"),
        }
    }
}

/// Audit record shaping.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Maximum characters kept when an unknown tool's payload is rendered.
    pub fallback_target_len: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            fallback_target_len: 100,
        }
    }
}

impl ConfigFile {
    /// Load config from ~/.handsoff/config.toml, falling back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path (for testing).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".handsoff")
            .join("config.toml")
    }
}

/// Resolved configuration handed to the classifier and runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    pub observation_enabled: bool,
    pub diagnostics_enabled: bool,
    pub state_dir: PathBuf,
    pub audit_log: PathBuf,
    pub debug_log: PathBuf,
    pub fallback_target_len: usize,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self::from_lookup(ConfigFile::default(), |_| None)
    }
}

impl HookConfig {
    /// Resolve switches from the process environment.
    pub fn from_env(file: ConfigFile) -> Self {
        Self::from_lookup(file, |key| std::env::var(key).ok())
    }

    /// Resolve switches through an arbitrary lookup, so tests need not touch the environment.
    pub fn from_lookup<F>(file: ConfigFile, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let paths = file.paths;
        let audit_log = paths
            .audit_log
            .unwrap_or_else(|| paths.state_dir.join(AUDIT_FILE_NAME));
        Self {
            observation_enabled: is_truthy(lookup(MODE_ENV).as_deref()),
            diagnostics_enabled: is_truthy(lookup(DEBUG_ENV).as_deref()),
            state_dir: paths.state_dir,
            audit_log,
            debug_log: paths.debug_log,
            fallback_target_len: file.audit.fallback_target_len,
        }
    }

    /// Apply command-line overrides.
    ///
    /// A new state directory takes the audit log with it when the log sat in
    /// the old one. The debug log never moves.
    pub fn with_overrides(mut self, state_dir: Option<PathBuf>, debug: bool) -> Self {
        if let Some(state_dir) = state_dir {
            if self.audit_log == self.state_dir.join(AUDIT_FILE_NAME) {
                self.audit_log = state_dir.join(AUDIT_FILE_NAME);
            }
            self.state_dir = state_dir;
        }
        if debug {
            self.diagnostics_enabled = true;
        }
        self
    }
}
