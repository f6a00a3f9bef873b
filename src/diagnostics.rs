// ABOUTME: Diagnostic logging setup — tracing to the debug log file when HANDSOFF_DEBUG is on.
// ABOUTME: Otherwise only warnings reach stderr; stdout is reserved for the hook response.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::HookConfig;

/// The fmt subscriber used for diagnostics, whichever writer it ends up with.
pub type DiagnosticSubscriber =
    tracing_subscriber::fmt::Subscriber<DefaultFields, Format, EnvFilter, BoxMakeWriter>;

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init(config: &HookConfig) {
    match subscriber(config) {
        Ok(subscriber) => {
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
        Err(err) => {
            let _ = tracing::subscriber::set_global_default(stderr_subscriber("handsoff=debug"));
            tracing::warn!(
                path = %config.debug_log.display(),
                error = %err,
                "cannot open debug log, logging to stderr"
            );
        }
    }
}

/// Build the subscriber for `config`: the debug log when diagnostics are on, stderr otherwise.
///
/// Fails only when diagnostics are on and the debug log cannot be opened.
pub fn subscriber(config: &HookConfig) -> std::io::Result<DiagnosticSubscriber> {
    if !config.diagnostics_enabled {
        return Ok(stderr_subscriber("warn"));
    }
    let file = open_log(&config.debug_log)?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter("handsoff=debug"))
        .with_writer(BoxMakeWriter::new(Mutex::new(file)))
        .with_ansi(false)
        .finish())
}

fn stderr_subscriber(default_directive: &str) -> DiagnosticSubscriber {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default_directive))
        .with_writer(BoxMakeWriter::new(std::io::stderr))
        .finish()
}

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
