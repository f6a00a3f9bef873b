// ABOUTME: Entry point for handsoff-hook — one subcommand per host lifecycle hook.
// ABOUTME: Loads config, reads the event from stdin, prints the response, and sets the exit code.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use handsoff::app::HookRunner;
use handsoff::config::{ConfigFile, HookConfig};
use handsoff::diagnostics;
use handsoff::hook::HookKind;

#[derive(Parser, Debug)]
#[command(name = "handsoff-hook")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    HANDSOFF_MODE=1     Track workflows and audit tool calls\n    HANDSOFF_DEBUG=1    Write diagnostics to the debug log"
)]
struct Cli {
    /// Directory holding per-session state files (and the audit log, unless configured elsewhere)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Enable diagnostic logging (alternative to HANDSOFF_DEBUG)
    #[arg(short = 'd', long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq)]
enum Command {
    /// Handle a UserPromptSubmit event
    UserPromptSubmit,
    /// Handle a PreToolUse event
    PreToolUse,
}

impl From<Command> for HookKind {
    fn from(command: Command) -> Self {
        match command {
            Command::UserPromptSubmit => HookKind::UserPromptSubmit,
            Command::PreToolUse => HookKind::PreToolUse,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Local .env may carry the HANDSOFF_* switches.
    let _ = dotenvy::dotenv();

    let (file, file_err) = match ConfigFile::load() {
        Ok(file) => (file, None),
        Err(err) => (ConfigFile::default(), Some(err)),
    };
    let config = HookConfig::from_env(file).with_overrides(cli.state_dir, cli.debug);

    diagnostics::init(&config);
    if let Some(err) = file_err {
        tracing::warn!(
            path = %ConfigFile::config_path().display(),
            error = %err,
            "ignoring unreadable config file"
        );
    }

    let mut raw = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut raw) {
        tracing::warn!(error = %err, "failed to read hook input");
    }

    let output = HookRunner::from_config(config).run(cli.command.into(), &raw);

    if let Some(body) = output.stdout {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", body)?;
        stdout.flush()?;
    }
    Ok(ExitCode::from(output.exit.code()))
}
