//! External scanner process execution with a hard deadline.
//!
//! Deep-scan providers shell out to a long-running external tool. The
//! contract is deliberately narrow: start, await with timeout, on expiry
//! forcibly terminate, on settle hand back the exit status and whatever
//! was printed to standard output. Parsing and fallback substitution
//! happen in the provider, so exactly one result ever reaches the
//! orchestrator — never partial or streaming output.

use crate::error::LookupError;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Settled outcome of an external scanner run.
#[derive(Debug)]
pub struct ProcessOutcome {
    /// Whether the process exited with status zero.
    pub exit_ok: bool,
    /// Captured standard output. May hold salvageable JSON even when
    /// `exit_ok` is false.
    pub stdout: String,
}

/// Run `command args...` and wait for it to settle or hit `deadline`.
///
/// The child is spawned with `kill_on_drop`, so dropping the wait future
/// on timeout forcibly terminates the process; that is the only
/// cancellation path.
///
/// # Errors
///
/// Returns [`LookupError::Timeout`] on deadline expiry (after the kill)
/// and [`LookupError::Config`] if the command cannot be spawned or waited
/// on. A non-zero exit is not an error here; the stdout may still be
/// salvageable.
pub async fn run_with_deadline(
    command: &str,
    args: &[String],
    deadline: Duration,
) -> Result<ProcessOutcome, LookupError> {
    tracing::debug!(command, ?deadline, "spawning scanner process");

    let child = Command::new(command)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| LookupError::Config(format!("failed to spawn {command}: {e}")))?;

    let output = match tokio::time::timeout(deadline, child.wait_with_output()).await {
        Ok(result) => {
            result.map_err(|e| LookupError::Config(format!("scanner wait failed: {e}")))?
        }
        Err(_) => {
            // Dropping the wait future released the child; kill_on_drop
            // has already terminated it.
            tracing::warn!(command, "scanner exceeded deadline, process killed");
            return Err(LookupError::Timeout(format!(
                "{command} exceeded {}s deadline",
                deadline.as_secs()
            )));
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let exit_ok = output.status.success();
    if !exit_ok {
        tracing::warn!(
            command,
            status = %output.status,
            stderr = %String::from_utf8_lossy(&output.stderr),
            "scanner exited non-zero"
        );
    }

    Ok(ProcessOutcome { exit_ok, stdout })
}
