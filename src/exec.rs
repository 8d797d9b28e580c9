//! Structured engine invocation.
//!
//! Every external tool is spawned with an argument vector — never through a
//! shell — so paths with spaces or quote characters cannot break a command
//! line, and tests can substitute fake executables freely.
//!
//! Success requires BOTH a zero exit status AND the expected output file
//! existing non-empty afterwards. Some engines (notably Ghostscript) exit
//! zero after writing nothing useful, so exit status alone is not trusted.

use crate::error::ConvertError;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Captured output of a successful engine invocation.
#[derive(Debug)]
pub struct EngineRun {
    pub stdout: String,
    pub stderr: String,
}

/// Run `program` with `args`, then verify that `expected_output` was
/// produced.
///
/// With a `timeout`, the child is killed on expiry and the invocation is
/// reported as [`ConvertError::EngineTimeout`]; without one the call blocks
/// until the engine exits.
pub async fn run_engine(
    program: &Path,
    args: &[impl AsRef<OsStr>],
    expected_output: &Path,
    timeout: Option<Duration>,
) -> Result<EngineRun, ConvertError> {
    let engine = engine_name(program);
    debug!(engine = %engine, "spawning engine process");

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match timeout {
        Some(limit) => match tokio::time::timeout(limit, command.output()).await {
            Ok(result) => result,
            Err(_) => {
                // kill_on_drop reaps the child when the future is dropped.
                warn!(engine = %engine, "engine exceeded timeout, killed");
                return Err(ConvertError::EngineTimeout {
                    engine,
                    secs: limit.as_secs(),
                });
            }
        },
        None => command.output().await,
    };

    let output = output.map_err(|e| ConvertError::EngineFailed {
        engine: engine.clone(),
        detail: format!("failed to spawn: {e}"),
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(ConvertError::EngineFailed {
            engine,
            detail: diagnostic(&stderr, &stdout, &output.status.to_string()),
        });
    }

    let produced = std::fs::metadata(expected_output)
        .map(|m| m.len() > 0)
        .unwrap_or(false);
    if !produced {
        return Err(ConvertError::EngineFailed {
            engine,
            detail: format!(
                "exited successfully but did not produce '{}'",
                expected_output.display()
            ),
        });
    }

    debug!(engine = %engine, output = %expected_output.display(), "engine run ok");
    Ok(EngineRun { stdout, stderr })
}

/// Short engine name for messages: the binary filename, not the full path.
pub fn engine_name(program: &Path) -> String {
    program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

/// Pick the most useful diagnostic text from a failed run.
fn diagnostic(stderr: &str, stdout: &str, status: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    status.to_string()
}
