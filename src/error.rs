//! Error types for the omnithumb library.
//!
//! The taxonomy mirrors how failures surface during a batch run:
//!
//! * **Access errors** — the input file is missing, empty, or unreadable.
//!   Detected by the dispatcher's pre-flight check before any engine runs.
//! * **Dependency-absence errors** — a required external tool could not be
//!   resolved. The message carries an actionable install hint.
//! * **Engine errors** — the external tool ran but exited non-zero or did
//!   not produce the expected output file. The message carries the engine's
//!   raw diagnostic output.
//! * **Internal errors** — anything unexpected inside a strategy.
//!
//! None of these abort a batch: the dispatcher folds every [`ConvertError`]
//! into a Failed entry in the session report, so one bad file never takes
//! down the run. The only errors that escape to the caller are configuration
//! and combiner errors raised outside the per-file loop.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the omnithumb library.
///
/// Per-file errors are terminated at the dispatcher boundary and recorded in
/// the [`crate::report::SessionReport`]; they never abort batch processing.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Access errors ─────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Input file exists but is zero bytes long.
    #[error("file is empty: '{path}'")]
    EmptyFile { path: PathBuf },

    /// Input file exists but could not be opened for reading.
    #[error("cannot read '{path}': {reason}")]
    Unreadable { path: PathBuf, reason: String },

    // ── Classification ────────────────────────────────────────────────────
    /// No conversion strategy exists for the file's extension.
    #[error("unsupported file type: '.{extension}'")]
    UnsupportedType { extension: String },

    // ── Dependency absence ────────────────────────────────────────────────
    /// A tool required by the selected strategy is not installed.
    #[error("required tool '{tool}' is not installed.\n{hint}")]
    ToolMissing { tool: &'static str, hint: &'static str },

    // ── Engine errors ─────────────────────────────────────────────────────
    /// The external tool ran but did not succeed.
    ///
    /// "Did not succeed" means a non-zero exit status OR a missing/empty
    /// output file — exit status alone is not trusted.
    #[error("{engine} failed: {detail}")]
    EngineFailed { engine: String, detail: String },

    /// The external tool exceeded the configured timeout and was killed.
    #[error("{engine} timed out after {secs}s and was killed")]
    EngineTimeout { engine: String, secs: u64 },

    // ── Combiner errors ───────────────────────────────────────────────────
    /// The combiner needs at least two images to append.
    #[error("combining requires at least 2 images, got {count}")]
    NotEnoughInputs { count: usize },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConvertError {
    /// True for errors raised by the pre-flight accessibility check.
    ///
    /// These are recorded distinctly from engine failures: no conversion was
    /// ever attempted for the file.
    pub fn is_access(&self) -> bool {
        matches!(
            self,
            ConvertError::FileNotFound { .. }
                | ConvertError::EmptyFile { .. }
                | ConvertError::Unreadable { .. }
        )
    }
}
