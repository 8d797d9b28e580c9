//! Per-category conversion strategies.
//!
//! Each strategy is a pure function of `(input, output, tool snapshot,
//! config)` returning an [`Outcome`] on success or a
//! [`crate::error::ConvertError`] on failure. Strategies never touch the
//! session report — normalising outcomes into report entries is the
//! dispatcher's job.

pub mod audio;
pub mod image;
pub mod office;
pub mod pdf;
pub mod placeholder;
pub mod video;

use std::path::PathBuf;

/// A successful strategy result.
///
/// `degraded` marks outputs that are not the intended full-fidelity
/// conversion (a PDF placeholder, an image whose metadata copy was skipped).
/// Degraded outcomes still count as successes; the message discloses the
/// degradation.
#[derive(Debug)]
pub struct Outcome {
    /// The output file actually written.
    pub output: PathBuf,
    /// Human-readable description of how the conversion was achieved.
    pub message: String,
    /// True when the output is a stand-in rather than a real conversion.
    pub degraded: bool,
}
