//! The conversion dispatcher: route one file through classification,
//! pre-flight checks, and its category's strategy.
//!
//! ## Failure isolation
//!
//! The dispatcher is the boundary where every per-file error terminates.
//! Access errors, missing tools, engine failures, and even a panicking
//! strategy all become a Failed entry in the session report; batch
//! processing continues with the next file unconditionally. Exactly one
//! report entry is appended per file offered, in submission order, so the
//! report length always equals the input count.

use crate::classify::FileCategory;
use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::naming::output_file_name;
use crate::pipeline::{self, Outcome};
use crate::report::{EntryStatus, ReportEntry, SessionReport, NO_OUTPUT};
use crate::tools::Toolset;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Normalised outcome of processing one file, mirroring its report entry.
#[derive(Debug)]
pub struct ConversionResult {
    pub success: bool,
    pub message: String,
    /// The output path actually written, when `success`.
    pub output: Option<PathBuf>,
}

/// Process one file end to end and append its entry to `report`.
///
/// Never returns an error: all failure kinds are folded into a
/// `success == false` result and a Failed report entry.
pub async fn process_one(
    input: &Path,
    tools: &Toolset,
    config: &ConversionConfig,
    report: &mut SessionReport,
) -> ConversionResult {
    let source = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let category = FileCategory::from_path(input);
    let out_name = output_file_name(input);

    // Pre-flight: must exist, be non-empty, and open for reading. A failure
    // here is an access error — no strategy (and no engine) runs at all.
    if let Err(e) = preflight(input) {
        warn!(file = %source, error = %e, "pre-flight check failed");
        return record(report, source, category, None, Err(e));
    }

    if category == FileCategory::Unknown {
        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        return record(
            report,
            source,
            category,
            None,
            Err(ConvertError::UnsupportedType { extension: ext }),
        );
    }

    let output = config.output_dir.join(&out_name);
    let outcome = run_strategy(category, input, &output, tools, config).await;
    record(report, source, category, Some(out_name), outcome)
}

/// Convert a whole batch sequentially, resolving tools once up front.
///
/// Files are processed one at a time to completion; one file's failure
/// never aborts the rest. Returns the owned session report.
pub async fn convert_batch(inputs: &[PathBuf], config: &ConversionConfig) -> SessionReport {
    let tools = Toolset::resolve();
    convert_batch_with_tools(inputs, &tools, config).await
}

/// [`convert_batch`] against a caller-supplied tool snapshot.
pub async fn convert_batch_with_tools(
    inputs: &[PathBuf],
    tools: &Toolset,
    config: &ConversionConfig,
) -> SessionReport {
    info!("processing {} files", inputs.len());
    let mut report = SessionReport::new();
    for input in inputs {
        let result = process_one(input, tools, config, &mut report).await;
        if result.success {
            info!(file = %input.display(), "{}", result.message);
        } else {
            warn!(file = %input.display(), "{}", result.message);
        }
    }
    info!(
        "batch complete: {} ok, {} failed",
        report.succeeded(),
        report.failed()
    );
    report
}

/// Synchronous wrapper around [`convert_batch`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_batch_sync(
    inputs: &[PathBuf],
    config: &ConversionConfig,
) -> Result<SessionReport, ConvertError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::Internal(format!("failed to create tokio runtime: {e}")))?;
    Ok(runtime.block_on(convert_batch(inputs, config)))
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Accessibility pre-check: exists, non-empty, openable for reading.
fn preflight(path: &Path) -> Result<(), ConvertError> {
    let meta = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConvertError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConvertError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })?;
    if meta.len() == 0 {
        return Err(ConvertError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    std::fs::File::open(path).map_err(|e| ConvertError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}

/// Run the category's strategy on its own task so that even a panic inside
/// a strategy is downgraded to a Failed result instead of unwinding the
/// batch loop.
async fn run_strategy(
    category: FileCategory,
    input: &Path,
    output: &Path,
    tools: &Toolset,
    config: &ConversionConfig,
) -> Result<Outcome, ConvertError> {
    let input = input.to_path_buf();
    let output = output.to_path_buf();
    let tools = tools.clone();
    let config = config.clone();

    let handle = tokio::spawn(async move {
        match category {
            FileCategory::Image => pipeline::image::convert(&input, &output, &tools, &config).await,
            FileCategory::Pdf => pipeline::pdf::convert(&input, &output, &tools, &config).await,
            FileCategory::Video => pipeline::video::convert(&input, &output, &tools, &config).await,
            FileCategory::Audio => pipeline::audio::convert(&input, &output, &tools, &config).await,
            FileCategory::Office => {
                pipeline::office::convert(&input, &output, &tools, &config).await
            }
            FileCategory::Unknown => unreachable!("Unknown is rejected before dispatch"),
        }
    });

    handle
        .await
        .map_err(|e| ConvertError::Internal(format!("conversion strategy panicked: {e}")))?
}

/// Normalise an outcome into a report entry plus a `ConversionResult`.
fn record(
    report: &mut SessionReport,
    source: String,
    category: FileCategory,
    out_name: Option<String>,
    outcome: Result<Outcome, ConvertError>,
) -> ConversionResult {
    match outcome {
        Ok(o) => {
            report.push(ReportEntry {
                source,
                category,
                output: out_name.unwrap_or_else(|| NO_OUTPUT.into()),
                status: EntryStatus::Success,
                message: o.message.clone(),
            });
            ConversionResult {
                success: true,
                message: o.message,
                output: Some(o.output),
            }
        }
        Err(e) => {
            let message = e.to_string();
            report.push(ReportEntry {
                source,
                category,
                output: NO_OUTPUT.into(),
                status: EntryStatus::Failed,
                message: message.clone(),
            });
            ConversionResult {
                success: false,
                message,
                output: None,
            }
        }
    }
}
