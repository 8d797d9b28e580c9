//! Office strategy: LibreOffice renders the document to an intermediate
//! PDF, which is then handed to the PDF fallback chain.
//!
//! The intermediate lives in a `TempDir` so it is deleted when this function
//! returns, whatever the outcome. LibreOffice is an optional collaborator:
//! when it is absent or fails, the file is Failed with a message naming the
//! dependency rather than silently skipped.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::exec::run_engine;
use crate::pipeline::{pdf, Outcome};
use crate::tools::Toolset;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use tracing::debug;

const LIBREOFFICE_HINT: &str =
    "Install LibreOffice (https://libreoffice.org) to convert office documents.";

pub async fn convert(
    input: &Path,
    output: &Path,
    tools: &Toolset,
    config: &ConversionConfig,
) -> Result<Outcome, ConvertError> {
    let soffice = tools.soffice.path().ok_or(ConvertError::ToolMissing {
        tool: "soffice",
        hint: LIBREOFFICE_HINT,
    })?;

    // Scratch directory for the intermediate PDF; dropped (and deleted)
    // on every exit path.
    let scratch = tempfile::tempdir()
        .map_err(|e| ConvertError::Internal(format!("cannot create scratch dir: {e}")))?;

    // soffice names its output `<input stem>.pdf` inside --outdir.
    let stem = input.file_stem().unwrap_or_else(|| OsStr::new("document"));
    let mut intermediate_name = stem.to_os_string();
    intermediate_name.push(".pdf");
    let intermediate = scratch.path().join(intermediate_name);

    let args: Vec<OsString> = vec![
        "--headless".into(),
        "--convert-to".into(),
        "pdf".into(),
        "--outdir".into(),
        scratch.path().into(),
        input.into(),
    ];
    run_engine(soffice, &args, &intermediate, config.engine_timeout)
        .await
        .map_err(|e| match e {
            ConvertError::EngineFailed { engine, detail } => ConvertError::EngineFailed {
                engine,
                detail: format!("{detail} (LibreOffice is required for office document previews)"),
            },
            other => other,
        })?;
    debug!(intermediate = %intermediate.display(), "office document rendered to PDF");

    let inner = pdf::convert(&intermediate, output, tools, config).await?;
    Ok(Outcome {
        output: inner.output,
        message: format!("converted via LibreOffice; {}", inner.message),
        degraded: inner.degraded,
    })
}
