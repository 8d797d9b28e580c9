//! Image strategy: re-encode through ImageMagick, then copy metadata tags.
//!
//! The primary conversion strips non-essential chunks and re-encodes at the
//! session's JPEG quality. If exiftool is installed, EXIF/IPTC/XMP tags are
//! copied from the original onto the output in place afterwards — a failure
//! there is logged and disclosed but never flips the overall result, since
//! the conversion itself already succeeded.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::exec::run_engine;
use crate::pipeline::Outcome;
use crate::tools::Toolset;
use std::ffi::OsString;
use std::path::Path;
use tracing::warn;

const MAGICK_HINT: &str =
    "Install ImageMagick 7 (https://imagemagick.org) to convert images.";

pub async fn convert(
    input: &Path,
    output: &Path,
    tools: &Toolset,
    config: &ConversionConfig,
) -> Result<Outcome, ConvertError> {
    let magick = tools.magick.path().ok_or(ConvertError::ToolMissing {
        tool: "magick",
        hint: MAGICK_HINT,
    })?;

    let args: Vec<OsString> = vec![
        input.into(),
        "-strip".into(),
        "-quality".into(),
        config.jpeg_quality.to_string().into(),
        output.into(),
    ];
    run_engine(magick, &args, output, config.engine_timeout).await?;

    // Metadata copy is best-effort: the JPEG is already written.
    let message = match tools.exiftool.path() {
        Some(exiftool) => {
            let tag_args: Vec<OsString> = vec![
                "-TagsFromFile".into(),
                input.into(),
                "-overwrite_original".into(),
                output.into(),
            ];
            match run_engine(exiftool, &tag_args, output, config.engine_timeout).await {
                Ok(_) => return Ok(Outcome {
                    output: output.to_path_buf(),
                    message: "converted with ImageMagick, metadata preserved".into(),
                    degraded: false,
                }),
                Err(e) => {
                    warn!(input = %input.display(), error = %e, "metadata copy failed");
                    format!("converted with ImageMagick; metadata copy failed: {e}")
                }
            }
        }
        None => "converted with ImageMagick; exiftool not installed, metadata not copied".into(),
    };

    Ok(Outcome {
        output: output.to_path_buf(),
        message,
        degraded: true,
    })
}
