//! Video strategy: extract one frame a few seconds into the stream.
//!
//! The offset skips black lead-ins and fade-ups that make frame 0 a useless
//! preview. A stream shorter than the offset makes ffmpeg exit non-zero or
//! write nothing — that is reported verbatim as an engine failure, with
//! ffmpeg's own diagnostic as the message, not special-cased.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::exec::run_engine;
use crate::pipeline::Outcome;
use crate::tools::Toolset;
use std::ffi::OsString;
use std::path::Path;

const FFMPEG_HINT: &str = "Install ffmpeg (https://ffmpeg.org) to convert video and audio files.";

pub async fn convert(
    input: &Path,
    output: &Path,
    tools: &Toolset,
    config: &ConversionConfig,
) -> Result<Outcome, ConvertError> {
    let ffmpeg = tools.ffmpeg.path().ok_or(ConvertError::ToolMissing {
        tool: "ffmpeg",
        hint: FFMPEG_HINT,
    })?;

    // -q:v 2 is ffmpeg's high-quality JPEG setting (scale is inverted, 2-31).
    let args: Vec<OsString> = vec![
        "-y".into(),
        "-ss".into(),
        config.frame_offset_secs.to_string().into(),
        "-i".into(),
        input.into(),
        "-frames:v".into(),
        "1".into(),
        "-q:v".into(),
        "2".into(),
        output.into(),
    ];
    run_engine(ffmpeg, &args, output, config.engine_timeout).await?;

    Ok(Outcome {
        output: output.to_path_buf(),
        message: format!(
            "extracted frame at {}s with ffmpeg",
            config.frame_offset_secs
        ),
        degraded: false,
    })
}
