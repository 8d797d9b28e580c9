//! Audio strategy: render the stream's waveform as a single image.
//!
//! There is no frame to grab from an audio file, so the preview is a
//! fixed-resolution `showwavespic` visualisation of the sole audio stream.

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

    let (w, h) = config.waveform_size;
    let args: Vec<OsString> = vec![
        "-y".into(),
        "-i".into(),
        input.into(),
        "-filter_complex".into(),
        format!("showwavespic=s={w}x{h}:colors=steelblue").into(),
        "-frames:v".into(),
        "1".into(),
        output.into(),
    ];
    run_engine(ffmpeg, &args, output, config.engine_timeout).await?;

    Ok(Outcome {
        output: output.to_path_buf(),
        message: format!("rendered {w}x{h} waveform with ffmpeg"),
        degraded: false,
    })
}
