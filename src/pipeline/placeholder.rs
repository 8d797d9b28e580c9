//! Degraded PDF tier: synthesise a neutral placeholder JPEG.
//!
//! When ImageMagick is present its label renderer annotates the placeholder
//! with the original filename. Without it (or when it fails too) we fall
//! back to a plain neutral image written with the `image` crate — no
//! external tools at all — so the batch can always record a visible,
//! honestly-disclosed stand-in instead of nothing.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::exec::run_engine;
use crate::pipeline::Outcome;
use crate::tools::Toolset;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Neutral light grey, readable as "intentionally blank".
const FILL: Rgb<u8> = Rgb([208, 208, 208]);

pub async fn generate(
    input: &Path,
    output: &Path,
    tools: &Toolset,
    config: &ConversionConfig,
) -> Result<Outcome, ConvertError> {
    let message =
        String::from("generated placeholder image; full PDF support requires installing Ghostscript");

    // Annotated variant via magick, when available.
    if let Some(magick) = tools.magick.path() {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".into());
        let label = format!("{file_name}\n\nPDF preview unavailable\ninstall Ghostscript");
        let (w, h) = config.placeholder_size;
        let args: Vec<OsString> = vec![
            "-size".into(),
            format!("{w}x{h}").into(),
            "xc:#d0d0d0".into(),
            "-gravity".into(),
            "center".into(),
            "-pointsize".into(),
            "20".into(),
            "-annotate".into(),
            "+0+0".into(),
            label.into(),
            output.into(),
        ];
        if run_engine(magick, &args, output, config.engine_timeout)
            .await
            .is_ok()
        {
            debug!(output = %output.display(), "annotated placeholder written via magick");
            return Ok(Outcome {
                output: output.to_path_buf(),
                message,
                degraded: true,
            });
        }
        // Fall through to the built-in renderer.
    }

    write_plain(output, config)?;
    debug!(output = %output.display(), "plain placeholder written");
    Ok(Outcome {
        output: output.to_path_buf(),
        message,
        degraded: true,
    })
}

/// Write an unannotated neutral JPEG with no external tools.
fn write_plain(output: &Path, config: &ConversionConfig) -> Result<(), ConvertError> {
    let (w, h) = config.placeholder_size;
    let canvas = RgbImage::from_pixel(w, h, FILL);

    let file = File::create(output).map_err(|e| ConvertError::Internal(format!(
        "cannot create placeholder '{}': {e}",
        output.display()
    )))?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, config.jpeg_quality);
    canvas
        .write_with_encoder(encoder)
        .map_err(|e| ConvertError::Internal(format!("placeholder encode failed: {e}")))?;
    Ok(())
}
