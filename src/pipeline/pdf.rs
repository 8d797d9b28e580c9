//! PDF strategy: a three-tier fallback chain rendering page 1 to JPEG.
//!
//! Tiers are tried in order and the chain stops at the first one that
//! produces a file:
//!
//! 1. **Ghostscript** — direct render at the configured DPI with
//!    anti-aliasing enabled.
//! 2. **ImageMagick delegate** — magick rasterises via its Ghostscript
//!    backend, flattened against white to remove transparency.
//! 3. **Placeholder** — a synthesised neutral image; always a degraded
//!    success, never a silent one.
//!
//! A tier that is unavailable or fails logs a warning and yields to the
//! next; only when even the placeholder cannot be written does the whole
//! strategy fail, with a message directing the operator at Ghostscript.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::exec::run_engine;
use crate::pipeline::{placeholder, Outcome};
use crate::tools::Toolset;
use std::ffi::OsString;
use std::path::Path;
use tracing::{debug, warn};

pub(crate) const GHOSTSCRIPT_HINT: &str =
    "Install Ghostscript (https://ghostscript.com) for full PDF rendering.";

/// One fallback method in the rendering chain, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Ghostscript,
    MagickDelegate,
    Placeholder,
}

const TIERS: [Tier; 3] = [Tier::Ghostscript, Tier::MagickDelegate, Tier::Placeholder];

pub async fn convert(
    input: &Path,
    output: &Path,
    tools: &Toolset,
    config: &ConversionConfig,
) -> Result<Outcome, ConvertError> {
    for tier in TIERS {
        match run_tier(tier, input, output, tools, config).await {
            Some(outcome) => {
                debug!(?tier, input = %input.display(), "PDF tier succeeded");
                return Ok(outcome);
            }
            None => {
                debug!(?tier, input = %input.display(), "PDF tier yielded no file, falling through");
            }
        }
    }

    Err(ConvertError::ToolMissing {
        tool: "ghostscript",
        hint: GHOSTSCRIPT_HINT,
    })
}

/// Attempt one tier. `None` means "did not yield a file" — whether the tool
/// is absent or the engine failed — and hands control to the next tier.
async fn run_tier(
    tier: Tier,
    input: &Path,
    output: &Path,
    tools: &Toolset,
    config: &ConversionConfig,
) -> Option<Outcome> {
    match tier {
        Tier::Ghostscript => {
            let gs = tools.ghostscript.path()?;
            let mut out_flag = OsString::from("-sOutputFile=");
            out_flag.push(output);
            let args: Vec<OsString> = vec![
                "-dNOPAUSE".into(),
                "-dBATCH".into(),
                "-dSAFER".into(),
                "-sDEVICE=jpeg".into(),
                "-dFirstPage=1".into(),
                "-dLastPage=1".into(),
                format!("-r{}", config.pdf_dpi).into(),
                "-dTextAlphaBits=4".into(),
                "-dGraphicsAlphaBits=4".into(),
                format!("-dJPEGQ={}", config.jpeg_quality).into(),
                out_flag,
                input.into(),
            ];
            match run_engine(gs, &args, output, config.engine_timeout).await {
                Ok(_) => Some(Outcome {
                    output: output.to_path_buf(),
                    message: "rendered page 1 with Ghostscript".into(),
                    degraded: false,
                }),
                Err(e) => {
                    warn!(input = %input.display(), error = %e, "Ghostscript tier failed");
                    None
                }
            }
        }
        Tier::MagickDelegate => {
            let magick = tools.magick.path()?;
            // magick's PDF coder delegates to Ghostscript internally;
            // the `[0]` selector limits rasterisation to the first page.
            let mut first_page = OsString::from(input);
            first_page.push("[0]");
            let args: Vec<OsString> = vec![
                "-density".into(),
                config.pdf_dpi.to_string().into(),
                first_page,
                "-background".into(),
                "white".into(),
                "-flatten".into(),
                "-quality".into(),
                config.jpeg_quality.to_string().into(),
                output.into(),
            ];
            match run_engine(magick, &args, output, config.engine_timeout).await {
                Ok(_) => Some(Outcome {
                    output: output.to_path_buf(),
                    message: "rendered page 1 via ImageMagick (Ghostscript delegate)".into(),
                    degraded: false,
                }),
                Err(e) => {
                    warn!(input = %input.display(), error = %e, "ImageMagick delegate tier failed");
                    None
                }
            }
        }
        Tier::Placeholder => match placeholder::generate(input, output, tools, config).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!(input = %input.display(), error = %e, "placeholder generation failed");
                None
            }
        },
    }
}
