//! Image combiner: append produced JPEGs into one composite image.
//!
//! An optional post-pass over the batch's successful outputs. Inputs are
//! passed to ImageMagick in the caller's order; the caller is responsible
//! for pre-filtering to existing JPEGs (the session report's
//! `successful_outputs` does exactly that).

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::exec::run_engine;
use crate::tools::Toolset;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

const MAGICK_HINT: &str =
    "Install ImageMagick 7 (https://imagemagick.org) to combine images.";

/// Axis along which images are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Vertical,
    Horizontal,
}

impl Direction {
    /// magick's append operator: `-append` stacks vertically, `+append`
    /// joins horizontally.
    fn append_flag(self) -> &'static str {
        match self {
            Direction::Vertical => "-append",
            Direction::Horizontal => "+append",
        }
    }
}

/// Append `inputs` in order along `direction`, writing one composite JPEG.
pub async fn combine(
    inputs: &[PathBuf],
    output: &Path,
    direction: Direction,
    tools: &Toolset,
    config: &ConversionConfig,
) -> Result<(), ConvertError> {
    if inputs.len() < 2 {
        return Err(ConvertError::NotEnoughInputs {
            count: inputs.len(),
        });
    }
    let magick = tools.magick.path().ok_or(ConvertError::ToolMissing {
        tool: "magick",
        hint: MAGICK_HINT,
    })?;

    let mut args: Vec<OsString> = inputs.iter().map(OsString::from).collect();
    args.push(direction.append_flag().into());
    args.push("-quality".into());
    args.push(config.jpeg_quality.to_string().into());
    args.push(output.into());

    run_engine(magick, &args, output, config.engine_timeout).await?;
    info!(
        "combined {} images into {}",
        inputs.len(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fewer_than_two_inputs_fails() {
        let config = ConversionConfig::default();
        let err = combine(
            &[PathBuf::from("one.jpg")],
            Path::new("out.jpg"),
            Direction::Vertical,
            &Toolset::empty(),
            &config,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }

    #[tokio::test]
    async fn missing_magick_fails_fast() {
        let config = ConversionConfig::default();
        let err = combine(
            &[PathBuf::from("a.jpg"), PathBuf::from("b.jpg")],
            Path::new("out.jpg"),
            Direction::Horizontal,
            &Toolset::empty(),
            &config,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ConvertError::ToolMissing { tool: "magick", .. }));
    }

    #[test]
    fn append_flags() {
        assert_eq!(Direction::Vertical.append_flag(), "-append");
        assert_eq!(Direction::Horizontal.append_flag(), "+append");
    }
}
