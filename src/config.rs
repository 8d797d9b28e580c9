//! Configuration for a conversion session.
//!
//! Every knob lives in one [`ConversionConfig`] built through its validating
//! builder, so a whole batch shares a single immutable value that is cheap
//! to clone into strategies and easy to log. Defaults match the fixed
//! constants of the conversion templates; most callers only ever set
//! `output_dir`.

use crate::error::ConvertError;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one batch conversion session.
///
/// Built via [`ConversionConfig::builder()`] or [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use omnithumb::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .output_dir("previews")
///     .jpeg_quality(85)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ConversionConfig {
    /// Flat directory receiving every produced JPEG. Default: `.`
    ///
    /// The directory must already exist and be writable; creating it is the
    /// caller's responsibility (the CLI does so before starting a batch).
    pub output_dir: PathBuf,

    /// JPEG quality for all engine invocations. Range 1–100. Default: 92.
    pub jpeg_quality: u8,

    /// Rendering DPI for PDF page rasterisation. Range 72–400. Default: 150.
    pub pdf_dpi: u32,

    /// Video frame extraction offset in seconds. Default: 3.
    ///
    /// Streams shorter than the offset make ffmpeg fail; that failure is
    /// reported verbatim rather than special-cased.
    pub frame_offset_secs: u32,

    /// Audio waveform render size as `WxH`. Default: 640×240.
    pub waveform_size: (u32, u32),

    /// PDF placeholder image size as `WxH`. Default: 480×640.
    pub placeholder_size: (u32, u32),

    /// Optional per-engine-invocation timeout. Default: none.
    ///
    /// When set, a hung external tool is killed and the file is recorded as
    /// Failed instead of hanging the whole batch.
    #[serde(skip)]
    pub engine_timeout: Option<Duration>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            jpeg_quality: 92,
            pdf_dpi: 150,
            frame_offset_secs: 3,
            waveform_size: (640, 240),
            placeholder_size: (480, 640),
            engine_timeout: None,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn jpeg_quality(mut self, q: u8) -> Self {
        self.config.jpeg_quality = q.clamp(1, 100);
        self
    }

    pub fn pdf_dpi(mut self, dpi: u32) -> Self {
        self.config.pdf_dpi = dpi.clamp(72, 400);
        self
    }

    pub fn frame_offset_secs(mut self, secs: u32) -> Self {
        self.config.frame_offset_secs = secs;
        self
    }

    pub fn waveform_size(mut self, width: u32, height: u32) -> Self {
        self.config.waveform_size = (width.max(16), height.max(16));
        self
    }

    pub fn placeholder_size(mut self, width: u32, height: u32) -> Self {
        self.config.placeholder_size = (width.max(16), height.max(16));
        self
    }

    pub fn engine_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.engine_timeout = timeout;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        if c.jpeg_quality == 0 || c.jpeg_quality > 100 {
            return Err(ConvertError::InvalidConfig(format!(
                "JPEG quality must be 1-100, got {}",
                c.jpeg_quality
            )));
        }
        if c.pdf_dpi < 72 || c.pdf_dpi > 400 {
            return Err(ConvertError::InvalidConfig(format!(
                "PDF DPI must be 72-400, got {}",
                c.pdf_dpi
            )));
        }
        if c.output_dir.as_os_str().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "output directory must not be empty".into(),
            ));
        }
        if let Some(t) = c.engine_timeout {
            if t.is_zero() {
                return Err(ConvertError::InvalidConfig(
                    "engine timeout must be greater than zero".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = ConversionConfig::builder().build().unwrap();
        assert_eq!(c.jpeg_quality, 92);
        assert_eq!(c.pdf_dpi, 150);
        assert_eq!(c.frame_offset_secs, 3);
        assert!(c.engine_timeout.is_none());
    }

    #[test]
    fn quality_is_clamped() {
        let c = ConversionConfig::builder().jpeg_quality(200).build().unwrap();
        assert_eq!(c.jpeg_quality, 100);
        let c = ConversionConfig::builder().jpeg_quality(0).build().unwrap();
        assert_eq!(c.jpeg_quality, 1);
    }

    #[test]
    fn dpi_is_clamped() {
        let c = ConversionConfig::builder().pdf_dpi(10_000).build().unwrap();
        assert_eq!(c.pdf_dpi, 400);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ConversionConfig::builder()
            .engine_timeout(Some(Duration::ZERO))
            .build();
        assert!(err.is_err());
    }

    #[test]
    fn empty_output_dir_is_rejected() {
        let err = ConversionConfig::builder().output_dir("").build();
        assert!(err.is_err());
    }
}
