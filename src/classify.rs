//! File classification: map an extension to a conversion category.
//!
//! Classification is a total function over a fixed extension table — an
//! extension the table does not know maps to [`FileCategory::Unknown`],
//! never to an error. The dispatcher turns `Unknown` into a Failed report
//! entry; nothing here does I/O.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// The conversion category of an input file, derived purely from its
/// lower-cased extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileCategory {
    /// Raster images re-encoded via the raster engine.
    Image,
    /// PDF documents, rendered page 1 through the fallback chain.
    Pdf,
    /// Video streams, one frame extracted via ffmpeg.
    Video,
    /// Audio streams, rendered as a waveform image via ffmpeg.
    Audio,
    /// Office documents, routed through LibreOffice then the PDF chain.
    Office,
    /// Everything else. Has no strategy; reported as unsupported.
    Unknown,
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "heic", "heif",
];
const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "webm", "m4v", "mpg", "mpeg", "wmv", "flv",
];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "ogg", "m4a", "aac", "wma", "opus"];
const OFFICE_EXTENSIONS: &[&str] = &[
    "doc", "docx", "xls", "xlsx", "ppt", "pptx", "odt", "ods", "odp", "rtf",
];

impl FileCategory {
    /// Classify by extension. Case-insensitive; a leading dot is accepted
    /// and stripped.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        let ext = ext.as_str();
        if ext == "pdf" {
            FileCategory::Pdf
        } else if IMAGE_EXTENSIONS.contains(&ext) {
            FileCategory::Image
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            FileCategory::Video
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            FileCategory::Audio
        } else if OFFICE_EXTENSIONS.contains(&ext) {
            FileCategory::Office
        } else {
            FileCategory::Unknown
        }
    }

    /// Classify a path by its extension. Extension-less paths are `Unknown`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => Self::from_extension(ext),
            None => FileCategory::Unknown,
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Image => "image",
            FileCategory::Pdf => "pdf",
            FileCategory::Video => "video",
            FileCategory::Audio => "audio",
            FileCategory::Office => "office",
            FileCategory::Unknown => "unknown",
        };
        f.write_str(s)
    }
}
