//! External tool discovery: resolve which conversion engines are installed.
//!
//! Resolution happens once per batch and the resulting [`Toolset`] is an
//! immutable snapshot passed down to every strategy — tools are not
//! re-probed mid-run, so behaviour stays consistent even if the environment
//! changes while a batch is in flight.
//!
//! Each tool is searched in order, most standard location first:
//!
//! 1. a PATH lookup for the exact binary name (first hit wins);
//! 2. a tool-specific `<TOOL>_DIR` environment variable naming an install
//!    directory, joined with the binary name and accepted only if the
//!    resulting path exists.
//!
//! Ghostscript tries two binary name variants (`gs`, then the Windows
//! `gswin64c`) before falling back to its environment variable. Absence is
//! a normal, representable state — resolution never errors.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// How a tool's binary was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Discovery {
    /// Found via a system PATH lookup.
    Path,
    /// Found via the tool's `<TOOL>_DIR` environment variable.
    EnvDir,
}

/// Resolution state of a single external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ToolStatus {
    /// Resolved to an absolute binary path.
    Found { path: PathBuf, via: Discovery },
    /// Not installed anywhere we looked.
    Missing,
}

impl ToolStatus {
    /// The resolved binary path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ToolStatus::Found { path, .. } => Some(path),
            ToolStatus::Missing => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ToolStatus::Found { .. })
    }
}

/// Immutable per-session snapshot of every external engine's availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toolset {
    /// ffmpeg — video frame extraction and audio waveform rendering.
    pub ffmpeg: ToolStatus,
    /// ImageMagick — raster re-encoding, PDF delegate tier, combining.
    pub magick: ToolStatus,
    /// Ghostscript — direct PDF page rendering.
    pub ghostscript: ToolStatus,
    /// exiftool — EXIF/IPTC/XMP tag copying onto converted images.
    pub exiftool: ToolStatus,
    /// LibreOffice (`soffice`) — office document to PDF conversion.
    pub soffice: ToolStatus,
}

impl Toolset {
    /// Probe the system once and return the availability snapshot.
    ///
    /// Idempotent and side-effect free; repeated calls in an unchanged
    /// environment yield identical results. Callers should still reuse one
    /// snapshot per batch to avoid redundant filesystem probing.
    pub fn resolve() -> Self {
        let snapshot = Self {
            ffmpeg: resolve_tool(&["ffmpeg"], "FFMPEG_DIR"),
            magick: resolve_tool(&["magick"], "MAGICK_DIR"),
            ghostscript: resolve_tool(&["gs", "gswin64c"], "GHOSTSCRIPT_DIR"),
            exiftool: resolve_tool(&["exiftool"], "EXIFTOOL_DIR"),
            soffice: resolve_tool(&["soffice"], "SOFFICE_DIR"),
        };
        debug!(?snapshot, "resolved external tools");
        snapshot
    }

    /// A snapshot with every tool absent.
    ///
    /// Useful for exercising degraded paths (e.g. the PDF placeholder tier)
    /// without manipulating PATH.
    pub fn empty() -> Self {
        Self {
            ffmpeg: ToolStatus::Missing,
            magick: ToolStatus::Missing,
            ghostscript: ToolStatus::Missing,
            exiftool: ToolStatus::Missing,
            soffice: ToolStatus::Missing,
        }
    }
}

/// Resolve one tool: each binary name on PATH first, then the env-var
/// install directory joined with each name.
fn resolve_tool(binary_names: &[&str], env_var: &str) -> ToolStatus {
    for name in binary_names {
        if let Ok(path) = which::which(name) {
            debug!(tool = name, path = %path.display(), "found on PATH");
            return ToolStatus::Found {
                path,
                via: Discovery::Path,
            };
        }
    }

    if let Ok(dir) = std::env::var(env_var) {
        if !dir.is_empty() {
            for name in binary_names {
                let candidate = PathBuf::from(&dir).join(name);
                if candidate.is_file() {
                    debug!(tool = name, path = %candidate.display(), "found via {env_var}");
                    return ToolStatus::Found {
                        path: candidate,
                        via: Discovery::EnvDir,
                    };
                }
            }
        }
    }

    ToolStatus::Missing
}
