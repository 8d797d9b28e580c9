//! # omnithumb
//!
//! Batch-convert mixed media files into uniform JPEG previews.
//!
//! ## Why this crate?
//!
//! A folder of field data rarely contains one kind of file: photos sit next
//! to PDFs, voice memos, screen recordings, and spreadsheets. Anything that
//! wants to show "one preview per file" has to speak to five different
//! external engines, each with its own failure modes. This crate wraps them
//! behind one dispatcher that classifies each file, picks a conversion
//! strategy, and records a uniform result — degrading gracefully (down to a
//! placeholder image) instead of failing the batch when a tool is missing.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input files
//!  │
//!  ├─ 1. Resolve   probe ffmpeg / magick / gs / exiftool / soffice once
//!  ├─ 2. Classify  extension → Image | Pdf | Video | Audio | Office
//!  ├─ 3. Pre-check exists, non-empty, readable
//!  ├─ 4. Convert   category strategy (PDF: gs → magick → placeholder)
//!  ├─ 5. Report    one entry per file, in order, success or failure
//!  └─ 6. Combine   optional: append produced JPEGs into one composite
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use omnithumb::{convert_batch, ConversionConfig};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .output_dir("previews")
//!         .build()?;
//!     let inputs = vec![PathBuf::from("photo.jpg"), PathBuf::from("report.pdf")];
//!     let report = convert_batch(&inputs, &config).await;
//!     for entry in report.entries() {
//!         println!("{} [{:?}] {}", entry.source, entry.status, entry.message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## External engines
//!
//! | Engine | Used for | Discovery |
//! |--------|----------|-----------|
//! | ffmpeg | video frames, audio waveforms | PATH, then `FFMPEG_DIR` |
//! | ImageMagick (`magick`) | image re-encode, PDF delegate, combining | PATH, then `MAGICK_DIR` |
//! | Ghostscript (`gs`/`gswin64c`) | direct PDF rendering | PATH, then `GHOSTSCRIPT_DIR` |
//! | exiftool | metadata copy onto converted images | PATH, then `EXIFTOOL_DIR` |
//! | LibreOffice (`soffice`) | office documents → PDF | PATH, then `SOFFICE_DIR` |
//!
//! All engines are optional at resolution time; each strategy decides what
//! absence means for its files (hard failure with an install hint, or a
//! degraded placeholder for PDFs).
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `omnithumb` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod classify;
pub mod combine;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod naming;
pub mod pipeline;
pub mod report;
pub mod tools;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use classify::FileCategory;
pub use combine::{combine, Direction};
pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use dispatch::{
    convert_batch, convert_batch_sync, convert_batch_with_tools, process_one, ConversionResult,
};
pub use error::ConvertError;
pub use naming::output_file_name;
pub use report::{EntryStatus, ReportEntry, SessionReport, NO_OUTPUT};
pub use tools::{Discovery, ToolStatus, Toolset};
