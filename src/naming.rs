//! Output naming: derive a flat, collision-free JPEG filename from any input.
//!
//! All conversions share one rule: strip the directory and extension, replace
//! filename-illegal characters and whitespace runs with a single underscore,
//! then append `_<original-extension>.jpg`. Folding the original extension
//! into the name keeps `report.pdf` and `report.docx` from clobbering each
//! other in the flat output directory.

use std::path::Path;

/// Characters that are illegal in filenames on at least one supported
/// platform. Each occurrence is replaced along with whitespace.
const ILLEGAL: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Derive the output filename for `input`, e.g. `my photo.JPG` →
/// `my_photo_JPG.jpg`. The original extension keeps its letter case; the
/// trailing `.jpg` is always lower-case.
pub fn output_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");
    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("");

    let base = sanitize(stem);
    if ext.is_empty() {
        format!("{base}.jpg")
    } else {
        format!("{base}_{}.jpg", sanitize(ext))
    }
}

/// Replace illegal characters and whitespace runs with a single underscore.
fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut substituted = false;
    for ch in name.chars() {
        if ch.is_whitespace() || ILLEGAL.contains(&ch) {
            // Collapse a run of bad characters into one underscore.
            if !substituted {
                out.push('_');
                substituted = true;
            }
        } else {
            out.push(ch);
            substituted = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn mixed_case_with_space() {
        assert_eq!(
            output_file_name(&PathBuf::from("/photos/my photo.JPG")),
            "my_photo_JPG.jpg"
        );
    }

    #[test]
    fn directory_is_stripped() {
        assert_eq!(
            output_file_name(&PathBuf::from("/a/b/c/report.pdf")),
            "report_pdf.jpg"
        );
    }

    #[test]
    fn same_basename_different_extension_stays_unique() {
        let a = output_file_name(&PathBuf::from("report.pdf"));
        let b = output_file_name(&PathBuf::from("report.docx"));
        assert_ne!(a, b);
    }

    #[test]
    fn illegal_characters_become_underscores() {
        assert_eq!(
            output_file_name(&PathBuf::from(r#"we"ird*name.png"#)),
            "we_ird_name_png.jpg"
        );
    }

    #[test]
    fn whitespace_run_collapses_to_one_underscore() {
        assert_eq!(
            output_file_name(&PathBuf::from("a   b.mp4")),
            "a_b_mp4.jpg"
        );
    }

    #[test]
    fn no_extension() {
        assert_eq!(output_file_name(&PathBuf::from("README")), "README.jpg");
    }
}
