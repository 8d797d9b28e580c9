//! End-to-end batch tests using fake engine executables.
//!
//! Real ffmpeg/magick/gs installs cannot be assumed on CI, so these tests
//! point the tool snapshot at small shell scripts that log their argv and
//! either produce an output file or fail on purpose. That exercises the
//! whole path — classification, pre-flight, strategy selection, engine
//! invocation, report assembly — with deterministic engines.

#![cfg(unix)]

use omnithumb::{
    combine, convert_batch_with_tools, ConversionConfig, Direction, EntryStatus, SessionReport,
    ToolStatus, Toolset,
};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable shell script that appends its argv to `log` and then
/// runs `body` (which may reference `$last`, the final argument).
fn fake_engine(dir: &Path, name: &str, log: &Path, body: &str) -> ToolStatus {
    let path = dir.join(name);
    let script = format!(
        "#!/bin/sh\necho \"$@\" >> '{}'\nfor last; do :; done\n{}\n",
        log.display(),
        body
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    ToolStatus::Found {
        path,
        via: omnithumb::Discovery::Path,
    }
}

/// A stub that writes a non-empty file to its last argument and exits 0.
fn working_engine(dir: &Path, name: &str, log: &Path) -> ToolStatus {
    fake_engine(dir, name, log, "printf 'JPEGDATA' > \"$last\"")
}

/// A stub that exits non-zero without writing anything.
fn failing_engine(dir: &Path, name: &str, log: &Path) -> ToolStatus {
    fake_engine(dir, name, log, "echo 'engine blew up' >&2\nexit 1")
}

fn config_for(dir: &Path) -> ConversionConfig {
    ConversionConfig::builder().output_dir(dir).build().unwrap()
}

fn log_lines(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .map(|s| s.lines().map(str::to_owned).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn report_has_one_entry_per_input_in_submission_order() {
    let work = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let log = work.path().join("engine.log");

    let photo = work.path().join("photo.png");
    let clip = work.path().join("clip.mp4");
    fs::write(&photo, b"fake png").unwrap();
    fs::write(&clip, b"fake mp4").unwrap();
    let gone = work.path().join("gone.pdf");

    let mut tools = Toolset::empty();
    tools.magick = working_engine(work.path(), "magick", &log);
    tools.ffmpeg = working_engine(work.path(), "ffmpeg", &log);

    let config = config_for(out.path());
    let report = convert_batch_with_tools(
        &[photo, gone.clone(), clip],
        &tools,
        &config,
    )
    .await;

    assert_eq!(report.len(), 3);
    assert_eq!(report.entries()[0].source, "photo.png");
    assert_eq!(report.entries()[1].source, "gone.pdf");
    assert_eq!(report.entries()[2].source, "clip.mp4");
    assert_eq!(report.entries()[0].status, EntryStatus::Success);
    assert_eq!(report.entries()[1].status, EntryStatus::Failed);
    assert_eq!(report.entries()[2].status, EntryStatus::Success);
    assert!(out.path().join("photo_png.jpg").exists());
    assert!(out.path().join("clip_mp4.jpg").exists());
}

#[tokio::test]
async fn empty_file_fails_before_any_engine_runs() {
    let work = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let log = work.path().join("engine.log");

    let empty = work.path().join("empty.jpg");
    fs::write(&empty, b"").unwrap();

    let mut tools = Toolset::empty();
    tools.magick = working_engine(work.path(), "magick", &log);

    let config = config_for(out.path());
    let report = convert_batch_with_tools(&[empty], &tools, &config).await;

    assert_eq!(report.len(), 1);
    assert_eq!(report.entries()[0].status, EntryStatus::Failed);
    assert!(report.entries()[0].message.contains("empty"));
    // Pre-flight rejected the file, so the stub was never invoked.
    assert!(log_lines(&log).is_empty(), "engine must not have run");
}

#[tokio::test]
async fn pdf_falls_back_to_placeholder_when_both_renderers_fail() {
    let work = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let log = work.path().join("engine.log");

    let pdf = work.path().join("scan.pdf");
    fs::write(&pdf, b"%PDF-1.4 fake").unwrap();

    // Both rendering tiers present but broken; the chain must still land on
    // the built-in placeholder and count the file as a (degraded) success.
    let mut tools = Toolset::empty();
    tools.ghostscript = failing_engine(work.path(), "gs", &log);
    tools.magick = failing_engine(work.path(), "magick", &log);

    let config = config_for(out.path());
    let report = convert_batch_with_tools(&[pdf], &tools, &config).await;

    assert_eq!(report.entries()[0].status, EntryStatus::Success);
    assert!(report.entries()[0].message.contains("placeholder"));
    let produced = out.path().join("scan_pdf.jpg");
    assert!(produced.exists());
    assert!(fs::metadata(&produced).unwrap().len() > 0);

    // Both tiers were actually attempted, in order: gs first, then magick.
    let lines = log_lines(&log);
    assert!(lines.len() >= 3, "gs + magick delegate + magick annotate: {lines:?}");
    assert!(lines[0].contains("-sDEVICE=jpeg"), "first attempt is ghostscript");
    assert!(lines[1].contains("-density"), "second attempt is the magick delegate");
}

#[tokio::test]
async fn image_conversion_invokes_magick_then_exiftool() {
    let work = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let magick_log = work.path().join("magick.log");
    let exif_log = work.path().join("exiftool.log");

    let photo = work.path().join("my photo.JPG");
    fs::write(&photo, b"fake jpeg").unwrap();

    let mut tools = Toolset::empty();
    tools.magick = working_engine(work.path(), "magick", &magick_log);
    tools.exiftool = working_engine(work.path(), "exiftool", &exif_log);

    let config = config_for(out.path());
    let report = convert_batch_with_tools(&[photo.clone()], &tools, &config).await;

    assert_eq!(report.entries()[0].status, EntryStatus::Success);
    assert!(report.entries()[0].message.contains("metadata preserved"));
    // Whitespace in the stem is sanitised, the original extension is kept.
    assert_eq!(report.entries()[0].output, "my_photo_JPG.jpg");
    assert!(out.path().join("my_photo_JPG.jpg").exists());

    let magick_argv = log_lines(&magick_log);
    assert_eq!(magick_argv.len(), 1);
    assert!(magick_argv[0].contains("-strip"));
    assert!(magick_argv[0].contains("-quality 92"));

    let exif_argv = log_lines(&exif_log);
    assert_eq!(exif_argv.len(), 1);
    assert!(exif_argv[0].contains("-TagsFromFile"));
}

#[tokio::test]
async fn exiftool_failure_degrades_but_keeps_the_converted_image() {
    let work = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let magick_log = work.path().join("magick.log");
    let exif_log = work.path().join("exiftool.log");

    let photo = work.path().join("shot.png");
    fs::write(&photo, b"fake png").unwrap();

    let mut tools = Toolset::empty();
    tools.magick = working_engine(work.path(), "magick", &magick_log);
    tools.exiftool = failing_engine(work.path(), "exiftool", &exif_log);

    let config = config_for(out.path());
    let report = convert_batch_with_tools(&[photo], &tools, &config).await;

    // The conversion itself succeeded; only the metadata copy was lost.
    assert_eq!(report.entries()[0].status, EntryStatus::Success);
    assert!(report.entries()[0].message.contains("metadata"));
    assert!(out.path().join("shot_png.jpg").exists());
}

#[tokio::test]
async fn combine_preserves_input_order_and_append_flag() {
    let work = tempfile::tempdir().unwrap();
    let log = work.path().join("magick.log");

    let a = work.path().join("a.jpg");
    let b = work.path().join("b.jpg");
    let c = work.path().join("c.jpg");
    for f in [&a, &b, &c] {
        fs::write(f, b"jpeg").unwrap();
    }
    let composite = work.path().join("combined.jpg");

    let mut tools = Toolset::empty();
    tools.magick = working_engine(work.path(), "magick", &log);

    let config = ConversionConfig::default();
    combine(
        &[a.clone(), b.clone(), c.clone()],
        &composite,
        Direction::Horizontal,
        &tools,
        &config,
    )
    .await
    .unwrap();

    assert!(composite.exists());
    let argv = &log_lines(&log)[0];
    let pos_a = argv.find("a.jpg").unwrap();
    let pos_b = argv.find("b.jpg").unwrap();
    let pos_c = argv.find("c.jpg").unwrap();
    assert!(pos_a < pos_b && pos_b < pos_c, "inputs out of order: {argv}");
    assert!(argv.contains("+append"), "horizontal uses +append: {argv}");
    let flag = argv.find("+append").unwrap();
    assert!(pos_c < flag, "append flag comes after the inputs");
}

#[tokio::test]
async fn office_document_goes_through_soffice_then_pdf_chain() {
    let work = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let soffice_log = work.path().join("soffice.log");
    let gs_log = work.path().join("gs.log");

    let doc = work.path().join("notes.docx");
    fs::write(&doc, b"fake docx").unwrap();

    // soffice must create `<stem>.pdf` inside the --outdir it is given;
    // the stub finds that directory in its argv.
    let soffice_body = r#"
outdir=""
prev=""
for arg; do
  if [ "$prev" = "--outdir" ]; then outdir="$arg"; fi
  prev="$arg"
done
printf '%%PDF fake' > "$outdir/notes.pdf"
"#;
    let mut tools = Toolset::empty();
    tools.soffice = fake_engine(work.path(), "soffice", &soffice_log, soffice_body);
    tools.ghostscript = working_engine(work.path(), "gs", &gs_log);

    let config = config_for(out.path());
    let report = convert_batch_with_tools(&[doc], &tools, &config).await;

    assert_eq!(
        report.entries()[0].status,
        EntryStatus::Success,
        "message: {}",
        report.entries()[0].message
    );
    assert!(report.entries()[0].message.contains("LibreOffice"));
    assert!(out.path().join("notes_docx.jpg").exists());

    let soffice_argv = &log_lines(&soffice_log)[0];
    assert!(soffice_argv.contains("--headless"));
    assert!(soffice_argv.contains("--convert-to pdf"));
    // The rendered intermediate, not the original docx, reaches ghostscript.
    let gs_argv = &log_lines(&gs_log)[0];
    assert!(gs_argv.contains("notes.pdf"), "gs argv: {gs_argv}");
}

#[tokio::test]
async fn successful_outputs_feed_the_combiner() {
    let work = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let log = work.path().join("engine.log");

    let a = work.path().join("a.png");
    let b = work.path().join("b.png");
    fs::write(&a, b"png").unwrap();
    fs::write(&b, b"png").unwrap();
    let missing = work.path().join("missing.png");

    let mut tools = Toolset::empty();
    tools.magick = working_engine(work.path(), "magick", &log);

    let config = config_for(out.path());
    let report: SessionReport =
        convert_batch_with_tools(&[a, missing, b], &tools, &config).await;

    // Only the two successes are offered to the combiner, in report order.
    let produced = report.successful_outputs(out.path());
    assert_eq!(
        produced,
        vec![
            PathBuf::from(out.path().join("a_png.jpg")),
            PathBuf::from(out.path().join("b_png.jpg")),
        ]
    );

    let composite = out.path().join("combined.jpg");
    combine(&produced, &composite, Direction::Vertical, &tools, &config)
        .await
        .unwrap();
    assert!(composite.exists());
}
