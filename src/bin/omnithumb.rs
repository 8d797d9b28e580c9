//! CLI binary for omnithumb.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, drives the batch with a progress bar, and prints the
//! session report.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use omnithumb::{
    combine, convert_batch_with_tools, ConversionConfig, Direction, EntryStatus, SessionReport,
    ToolStatus, Toolset,
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a handful of files into ./previews
  omnithumb -o previews photo.jpg report.pdf talk.mp4

  # Convert a whole folder's files and stack the previews vertically
  omnithumb -o previews --combine vertical ~/inbox/*

  # Machine-readable session report
  omnithumb --json -o previews *.pdf > report.json

  # Show which external tools were found
  omnithumb --check-tools

  # Guard against hung engines (kills any engine after 60s)
  omnithumb --timeout 60 -o previews *.mov

EXTERNAL TOOLS:
  Tool          Used for                            Env override
  ─────────     ─────────────────────────────────   ─────────────────
  ffmpeg        video frames, audio waveforms       FFMPEG_DIR
  magick        images, PDF delegate, combining     MAGICK_DIR
  gs/gswin64c   direct PDF rendering                GHOSTSCRIPT_DIR
  exiftool      metadata copy onto images           EXIFTOOL_DIR
  soffice       office documents → PDF              SOFFICE_DIR

  Each env var names an install DIRECTORY, consulted only when the PATH
  lookup fails. Missing tools degrade gracefully: PDFs fall back to a
  placeholder image, images convert without metadata, and so on.
"#;

/// Convert mixed media files into uniform JPEG previews.
#[derive(Parser, Debug)]
#[command(
    name = "omnithumb",
    version,
    about = "Convert mixed media files (images, PDFs, office docs, video, audio) into uniform JPEG previews",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input files to convert, processed in the given order.
    #[arg(required_unless_present = "check_tools")]
    inputs: Vec<PathBuf>,

    /// Directory receiving all produced JPEGs (created if missing).
    #[arg(short, long, env = "OMNITHUMB_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// After conversion, append all successful previews into one composite.
    #[arg(long, env = "OMNITHUMB_COMBINE", value_enum)]
    combine: Option<DirectionArg>,

    /// Filename of the composite image, inside the output directory.
    #[arg(long, default_value = "combined.jpg")]
    combined_name: String,

    /// JPEG quality (1-100).
    #[arg(long, env = "OMNITHUMB_QUALITY", default_value_t = 92,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// PDF rendering DPI (72-400).
    #[arg(long, env = "OMNITHUMB_DPI", default_value_t = 150,
          value_parser = clap::value_parser!(u32).range(72..=400))]
    dpi: u32,

    /// Video frame extraction offset in seconds.
    #[arg(long, env = "OMNITHUMB_FRAME_OFFSET", default_value_t = 3)]
    frame_offset: u32,

    /// Kill any external engine after this many seconds (default: no limit).
    #[arg(long, env = "OMNITHUMB_TIMEOUT")]
    timeout: Option<u64>,

    /// Output the session report as JSON instead of a table.
    #[arg(long, env = "OMNITHUMB_JSON")]
    json: bool,

    /// Print resolved tool locations and exit.
    #[arg(long)]
    check_tools: bool,

    /// Disable the progress bar.
    #[arg(long, env = "OMNITHUMB_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "OMNITHUMB_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "OMNITHUMB_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum DirectionArg {
    Vertical,
    Horizontal,
}

impl From<DirectionArg> for Direction {
    fn from(v: DirectionArg) -> Self {
        match v {
            DirectionArg::Vertical => Direction::Vertical,
            DirectionArg::Horizontal => Direction::Horizontal,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar carries the per-file feedback, so library INFO logs
    // are suppressed unless the user asked for them.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Tool snapshot (once per run) ─────────────────────────────────────
    let tools = Toolset::resolve();

    if cli.check_tools {
        print_toolset(&tools);
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    // Output-directory creation is the operator shell's job, not the
    // library's; do it here before the batch starts.
    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!("failed to create output directory {:?}", cli.output_dir)
    })?;

    let config = ConversionConfig::builder()
        .output_dir(&cli.output_dir)
        .jpeg_quality(cli.quality)
        .pdf_dpi(cli.dpi)
        .frame_offset_secs(cli.frame_offset)
        .engine_timeout(cli.timeout.map(Duration::from_secs))
        .build()
        .context("invalid configuration")?;

    // ── Run batch ────────────────────────────────────────────────────────
    let report = if show_progress {
        run_with_progress(&cli.inputs, &tools, &config).await
    } else {
        convert_batch_with_tools(&cli.inputs, &tools, &config).await
    };

    // ── Optional combine pass ────────────────────────────────────────────
    let mut combine_note = None;
    if let Some(direction) = cli.combine {
        let produced = report.successful_outputs(&config.output_dir);
        let composite = config.output_dir.join(&cli.combined_name);
        match combine(&produced, &composite, direction.into(), &tools, &config).await {
            Ok(()) => combine_note = Some(format!("combined → {}", composite.display())),
            Err(e) => {
                // The per-file previews are already on disk; don't fail the run.
                eprintln!("{} combine failed: {e}", red("✗"));
            }
        }
    }

    // ── Print report ─────────────────────────────────────────────────────
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialise report")?
        );
    } else if !cli.quiet {
        print_report(&report, combine_note.as_deref());
    }

    // Non-zero exit when nothing succeeded at all.
    if !report.is_empty() && report.succeeded() == 0 {
        anyhow::bail!("all {} files failed to convert", report.len());
    }
    Ok(())
}

/// Drive the batch file by file so the bar can tick between conversions.
async fn run_with_progress(
    inputs: &[PathBuf],
    tools: &Toolset,
    config: &ConversionConfig,
) -> SessionReport {
    let bar = ProgressBar::new(inputs.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:40.green/238}] {pos:>3}/{len} files  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    bar.set_prefix("Converting");
    bar.enable_steady_tick(Duration::from_millis(80));

    let mut report = SessionReport::new();
    for input in inputs {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        bar.set_message(name.clone());

        let result = omnithumb::process_one(input, tools, config, &mut report).await;
        let line = if result.success {
            format!("  {} {}  {}", green("✓"), name, dim(&result.message))
        } else {
            format!("  {} {}  {}", red("✗"), name, red(&result.message))
        };
        bar.println(line);
        bar.inc(1);
    }
    bar.finish_and_clear();
    report
}

fn print_toolset(tools: &Toolset) {
    let rows: [(&str, &ToolStatus); 5] = [
        ("ffmpeg", &tools.ffmpeg),
        ("magick", &tools.magick),
        ("ghostscript", &tools.ghostscript),
        ("exiftool", &tools.exiftool),
        ("soffice", &tools.soffice),
    ];
    for (name, status) in rows {
        match status {
            ToolStatus::Found { path, via } => println!(
                "{} {:<12} {}  {}",
                green("✓"),
                name,
                path.display(),
                dim(&format!("({via:?})"))
            ),
            ToolStatus::Missing => println!("{} {:<12} not found", red("✗"), name),
        }
    }
}

fn print_report(report: &SessionReport, combine_note: Option<&str>) {
    let ok = report.succeeded();
    let failed = report.failed();

    eprintln!();
    for entry in report.entries() {
        let tick = match entry.status {
            EntryStatus::Success => green("✓"),
            EntryStatus::Failed => red("✗"),
        };
        // Failure messages can span lines (install hints); keep the first.
        let message = entry.message.lines().next().unwrap_or("");
        eprintln!(
            "{tick} {:<30} {:<8} {:<24} {}",
            entry.source,
            format!("[{}]", entry.category),
            entry.output,
            dim(message)
        );
    }

    eprintln!();
    if failed == 0 {
        eprintln!("{} {} files converted", green("✔"), bold(&ok.to_string()));
    } else {
        eprintln!(
            "{} {}/{} files converted  ({} failed)",
            if ok == 0 { red("✘") } else { cyan("⚠") },
            bold(&ok.to_string()),
            report.len(),
            red(&failed.to_string()),
        );
    }
    if let Some(note) = combine_note {
        eprintln!("{} {}", green("✔"), note);
    }
}
