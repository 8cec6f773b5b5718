// vigil-cli/src/main.rs
//
// This file defines the command-line interface (CLI) for the Vigil video
// surveillance analysis tool. It uses the `clap` crate to parse arguments
// for the 'analyze' command.
//
// Responsibilities include:
// - Defining CLI argument structures (`Cli`, `Commands`, `AnalyzeArgs`).
// - Setting up logging to both console and file.
// - Validating input paths and discovering the videos to process.
// - Configuring the `vigil-core` library based on CLI arguments and defaults.
// - Invoking the core pipeline (`vigil_core::process_videos`).
// - Aggregating and persisting the batch report.
// - Displaying a summary of the batch and managing process exit codes.

use clap::{Parser, Subcommand};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use vigil_core::analysis::GeminiAnalyzer;
use vigil_core::config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MODEL};
use vigil_core::sampling::SidecarFrameSampler;
use vigil_core::{
    BatchSummary, CoreConfig, CoreError, aggregate_runs, find_processable_files, persist_summary,
    process_videos,
};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

mod logging;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Vigil: Batch video surveillance analysis tool",
    long_about = "Samples frames from each video in a directory, runs a two-stage \
                  AI-assisted threat analysis, and writes one combined JSON report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands, // Enum holds the specific subcommand
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyzes video files from an input directory
    Analyze(AnalyzeArgs),
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Directory containing .mp4/.avi/.mov files to analyze
    #[arg(required = true, value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Path the combined JSON report is written to
    #[arg(
        short,
        long,
        value_name = "OUTPUT_PATH",
        default_value = "results/video_analysis_results.json"
    )]
    output: PathBuf,

    /// Optional: Directory for log files (defaults to the report directory + /logs)
    #[arg(short, long, value_name = "LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Frames sampled per video (clamped to the hard cap)
    #[arg(long, value_name = "COUNT")]
    frames: Option<usize>,

    /// Maximum analyzer attempts per stage
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Analyzer model identifier
    #[arg(long, value_name = "NAME", default_value = DEFAULT_MODEL)]
    model: String,

    /// Google AI API key
    #[arg(long, value_name = "KEY", env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: String,
}

// --- Main Logic ---

fn run_analyze(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let total_start_time = Instant::now();

    // --- Determine Paths ---
    let input_dir = args.input_dir.canonicalize().map_err(|e| {
        format!(
            "Invalid input path '{}': {}",
            args.input_dir.display(),
            e
        )
    })?;
    let output_path = args.output;
    let log_dir = args.log_dir.unwrap_or_else(|| {
        match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join("logs"),
            _ => PathBuf::from("logs"),
        }
    });

    fs::create_dir_all(&log_dir)?;

    // --- Setup Logging ---
    let log_path = logging::setup(&log_dir)?;
    log::info!("Logging to {}", log_path.display());

    // --- Build Core Configuration ---
    let mut config = CoreConfig::new(input_dir.clone(), output_path.clone());
    config.frames_per_video = args.frames;
    config.max_attempts = args.max_attempts;
    config.model = args.model;
    config.validate()?;

    // --- Discover Videos ---
    // An empty directory is not an error: the batch still produces the
    // "0%" summary document.
    let files_to_process = match find_processable_files(&input_dir) {
        Ok(files) => files,
        Err(CoreError::NoFilesFound) => {
            log::warn!("No video files found in {}", input_dir.display());
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };
    log::info!(
        "Found {} video(s) in {}",
        files_to_process.len(),
        input_dir.display()
    );

    // --- Run the Pipeline ---
    let sampler = SidecarFrameSampler::new();
    let analyzer = GeminiAnalyzer::new(&args.api_key, &config.model)?;
    let interrupt = AtomicBool::new(false);

    let runs = process_videos(&sampler, &analyzer, &config, &files_to_process, &interrupt);

    // --- Aggregate and Persist ---
    let summary = aggregate_runs(&runs);
    persist_summary(&summary, &config.output_path)?;

    print_completion_summary(&summary, &config.output_path, total_start_time.elapsed())?;

    Ok(())
}

/// Prints the colored batch summary to stdout.
fn print_completion_summary(
    summary: &BatchSummary,
    output_path: &Path,
    elapsed: Duration,
) -> std::io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let counts = &summary.processing_summary;

    writeln!(stdout)?;
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(stdout, "Processing Summary")?;
    stdout.reset()?;

    writeln!(stdout, "  Total Videos: {}", counts.total_videos)?;

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    writeln!(stdout, "  Successful:   {}", counts.successful_analyses)?;
    stdout.reset()?;

    if counts.failed_analyses > 0 {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
    }
    writeln!(stdout, "  Failed:       {}", counts.failed_analyses)?;
    stdout.reset()?;

    writeln!(stdout, "  Success Rate: {}", counts.success_rate)?;
    writeln!(stdout, "  Elapsed:      {}s", elapsed.as_secs())?;
    writeln!(stdout, "  Results saved to: {}", output_path.display())?;

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze(args) => run_analyze(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
