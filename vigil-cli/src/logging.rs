// vigil-cli/src/logging.rs
//
// Console and file logging setup for the CLI. One timestamped log file is
// created per run inside the configured log directory.

use std::path::{Path, PathBuf};

/// Initializes the global logger, dispatching to stdout and a timestamped
/// log file. Returns the log file path.
pub fn setup(log_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_filename = format!(
        "vigil_analyze_run_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let log_path = log_dir.join(log_filename);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .chain(fern::log_file(&log_path)?)
        .apply()?;

    Ok(log_path)
}
