use crate::error::VesperResult;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Append an executed command and its result to the audit log
pub fn log(utterance: &str, result: &str) -> VesperResult<()> {
    // Determine config directory (respecting XDG)
    let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
    let log_dir = config_dir.join("vesper");
    std::fs::create_dir_all(&log_dir)?;

    let log_path = log_dir.join("audit.log");

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    writeln!(
        file,
        "[{}] '{}' -> {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        utterance,
        result
    )?;
    Ok(())
}
