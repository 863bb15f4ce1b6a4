//! High-score persistence in the ~/.skyward/ directory.
//!
//! The save format is a single decimal integer as text. Failures always
//! degrade: loads fall back to 0, saves are best-effort.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;

const HIGH_SCORE_FILE: &str = "high_score.txt";

/// Get the ~/.skyward/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".skyward");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn high_score_path() -> io::Result<PathBuf> {
    Ok(data_dir()?.join(HIGH_SCORE_FILE))
}

/// Load the stored high score, defaulting to 0 when the file is missing
/// or does not parse.
pub fn load_high_score() -> u32 {
    match high_score_path() {
        Ok(path) => load_high_score_from(&path),
        Err(_) => 0,
    }
}

/// Load a high score from an explicit path.
pub fn load_high_score_from(path: &Path) -> u32 {
    match fs::read_to_string(path) {
        Ok(text) => text.trim().parse().unwrap_or(0),
        Err(_) => 0,
    }
}

/// Save the high score to ~/.skyward/, best-effort. Failures are logged
/// and swallowed.
pub fn save_high_score(score: u32) {
    match high_score_path() {
        Ok(path) => save_high_score_to(&path, score),
        Err(e) => warn!("could not resolve high score path: {}", e),
    }
}

/// Save a high score to an explicit path, best-effort.
pub fn save_high_score_to(path: &Path, score: u32) {
    if let Err(e) = fs::write(path, score.to_string()) {
        warn!("could not write high score to {}: {}", path.display(), e);
    }
}
