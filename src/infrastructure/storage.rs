use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::Result;

pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Output path for a comparison run, second-resolution local timestamp.
/// Two runs within the same second collide; the later write wins.
pub fn timestamped_output_path(dir: &Path) -> PathBuf {
    let date_str = Local::now().format("%Y-%m-%d-%H-%M-%S");
    dir.join(format!("comparison_{}.xlsx", date_str))
}
