//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Expand an artifact glob pattern relative to `base`.
pub fn match_artifacts(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = base.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let paths = glob::glob(&pattern_str)
        .with_context(|| format!("invalid artifact pattern: {}", pattern))?;

    // Unreadable entries are skipped, not fatal.
    let mut results: Vec<PathBuf> = paths.flatten().collect();
    results.sort();
    Ok(results)
}
