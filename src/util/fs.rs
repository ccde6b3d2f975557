//! Filesystem utilities.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Files and directories CMake uses to remember a configuration.
const CMAKE_CACHE_ENTRIES: [&str; 2] = ["CMakeCache.txt", "CMakeFiles"];

/// Remove a directory and all its contents, if it exists.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Remove a file, if it exists.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove file: {}", path.display()))?;
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Whether `build_dir` holds a configured CMake cache.
pub fn has_cmake_cache(build_dir: &Path) -> bool {
    build_dir.join(CMAKE_CACHE_ENTRIES[0]).is_file()
}

/// Delete the CMake cache in `build_dir`, leaving build outputs alone.
pub fn remove_cmake_cache(build_dir: &Path) -> Result<()> {
    remove_file_if_exists(&build_dir.join(CMAKE_CACHE_ENTRIES[0]))?;
    remove_dir_all_if_exists(&build_dir.join(CMAKE_CACHE_ENTRIES[1]))
}
