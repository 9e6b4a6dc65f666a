use std::path::Path;

use crate::error::{AppError, AppResult, ConfigError};

/// Reads a line-oriented input file.
///
/// Lines are trimmed; blank lines and lines starting with `#` are dropped.
/// A missing file yields an empty list.
///
/// # Errors
///
/// Returns an error when the file exists but cannot be read as UTF-8.
pub fn load_lines(path: &Path) -> AppResult<Vec<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("Input file '{}' not found; treating as empty.", path.display());
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(AppError::config(ConfigError::ReadInput {
                path: path.to_path_buf(),
                source: err,
            }));
        }
    };
    Ok(parse_lines(&content))
}

#[must_use]
pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect()
}
