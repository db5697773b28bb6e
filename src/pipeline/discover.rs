use glob::glob;
use std::path::PathBuf;

use super::BtdError;
use crate::config::Config;

/// Lists input files in name order. Fewer than `min_files` matches is an error.
pub fn discover(config: &Config) -> Result<Vec<PathBuf>, BtdError> {
    let pattern = config.discovery_pattern();

    let mut files = glob(&pattern)?.collect::<Result<Vec<PathBuf>, _>>()?;
    files.sort();
    log::debug!("{} files match {}", files.len(), pattern);

    if files.len() < config.min_files() {
        return Err(BtdError::Discovery {
            pattern,
            expected: config.min_files(),
            found: files.len(),
        });
    }

    Ok(files)
}
