use gdal::errors::GdalError;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::grid::ShapeError;
use crate::keys::{BandCode, ParseError};

/// Everything that stops a run. None of these are retried.
#[derive(Debug, Error)]
pub enum BtdError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("expected at least {expected} files matching {pattern}, found {found}")]
    Discovery {
        pattern: String,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("need at least two matched times with both {short} and {long}; found {found}")]
    Pairing {
        short: BandCode,
        long: BandCode,
        found: usize,
    },

    /// Missing variable or unreadable input, as reported by GDAL.
    #[error(transparent)]
    Data(#[from] GdalError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("unexpected raster layout: {0}")]
    Layout(#[from] ndarray::ShapeError),

    #[error("invalid discovery pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("cannot read directory entry: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },

    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: GdalError,
    },
}
