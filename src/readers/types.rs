use std::path::Path;

use crate::grid::Grid;
use crate::pipeline::BtdError;

/// Loads one brightness-temperature grid fully into memory.
pub trait GridReader {
    fn read_grid(&self, path: &Path) -> Result<Grid, BtdError>;
}
