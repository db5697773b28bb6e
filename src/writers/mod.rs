pub mod colormap;
pub mod netcdf;
pub mod png;

pub use netcdf::NetcdfWriter;
pub use png::PngRenderer;

use std::path::Path;

use crate::config::DisplayRange;
use crate::grid::Grid;
use crate::pipeline::BtdError;

/// Destination for everything a run produces.
pub trait ArtifactSink {
    fn write_image(
        &mut self,
        grid: &Grid,
        title: &str,
        range: &DisplayRange,
        path: &Path,
    ) -> Result<(), BtdError>;

    fn write_array(&mut self, grid: &Grid, path: &Path) -> Result<(), BtdError>;
}

/// Writes PNG quicklooks and netCDF arrays to disk.
#[derive(Debug, Clone)]
pub struct FileSink {
    renderer: PngRenderer,
    writer: NetcdfWriter,
}

impl FileSink {
    pub fn new(renderer: PngRenderer, writer: NetcdfWriter) -> Self {
        Self { renderer, writer }
    }
}

impl ArtifactSink for FileSink {
    fn write_image(
        &mut self,
        grid: &Grid,
        title: &str,
        range: &DisplayRange,
        path: &Path,
    ) -> Result<(), BtdError> {
        self.renderer.render(grid, title, range, path)
    }

    fn write_array(&mut self, grid: &Grid, path: &Path) -> Result<(), BtdError> {
        self.writer.write(grid, path)
    }
}

/// File stem derived from a display title: whitespace becomes `_`,
/// parentheses and commas are dropped and path separators become `-`.
pub fn file_stem(title: &str) -> String {
    title
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ','))
        .map(|c| match c {
            c if c.is_whitespace() => '_',
            '/' | '\\' => '-',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("C13_t1 (10.3 µm, K)"), "C13_t1_10.3_µm_K");
        assert_eq!(
            file_stem("BTD_t2 (10.3−3.9 µm, K)"),
            "BTD_t2_10.3−3.9_µm_K"
        );
        assert_eq!(
            file_stem("BTD_diff_t2_minus_t1 (K)"),
            "BTD_diff_t2_minus_t1_K"
        );
    }

    #[test]
    fn test_file_stem_is_path_safe() {
        let stem = file_stem("a/b\\c\t(d)");
        assert_eq!(stem, "a-b-c_d");
        assert!(!stem.contains(char::is_whitespace));
    }
}
