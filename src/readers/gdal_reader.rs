use gdal::{Dataset, Metadata};
use ndarray::Array2;
use std::path::Path;

use super::GridReader;
use super::utils::dataset_path;
use crate::grid::Grid;
use crate::pipeline::BtdError;

const DEFAULT_UNITS: &str = "K";

/// Reads band 1 of a variable through GDAL, unpacking scaled integers and
/// turning fill values into NaN.
#[derive(Debug, Clone)]
pub struct GdalReader {
    variable: String,
}

impl GdalReader {
    pub fn new(variable: &str) -> Self {
        Self {
            variable: variable.to_string(),
        }
    }
}

impl GridReader for GdalReader {
    fn read_grid(&self, path: &Path) -> Result<Grid, BtdError> {
        let source = dataset_path(path, &self.variable);
        log::debug!("Opening {}", source);

        let dataset = Dataset::open(&source)?;
        let (width, height) = dataset.raster_size();
        let band = dataset.rasterband(1)?;

        let buffer = band.read_as::<f32>((0, 0), (width, height), (width, height), None)?;
        let scale = band.scale().unwrap_or(1.0) as f32;
        let offset = band.offset().unwrap_or(0.0) as f32;
        let fill = band.no_data_value().map(|v| v as f32);
        log::debug!(
            "{}: {}x{}, scale {}, offset {}, fill {:?}",
            source,
            width,
            height,
            scale,
            offset,
            fill
        );

        let values: Vec<f32> = buffer
            .data()
            .iter()
            .map(|&raw| {
                if fill.is_some_and(|f| raw == f) {
                    f32::NAN
                } else {
                    raw * scale + offset
                }
            })
            .collect();

        let data = Array2::from_shape_vec((height, width), values)?;

        let label = band
            .metadata_item("long_name", "")
            .unwrap_or_else(|| self.variable.clone());
        let units = match band.unit() {
            u if u.is_empty() => DEFAULT_UNITS.to_string(),
            u => u,
        };

        Ok(Grid::new(&label, &units, data))
    }
}
