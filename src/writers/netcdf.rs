use gdal::cpl::CslStringList;
use gdal::errors::GdalError;
use gdal::raster::Buffer;
use gdal::{DriverManager, Metadata};
use std::path::Path;

use crate::grid::Grid;
use crate::pipeline::BtdError;

/// Writes a grid as a single self-describing netCDF variable through GDAL
/// `CreateCopy`.
#[derive(Debug, Clone)]
pub struct NetcdfWriter {
    variable: String,
}

impl NetcdfWriter {
    pub fn new(variable: &str) -> Self {
        Self {
            variable: variable.to_string(),
        }
    }

    pub fn write(&self, grid: &Grid, path: &Path) -> Result<(), BtdError> {
        self.create_copy(grid, path)
            .map_err(|source| BtdError::Output {
                path: path.to_path_buf(),
                source,
            })
    }

    fn create_copy(&self, grid: &Grid, path: &Path) -> Result<(), GdalError> {
        let (rows, cols) = grid.shape();

        let mem = DriverManager::get_driver_by_name("MEM")?;
        let dataset = mem.create_with_band_type::<f32, _>("", cols, rows, 1)?;

        let mut band = dataset.rasterband(1)?;
        let mut buffer = Buffer::new((cols, rows), grid.data().iter().copied().collect());
        band.write((0, 0), (cols, rows), &mut buffer)?;
        band.set_no_data_value(Some(f64::NAN))?;
        band.set_metadata_item("NETCDF_VARNAME", &self.variable, "")?;
        band.set_metadata_item("long_name", grid.label(), "")?;
        band.set_metadata_item("units", grid.units(), "")?;

        let driver = DriverManager::get_driver_by_name("netCDF")?;
        let mut options = CslStringList::new();
        // keep row 0 of the array as row 0 of the variable
        options.set_name_value("WRITE_BOTTOMUP", "NO")?;

        dataset.create_copy(&driver, path, &options)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readers::{GdalReader, GridReader};
    use ndarray::array;
    use tempfile::tempdir;

    #[test]
    fn test_written_variable_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("BTD_t1.nc");
        let grid = Grid::new(
            "BTD 10.3−3.9 µm",
            "K",
            array![[1.5, -2.0, 3.25], [f32::NAN, 0.0, 9.0]],
        );

        NetcdfWriter::new("BTD").write(&grid, &path).unwrap();

        // read rows in stored order, with no bottom-up flip
        gdal::config::set_thread_local_config_option("GDAL_NETCDF_BOTTOMUP", "NO").unwrap();
        let back = GdalReader::new("BTD").read_grid(&path).unwrap();
        gdal::config::clear_thread_local_config_option("GDAL_NETCDF_BOTTOMUP").unwrap();

        assert_eq!(back.shape(), (2, 3));
        assert_eq!(back.label(), "BTD 10.3−3.9 µm");
        assert_eq!(back.units(), "K");
        assert_eq!(back.data()[(0, 0)], 1.5);
        assert_eq!(back.data()[(0, 1)], -2.0);
        assert_eq!(back.data()[(0, 2)], 3.25);
        assert!(back.data()[(1, 0)].is_nan());
        assert_eq!(back.data()[(1, 2)], 9.0);
        assert_eq!(back.finite_count(), 5);
    }

    #[test]
    fn test_unwritable_path_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("BTD_t1.nc");
        let grid = Grid::new("BTD", "K", array![[1.0]]);

        let err = NetcdfWriter::new("BTD").write(&grid, &path).unwrap_err();

        match err {
            BtdError::Output { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
