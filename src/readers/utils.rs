use std::path::Path;

#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    NetCDF,
    Other,
}

pub fn file_type(path: &Path) -> FileType {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("nc") => FileType::NetCDF,
        _ => FileType::Other,
    }
}

/// GDAL open string for `variable` inside `path`. NetCDF files need the
/// subdataset syntax; anything else is opened as a plain raster.
pub fn dataset_path(path: &Path, variable: &str) -> String {
    match file_type(path) {
        FileType::NetCDF => format!("NETCDF:\"{}\":{}", path.display(), variable),
        FileType::Other => path.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type() {
        assert_eq!(file_type(Path::new("a/b.nc")), FileType::NetCDF);
        assert_eq!(file_type(Path::new("a/b.tif")), FileType::Other);
        assert_eq!(file_type(Path::new("a/b")), FileType::Other);
    }

    #[test]
    fn test_dataset_path() {
        assert_eq!(
            dataset_path(Path::new("/data/OR_ABI.nc"), "CMI"),
            "NETCDF:\"/data/OR_ABI.nc\":CMI"
        );
        assert_eq!(dataset_path(Path::new("/data/x.tif"), "CMI"), "/data/x.tif");
    }
}
