pub mod gdal_reader;
pub mod types;
pub mod utils;

pub use gdal_reader::GdalReader;
pub use types::GridReader;
