use std::path::{Path, PathBuf};

use crate::keys::NameGrammar;
use crate::sat_bands::Channel;

pub mod error;
pub use error::ConfigError;

const SHORT_WAVE: &str = "C07";
const LONG_WAVE: &str = "C13";

/// Color-scale clamp used when rendering a field. Values outside the range
/// saturate at the end colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    min: f32,
    max: f32,
}

impl DisplayRange {
    pub fn new(min: f32, max: f32) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigError::InvalidRange { min, max });
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Position of `value` in the range, clamped to `[0, 1]`.
    pub fn normalize(&self, value: f32) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// One range per kind of rendered field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRanges {
    pub long_wave: DisplayRange,
    pub short_wave: DisplayRange,
    pub btd: DisplayRange,
    pub delta: DisplayRange,
}

impl DisplayRanges {
    /// Brightness temperatures in K, differences in K.
    pub fn standard() -> Result<Self, ConfigError> {
        Ok(Self {
            long_wave: DisplayRange::new(270.0, 310.0)?,
            short_wave: DisplayRange::new(260.0, 310.0)?,
            btd: DisplayRange::new(-5.0, 10.0)?,
            delta: DisplayRange::new(-5.0, 5.0)?,
        })
    }
}

/// Run settings. `Config::new` gives the fixed constants of a quicklook run
/// over GOES-18 CONUS CMI files sitting in `~/Downloads`.
#[derive(Debug, Clone)]
pub struct Config {
    data_dir: PathBuf,
    output_dir: PathBuf,
    file_pattern: String,
    variable: String,
    min_files: usize,
    short_wave: Channel,
    long_wave: Channel,
    grammar: NameGrammar,
    ranges: DisplayRanges,
    image_size: (u32, u32),
}

impl Config {
    pub fn new() -> Result<Config, ConfigError> {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let data_dir = home.join("Downloads");
        let (short_wave, long_wave) = channel_pair(SHORT_WAVE, LONG_WAVE)?;

        Ok(Config {
            output_dir: data_dir.clone(),
            data_dir,
            file_pattern: "OR_ABI-L2-CMIPC-*.nc".to_string(),
            variable: "CMI".to_string(),
            min_files: 4,
            short_wave,
            long_wave,
            grammar: NameGrammar::default(),
            ranges: DisplayRanges::standard()?,
            // 7x6 inches at 180 dpi
            image_size: (1260, 1080),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Glob pattern for input discovery, rooted at the data directory.
    pub fn discovery_pattern(&self) -> String {
        self.data_dir()
            .join(&self.file_pattern)
            .to_string_lossy()
            .into_owned()
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn min_files(&self) -> usize {
        self.min_files
    }

    pub fn short_wave(&self) -> &Channel {
        &self.short_wave
    }

    pub fn long_wave(&self) -> &Channel {
        &self.long_wave
    }

    pub fn grammar(&self) -> &NameGrammar {
        &self.grammar
    }

    pub fn ranges(&self) -> &DisplayRanges {
        &self.ranges
    }

    pub fn image_size(&self) -> (u32, u32) {
        self.image_size
    }
}

#[cfg(test)]
impl Config {
    /// Reads inputs from `dir` and writes outputs next to them.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self.output_dir = self.data_dir.clone();
        self
    }

    pub fn with_output_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_ranges(mut self, ranges: DisplayRanges) -> Self {
        self.ranges = ranges;
        self
    }
}

/// Resolves both channels from the ABI table. They must differ.
fn channel_pair(short_wave: &str, long_wave: &str) -> Result<(Channel, Channel), ConfigError> {
    let short = Channel::abi(short_wave)
        .ok_or_else(|| ConfigError::UnknownChannel(short_wave.to_string()))?;
    let long =
        Channel::abi(long_wave).ok_or_else(|| ConfigError::UnknownChannel(long_wave.to_string()))?;

    if short.code() == long.code() {
        return Err(ConfigError::SameChannel(short_wave.to_string()));
    }

    Ok((short, long))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::new().unwrap();

        assert!(config.data_dir().ends_with("Downloads"));
        assert_eq!(config.output_dir(), config.data_dir());
        assert!(config.discovery_pattern().ends_with("OR_ABI-L2-CMIPC-*.nc"));
        assert_eq!(config.variable(), "CMI");
        assert_eq!(config.min_files(), 4);
        assert_eq!(config.short_wave().code().as_str(), "C07");
        assert_eq!(config.long_wave().code().as_str(), "C13");
        assert_eq!(config.short_wave().wavelength_um(), 3.9);
        assert_eq!(config.long_wave().wavelength_um(), 10.3);

        let ranges = config.ranges();
        assert_eq!(ranges.long_wave, DisplayRange::new(270.0, 310.0).unwrap());
        assert_eq!(ranges.short_wave, DisplayRange::new(260.0, 310.0).unwrap());
        assert_eq!(ranges.btd, DisplayRange::new(-5.0, 10.0).unwrap());
        assert_eq!(ranges.delta, DisplayRange::new(-5.0, 5.0).unwrap());
    }

    #[test]
    fn test_default_channels_match_abi_table() {
        let config = Config::new().unwrap();
        assert_eq!(config.short_wave(), &Channel::abi("C07").unwrap());
        assert_eq!(config.long_wave(), &Channel::abi("C13").unwrap());
    }

    #[test]
    fn test_with_data_dir_moves_outputs_too() {
        let dir = tempdir().unwrap();
        let config = Config::new().unwrap().with_data_dir(dir.path());

        assert_eq!(config.data_dir(), dir.path());
        assert_eq!(config.output_dir(), dir.path());
        assert!(
            config
                .discovery_pattern()
                .starts_with(&*dir.path().to_string_lossy())
        );

        let out = dir.path().join("out");
        let config = config.with_output_dir(&out);
        assert_eq!(config.data_dir(), dir.path());
        assert_eq!(config.output_dir(), out.as_path());
    }

    #[test]
    fn test_display_range_validation() {
        assert!(DisplayRange::new(0.0, 1.0).is_ok());
        assert_eq!(
            DisplayRange::new(1.0, 1.0),
            Err(ConfigError::InvalidRange { min: 1.0, max: 1.0 })
        );
        assert!(DisplayRange::new(5.0, -5.0).is_err());
        assert!(DisplayRange::new(f32::NAN, 1.0).is_err());
        assert!(DisplayRange::new(0.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_display_range_normalize_clamps() {
        let range = DisplayRange::new(-5.0, 5.0).unwrap();
        assert_eq!(range.normalize(-5.0), 0.0);
        assert_eq!(range.normalize(0.0), 0.5);
        assert_eq!(range.normalize(5.0), 1.0);
        assert_eq!(range.normalize(-50.0), 0.0);
        assert_eq!(range.normalize(50.0), 1.0);
    }

    #[test]
    fn test_channel_pair() {
        let (short, long) = channel_pair("C07", "C14").unwrap();
        assert_eq!(short.wavelength_um(), 3.9);
        assert_eq!(long.wavelength_um(), 11.2);

        assert_eq!(
            channel_pair("C07", "C99").unwrap_err(),
            ConfigError::UnknownChannel("C99".to_string())
        );
        assert_eq!(
            channel_pair("C13", "C13").unwrap_err(),
            ConfigError::SameChannel("C13".to_string())
        );
    }
}
