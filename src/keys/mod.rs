pub mod grammar;
pub mod token;

pub use grammar::{NameGrammar, ParseError};
pub use token::{BandCode, TimeToken};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A discovered file with the key decoded from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub band: BandCode,
    pub time: TimeToken,
}

impl FileRecord {
    pub fn from_path<P: AsRef<Path>>(path: P, grammar: &NameGrammar) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (band, time) = grammar.parse(&name)?;

        Ok(Self {
            path: path.to_path_buf(),
            band,
            time,
        })
    }
}

/// Paths found for one scan time, by band.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeGroup {
    bands: BTreeMap<BandCode, PathBuf>,
}

impl TimeGroup {
    /// Returns the previously stored path if the band was already present.
    pub fn insert(&mut self, band: BandCode, path: PathBuf) -> Option<PathBuf> {
        self.bands.insert(band, path)
    }

    pub fn get(&self, band: &BandCode) -> Option<&Path> {
        self.bands.get(band).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }
}

/// Groups keyed by time token. Iteration order is token order, which is
/// chronological for well-formed tokens.
pub type TimeGroups = BTreeMap<TimeToken, TimeGroup>;

/// Folds records into per-time groups. A repeated (time, band) pair keeps the
/// record that comes last.
pub fn group_records<I>(records: I) -> TimeGroups
where
    I: IntoIterator<Item = FileRecord>,
{
    let mut groups = TimeGroups::new();

    for record in records {
        let group = groups.entry(record.time.clone()).or_default();
        if let Some(previous) = group.insert(record.band.clone(), record.path.clone()) {
            log::warn!(
                "Duplicate {} file for {}: {} replaces {}",
                record.band,
                record.time,
                record.path.display(),
                previous.display()
            );
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> FileRecord {
        FileRecord::from_path(Path::new("/data").join(name), &NameGrammar::default()).unwrap()
    }

    fn band(code: &str) -> BandCode {
        BandCode::new(code).unwrap()
    }

    fn token(t: &str) -> TimeToken {
        TimeToken::new(t).unwrap()
    }

    fn sample_records() -> Vec<FileRecord> {
        vec![
            record("OR_ABI-L2-CMIPC-M6C07_G18_s20253032336175_e1_c1.nc"),
            record("OR_ABI-L2-CMIPC-M6C13_G18_s20253032336175_e1_c1.nc"),
            record("OR_ABI-L2-CMIPC-M6C07_G18_s20253040006175_e1_c1.nc"),
            record("OR_ABI-L2-CMIPC-M6C13_G18_s20253040006175_e1_c1.nc"),
            record("OR_ABI-L2-CMIPC-M6C13_G18_s20253040011175_e1_c1.nc"),
        ]
    }

    fn qualifying(groups: &TimeGroups) -> Vec<TimeToken> {
        let (c07, c13) = (band("C07"), band("C13"));
        groups
            .iter()
            .filter(|(_, g)| g.get(&c07).is_some() && g.get(&c13).is_some())
            .map(|(t, _)| t.clone())
            .collect()
    }

    #[test]
    fn test_record_from_path() {
        let r = record("OR_ABI-L2-CMIPC-M6C07_G18_s20253032336175_e1_c1.nc");
        assert_eq!(r.band, band("C07"));
        assert_eq!(r.time, token("s20253032336175"));
        assert!(r.path.starts_with("/data"));
    }

    #[test]
    fn test_record_from_bad_path() {
        let err = FileRecord::from_path("/data/notes.txt", &NameGrammar::default()).unwrap_err();
        assert_eq!(err.name, "notes.txt");
    }

    #[test]
    fn test_group_records() {
        let groups = group_records(sample_records());

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&token("s20253032336175")].len(), 2);
        assert_eq!(groups[&token("s20253040011175")].len(), 1);
        assert!(
            groups[&token("s20253040006175")]
                .get(&band("C07"))
                .unwrap()
                .to_string_lossy()
                .contains("M6C07_G18_s20253040006175")
        );
    }

    #[test]
    fn test_grouping_ignores_insertion_order() {
        let mut reversed = sample_records();
        reversed.reverse();
        assert_eq!(group_records(sample_records()), group_records(reversed));
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let first = qualifying(&group_records(sample_records()));
        let second = qualifying(&group_records(sample_records()));
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![token("s20253032336175"), token("s20253040006175")]
        );
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let older = record("OR_ABI-L2-CMIPC-M6C07_G18_s20253032336175_e1_c1.nc");
        let newer = record("OR_ABI-L2-CMIPC-M6C07_G18_s20253032336175_e1_c2.nc");
        let groups = group_records(vec![older, newer.clone()]);

        let group = &groups[&token("s20253032336175")];
        assert_eq!(group.len(), 1);
        assert_eq!(group.get(&band("C07")), Some(newer.path.as_path()));
    }
}
