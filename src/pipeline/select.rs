use std::path::PathBuf;

use super::BtdError;
use crate::keys::{BandCode, TimeGroups, TimeToken};

/// A scan time with both channels present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedTime {
    pub token: TimeToken,
    pub short_wave: PathBuf,
    pub long_wave: PathBuf,
}

/// The two earliest matched times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePair {
    pub t1: MatchedTime,
    pub t2: MatchedTime,
}

/// Qualifying groups in chronological order. Groups missing a channel are
/// skipped.
pub fn matched_times(groups: &TimeGroups, short: &BandCode, long: &BandCode) -> Vec<MatchedTime> {
    let mut matched: Vec<MatchedTime> = groups
        .iter()
        .filter_map(|(token, group)| match (group.get(short), group.get(long)) {
            (Some(s), Some(l)) => Some(MatchedTime {
                token: token.clone(),
                short_wave: s.to_path_buf(),
                long_wave: l.to_path_buf(),
            }),
            _ => {
                log::debug!("Skipping {}: {} of 2 bands present", token, group.len());
                None
            }
        })
        .collect();

    matched.sort_by(|a, b| a.token.cmp(&b.token));
    matched
}

pub fn select_pair(
    matched: &[MatchedTime],
    short: &BandCode,
    long: &BandCode,
) -> Result<TimePair, BtdError> {
    match matched {
        [t1, t2, ..] => Ok(TimePair {
            t1: t1.clone(),
            t2: t2.clone(),
        }),
        _ => Err(BtdError::Pairing {
            short: short.clone(),
            long: long.clone(),
            found: matched.len(),
        }),
    }
}
