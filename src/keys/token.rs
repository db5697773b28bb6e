use chrono::NaiveDateTime;
use std::fmt;

/// Spectral channel code such as `C07`: one ASCII letter followed by two digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BandCode(String);

impl BandCode {
    pub fn new(code: &str) -> Option<Self> {
        let bytes = code.as_bytes();
        let valid = bytes.len() == 3
            && bytes[0].is_ascii_alphabetic()
            && bytes[1..].iter().all(u8::is_ascii_digit);

        valid.then(|| Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BandCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scan start token, e.g. `s20253032336175`.
///
/// The digits are `YYYYDDDHHMMSS` followed by tenths of a second, all fixed
/// width and zero padded, so ordering the raw strings orders the scans in time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeToken(String);

impl TimeToken {
    pub fn new(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let prefix_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        let digits = chars.as_str();

        (prefix_ok && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
            .then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the scan start time to the second. Tokens shorter than
    /// `YYYYDDDHHMMSS` or with out-of-range fields return `None`.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        let digits = self.0.get(1..14)?;
        NaiveDateTime::parse_from_str(digits, "%Y%j%H%M%S").ok()
    }
}

impl fmt::Display for TimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
