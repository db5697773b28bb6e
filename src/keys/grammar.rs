use thiserror::Error;

use super::{BandCode, TimeToken};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse band/time from: {name}")]
pub struct ParseError {
    pub name: String,
}

/// Filename grammar for ABI L2 products.
///
/// After every occurrence of `marker` is removed, the name must contain
///
/// ```text
/// key       := band separator token
/// band      := band_prefix DIGIT DIGIT
/// separator := literal, "_G18_" by default
/// token     := time_prefix DIGIT+
/// ```
///
/// anywhere in the string. The leftmost key wins and the token takes the
/// longest digit run, so `M6C07_G18_s20253032336175_e...` yields
/// `(C07, s20253032336175)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameGrammar {
    marker: String,
    band_prefix: u8,
    separator: String,
    time_prefix: u8,
}

impl Default for NameGrammar {
    fn default() -> Self {
        Self {
            marker: "M6".to_string(),
            band_prefix: b'C',
            separator: "_G18_".to_string(),
            time_prefix: b's',
        }
    }
}

impl NameGrammar {
    pub fn parse(&self, name: &str) -> Result<(BandCode, TimeToken), ParseError> {
        let normalized = if self.marker.is_empty() {
            name.to_string()
        } else {
            name.replace(&self.marker, "")
        };

        (0..normalized.len())
            .find_map(|start| self.key_at(&normalized, start))
            .ok_or_else(|| ParseError {
                name: name.to_string(),
            })
    }

    fn key_at(&self, name: &str, start: usize) -> Option<(BandCode, TimeToken)> {
        let bytes = name.as_bytes();
        let rest = bytes.get(start..)?;

        if rest.len() < 3 || rest[0] != self.band_prefix {
            return None;
        }
        if !rest[1].is_ascii_digit() || !rest[2].is_ascii_digit() {
            return None;
        }

        let after_band = &rest[3..];
        let after_sep = after_band.strip_prefix(self.separator.as_bytes())?;
        let (&prefix, tail) = after_sep.split_first()?;
        if prefix != self.time_prefix {
            return None;
        }

        let digits = tail.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return None;
        }

        let band_end = start + 3;
        let token_start = band_end + self.separator.len();
        let token_end = token_start + 1 + digits;

        let band = BandCode::new(name.get(start..band_end)?)?;
        let token = TimeToken::new(name.get(token_start..token_end)?)?;
        Some((band, token))
    }
}
