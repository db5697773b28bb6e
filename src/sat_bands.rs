use std::fmt::Display;

use crate::keys::BandCode;

/// ABI channel codes and their central wavelengths in µm.
const ABI_CHANNELS: &[(&str, f32)] = &[
    ("C01", 0.47),
    ("C02", 0.64),
    ("C03", 0.86),
    ("C04", 1.37),
    ("C05", 1.6),
    ("C06", 2.2),
    ("C07", 3.9),
    ("C08", 6.2),
    ("C09", 6.9),
    ("C10", 7.3),
    ("C11", 8.4),
    ("C12", 9.6),
    ("C13", 10.3),
    ("C14", 11.2),
    ("C15", 12.3),
    ("C16", 13.3),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    code: BandCode,
    wavelength_um: f32,
}

impl Channel {
    pub fn new(code: BandCode, wavelength_um: f32) -> Self {
        Self {
            code,
            wavelength_um,
        }
    }

    /// Looks the channel up in the ABI table. Returns `None` for codes the
    /// instrument does not have.
    pub fn abi(code: &str) -> Option<Self> {
        ABI_CHANNELS
            .iter()
            .find(|(c, _)| *c == code)
            .and_then(|(c, w)| BandCode::new(c).map(|code| Self::new(code, *w)))
    }

    pub fn code(&self) -> &BandCode {
        &self.code
    }

    pub fn wavelength_um(&self) -> f32 {
        self.wavelength_um
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} µm", self.wavelength_um)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abi_lookup() {
        let c07 = Channel::abi("C07").unwrap();
        assert_eq!(c07.code().as_str(), "C07");
        assert_eq!(c07.wavelength_um(), 3.9);

        let c13 = Channel::abi("C13").unwrap();
        assert_eq!(c13.to_string(), "10.3 µm");
    }

    #[test]
    fn test_unknown_channel() {
        assert!(Channel::abi("C17").is_none());
        assert!(Channel::abi("X07").is_none());
    }
}
