use std::str::FromStr;
use thiserror::Error;

use crate::api::FromCommandLine;

const OCTETS: usize = 6;

/// A Bluetooth device address (`BD_ADDR`).
///
/// Written as six colon-separated hexadecimal octets, most significant first (ex: `54:39:A3:47:D8:F0`).
/// Parsing is case-insensitive; display is always uppercase.
///
/// ### Example
/// ```
/// # use hcitool_builder::Address;
/// let address: Address = "54:39:a3:47:d8:f0".parse().unwrap();
/// assert_eq!(address.to_string(), "54:39:A3:47:D8:F0");
/// assert_eq!(address.octets(), [0x54, 0x39, 0xA3, 0x47, 0xD8, 0xF0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; OCTETS]);

/// The address text is not six colon-separated hexadecimal octets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{0}' is not a valid Bluetooth address.")]
pub struct InvalidAddress(String);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0; OCTETS]);

    /// Create an address from its octets, most significant first.
    pub const fn new(octets: [u8; OCTETS]) -> Self {
        Self(octets)
    }

    /// The octets, most significant first.
    pub const fn octets(&self) -> [u8; OCTETS] {
        self.0
    }
}

impl FromStr for Address {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut octets = [0; OCTETS];
        let mut segments = s.split(':');

        for octet in octets.iter_mut() {
            let segment = segments.next().ok_or_else(|| InvalidAddress(s.to_string()))?;

            if segment.len() != 2 || !segment.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(InvalidAddress(s.to_string()));
            }

            *octet = u8::from_str_radix(segment, 16).map_err(|_| InvalidAddress(s.to_string()))?;
        }

        if segments.next().is_some() {
            return Err(InvalidAddress(s.to_string()));
        }

        Ok(Address(octets))
    }
}

impl FromCommandLine for Address {
    fn from_command_line(token: &str) -> Option<Self> {
        Address::from_str(token).ok()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[rstest]
    #[case("54:39:A3:47:D8:F0", [0x54, 0x39, 0xA3, 0x47, 0xD8, 0xF0])]
    #[case("54:39:a3:47:d8:f0", [0x54, 0x39, 0xA3, 0x47, 0xD8, 0xF0])]
    #[case("00:00:00:00:00:00", [0; 6])]
    #[case("FF:FF:FF:FF:FF:FF", [0xFF; 6])]
    fn parse(#[case] token: &str, #[case] expected: [u8; 6]) {
        assert_eq!(Address::from_str(token), Ok(Address::new(expected)));
        assert_eq!(Address::from_command_line(token), Some(Address::new(expected)));
    }

    #[rstest]
    #[case("")]
    #[case("54:39:A3:47:D8")]
    #[case("54:39:A3:47:D8:F0:00")]
    #[case("54:39:A3:47:D8:F0:")]
    #[case("54-39-A3-47-D8-F0")]
    #[case("54:39:A3:47:D8:G0")]
    #[case("54:39:A3:47:D8:F")]
    #[case("54:39:A3:47:D8:F00")]
    #[case("5:439:A3:47:D8:F0")]
    #[case("+5:39:A3:47:D8:F0")]
    #[case("5439A347D8F0")]
    fn parse_invalid(#[case] token: &str) {
        assert_eq!(
            Address::from_str(token),
            Err(InvalidAddress(token.to_string()))
        );
        assert_eq!(Address::from_command_line(token), None);
    }

    #[test]
    fn display_random() {
        for _ in 0..100 {
            let octets: [u8; 6] = thread_rng().gen();
            let address = Address::new(octets);
            let text = address.to_string();
            assert_eq!(text.len(), 17);
            assert_eq!(text, text.to_ascii_uppercase());
            assert_eq!(Address::from_str(&text.to_ascii_lowercase()), Ok(address));
        }
    }

    #[test]
    fn octets() {
        let address = Address::new([1, 2, 3, 4, 5, 6]);
        assert_eq!(address.octets(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(Address::ZERO.octets(), [0; 6]);
    }
}
