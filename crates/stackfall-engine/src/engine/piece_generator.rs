use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Draws piece kinds uniformly at random.
///
/// Every draw is an independent uniform choice among the 7 kinds; there is no
/// bag, so droughts and repeats are possible.
///
/// # Example
///
/// ```
/// use stackfall_engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
/// assert_eq!(a.next_kind(), b.next_kind());
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl PieceGenerator {
    /// Creates a generator that replays the sequence of `seed`.
    ///
    /// For a random sequence, draw the seed with `rand::random()`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit value written as 32 hex digits, both on the command line and
/// when serialized. The same seed always yields the same piece sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    #[display("invalid seed: expected 32 hex digits, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid seed: {_0:?} is not a hex digit")]
    InvalidDigit(#[error(not(source))] char),
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength(s.len()));
        }
        // from_str_radix alone would also take a leading sign
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseSeedError::InvalidDigit(c));
        }
        let mut bytes = [0; 16];
        for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
            *byte = (hex_value(pair[0]) << 4) | hex_value(pair[1]);
        }
        Ok(Self(bytes))
    }
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed([
        0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54, 0x32,
        0x10,
    ]);

    #[test]
    fn test_deterministic_piece_generation() {
        let mut generator1 = PieceGenerator::with_seed(SEED);
        let mut generator2 = PieceGenerator::with_seed(SEED);
        for _ in 0..50 {
            assert_eq!(generator1.next_kind(), generator2.next_kind());
        }
    }

    #[test]
    fn test_all_kinds_are_drawn() {
        let mut generator = PieceGenerator::with_seed(SEED);
        let mut counts = [0; PieceKind::LEN];
        for _ in 0..700 {
            counts[generator.next_kind() as usize] += 1;
        }
        assert!(counts.iter().all(|&c| c > 0), "{counts:?}");
    }

    #[test]
    fn test_display_is_big_endian_hex() {
        assert_eq!(SEED.to_string(), "0123456789abcdeffedcba9876543210");
        assert_eq!(
            PieceSeed([0; 16]).to_string(),
            "00000000000000000000000000000000"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "0123456789ABCDEFfedcba9876543210".parse::<PieceSeed>(),
            Ok(SEED)
        );
        assert_eq!(
            "0123".parse::<PieceSeed>(),
            Err(ParseSeedError::InvalidLength(4))
        );
        assert_eq!(
            "0123456789abcdeg0123456789abcdef".parse::<PieceSeed>(),
            Err(ParseSeedError::InvalidDigit('g'))
        );
        assert_eq!(
            "+0123456789abcdef0123456789abcde".parse::<PieceSeed>(),
            Err(ParseSeedError::InvalidDigit('+'))
        );
        assert_eq!(
            "-0123456789abcdef0123456789abcde".parse::<PieceSeed>(),
            Err(ParseSeedError::InvalidDigit('-'))
        );
    }

    #[test]
    fn test_parse_error_message() {
        let err = "".parse::<PieceSeed>().unwrap_err();
        assert!(err.to_string().contains("32 hex digits"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let seed: PieceSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, format!("\"{seed}\""));
        let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);

        assert!(serde_json::from_str::<PieceSeed>("\"xyz\"").is_err());
    }
}
