mod base64;
mod decimal;
mod error;
mod json;
mod radix;

pub use error::*;

use crate::Id;
use core::fmt;
use radix::{BASE2, BASE2_WIDTH, BASE32, BASE36, BASE58};

/// The textual representations of an [`Id`].
///
/// Each variant pairs an encoder with the exact inverse decoder. Decoders
/// reject anything the encoder would never produce: uppercase base32, `0`/`I`/
/// `O`/`l` in base58, unpadded base64, more than 19 decimal digits.
///
/// Base2, base32, base36 and base58 write the 64-bit two's-complement pattern
/// of the ID, so every `i64` round-trips even though generated IDs never set
/// the top bit.
///
/// ```
/// use glflake::{Encoding, Id};
///
/// let id = Id::from_i64(1427970479175499776);
/// assert_eq!(Encoding::Base32.encode(id), "b8wjm1zroyyyy");
/// assert!(Encoding::Base32.decode("B8WJM1ZROYYYY").is_err());
///
/// for encoding in Encoding::ALL {
///     assert_eq!(encoding.decode(&encoding.encode(id)).unwrap(), id);
/// }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Signed base-10 digits.
    Decimal,
    /// Binary digits, zero-padded to 63.
    Base2,
    /// `ybndrfg8ejkmcpqxot1uwisza345h769`.
    Base32,
    /// `0-9a-z`, lowercase.
    Base36,
    /// Bitcoin alphabet.
    Base58,
    /// Standard padded base64 of the decimal digits.
    Base64,
}

impl Encoding {
    pub const ALL: [Self; 6] = [
        Self::Decimal,
        Self::Base2,
        Self::Base32,
        Self::Base36,
        Self::Base58,
        Self::Base64,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Base2 => "base2",
            Self::Base32 => "base32",
            Self::Base36 => "base36",
            Self::Base58 => "base58",
            Self::Base64 => "base64",
        }
    }

    pub fn encode(self, id: Id) -> String {
        let bits = id.to_i64() as u64;
        match self {
            Self::Decimal => decimal::encode(id),
            Self::Base2 => BASE2.encode(bits, BASE2_WIDTH),
            Self::Base32 => BASE32.encode(bits, 0),
            Self::Base36 => BASE36.encode(bits, 0),
            Self::Base58 => BASE58.encode(bits, 0),
            Self::Base64 => base64::encode(id),
        }
    }

    /// Decodes text produced by [`Encoding::encode`] for the same variant.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for empty input, bytes outside the alphabet,
    /// malformed padding, or values that do not fit in 64 bits.
    pub fn decode(self, s: &str) -> Result<Id, ParseError> {
        let from_bits = |bits: u64| Id::from_i64(bits as i64);
        match self {
            Self::Decimal => decimal::decode(s),
            Self::Base2 => BASE2.decode(s).map(from_bits),
            Self::Base32 => BASE32.decode(s).map(from_bits),
            Self::Base36 => BASE36.decode(s).map(from_bits),
            Self::Base58 => BASE58.decode(s).map(from_bits),
            Self::Base64 => base64::decode(s),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|encoding| encoding.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEncoding(s.to_owned()))
    }
}

/// The name passed to `Encoding::from_str` matched no [`Encoding`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown encoding {0:?}")]
pub struct UnknownEncoding(pub String);
