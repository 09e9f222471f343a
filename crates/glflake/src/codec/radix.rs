use crate::{Encoding, ParseError};

const NO_VALUE: u8 = 255;

/// A positional digit alphabet with its reverse lookup table.
pub(crate) struct Alphabet<const N: usize> {
    encoding: Encoding,
    digits: &'static [u8; N],
    lookup: [u8; 256],
    padded: bool,
}

impl<const N: usize> Alphabet<N> {
    const RADIX: u64 = N as u64;

    const fn new(encoding: Encoding, digits: &'static [u8; N]) -> Self {
        let mut lookup = [NO_VALUE; 256];
        let mut i = 0;
        while i < N {
            lookup[digits[i] as usize] = i as u8;
            i += 1;
        }
        Self {
            encoding,
            digits,
            lookup,
            padded: false,
        }
    }

    /// Accept leading zero digits when decoding, for fixed-width output.
    const fn padded(mut self) -> Self {
        self.padded = true;
        self
    }

    /// Writes `value` most significant digit first, left-padded with the zero
    /// digit to at least `min_len` digits.
    pub(crate) fn encode(&self, mut value: u64, min_len: usize) -> String {
        // Base2 of u64::MAX is the longest output
        let mut buf = [0_u8; 64];
        let mut start = buf.len();
        loop {
            start -= 1;
            buf[start] = self.digits[(value % Self::RADIX) as usize];
            value /= Self::RADIX;
            if value == 0 {
                break;
            }
        }
        while buf.len() - start < min_len && start > 0 {
            start -= 1;
            buf[start] = self.digits[0];
        }
        buf[start..].iter().copied().map(char::from).collect()
    }

    /// Parses digits of this alphabet into the 64-bit pattern they spell.
    ///
    /// Any byte outside the alphabet, including a differently cased letter,
    /// is rejected. So is a leading zero digit, unless the alphabet is
    /// padded or the input is the single digit for zero.
    pub(crate) fn decode(&self, input: &str) -> Result<u64, ParseError> {
        let encoding = self.encoding;
        match input.as_bytes() {
            [] => return Err(ParseError::Empty { encoding }),
            [byte, _, ..] if !self.padded && *byte == self.digits[0] => {
                return Err(ParseError::InvalidByte {
                    encoding,
                    byte: *byte,
                    index: 0,
                });
            }
            _ => {}
        }

        let mut acc = 0_u64;
        for (index, byte) in input.bytes().enumerate() {
            let digit = self.lookup[byte as usize];
            if digit == NO_VALUE {
                return Err(ParseError::InvalidByte {
                    encoding,
                    byte,
                    index,
                });
            }
            acc = acc
                .checked_mul(Self::RADIX)
                .and_then(|acc| acc.checked_add(u64::from(digit)))
                .ok_or(ParseError::Overflow { encoding })?;
        }
        Ok(acc)
    }
}

pub(crate) const BASE2: Alphabet<2> = Alphabet::new(Encoding::Base2, b"01").padded();

/// Lowercase only, without `l`, `v` or `2`.
pub(crate) const BASE32: Alphabet<32> =
    Alphabet::new(Encoding::Base32, b"ybndrfg8ejkmcpqxot1uwisza345h769");

pub(crate) const BASE36: Alphabet<36> =
    Alphabet::new(Encoding::Base36, b"0123456789abcdefghijklmnopqrstuvwxyz");

/// Bitcoin ordering without `0`, `I`, `O` or `l`.
pub(crate) const BASE58: Alphabet<58> = Alphabet::new(
    Encoding::Base58,
    b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ",
);

/// Digits needed to write any non-negative ID in base 2.
pub(crate) const BASE2_WIDTH: usize = 63;
