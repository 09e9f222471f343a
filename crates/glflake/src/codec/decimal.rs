use crate::{Encoding, Id, ParseError};
use core::str::FromStr;

/// Parses optionally signed base-10 digits into an `i64`.
///
/// Leading zeros are accepted so zero-padded output round-trips. Rejected: a
/// `+` sign, whitespace, a negative zero, or more than [`Id::DECIMAL_DIGITS`]
/// digits.
pub(crate) fn parse_decimal(input: &[u8]) -> Result<i64, ParseError> {
    let encoding = Encoding::Decimal;
    let (negative, digits, offset) = match input {
        [b'-', rest @ ..] => (true, rest, 1),
        _ => (false, input, 0),
    };
    if digits.is_empty() {
        return Err(ParseError::Empty { encoding });
    }
    if digits.len() > Id::DECIMAL_DIGITS {
        return Err(ParseError::TooLong {
            encoding,
            len: digits.len(),
        });
    }

    let mut acc = 0_i64;
    for (i, &byte) in digits.iter().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(ParseError::InvalidByte {
                encoding,
                byte,
                index: offset + i,
            });
        }
        let digit = i64::from(byte - b'0');
        // Accumulate negatives downward so i64::MIN stays reachable
        acc = acc
            .checked_mul(10)
            .and_then(|acc| {
                if negative {
                    acc.checked_sub(digit)
                } else {
                    acc.checked_add(digit)
                }
            })
            .ok_or(ParseError::Overflow { encoding })?;
    }
    if negative && acc == 0 {
        return Err(ParseError::InvalidByte {
            encoding,
            byte: b'-',
            index: 0,
        });
    }
    Ok(acc)
}

impl Id {
    /// The ASCII decimal digits of this ID, as produced by `Display`.
    pub fn to_decimal_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Parses ASCII decimal digits, e.g. from [`Id::to_decimal_bytes`] or
    /// [`Id::to_padded_string`].
    ///
    /// # Errors
    ///
    /// Fails on any non-digit byte or more than 19 digits.
    pub fn parse_decimal_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        parse_decimal(bytes).map(Self::from_i64)
    }

    /// The 8-byte big-endian two's-complement form.
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.to_i64().to_be_bytes()
    }

    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self::from_i64(i64::from_be_bytes(bytes))
    }
}

impl FromStr for Id {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_decimal_bytes(s.as_bytes())
    }
}

pub(crate) fn encode(id: Id) -> String {
    id.to_string()
}

pub(crate) fn decode(s: &str) -> Result<Id, ParseError> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_digits() {
        assert_eq!(parse_decimal(b"1116766490855473152").unwrap(), 1116766490855473152);
        assert_eq!(parse_decimal(b"0001931386430720256").unwrap(), 1931386430720256);
        assert_eq!(parse_decimal(b"0").unwrap(), 0);
    }

    #[test]
    fn parses_full_i64_range() {
        assert_eq!(parse_decimal(b"9223372036854775807").unwrap(), i64::MAX);
        assert_eq!(parse_decimal(b"-9223372036854775808").unwrap(), i64::MIN);
        assert_eq!(parse_decimal(b"-42").unwrap(), -42);
    }

    #[test]
    fn rejects_out_of_range() {
        let encoding = Encoding::Decimal;
        assert_eq!(
            parse_decimal(b"9223372036854775808").unwrap_err(),
            ParseError::Overflow { encoding }
        );
        assert_eq!(
            parse_decimal(b"1112316766490855473152").unwrap_err(),
            ParseError::TooLong { encoding, len: 22 }
        );
    }

    #[test]
    fn rejects_non_digits() {
        let encoding = Encoding::Decimal;
        assert_eq!(parse_decimal(b"").unwrap_err(), ParseError::Empty { encoding });
        assert_eq!(parse_decimal(b"-").unwrap_err(), ParseError::Empty { encoding });
        assert_eq!(
            parse_decimal(b"+1").unwrap_err(),
            ParseError::InvalidByte {
                encoding,
                byte: b'+',
                index: 0
            }
        );
        assert_eq!(
            parse_decimal(b"-1a").unwrap_err(),
            ParseError::InvalidByte {
                encoding,
                byte: b'a',
                index: 2
            }
        );
        assert!(parse_decimal(b" 1").is_err());
    }

    #[test]
    fn rejects_negative_zero() {
        let negative_zero = ParseError::InvalidByte {
            encoding: Encoding::Decimal,
            byte: b'-',
            index: 0,
        };
        assert_eq!(parse_decimal(b"-0").unwrap_err(), negative_zero);
        assert_eq!(parse_decimal(b"-000").unwrap_err(), negative_zero);
        assert_eq!(parse_decimal(b"-000000000000000005").unwrap(), -5);
    }

    #[test]
    fn decimal_bytes() {
        let id = Id::from_i64(1116821679573159936);
        assert_eq!(id.to_decimal_bytes(), b"1116821679573159936");
        assert_eq!(
            Id::parse_decimal_bytes(b"1116821679573159936").unwrap(),
            id
        );

        // Non-ASCII prefix pushes the length past 19 digits
        let mut bytes = vec![0xFF, 0xFF, 0xFF];
        bytes.extend_from_slice(b"1116821679573159712");
        assert!(Id::parse_decimal_bytes(&bytes).is_err());
        assert!(matches!(
            Id::parse_decimal_bytes(&[0xFF, b'1']).unwrap_err(),
            ParseError::InvalidByte { byte: 0xFF, index: 0, .. }
        ));
    }

    #[test]
    fn be_bytes() {
        assert_eq!(
            Id::from_i64(13587).to_be_bytes(),
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x35, 0x13]
        );
        assert_eq!(
            Id::from_be_bytes([0x0f, 0x7f, 0xc0, 0xfc, 0x2f, 0x80, 0x00, 0x00]).to_i64(),
            1116823421972381696
        );
        assert_eq!(Id::from_be_bytes([0xFF; 8]).to_i64(), -1);
    }

    #[test]
    fn from_str() {
        let id: Id = "1931386430720256".parse().unwrap();
        assert_eq!(id.time(), 115119602);
        assert_eq!(id.machine_id(), 8329);
        assert!("abc".parse::<Id>().is_err());
    }
}
