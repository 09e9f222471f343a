use crate::Encoding;
use core::fmt;

/// An ID could not be decoded from one of its representations.
///
/// Every variant records the [`Encoding`] that rejected the input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input has no digits.
    #[error("empty {encoding} input")]
    Empty { encoding: Encoding },

    /// A byte outside the alphabet of `encoding`.
    #[error("invalid {encoding} byte {byte:#04x} at index {index}")]
    InvalidByte {
        encoding: Encoding,
        byte: u8,
        index: usize,
    },

    /// The decoded value does not fit in 64 bits.
    #[error("{encoding} value overflows 64 bits")]
    Overflow { encoding: Encoding },

    /// More digits than a 64-bit decimal can hold.
    #[error("{encoding} input has {len} digits, at most {max} allowed", max = crate::Id::DECIMAL_DIGITS)]
    TooLong { encoding: Encoding, len: usize },

    /// The input length is impossible for `encoding`.
    #[error("invalid {encoding} length: {len}")]
    InvalidLength { encoding: Encoding, len: usize },

    /// Misplaced or non-canonical `=` padding.
    #[error("invalid {encoding} padding")]
    InvalidPadding { encoding: Encoding },

    /// The payload wrapped by an outer encoding failed to parse.
    #[error("invalid {encoding} payload")]
    Payload {
        encoding: Encoding,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// The encoding that rejected the input.
    pub fn encoding(&self) -> Encoding {
        match self {
            Self::Empty { encoding }
            | Self::InvalidByte { encoding, .. }
            | Self::Overflow { encoding }
            | Self::TooLong { encoding, .. }
            | Self::InvalidLength { encoding, .. }
            | Self::InvalidPadding { encoding }
            | Self::Payload { encoding, .. } => *encoding,
        }
    }
}

/// The input to [`Id::from_json`] was not a single JSON string.
///
/// [`Id::from_json`]: crate::Id::from_json
#[derive(Clone, PartialEq, Eq)]
pub struct JsonSyntaxError {
    /// The rejected input, verbatim.
    pub raw: Vec<u8>,
}

impl fmt::Display for JsonSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid id literal {:?}", String::from_utf8_lossy(&self.raw))
    }
}

impl fmt::Debug for JsonSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSyntaxError")
            .field("raw", &String::from_utf8_lossy(&self.raw))
            .finish()
    }
}

impl core::error::Error for JsonSyntaxError {}

/// Errors from [`Id::from_json`].
///
/// [`Id::from_json`]: crate::Id::from_json
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum JsonError {
    /// The input is not a JSON string.
    #[error(transparent)]
    Syntax(#[from] JsonSyntaxError),

    /// The quoted text is not a decimal ID.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
