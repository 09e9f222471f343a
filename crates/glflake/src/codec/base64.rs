use crate::{Encoding, Id, ParseError, codec::decimal::parse_decimal};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: u8 = b'=';
const NO_VALUE: u8 = 255;

const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < 64 {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

/// Standard padded base64 of the decimal digits of `id`.
pub(crate) fn encode(id: Id) -> String {
    encode_bytes(&id.to_decimal_bytes())
}

/// Inverse of [`encode`]: strict padded base64 wrapping decimal digits.
pub(crate) fn decode(s: &str) -> Result<Id, ParseError> {
    let payload = decode_bytes(s.as_bytes())?;
    parse_decimal(&payload)
        .map(Id::from_i64)
        .map_err(|source| ParseError::Payload {
            encoding: Encoding::Base64,
            source: Box::new(source),
        })
}

fn encode_bytes(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);
    for chunk in input.chunks(3) {
        let b = [
            chunk[0],
            chunk.get(1).copied().unwrap_or(0),
            chunk.get(2).copied().unwrap_or(0),
        ];
        let n = u32::from(b[0]) << 16 | u32::from(b[1]) << 8 | u32::from(b[2]);
        for i in 0..4 {
            if i <= chunk.len() {
                let sextet = (n >> (18 - 6 * i)) & 0x3F;
                out.push(char::from(ALPHABET[sextet as usize]));
            } else {
                out.push(char::from(PAD));
            }
        }
    }
    out
}

fn decode_bytes(input: &[u8]) -> Result<Vec<u8>, ParseError> {
    let encoding = Encoding::Base64;
    if input.is_empty() {
        return Err(ParseError::Empty { encoding });
    }
    if input.len() % 4 != 0 {
        return Err(ParseError::InvalidLength {
            encoding,
            len: input.len(),
        });
    }

    let groups = input.len() / 4;
    let mut out = Vec::with_capacity(groups * 3);
    for (g, group) in input.chunks_exact(4).enumerate() {
        let last = g + 1 == groups;
        let pad = group.iter().rev().take_while(|&&b| b == PAD).count();
        if pad > 2 || (pad > 0 && !last) {
            return Err(ParseError::InvalidPadding { encoding });
        }

        let mut n = 0_u32;
        for (i, &byte) in group[..4 - pad].iter().enumerate() {
            let sextet = LOOKUP[byte as usize];
            if sextet == NO_VALUE {
                // A '=' here sits before a data character
                return Err(if byte == PAD {
                    ParseError::InvalidPadding { encoding }
                } else {
                    ParseError::InvalidByte {
                        encoding,
                        byte,
                        index: g * 4 + i,
                    }
                });
            }
            n |= u32::from(sextet) << (18 - 6 * i);
        }

        let [_, b0, b1, b2] = n.to_be_bytes();
        match pad {
            0 => out.extend_from_slice(&[b0, b1, b2]),
            1 if b2 == 0 => out.extend_from_slice(&[b0, b1]),
            2 if b1 == 0 && b2 == 0 => out.push(b0),
            // Trailing bits an encoder would have left zero
            _ => return Err(ParseError::InvalidPadding { encoding }),
        }
    }
    Ok(out)
}
