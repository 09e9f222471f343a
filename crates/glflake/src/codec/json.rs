use crate::{Id, JsonError, JsonSyntaxError};

impl Id {
    /// The JSON form: the decimal digits as a string, so consumers that read
    /// numbers as doubles keep full precision.
    ///
    /// ```
    /// use glflake::Id;
    ///
    /// assert_eq!(Id::from_i64(13587).to_json(), br#""13587""#);
    /// ```
    pub fn to_json(&self) -> Vec<u8> {
        format!("\"{self}\"").into_bytes()
    }

    /// Parses the JSON form produced by [`Id::to_json`].
    ///
    /// Any JSON string value is accepted, as a JSON parser would read it:
    /// whitespace around the value and escape sequences inside it are allowed.
    ///
    /// # Errors
    ///
    /// - [`JsonError::Syntax`] if `json` is not a single non-empty JSON
    ///   string, e.g. a bare number or an unterminated string.
    /// - [`JsonError::Parse`] if the string is not a decimal ID.
    pub fn from_json(json: &[u8]) -> Result<Self, JsonError> {
        let syntax_error = || JsonError::from(JsonSyntaxError { raw: json.to_vec() });
        match trim_json_whitespace(json) {
            [b'"', inner @ .., b'"'] if !inner.is_empty() => {
                let text = unescape(inner).ok_or_else(syntax_error)?;
                Ok(Self::parse_decimal_bytes(&text)?)
            }
            _ => Err(syntax_error()),
        }
    }
}

const fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

fn trim_json_whitespace(json: &[u8]) -> &[u8] {
    let start = json
        .iter()
        .position(|&b| !is_json_whitespace(b))
        .unwrap_or(json.len());
    let end = json
        .iter()
        .rposition(|&b| !is_json_whitespace(b))
        .map_or(start, |i| i + 1);
    &json[start..end]
}

/// Resolves the escapes of a JSON string body. Returns `None` for a body that
/// is not valid JSON: a bare quote or control byte, or a malformed escape.
///
/// Characters beyond ASCII become `0xFF`, which no decimal accepts.
fn unescape(body: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(body.len());
    let mut bytes = body.iter().copied();
    while let Some(byte) = bytes.next() {
        let byte = match byte {
            b'"' | 0x00..=0x1F => return None,
            b'\\' => match bytes.next()? {
                b'"' => b'"',
                b'\\' => b'\\',
                b'/' => b'/',
                b'b' => 0x08,
                b'f' => 0x0C,
                b'n' => b'\n',
                b'r' => b'\r',
                b't' => b'\t',
                b'u' => {
                    let mut code = 0_u32;
                    for _ in 0..4 {
                        code = code << 4 | char::from(bytes.next()?).to_digit(16)?;
                    }
                    u8::try_from(code)
                        .ok()
                        .filter(u8::is_ascii)
                        .unwrap_or(0xFF)
                }
                _ => return None,
            },
            byte => byte,
        };
        out.push(byte);
    }
    Some(out)
}
