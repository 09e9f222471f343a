use crate::config::Format;
use glflake::{Id, Parts};
use std::fmt::Write;

/// Writes `id` in `format`.
pub fn render(id: Id, format: Format) -> String {
    match format {
        Format::Padded => id.to_padded_string(),
        Format::Json => String::from_utf8_lossy(&id.to_json()).into_owned(),
        Format::Bytes => id.to_be_bytes().iter().fold(String::new(), |mut out, b| {
            let _ = write!(out, "{b:02x}");
            out
        }),
        _ => match format.encoding() {
            Some(encoding) => encoding.encode(id),
            None => id.to_string(),
        },
    }
}

/// Reads `input` written in `format`.
pub fn parse(input: &str, format: Format) -> anyhow::Result<Id> {
    let id = match format {
        Format::Json => Id::from_json(input.as_bytes())?,
        Format::Bytes => {
            let bytes = parse_hex(input)?;
            Id::from_be_bytes(bytes)
        }
        _ => match format.encoding() {
            Some(encoding) => encoding.decode(input)?,
            None => anyhow::bail!("{format:?} cannot be parsed"),
        },
    };
    Ok(id)
}

fn parse_hex(input: &str) -> anyhow::Result<[u8; 8]> {
    if input.len() != 16 || !input.bytes().all(|b| b.is_ascii_hexdigit()) {
        anyhow::bail!("expected 16 hex digits, got {input:?}");
    }
    let mut bytes = [0_u8; 8];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&input[2 * i..2 * i + 2], 16)?;
    }
    Ok(bytes)
}

/// Fields of `parts` as `map[id:.. machine-id:.. msb:.. sequence:.. time:..]`.
pub fn render_parts(parts: &Parts) -> String {
    let fields = parts
        .to_map()
        .into_iter()
        .map(|(key, value)| format!("{key}:{value}"))
        .collect::<Vec<_>>();
    format!("map[{}]", fields.join(" "))
}
