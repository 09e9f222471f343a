use crate::{Error, Result};
use core::fmt;
use std::collections::BTreeMap;

/// A packed glflake ID.
///
/// ```text
///  Bit Index:  63           63 62            24 23             8 7              0
///              +--------------+----------------+----------------+---------------+
///  Field:      |  unused (1)  |    time (39)   | machine ID (16)| sequence (8)  |
///              +--------------+----------------+----------------+---------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB ----------->|
/// ```
///
/// IDs emitted by a generator always have the unused bit cleared, so they are
/// positive when viewed as an `i64` and order by time, then machine ID, then
/// sequence. Any `i64` can still be wrapped, decomposed and encoded.
///
/// # Example
///
/// ```
/// use glflake::Id;
///
/// let id = Id::from_parts(1000, 2, 1);
/// assert_eq!(id.time(), 1000);
/// assert_eq!(id.machine_id(), 2);
/// assert_eq!(id.sequence(), 1);
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id {
    id: i64,
}

impl Id {
    /// Bit length of the time field.
    pub const TIME_BITS: u32 = 39;

    /// Bit length of the machine ID field.
    pub const MACHINE_ID_BITS: u32 = 16;

    /// Bit length of the sequence field.
    pub const SEQUENCE_BITS: u32 = 8;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u32 = 0;

    /// Number of bits to shift the machine ID to its correct position (bit 8).
    pub const MACHINE_ID_SHIFT: u32 = Self::SEQUENCE_SHIFT + Self::SEQUENCE_BITS;

    /// Number of bits to shift the time to its correct position (bit 24).
    pub const TIME_SHIFT: u32 = Self::MACHINE_ID_SHIFT + Self::MACHINE_ID_BITS;

    /// Bitmask for extracting the 39-bit time field. Occupies bits 24 through
    /// 62.
    pub const TIME_MASK: u64 = (1 << Self::TIME_BITS) - 1;

    /// Bitmask for extracting the 16-bit machine ID field. Occupies bits 8
    /// through 23.
    pub const MACHINE_ID_MASK: u64 = (1 << Self::MACHINE_ID_BITS) - 1;

    /// Bitmask for extracting the 8-bit sequence field. Occupies bits 0
    /// through 7.
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Largest elapsed time (in ticks) that fits the time field.
    pub const MAX_TIME: i64 = Self::TIME_MASK as i64;

    /// Largest machine ID.
    pub const MAX_MACHINE_ID: u16 = u16::MAX;

    /// Largest sequence number within one tick.
    pub const MAX_SEQUENCE: u8 = u8::MAX;

    /// Number of digits needed to print any non-negative `i64`.
    pub const DECIMAL_DIGITS: usize = 19;

    /// Packs the three fields into an ID, masking each to its bit width.
    pub const fn from_parts(time: i64, machine_id: u16, sequence: u8) -> Self {
        let time = ((time as u64) & Self::TIME_MASK) << Self::TIME_SHIFT;
        let machine_id = (machine_id as u64) << Self::MACHINE_ID_SHIFT;
        let sequence = (sequence as u64) << Self::SEQUENCE_SHIFT;
        Self {
            id: (time | machine_id | sequence) as i64,
        }
    }

    /// Packs the three fields into an ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeOverflow`] if `time` is negative or does not fit
    /// in 39 bits.
    pub fn try_from_parts(time: i64, machine_id: u16, sequence: u8) -> Result<Self> {
        if !(0..=Self::MAX_TIME).contains(&time) {
            return Err(Error::TimeOverflow { elapsed: time });
        }
        Ok(Self::from_parts(time, machine_id, sequence))
    }

    /// Wraps a raw integer without validation.
    pub const fn from_i64(id: i64) -> Self {
        Self { id }
    }

    /// Returns the raw integer.
    pub const fn to_i64(&self) -> i64 {
        self.id
    }

    /// Returns the unused most significant bit (0 for generated IDs).
    pub const fn msb(&self) -> u8 {
        ((self.id as u64) >> 63) as u8
    }

    /// Extracts the elapsed time, in 10ms ticks since the generator epoch.
    pub const fn time(&self) -> i64 {
        (((self.id as u64) >> Self::TIME_SHIFT) & Self::TIME_MASK) as i64
    }

    /// Extracts the machine ID.
    pub const fn machine_id(&self) -> u16 {
        (((self.id as u64) >> Self::MACHINE_ID_SHIFT) & Self::MACHINE_ID_MASK) as u16
    }

    /// Extracts the sequence number.
    pub const fn sequence(&self) -> u8 {
        (((self.id as u64) >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK) as u8
    }

    /// Splits the ID into its fields. See [`decompose`].
    pub const fn decompose(&self) -> Parts {
        Parts {
            id: self.id,
            msb: self.msb() as i64,
            time: self.time(),
            machine_id: self.machine_id() as i64,
            sequence: self.sequence() as i64,
        }
    }

    /// Returns the ID as a zero-padded 19-digit string.
    pub fn to_padded_string(&self) -> String {
        format!("{:0width$}", self.id, width = Self::DECIMAL_DIGITS)
    }
}

/// Splits an ID into its sign bit, time, machine ID and sequence.
///
/// Every 64-bit value decomposes; [`Parts::recompose`] is the exact inverse.
///
/// ```
/// use glflake::{Id, decompose};
///
/// let parts = decompose(Id::from_i64(i64::MAX));
/// assert_eq!(parts.msb, 0);
/// assert_eq!(parts.time, 549_755_813_887);
/// assert_eq!(parts.machine_id, 65_535);
/// assert_eq!(parts.sequence, 255);
/// ```
pub const fn decompose(id: Id) -> Parts {
    id.decompose()
}

/// The fields of an [`Id`], widened to `i64` for inspection.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parts {
    pub id: i64,
    pub msb: i64,
    pub time: i64,
    #[cfg_attr(feature = "serde", serde(rename = "machine-id"))]
    pub machine_id: i64,
    pub sequence: i64,
}

impl Parts {
    /// Packs the fields back into the ID they were taken from.
    pub const fn recompose(&self) -> Id {
        let msb = ((self.msb as u64) & 1) << 63;
        let time = ((self.time as u64) & Id::TIME_MASK) << Id::TIME_SHIFT;
        let machine_id = ((self.machine_id as u64) & Id::MACHINE_ID_MASK) << Id::MACHINE_ID_SHIFT;
        let sequence = ((self.sequence as u64) & Id::SEQUENCE_MASK) << Id::SEQUENCE_SHIFT;
        Id::from_i64((msb | time | machine_id | sequence) as i64)
    }

    /// Returns the fields keyed by name: `id`, `msb`, `time`, `machine-id`,
    /// `sequence`.
    pub fn to_map(&self) -> BTreeMap<&'static str, i64> {
        BTreeMap::from([
            ("id", self.id),
            ("msb", self.msb),
            ("time", self.time),
            ("machine-id", self.machine_id),
            ("sequence", self.sequence),
        ])
    }
}

impl From<i64> for Id {
    fn from(id: i64) -> Self {
        Self::from_i64(id)
    }
}

impl From<Id> for i64 {
    fn from(id: Id) -> Self {
        id.to_i64()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bit_layout_debug(f, self)
    }
}

struct FieldLayout {
    name: &'static str,
    bits: u32,
    value: u64,
}

fn write_bit_layout_debug(f: &mut fmt::Formatter<'_>, id: &Id) -> fmt::Result {
    let fields = [
        FieldLayout {
            name: "unused",
            bits: 1,
            value: u64::from(id.msb()),
        },
        FieldLayout {
            name: "time",
            bits: Id::TIME_BITS,
            value: id.time() as u64,
        },
        FieldLayout {
            name: "machine_id",
            bits: Id::MACHINE_ID_BITS,
            value: u64::from(id.machine_id()),
        },
        FieldLayout {
            name: "sequence",
            bits: Id::SEQUENCE_BITS,
            value: u64::from(id.sequence()),
        },
    ];

    // Widest of label, decimal and hex, plus one space either side
    let columns: Vec<usize> = fields
        .iter()
        .map(|field| {
            let label_len = format!("{} ({})", field.name, field.bits).len();
            let dec_len = field.value.to_string().len();
            let hex_len = format!("0x{:x}", field.value).len();
            label_len.max(dec_len).max(hex_len) + 2
        })
        .collect();

    fn center(s: impl ToString, width: usize) -> String {
        let s = s.to_string();
        let pad = width.saturating_sub(s.len());
        let left = pad / 2;
        format!("{}{}{}", " ".repeat(left), s, " ".repeat(pad - left))
    }

    let border = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
        write!(f, "        +")?;
        for &w in &columns {
            write!(f, "{}+", "-".repeat(w))?;
        }
        writeln!(f)
    };

    writeln!(f, "Id {{")?;
    writeln!(f, "    raw id     : 0x{:016x} ({})", id.id, id.id)?;
    writeln!(f, "    padded     : {}", id.to_padded_string())?;
    writeln!(f, "    layout     :")?;

    border(f)?;
    write!(f, "        |")?;
    for (field, &w) in fields.iter().zip(&columns) {
        write!(f, "{}|", center(format!("{} ({})", field.name, field.bits), w))?;
    }
    writeln!(f)?;
    border(f)?;
    write!(f, "        |")?;
    for (field, &w) in fields.iter().zip(&columns) {
        write!(f, "{}|", center(field.value, w))?;
    }
    writeln!(f)?;
    write!(f, "        |")?;
    for (field, &w) in fields.iter().zip(&columns) {
        write!(f, "{}|", center(format!("0x{:x}", field.value), w))?;
    }
    writeln!(f)?;
    border(f)?;

    write!(f, "}}")
}
