//! # glflake
//!
//! A distributed unique ID generator inspired by Twitter's Snowflake. Each ID
//! is a positive 64-bit integer:
//!
//! ```text
//!  Bit Index:  63           63 62            24 23             8 7              0
//!              +--------------+----------------+----------------+---------------+
//!  Field:      |  unused (1)  |    time (39)   | machine ID (16)| sequence (8)  |
//!              +--------------+----------------+----------------+---------------+
//!              |<----------- MSB ---------- 64 bits ----------- LSB ----------->|
//! ```
//!
//! - 39 bits of time in units of 10 msec since a configurable epoch (about 174 years)
//! - 16 bits of machine ID (65536 nodes)
//! - 8 bits of sequence number (256 IDs per tick)
//!
//! IDs can be moved in and out of several textual and binary forms; see
//! [`Encoding`] and the conversion methods on [`Id`].
//!
//! ```
//! use glflake::{Encoding, Glflake, Settings};
//!
//! let generator = Glflake::new(Settings::new().with_machine_id(7)).unwrap();
//! let id = generator.try_next_id().unwrap();
//! assert_eq!(id.machine_id(), 7);
//!
//! let encoded = Encoding::Base58.encode(id);
//! assert_eq!(Encoding::Base58.decode(&encoded).unwrap(), id);
//! ```

mod codec;
mod error;
mod generator;
mod id;
mod machine;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::codec::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::machine::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
