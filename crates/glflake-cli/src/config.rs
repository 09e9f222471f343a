use anyhow::bail;
use clap::{Parser, ValueEnum};
use core::time::Duration;
use glflake::Encoding;

/// How IDs are written to, or read from, the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Decimal,
    /// 19-digit zero-padded decimal.
    Padded,
    Base2,
    Base32,
    Base36,
    Base58,
    Base64,
    /// Quoted decimal string.
    Json,
    /// Hex of the 8-byte big-endian form.
    Bytes,
}

impl Format {
    /// The textual codec backing this format, if it is one of the table
    /// encodings.
    pub fn encoding(self) -> Option<Encoding> {
        match self {
            Self::Decimal | Self::Padded => Some(Encoding::Decimal),
            Self::Base2 => Some(Encoding::Base2),
            Self::Base32 => Some(Encoding::Base32),
            Self::Base36 => Some(Encoding::Base36),
            Self::Base58 => Some(Encoding::Base58),
            Self::Base64 => Some(Encoding::Base64),
            Self::Json | Self::Bytes => None,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// Read the wall clock on every call.
    System,
    /// Anchor to the wall clock once, then advance monotonically.
    Monotonic,
}

/// Generates glflake IDs, or decodes one back into its fields.
///
/// Every option can also be supplied through the environment or a `.env`
/// file.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "glflake",
    version,
    about = "Generate and inspect distributed 64-bit glflake IDs"
)]
pub struct CliArgs {
    /// Number of IDs to generate.
    ///
    /// Environment variable: `GLFLAKE_COUNT`
    #[arg(short = 'n', long, env = "GLFLAKE_COUNT", default_value_t = 1)]
    pub count: u64,

    /// Machine ID embedded in every ID.
    ///
    /// Defaults to the lower 16 bits of this host's private IPv4 address.
    ///
    /// Environment variable: `GLFLAKE_MACHINE_ID`
    #[arg(short, long, env = "GLFLAKE_MACHINE_ID")]
    pub machine_id: Option<u16>,

    /// Epoch as milliseconds since the Unix epoch.
    ///
    /// Defaults to 2021-10-01T00:00:00Z. Must not be in the future.
    ///
    /// Environment variable: `GLFLAKE_START_TIME_MS`
    #[arg(long, env = "GLFLAKE_START_TIME_MS")]
    pub start_time_ms: Option<u64>,

    /// Representation used for output, or expected by `--parse`.
    ///
    /// Environment variable: `GLFLAKE_FORMAT`
    #[arg(short, long, value_enum, env = "GLFLAKE_FORMAT", default_value_t = Format::Decimal)]
    pub format: Format,

    /// Clock used to timestamp IDs.
    ///
    /// Environment variable: `GLFLAKE_CLOCK`
    #[arg(long, value_enum, env = "GLFLAKE_CLOCK", default_value_t = ClockKind::System)]
    pub clock: ClockKind,

    /// Print each ID's fields next to it.
    #[arg(short, long, default_value_t = false)]
    pub decompose: bool,

    /// Decode this value (in `--format`) instead of generating.
    ///
    /// Generation options, including those set through the environment, are
    /// ignored in this mode.
    #[arg(short, long)]
    pub parse: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Mode {
    Generate {
        count: u64,
        machine_id: Option<u16>,
        start_time: Option<Duration>,
        clock: ClockKind,
    },
    Parse {
        input: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub format: Format,
    pub decompose: bool,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let mode = match args.parse {
            Some(input) => {
                if input.is_empty() {
                    bail!("--parse requires a non-empty value");
                }
                Mode::Parse { input }
            }
            None => {
                if args.count == 0 {
                    bail!("GLFLAKE_COUNT must be greater than 0");
                }
                Mode::Generate {
                    count: args.count,
                    machine_id: args.machine_id,
                    start_time: args.start_time_ms.map(Duration::from_millis),
                    clock: args.clock,
                }
            }
        };

        Ok(Self {
            mode,
            format: args.format,
            decompose: args.decompose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    // Serializes tests that read or write `GLFLAKE_*` variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn try_parse(args: &[&str]) -> anyhow::Result<Config> {
        let args = CliArgs::try_parse_from(std::iter::once("glflake").chain(args.iter().copied()))?;
        Config::try_from(args)
    }

    fn parse(args: &[&str]) -> anyhow::Result<Config> {
        let _guard = env_lock();
        try_parse(args)
    }

    #[test]
    fn defaults_generate_one_decimal_id() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.format, Format::Decimal);
        assert!(!config.decompose);
        assert!(matches!(
            config.mode,
            Mode::Generate {
                count: 1,
                machine_id: None,
                start_time: None,
                clock: ClockKind::System,
            }
        ));
    }

    #[test]
    fn generation_options() {
        let config = parse(&[
            "-n",
            "5",
            "--machine-id",
            "8329",
            "--start-time-ms",
            "1633046400000",
            "--format",
            "base58",
            "--clock",
            "monotonic",
            "--decompose",
        ])
        .unwrap();
        assert_eq!(config.format, Format::Base58);
        assert!(config.decompose);
        let Mode::Generate {
            count,
            machine_id,
            start_time,
            clock,
        } = config.mode
        else {
            panic!("expected generate mode");
        };
        assert_eq!(count, 5);
        assert_eq!(machine_id, Some(8329));
        assert_eq!(start_time, Some(glflake::DEFAULT_EPOCH));
        assert_eq!(clock, ClockKind::Monotonic);
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = parse(&["--count", "0"]).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn machine_id_must_fit_16_bits() {
        assert!(parse(&["--machine-id", "65536"]).is_err());
    }

    #[test]
    fn parse_mode() {
        let config = parse(&["--parse", "MTkzMTM4NjQzMDcyMDI1Ng==", "-f", "base64"]).unwrap();
        assert!(matches!(config.mode, Mode::Parse { ref input } if input == "MTkzMTM4NjQzMDcyMDI1Ng=="));
        assert_eq!(config.format.encoding(), Some(Encoding::Base64));
    }

    #[test]
    fn parse_ignores_generation_options() {
        let config = parse(&["--parse", "1", "--count", "2", "--clock", "monotonic"]).unwrap();
        assert!(matches!(config.mode, Mode::Parse { ref input } if input == "1"));
        assert!(parse(&["--parse", ""]).is_err());
    }

    #[test]
    fn parse_ignores_generation_environment() {
        let _guard = env_lock();
        // SAFETY: every test touching `GLFLAKE_*` holds `ENV_LOCK`.
        unsafe {
            std::env::set_var("GLFLAKE_COUNT", "5");
            std::env::set_var("GLFLAKE_CLOCK", "monotonic");
        }
        let parsed = try_parse(&["--parse", "1"]);
        let generated = try_parse(&[]);
        // SAFETY: as above.
        unsafe {
            std::env::remove_var("GLFLAKE_COUNT");
            std::env::remove_var("GLFLAKE_CLOCK");
        }

        let config = parsed.unwrap();
        assert!(matches!(config.mode, Mode::Parse { ref input } if input == "1"));
        assert!(matches!(
            generated.unwrap().mode,
            Mode::Generate {
                count: 5,
                clock: ClockKind::Monotonic,
                ..
            }
        ));
    }
}
