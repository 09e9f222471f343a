#![doc = include_str!("../README.md")]

mod config;
mod render;
mod telemetry;

use clap::Parser;
use config::{CliArgs, ClockKind, Config, Format, Mode};
use glflake::{Glflake, GlflakeGenerator, MonotonicClock, Settings, SystemClock, ThreadSleep};
use std::io::{BufWriter, Write};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_telemetry()?;
    tracing::debug!(?config, "starting");

    match config.mode {
        Mode::Parse { input } => {
            let id = render::parse(&input, config.format)?;
            let parts = id.decompose();
            println!("{id} {} {}", id.to_padded_string(), render::render_parts(&parts));
            Ok(())
        }
        Mode::Generate {
            count,
            machine_id,
            start_time,
            clock,
        } => {
            let mut settings = Settings::new();
            if let Some(machine_id) = machine_id {
                settings = settings.with_machine_id(machine_id);
            }
            if let Some(start_time) = start_time {
                settings = settings.with_start_time(start_time);
            }

            match clock {
                ClockKind::System => {
                    let generator = Glflake::with_sources(settings, SystemClock, ThreadSleep)?;
                    tracing::info!(
                        machine_id = generator.machine_id(),
                        start_time = ?generator.start_time(),
                        "generator ready"
                    );
                    generate(&generator, count, config.format, config.decompose)
                }
                ClockKind::Monotonic => {
                    let generator =
                        Glflake::with_sources(settings, MonotonicClock::default(), ThreadSleep)?;
                    tracing::info!(
                        machine_id = generator.machine_id(),
                        start_time = ?generator.start_time(),
                        "generator ready"
                    );
                    generate(&generator, count, config.format, config.decompose)
                }
            }
        }
    }
}

fn generate<G: GlflakeGenerator>(
    generator: &G,
    count: u64,
    format: Format,
    decompose: bool,
) -> anyhow::Result<()> {
    let mut out = BufWriter::new(std::io::stdout().lock());
    for _ in 0..count {
        let id = generator.try_next_id()?;
        let text = render::render(id, format);
        if decompose {
            writeln!(out, "{text} {}", render::render_parts(&id.decompose()))?;
        } else {
            writeln!(out, "{text}")?;
        }
    }
    out.flush()?;
    tracing::info!(count, "generated ids");
    Ok(())
}
