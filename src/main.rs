//! Command-line host for the 8255 sound trigger engine.
//!
//! Replays a sequence of port writes against a board table and prints the
//! playback calls each write produces.
//!
//! ```text
//! ppi-sound --variant zaxxon --initial 0xFF A=7F A=FF C=FE
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ppi_sound::ports::parse_hex_byte;
use ppi_sound::{EdgeDispatcher, PlaybackLog, PortWrite, SoundConfig, TableDefinition, Variant};

#[derive(Parser, Debug)]
#[command(name = "ppi-sound")]
#[command(about = "Replay 8255 port writes against an arcade sample sound board")]
struct Args {
    /// Board variant (zaxxon, congo)
    #[arg(short, long, default_value_t = Variant::Zaxxon)]
    variant: Variant,

    /// JSON configuration file (overrides --variant)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial value of every port latch in hex, e.g. FF or 0xFF
    #[arg(short, long, value_parser = parse_byte)]
    initial: Option<u8>,

    /// Print the active trigger table as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Port writes to replay in order, e.g. A=7F B=0xDF
    writes: Vec<PortWrite>,
}

fn parse_byte(value: &str) -> std::result::Result<u8, String> {
    parse_hex_byte(value).ok_or_else(|| format!("invalid hex byte '{value}'"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SoundConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => SoundConfig::for_variant(args.variant),
    };
    if let Some(initial) = args.initial {
        config.initial_port_value = initial;
    }

    let table = config.build_table().context("invalid trigger table")?;

    if args.dump {
        let json = serde_json::to_string_pretty(&TableDefinition::from(&table))?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "{}: {} channels, {} trigger rules, {} volume rules, ports latched at {:02X}",
        table.name(),
        table.channels(),
        table.triggers().len(),
        table.volumes().len(),
        config.initial_port_value
    );

    let playback = PlaybackLog::new(table.channels());
    let mut sound = EdgeDispatcher::with_initial(table, playback, config.initial_port_value);

    for write in &args.writes {
        sound.on_port_write(write.port, write.value);
        let events = sound.playback_mut().drain();

        println!("{write}");
        for event in events {
            match event {
                ppi_sound::PlaybackEvent::Start { sample, .. } => println!(
                    "    {event}  ({})",
                    sound.table().sample_name(sample).unwrap_or("?")
                ),
                _ => println!("    {event}"),
            }
        }
    }

    Ok(())
}
