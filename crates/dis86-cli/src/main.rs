#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dis86",
    about = "Disassemble 8086 machine code (mov/add/sub subset) into NASM source."
)]
struct Args {
    /// Flat binary file containing 16-bit 8086 machine code
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries nothing but the listing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> anyhow::Result<()> {
    let bytes =
        fs::read(&args.input).with_context(|| format!("read {}", args.input.display()))?;
    tracing::debug!(path = %args.input.display(), len = bytes.len(), "loaded input");

    let listing =
        dis86::decode_all(&bytes).with_context(|| format!("decode {}", args.input.display()))?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(listing.as_bytes())
        .and_then(|()| stdout.flush())
        .context("write listing to stdout")?;
    Ok(())
}
