//! tifflike - diagnostic dump tool for TIFF/BigTIFF containers.
//!
//! Parses a file's directory chain and prints every tag of every directory.
//! Optionally extracts the well-known properties and computes the quickhash
//! fingerprint.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tifflike::{build_properties, dump, hash_level, QuickHash, TiffFile};

/// Dump the directory structure of a TIFF or BigTIFF file.
#[derive(Debug, Parser)]
#[command(name = "tifflike", version, about)]
struct Cli {
    /// File to parse
    file: PathBuf,

    /// Print the well-known properties of directory 0
    #[arg(long)]
    properties: bool,

    /// Compute the quickhash of the last (lowest-resolution) directory
    #[arg(long)]
    hash: bool,

    /// Enable verbose logging
    #[arg(short, long, env = "TIFFLIKE_VERBOSE")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}: {e}", cli.file.display());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::open(&cli.file)?;
    let tiff = TiffFile::open(&mut file)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    dump(&tiff, &mut out)?;

    if cli.properties {
        let props = build_properties(&tiff, 0);
        let mut keys: Vec<&String> = props.keys().collect();
        keys.sort();
        writeln!(out, "Properties")?;
        for key in keys {
            writeln!(out, " {key}: {}", props[key])?;
        }
        writeln!(out)?;
    }

    if cli.hash {
        let mut hash = QuickHash::new();
        hash_level(&mut hash, &mut file, &tiff, tiff.directory_count() - 1)?;
        match hash.finalize() {
            Some(digest) => writeln!(out, "Quickhash: {digest}")?,
            None => writeln!(out, "Quickhash: disabled (level too large)")?,
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "tifflike=debug" } else { "tifflike=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
