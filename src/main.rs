//! rlpgen: generate RLP encoders and decoders for Rust record types.
//!
//! # Usage
//!
//! ```bash
//! # Encoder for `Transaction`, declared somewhere in ./schema, to stdout
//! rlpgen --dir schema --type Transaction
//!
//! # Both routines, written next to the schema
//! rlpgen --dir schema --type Transaction --decoder --out schema/transaction_rlp.rs
//!
//! # Treat hand-written `Hash` as an opaque pre-encoded item
//! rlpgen --dir schema --type Header --raw Hash
//!
//! # Trace what the generator is doing
//! RLPGEN_LOG=debug rlpgen --dir schema --type Header
//! ```

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use rlpgen::gen::Config;

#[derive(Debug, Parser)]
#[command(name = "rlpgen", version, about = "Generate RLP encoders and decoders for Rust record types")]
struct Cli {
    /// Directory holding the schema sources
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Output file, or `-` for standard output
    #[arg(long, default_value = "-")]
    out: String,

    /// Generate the encoder
    #[arg(long, default_value_t = true, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    encoder: bool,

    /// Generate the decoder
    #[arg(long, default_value_t = false, num_args = 0..=1, default_missing_value = "true", action = ArgAction::Set)]
    decoder: bool,

    /// Record type to generate routines for
    #[arg(long = "type", value_name = "NAME")]
    type_name: String,

    /// Type to treat as an opaque, pre-encoded item (repeatable)
    #[arg(long = "raw", value_name = "TYPE")]
    raw: Vec<String>,

    /// Path of the runtime crate in the generated code
    #[arg(long, default_value = "rlpgen")]
    crate_path: String,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            dir: self.dir.clone(),
            type_name: self.type_name.clone(),
            generate_encoder: self.encoder,
            generate_decoder: self.decoder,
            raw_types: self.raw.clone(),
            runtime_path: self.crate_path.clone(),
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let code = cli
        .config()
        .process()
        .with_context(|| format!("generating routines for `{}`", cli.type_name))?;
    if cli.out == "-" {
        std::io::stdout()
            .lock()
            .write_all(code.as_bytes())
            .context("writing to standard output")?;
    } else {
        fs::write(&cli.out, code).with_context(|| format!("writing {}", cli.out))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    // usage errors exit with status 2, `--help` and `--version` with 0
    let cli = Cli::try_parse().unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("RLPGEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rlpgen: {e:#}");
            ExitCode::FAILURE
        }
    }
}
