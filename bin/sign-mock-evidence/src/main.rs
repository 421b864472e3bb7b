// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Generate signed mock SGX attestation evidence for on-chain verifier tests
//!
//! Prints the hex encoded `abi.encode(bytes signature, bytes values)` to stdout,
//! to be consumed by a test harness FFI call.

#![deny(missing_docs)]
#![deny(clippy::all)]

use anyhow::{Context, Result};
use clap::Parser;
use mock_evidence::{
    config::FixtureConfig,
    log::{setup_logging, LogLevelParser},
    quote::{MEASUREMENT_LENGTH, REPORT_DATA_LENGTH},
    util::decode_hex_padded,
    Fixture, RS256PrivateKey,
};
use std::{io::Write, path::PathBuf};
use tracing::{debug, error, level_filters::LevelFilter};

/// Sign mock SGX attestation evidence and ABI encode it for a contract
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Arguments {
    /// MRENCLAVE in hex, left-padded with zeros to 32 bytes
    mrenclave: String,
    /// MRSIGNER in hex, left-padded with zeros to 32 bytes
    mrsigner: String,
    /// report data payload in hex, left-padded with zeros to 64 bytes
    payload: String,
    /// PEM file with the RSA private key to sign the evidence with
    key: PathBuf,
    /// configuration file overriding the static evidence fields
    #[arg(long, env = "MOCK_EVIDENCE_CONFIG")]
    config: Option<PathBuf>,
    /// decode the generated output again and verify it before printing
    #[arg(long)]
    check: bool,
    /// Log level for the log output.
    /// Valid values are: `off`, `error`, `warn`, `info`, `debug`, `trace`
    #[clap(long, default_value_t = LevelFilter::WARN, value_parser = LogLevelParser)]
    log_level: LevelFilter,
}

fn run(args: &Arguments, out: &mut impl Write) -> Result<()> {
    let config = FixtureConfig::load(args.config.as_deref()).context("Failed to load config")?;
    debug!(?config, "config loaded");

    let mrenclave: [u8; MEASUREMENT_LENGTH] = decode_hex_padded("mrenclave", &args.mrenclave)?;
    let mrsigner: [u8; MEASUREMENT_LENGTH] = decode_hex_padded("mrsigner", &args.mrsigner)?;
    let payload: [u8; REPORT_DATA_LENGTH] = decode_hex_padded("payload", &args.payload)?;

    let key = RS256PrivateKey::from_pem_file(&args.key)
        .with_context(|| format!("Failed to load key `{}`", args.key.display()))?;

    let fixture = Fixture::generate(&config.evidence, &mrenclave, &mrsigner, &payload, &key)
        .context("Failed to generate fixture")?;

    if args.check {
        Fixture::check(
            &fixture.encode(),
            &key.public_key(),
            &mrenclave,
            &mrsigner,
            &payload,
        )
        .context("Generated fixture failed the check")?;
    }

    writeln!(out, "{}", fixture.to_hex()).context("Failed to write output")?;
    Ok(())
}

fn main_with_error() -> Result<()> {
    let args = Arguments::parse();
    setup_logging(env!("CARGO_CRATE_NAME"), &args.log_level)?;
    run(&args, &mut std::io::stdout().lock())
}

fn main() -> Result<()> {
    let ret = main_with_error();
    if let Err(e) = &ret {
        error!("Error: {e:#}");
    }
    ret
}
