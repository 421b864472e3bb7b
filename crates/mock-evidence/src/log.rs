// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2024-2025 Matter Labs

//! Logging related stuff
//!
//! Logs go to stderr, stdout is reserved for the generated fixture.

use anyhow::Context;
use tracing::level_filters::LevelFilter;
use tracing_log::LogTracer;
use tracing_subscriber::Registry;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// A log level parser for clap, with "off", "error", "warn", "info", "debug", "trace" as valid values
#[derive(Clone)]
pub struct LogLevelParser;

impl clap::builder::TypedValueParser for LogLevelParser {
    type Value = LevelFilter;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        clap::builder::TypedValueParser::parse(self, cmd, arg, value.to_owned())
    }

    fn parse(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: std::ffi::OsString,
    ) -> Result<Self::Value, clap::Error> {
        use std::str::FromStr;
        let p = clap::builder::PossibleValuesParser::new([
            "off", "error", "warn", "info", "debug", "trace",
        ]);
        let v = p.parse(cmd, arg, value)?;

        LevelFilter::from_str(&v)
            .map_err(|_| clap::Error::new(clap::error::ErrorKind::InvalidValue).with_cmd(cmd))
    }
}

/// The default filter directives for `crate_name` and this crate at `log_level`
pub fn filter_directives(crate_name: &str, log_level: &LevelFilter) -> String {
    match *log_level {
        LevelFilter::OFF => "off".into(),
        _ => format!("warn,{crate_name}={log_level},mock_evidence={log_level}"),
    }
}

/// Setup standard logging and loglevel for the given crate and the `mock_evidence` crate.
///
/// `RUST_LOG` takes precedence over `log_level`.
pub fn setup_logging(crate_name: &str, log_level: &LevelFilter) -> anyhow::Result<()> {
    LogTracer::init().context("Failed to set logger")?;
    let filter = EnvFilter::builder()
        .try_from_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(crate_name, log_level)));
    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{builder::TypedValueParser as _, Command};

    #[test]
    fn parse_levels() {
        let cmd = Command::new("test");
        for (input, expected) in [
            ("off", LevelFilter::OFF),
            ("error", LevelFilter::ERROR),
            ("warn", LevelFilter::WARN),
            ("info", LevelFilter::INFO),
            ("debug", LevelFilter::DEBUG),
            ("trace", LevelFilter::TRACE),
        ] {
            let level = LogLevelParser
                .parse_ref(&cmd, None, std::ffi::OsStr::new(input))
                .unwrap();
            assert_eq!(level, expected);
        }
    }

    #[test]
    fn parse_invalid_level() {
        let cmd = Command::new("test");
        assert!(LogLevelParser
            .parse_ref(&cmd, None, std::ffi::OsStr::new("verbose"))
            .is_err());
    }

    #[test]
    fn directives() {
        assert_eq!(
            filter_directives("sign_mock_evidence", &LevelFilter::DEBUG).to_lowercase(),
            "warn,sign_mock_evidence=debug,mock_evidence=debug"
        );
        assert_eq!(
            filter_directives("sign_mock_evidence", &LevelFilter::OFF),
            "off"
        );
    }
}
