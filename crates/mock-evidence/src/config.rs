// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Matter Labs

//! Configuration handling

use crate::evidence::EvidenceTemplate;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::trace;

/// Prefix of environment variables overriding the configuration,
/// e.g. `MOCK_EVIDENCE__EVIDENCE__TIMESTAMP`
pub const ENV_PREFIX: &str = "MOCK_EVIDENCE";

const ENV_SEPARATOR: &str = "__";

/// Configuration of the fixture generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// The static evidence fields
    pub evidence: EvidenceTemplate,
}

impl FixtureConfig {
    /// Load the configuration.
    ///
    /// Sources in increasing priority: built-in defaults, the optional configuration
    /// file (format by extension), environment variables with [`ENV_PREFIX`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        trace!(?path, "Loading config");

        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.add_source(env).build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
}
