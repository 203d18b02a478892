//! Configuration loading and validation for the `seal` tool.
//!
//! All values are read from `SEAL_*` environment variables so that secrets
//! never appear on the command line or in shell history.

use std::fmt;

use anyhow::{Context, Result};
use common::dearmor;
use seal_cell::SecureCellSeal;
use serde::Deserialize;
use zeroize::Zeroizing;

use crate::telemetry;

/// Validated `seal` configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base64 master key (`SEAL_MASTER_KEY`).
    #[serde(default)]
    pub master_key: Option<String>,

    /// Passphrase (`SEAL_PASSPHRASE`), used instead of a master key.
    #[serde(default)]
    pub passphrase: Option<String>,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether containers are written and read as base64 text.
    #[serde(default = "default_armor")]
    pub armor: bool,

    /// `master_key` decoded during validation.
    #[serde(skip)]
    decoded_key: Option<Zeroizing<Vec<u8>>>,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_armor() -> bool {
    true
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the combination of
    /// secrets is inconsistent.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("SEAL"))
            .build()
            .context("failed to build seal configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise seal configuration")?;

        c.validate()
    }

    /// Check the combination of settings and decode the master key.
    fn validate(mut self) -> Result<Self> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("SEAL_LOG_LEVEL must not be empty");
        }
        telemetry::level_filter(&self.log_level)?;
        if self.master_key.is_some() && self.passphrase.is_some() {
            anyhow::bail!("set only one of SEAL_MASTER_KEY and SEAL_PASSPHRASE");
        }
        if let Some(key) = &self.master_key {
            let decoded = dearmor(key).context("SEAL_MASTER_KEY must be base64-encoded")?;
            self.decoded_key = Some(Zeroizing::new(decoded));
        }
        if self.passphrase.as_deref() == Some("") {
            anyhow::bail!("SEAL_PASSPHRASE must not be empty when set");
        }
        Ok(self)
    }

    /// Build a cell from the configured secret.
    ///
    /// # Errors
    ///
    /// Returns an error if no secret is configured.
    pub fn cell(&self) -> Result<SecureCellSeal> {
        match (&self.decoded_key, &self.passphrase) {
            (Some(key), None) => Ok(SecureCellSeal::with_key(key.as_slice())?),
            (None, Some(passphrase)) => Ok(SecureCellSeal::with_passphrase(passphrase)?),
            (Some(_), Some(_)) => {
                anyhow::bail!("set only one of SEAL_MASTER_KEY and SEAL_PASSPHRASE")
            }
            (None, None) => anyhow::bail!("SEAL_MASTER_KEY or SEAL_PASSPHRASE is required"),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Validated configuration built in place of the environment.
    pub(crate) fn from_parts(
        master_key: Option<&str>,
        passphrase: Option<&str>,
        armor: bool,
    ) -> Result<Self> {
        Config {
            master_key: master_key.map(String::from),
            passphrase: passphrase.map(String::from),
            log_level: default_log_level(),
            armor,
            decoded_key: None,
        }
        .validate()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secrets; only whether they are set.
        f.debug_struct("Config")
            .field("master_key", &self.master_key.as_ref().map(|_| "[REDACTED]"))
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .field("log_level", &self.log_level)
            .field("armor", &self.armor)
            .finish_non_exhaustive()
    }
}
