//! Program configuration.

use std::env::{self, VarError};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wordchain_backend::{OperationId, ProgramSpec};

/// Default program name bound into the verification key.
pub const DEFAULT_PROGRAM_NAME: &str = "word-chain";

/// Version of the Init/Extend/Merge circuits.
/// Increment this when any operation's checks change.
pub const CIRCUIT_VERSION: u32 = 1;

/// Configuration for a [`crate::WordChainProgram`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Name bound into the verification key.
    pub program_name: String,

    /// Circuit version bound into the verification key.
    pub circuit_version: u32,

    /// Treat a child proof that fails verification inside Merge as fatal.
    ///
    /// When false, Merge logs the failure and still produces a proof.
    pub strict_merge: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_name: DEFAULT_PROGRAM_NAME.into(),
            circuit_version: CIRCUIT_VERSION,
            strict_merge: true,
        }
    }
}

impl ProgramConfig {
    /// Load configuration from `WORDCHAIN_*` environment variables.
    ///
    /// Unset variables fall back to [`ProgramConfig::default`]. A set but
    /// unreadable or unparsable value is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();

        let program_name = read_var(&lookup, "WORDCHAIN_PROGRAM_NAME")?
            .unwrap_or(defaults.program_name);

        let circuit_version = match read_var(&lookup, "WORDCHAIN_CIRCUIT_VERSION")? {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("invalid WORDCHAIN_CIRCUIT_VERSION '{raw}'"))?,
            None => defaults.circuit_version,
        };

        let strict_merge = match read_var(&lookup, "WORDCHAIN_STRICT_MERGE")? {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("invalid WORDCHAIN_STRICT_MERGE '{raw}'"))?,
            None => defaults.strict_merge,
        };

        Ok(Self {
            program_name,
            circuit_version,
            strict_merge,
        })
    }

    /// Opt into logging instead of failing on unverified Merge inputs.
    pub fn lenient(mut self) -> Self {
        self.strict_merge = false;
        self
    }

    /// The program description handed to `ProofBackend::compile`.
    pub fn program_spec(&self) -> ProgramSpec {
        ProgramSpec::new(
            self.program_name.clone(),
            self.circuit_version,
            OperationId::ALL.to_vec(),
        )
    }
}

fn read_var<F>(lookup: &F, name: &str) -> Result<Option<String>>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("cannot read {name}")),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{other}'"),
    }
}
