//! Proof bundles handed from a chain producer to a verifier.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wordchain_backend::{ChainProof, ProofBackend};
use wordchain_common::{digest_to_hex, serde_digest_hex};
use wordchain_state::ChainState;

use crate::error::ChainError;
use crate::program::WordChainProgram;
use crate::segment::ChainSegment;

/// Final proof of a chain plus what a verifier needs to check it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProofBundle {
    pub circuit_version: u32,

    /// Digest of the verification key the proof was produced under.
    #[serde(with = "serde_digest_hex")]
    pub key_digest: [u8; 32],

    pub proof: ChainProof,

    /// Disclosed final state. Without it a verifier learns only that the
    /// protocol was followed, not the chain's length or validity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ChainState>,
}

/// Result of a successful bundle verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedChain {
    /// Number of words, when the state was disclosed.
    pub length: Option<u64>,

    /// Whether every adjacency held, when the state was disclosed.
    pub valid: Option<bool>,

    /// Recursion depth of the final proof.
    pub depth: u32,
}

impl ChainProofBundle {
    /// Package `segment` under `program`'s key, disclosing its state if asked.
    pub fn from_segment<B: ProofBackend>(
        program: &WordChainProgram<B>,
        segment: &ChainSegment,
        disclose_state: bool,
    ) -> Self {
        Self {
            circuit_version: program.verification_key().version,
            key_digest: program.verification_key().digest,
            proof: segment.proof.clone(),
            state: disclose_state.then(|| segment.state.clone()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize chain proof bundle")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse chain proof bundle json")
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json)
            .with_context(|| format!("failed to write bundle to {}", path.display()))
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read bundle at {}", path.display()))?;
        Self::from_json(&json)
    }
}

/// Check a bundle against `program`'s verification key.
///
/// Fails if the key digest differs, the proof does not verify, or a disclosed
/// state does not hash to the proof's public input. A chain whose adjacency
/// failed still verifies; inspect [`VerifiedChain::valid`].
pub fn verify_bundle<B: ProofBackend>(
    program: &WordChainProgram<B>,
    bundle: &ChainProofBundle,
) -> Result<VerifiedChain, ChainError> {
    let key = program.verification_key();
    if bundle.key_digest != key.digest || bundle.circuit_version != key.version {
        return Err(ChainError::UnverifiedProof(format!(
            "bundle was produced under key {} v{}, expected {} v{}",
            digest_to_hex(&bundle.key_digest),
            bundle.circuit_version,
            digest_to_hex(&key.digest),
            key.version
        )));
    }

    if !program.backend().verify_proof(&bundle.proof, key) {
        return Err(ChainError::UnverifiedProof("bundle proof".into()));
    }

    if let Some(state) = &bundle.state {
        state.check_well_formed()?;
        if program.commit(state).0 != bundle.proof.public_input {
            return Err(ChainError::CommitmentMismatch("disclosed state".into()));
        }
    }

    Ok(VerifiedChain {
        length: bundle.state.as_ref().map(|s| s.length),
        valid: bundle.state.as_ref().map(|s| s.valid),
        depth: bundle.proof.depth,
    })
}
