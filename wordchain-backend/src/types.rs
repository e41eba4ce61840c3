//! Core types exchanged with the proof backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use wordchain_common::{serde_digest_hex, serde_fp_hex, Fp};

/// The operations of the transition program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationId {
    Init,
    Extend,
    Merge,
}

impl OperationId {
    pub const ALL: [OperationId; 3] = [OperationId::Init, OperationId::Extend, OperationId::Merge];

    /// Stable tag bound into keys and proofs.
    pub fn tag(&self) -> u8 {
        match self {
            OperationId::Init => 0,
            OperationId::Extend => 1,
            OperationId::Merge => 2,
        }
    }

    /// Number of prior proofs the operation consumes.
    pub fn arity(&self) -> usize {
        match self {
            OperationId::Init => 0,
            OperationId::Extend => 1,
            OperationId::Merge => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationId::Init => "init",
            OperationId::Extend => "extend",
            OperationId::Merge => "merge",
        }
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of the program handed to `compile`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSpec {
    /// Program name, bound into the key.
    pub name: String,

    /// Circuit version, bound into the key.
    pub version: u32,

    /// Operations the key will accept.
    pub operations: Vec<OperationId>,
}

impl ProgramSpec {
    pub fn new(name: impl Into<String>, version: u32, operations: Vec<OperationId>) -> Self {
        Self {
            name: name.into(),
            version,
            operations,
        }
    }

    /// Statement digest of the program.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"wordchain_program_spec_v1");
        hasher.update(&(self.name.len() as u64).to_le_bytes());
        hasher.update(self.name.as_bytes());
        hasher.update(&self.version.to_le_bytes());
        hasher.update(&(self.operations.len() as u64).to_le_bytes());
        for op in &self.operations {
            hasher.update(&[op.tag()]);
        }
        *hasher.finalize().as_bytes()
    }
}

/// Verification key produced once by `compile`.
///
/// Immutable after setup; share it by reference or behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKey {
    pub program_name: String,
    pub version: u32,
    pub operations: Vec<OperationId>,
    #[serde(with = "serde_digest_hex")]
    pub digest: [u8; 32],
}

impl VerificationKey {
    /// Whether proofs of `operation` are accepted under this key.
    pub fn supports(&self, operation: OperationId) -> bool {
        self.operations.contains(&operation)
    }
}

/// A proof for one Init/Extend/Merge step.
///
/// Bound to exactly one public input (the new state commitment) and to the
/// digests of the child proofs verified while it was produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProof {
    /// Operation this proof attests to.
    pub operation: OperationId,

    /// Public input: the commitment the proof is bound to.
    #[serde(with = "serde_fp_hex")]
    pub public_input: Fp,

    /// Recursion depth; 0 for Init.
    pub depth: u32,

    /// Digests of the child proofs verified inside this step.
    pub children: Vec<ChildDigest>,

    /// Backend-specific proof bytes.
    pub proof_bytes: Vec<u8>,
}

/// Digest of a child proof, as bound into its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildDigest(#[serde(with = "serde_digest_hex")] pub [u8; 32]);

impl ChainProof {
    /// Digest used when this proof is bound into a parent.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"wordchain_chain_proof_v1");
        hasher.update(&[self.operation.tag()]);
        hasher.update(&wordchain_common::fp_to_bytes(&self.public_input));
        hasher.update(&self.depth.to_le_bytes());
        hasher.update(&(self.children.len() as u64).to_le_bytes());
        for child in &self.children {
            hasher.update(&child.0);
        }
        hasher.update(&(self.proof_bytes.len() as u64).to_le_bytes());
        hasher.update(&self.proof_bytes);
        *hasher.finalize().as_bytes()
    }
}
