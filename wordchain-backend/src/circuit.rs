//! Step circuits and the context they are synthesized in.
//!
//! A step circuit is one operation of the transition program. Synthesis runs
//! its requirements against a [`StepContext`], which supplies the backend hash,
//! verifies child proofs under the compiled key and records what the resulting
//! proof must bind.

use wordchain_common::Fp;

use crate::backend::ProofBackend;
use crate::types::{ChainProof, ChildDigest, OperationId, VerificationKey};

/// Circuit errors.
///
/// Every variant is a protocol violation: the step produces no proof.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    #[error("malformed word split: {0:?}")]
    MalformedWord(String),

    #[error("commitment mismatch: {0}")]
    CommitmentMismatch(String),

    #[error("child proof verification failed: {0}")]
    ChildVerificationFailed(String),

    #[error("invalid witness: {0}")]
    InvalidWitness(String),
}

/// One operation of the transition program, ready to be proved.
pub trait StepCircuit {
    /// Which operation this circuit implements.
    fn operation(&self) -> OperationId;

    /// The commitment the produced proof is bound to.
    fn public_input(&self) -> Fp;

    /// Check every requirement of the operation.
    ///
    /// Returning `Err` aborts proving.
    fn synthesize<B: ProofBackend>(&self, cx: &mut StepContext<'_, B>) -> Result<(), CircuitError>;
}

/// Synthesis context handed to [`StepCircuit::synthesize`].
pub struct StepContext<'a, B: ProofBackend> {
    backend: &'a B,
    key: &'a VerificationKey,
    children: Vec<ChildDigest>,
    child_depth: Option<u32>,
    checks: usize,
}

impl<'a, B: ProofBackend> StepContext<'a, B> {
    pub fn new(backend: &'a B, key: &'a VerificationKey) -> Self {
        Self {
            backend,
            key,
            children: Vec::new(),
            child_depth: None,
            checks: 0,
        }
    }

    /// Backend hash over `fields`.
    pub fn hash(&self, fields: &[Fp]) -> Fp {
        self.backend.hash(fields)
    }

    /// Require `condition`, failing with `error()` otherwise.
    pub fn enforce(
        &mut self,
        condition: bool,
        error: impl FnOnce() -> CircuitError,
    ) -> Result<(), CircuitError> {
        self.checks += 1;
        if condition {
            Ok(())
        } else {
            Err(error())
        }
    }

    /// Require `hash(fields) == expected`.
    pub fn enforce_commitment(
        &mut self,
        label: &str,
        fields: &[Fp],
        expected: &Fp,
    ) -> Result<(), CircuitError> {
        let computed = self.hash(fields);
        self.enforce(computed == *expected, || {
            CircuitError::CommitmentMismatch(label.to_string())
        })
    }

    /// Verify a child proof against `expected` and bind it into this step.
    pub fn verify_child(
        &mut self,
        label: &str,
        proof: &ChainProof,
        expected: &Fp,
    ) -> Result<(), CircuitError> {
        let verified = self.check_child(proof, expected);
        self.enforce(verified, || {
            CircuitError::ChildVerificationFailed(label.to_string())
        })
    }

    /// Verify a child proof and bind it into this step regardless of the outcome.
    ///
    /// Returns whether verification succeeded. Callers that continue after a
    /// `false` here produce a proof over an unverified lineage.
    pub fn check_child(&mut self, proof: &ChainProof, expected: &Fp) -> bool {
        self.checks += 1;
        let verified = self.backend.verify_against(proof, self.key, expected);
        self.children.push(ChildDigest(proof.digest()));
        self.child_depth = Some(self.child_depth.map_or(proof.depth, |d| d.max(proof.depth)));
        verified
    }

    /// Child digests bound so far, in verification order.
    pub fn children(&self) -> &[ChildDigest] {
        &self.children
    }

    /// Depth of the proof this step will produce.
    pub fn depth(&self) -> u32 {
        self.child_depth.map_or(0, |d| d.saturating_add(1))
    }

    /// Number of requirements checked so far.
    pub fn checks(&self) -> usize {
        self.checks
    }

    pub(crate) fn into_bindings(self) -> (Vec<ChildDigest>, u32) {
        let depth = self.depth();
        (self.children, depth)
    }
}
