//! The proof backend capability.

use thiserror::Error;
use wordchain_common::{hash_fields, Fp, COMMITMENT_DOMAIN};

use crate::circuit::{CircuitError, StepCircuit};
use crate::types::{ChainProof, OperationId, ProgramSpec, VerificationKey};

/// Backend errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("invalid program: {0}")]
    InvalidProgram(String),

    #[error("operation {0} was not compiled into this key")]
    OperationNotCompiled(OperationId),

    #[error("operation {operation} must bind {expected} child proofs, circuit bound {actual}")]
    ArityMismatch {
        operation: OperationId,
        expected: usize,
        actual: usize,
    },

    #[error("circuit unsatisfied: {0}")]
    Unsatisfied(#[from] CircuitError),
}

/// Generates and verifies proofs for the transition program.
///
/// `compile` must run once before any proof is generated; the resulting key is
/// passed explicitly to every later call.
pub trait ProofBackend {
    /// One-time setup producing the verification key.
    fn compile(&self, spec: &ProgramSpec) -> Result<VerificationKey, BackendError>;

    /// Commitment hash over field elements.
    ///
    /// Must agree with `ChainState::commitment` for honest callers to succeed.
    fn hash(&self, fields: &[Fp]) -> Fp {
        hash_fields(COMMITMENT_DOMAIN, fields)
    }

    /// Synthesize `circuit` and, if every requirement holds, prove it.
    fn generate_proof<C: StepCircuit>(
        &self,
        key: &VerificationKey,
        circuit: &C,
    ) -> Result<ChainProof, BackendError>
    where
        Self: Sized;

    /// Stateless verification of `proof` under `key`.
    fn verify_proof(&self, proof: &ChainProof, key: &VerificationKey) -> bool;

    /// Verify `proof` and check that it is bound to `expected`.
    fn verify_against(&self, proof: &ChainProof, key: &VerificationKey, expected: &Fp) -> bool {
        proof.public_input == *expected && self.verify_proof(proof, key)
    }
}
