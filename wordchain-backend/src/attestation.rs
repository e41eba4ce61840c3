//! BLAKE3 attestation backend.
//!
//! Proof bytes are a keyed BLAKE3 digest over the verification key, operation,
//! public input, recursion depth and the digests of every child proof verified
//! during synthesis. Verification recomputes the digest. The backend is
//! deterministic and transparent: it checks the same requirements a circuit
//! would, but anyone holding the key can forge bytes without running them.

use std::collections::HashSet;

use tracing::debug;
use wordchain_common::{fp_to_bytes, Fp};

use crate::backend::{BackendError, ProofBackend};
use crate::circuit::{StepCircuit, StepContext};
use crate::types::{ChainProof, ChildDigest, OperationId, ProgramSpec, VerificationKey};

/// Transparent BLAKE3 implementation of [`ProofBackend`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AttestationBackend;

impl AttestationBackend {
    pub fn new() -> Self {
        Self
    }

    fn key_digest(spec: &ProgramSpec) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"wordchain_verification_key_v1");
        hasher.update(&spec.digest());
        *hasher.finalize().as_bytes()
    }

    fn attest(
        key: &VerificationKey,
        operation: OperationId,
        public_input: &Fp,
        depth: u32,
        children: &[ChildDigest],
    ) -> Vec<u8> {
        let mut hasher = blake3::Hasher::new_keyed(&key.digest);
        hasher.update(b"wordchain_step_proof_v1");
        hasher.update(&[operation.tag()]);
        hasher.update(&fp_to_bytes(public_input));
        hasher.update(&depth.to_le_bytes());
        hasher.update(&(children.len() as u64).to_le_bytes());
        for child in children {
            hasher.update(&child.0);
        }
        hasher.finalize().as_bytes().to_vec()
    }
}

impl ProofBackend for AttestationBackend {
    fn compile(&self, spec: &ProgramSpec) -> Result<VerificationKey, BackendError> {
        if spec.name.is_empty() {
            return Err(BackendError::InvalidProgram("empty program name".into()));
        }
        if spec.operations.is_empty() {
            return Err(BackendError::InvalidProgram("no operations".into()));
        }
        let mut seen = HashSet::new();
        for op in &spec.operations {
            if !seen.insert(*op) {
                return Err(BackendError::InvalidProgram(format!(
                    "operation {op} listed twice"
                )));
            }
        }

        let key = VerificationKey {
            program_name: spec.name.clone(),
            version: spec.version,
            operations: spec.operations.clone(),
            digest: Self::key_digest(spec),
        };
        debug!(
            program = %key.program_name,
            version = key.version,
            "compiled word chain program"
        );
        Ok(key)
    }

    fn generate_proof<C: StepCircuit>(
        &self,
        key: &VerificationKey,
        circuit: &C,
    ) -> Result<ChainProof, BackendError> {
        let operation = circuit.operation();
        if !key.supports(operation) {
            return Err(BackendError::OperationNotCompiled(operation));
        }

        let mut cx = StepContext::new(self, key);
        circuit.synthesize(&mut cx)?;
        let checks = cx.checks();
        let (children, depth) = cx.into_bindings();

        if children.len() != operation.arity() {
            return Err(BackendError::ArityMismatch {
                operation,
                expected: operation.arity(),
                actual: children.len(),
            });
        }

        let public_input = circuit.public_input();
        let proof_bytes = Self::attest(key, operation, &public_input, depth, &children);
        debug!(%operation, depth, checks, "attested step");

        Ok(ChainProof {
            operation,
            public_input,
            depth,
            children,
            proof_bytes,
        })
    }

    fn verify_proof(&self, proof: &ChainProof, key: &VerificationKey) -> bool {
        if !key.supports(proof.operation) {
            debug!(operation = %proof.operation, "operation not in key");
            return false;
        }
        if proof.children.len() != proof.operation.arity() {
            debug!(
                operation = %proof.operation,
                children = proof.children.len(),
                "child count does not match operation"
            );
            return false;
        }
        let depth_ok = match proof.operation {
            OperationId::Init => proof.depth == 0,
            OperationId::Extend | OperationId::Merge => proof.depth >= 1,
        };
        if !depth_ok {
            debug!(operation = %proof.operation, depth = proof.depth, "bad recursion depth");
            return false;
        }

        let expected = Self::attest(
            key,
            proof.operation,
            &proof.public_input,
            proof.depth,
            &proof.children,
        );
        if proof.proof_bytes != expected {
            debug!(
                operation = %proof.operation,
                len = proof.proof_bytes.len(),
                "proof binding mismatch"
            );
            return false;
        }
        true
    }
}
