//! The word chain transition program.

use tracing::{debug, info};
use wordchain_backend::{ChainProof, ProofBackend, VerificationKey};
use wordchain_state::{ChainState, ChainStateCommitment, WordSplit};

use crate::circuits::{ExtendCircuit, InitCircuit, MergeCircuit, PriorSegment};
use crate::config::ProgramConfig;
use crate::error::ChainError;

/// Handle over a compiled transition program.
///
/// Holds the backend and the verification key produced once by `compile`.
/// Every operation takes `&self`, so one handle can be shared across threads
/// when the backend is `Sync`.
#[derive(Clone, Debug)]
pub struct WordChainProgram<B: ProofBackend> {
    backend: B,
    key: VerificationKey,
    config: ProgramConfig,
}

impl<B: ProofBackend> WordChainProgram<B> {
    /// Compile the program described by `config` on `backend`.
    pub fn compile(backend: B, config: ProgramConfig) -> Result<Self, ChainError> {
        let key = backend.compile(&config.program_spec())?;
        info!(
            program = %key.program_name,
            version = key.version,
            strict_merge = config.strict_merge,
            "word chain program compiled"
        );
        Ok(Self {
            backend,
            key,
            config,
        })
    }

    /// Wrap a key compiled earlier, e.g. one loaded by a verifier.
    pub fn with_key(backend: B, key: VerificationKey, config: ProgramConfig) -> Self {
        Self {
            backend,
            key,
            config,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn verification_key(&self) -> &VerificationKey {
        &self.key
    }

    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Commitment of `state` under the backend hash.
    pub fn commit(&self, state: &ChainState) -> ChainStateCommitment {
        ChainStateCommitment(self.backend.hash(&state.to_fields()))
    }

    /// Check that `proof` verifies and is bound to `commitment`.
    pub fn verify(&self, proof: &ChainProof, commitment: &ChainStateCommitment) -> bool {
        self.backend.verify_against(proof, &self.key, commitment.as_fp())
    }

    /// Init: prove the one-word segment `{word, 1, true}` committed by `commitment`.
    ///
    /// A malformed split or a wrong commitment fails without a proof.
    pub fn init(
        &self,
        word: &WordSplit,
        commitment: &ChainStateCommitment,
    ) -> Result<ChainProof, ChainError> {
        debug!(word = %word.word, "init");
        let circuit = InitCircuit {
            word,
            commitment: *commitment,
        };
        let proof = self.backend.generate_proof(&self.key, &circuit)?;
        info!(operation = "init", depth = proof.depth, "proof generated");
        Ok(proof)
    }

    /// Extend: prove `prior` followed by `next`, committed by `commitment`.
    ///
    /// `prior.proof` must verify against `prior.commitment`; otherwise the call
    /// fails. A word that does not connect only clears `valid`.
    pub fn extend(
        &self,
        prior: PriorSegment<'_>,
        next: &WordSplit,
        commitment: &ChainStateCommitment,
    ) -> Result<ChainProof, ChainError> {
        debug!(
            length = prior.state.length,
            next = %next.word,
            "extend"
        );
        prior.state.check_well_formed()?;
        let circuit = ExtendCircuit {
            prior,
            next,
            commitment: *commitment,
        };
        let proof = self.backend.generate_proof(&self.key, &circuit)?;
        info!(operation = "extend", depth = proof.depth, "proof generated");
        Ok(proof)
    }

    /// Merge: prove the concatenation of `left` and `right`, committed by `commitment`.
    ///
    /// Input proofs that fail verification are fatal unless the program was
    /// configured with `strict_merge = false`.
    pub fn merge(
        &self,
        left: PriorSegment<'_>,
        right: PriorSegment<'_>,
        commitment: &ChainStateCommitment,
    ) -> Result<ChainProof, ChainError> {
        debug!(
            left_length = left.state.length,
            right_length = right.state.length,
            strict = self.config.strict_merge,
            "merge"
        );
        left.state.check_well_formed()?;
        right.state.check_well_formed()?;
        let circuit = MergeCircuit {
            left,
            right,
            commitment: *commitment,
            strict: self.config.strict_merge,
        };
        let proof = self.backend.generate_proof(&self.key, &circuit)?;
        info!(operation = "merge", depth = proof.depth, "proof generated");
        Ok(proof)
    }
}
