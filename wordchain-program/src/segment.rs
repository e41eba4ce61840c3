//! Proved chain segments.

use serde::{Deserialize, Serialize};
use wordchain_backend::{ChainProof, ProofBackend};
use wordchain_state::{ChainState, ChainStateCommitment, WordSplit};

use crate::circuits::PriorSegment;
use crate::error::ChainError;
use crate::program::WordChainProgram;

/// A contiguous run of words: its plaintext state, commitment and proof.
///
/// The helpers compute the honest next state and commitment and call the
/// matching program operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSegment {
    pub state: ChainState,
    pub commitment: ChainStateCommitment,
    pub proof: ChainProof,
}

impl ChainSegment {
    /// Init a one-word segment.
    pub fn start<B: ProofBackend>(
        program: &WordChainProgram<B>,
        word: WordSplit,
    ) -> Result<Self, ChainError> {
        let state = ChainState::genesis(word);
        let commitment = program.commit(&state);
        let proof = program.init(&state.current_word, &commitment)?;
        Ok(Self {
            state,
            commitment,
            proof,
        })
    }

    /// Extend this segment by `next`.
    pub fn append<B: ProofBackend>(
        &self,
        program: &WordChainProgram<B>,
        next: WordSplit,
    ) -> Result<Self, ChainError> {
        let state = self.state.extend(next)?;
        let commitment = program.commit(&state);
        let proof = program.extend(self.as_prior(), &state.current_word, &commitment)?;
        Ok(Self {
            state,
            commitment,
            proof,
        })
    }

    /// Merge this segment (left) with `right`.
    pub fn join<B: ProofBackend>(
        &self,
        program: &WordChainProgram<B>,
        right: &ChainSegment,
    ) -> Result<Self, ChainError> {
        let state = self.state.merge(&right.state)?;
        let commitment = program.commit(&state);
        let proof = program.merge(self.as_prior(), right.as_prior(), &commitment)?;
        Ok(Self {
            state,
            commitment,
            proof,
        })
    }

    /// Borrow this segment as an input to Extend or Merge.
    pub fn as_prior(&self) -> PriorSegment<'_> {
        PriorSegment::new(&self.state, self.commitment, &self.proof)
    }

    pub fn length(&self) -> u64 {
        self.state.length
    }

    pub fn is_valid(&self) -> bool {
        self.state.valid
    }

    pub fn depth(&self) -> u32 {
        self.proof.depth
    }
}
