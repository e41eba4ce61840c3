//! Error types for the transition program.

use thiserror::Error;
use wordchain_backend::{BackendError, CircuitError};
use wordchain_state::StateError;

/// Protocol violations raised by Init, Extend and Merge.
///
/// Adjacency failures never appear here; they clear `ChainState::valid`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The word given to Init does not split into prefix and one trailing symbol.
    #[error("malformed word split: {0:?}")]
    MalformedWord(String),

    /// A plaintext state does not hash to the commitment it was presented with.
    #[error("commitment mismatch: {0}")]
    CommitmentMismatch(String),

    /// An input proof failed backend verification.
    #[error("input proof failed verification: {0}")]
    UnverifiedProof(String),

    /// A plaintext state cannot describe a chain segment.
    #[error("invalid chain state: {0}")]
    InvalidState(#[from] StateError),

    /// A witness the circuit could not evaluate.
    #[error("invalid witness: {0}")]
    InvalidWitness(String),

    /// Composition was asked to build a chain from no words or segments.
    #[error("cannot build a chain from empty input")]
    EmptyChain,

    /// Setup or backend failure unrelated to a specific requirement.
    #[error("backend error: {0}")]
    Backend(BackendError),
}

impl From<BackendError> for ChainError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unsatisfied(circuit) => circuit.into(),
            other => ChainError::Backend(other),
        }
    }
}

impl From<CircuitError> for ChainError {
    fn from(err: CircuitError) -> Self {
        match err {
            CircuitError::MalformedWord(word) => ChainError::MalformedWord(word),
            CircuitError::CommitmentMismatch(label) => ChainError::CommitmentMismatch(label),
            CircuitError::ChildVerificationFailed(label) => ChainError::UnverifiedProof(label),
            CircuitError::InvalidWitness(reason) => ChainError::InvalidWitness(reason),
        }
    }
}
