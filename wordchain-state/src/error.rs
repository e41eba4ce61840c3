use thiserror::Error;

/// Structural errors in plaintext chain state.
///
/// Adjacency failures are not errors; they are carried in `ChainState::valid`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("chain segment length must be at least 1")]
    EmptySegment,

    #[error("chain length overflow: {0} + {1}")]
    LengthOverflow(u64, u64),
}
