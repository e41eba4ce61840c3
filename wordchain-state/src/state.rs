//! Chain state types and commitment computation.
//!
//! This module defines the plaintext chain segment summary and the commitment
//! scheme that binds it to a single public field element.

use serde::{Deserialize, Serialize};
use wordchain_common::{hash_fields, serde_fp_hex, Fp, COMMITMENT_DOMAIN};

use crate::split::WordSplit;

/// Version of the chain state layout.
/// Increment this when changing the committed fields.
pub const CHAIN_STATE_VERSION: u32 = 1;

/// Plaintext summary of a chain segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainState {
    /// The most recently appended word of the segment.
    pub current_word: WordSplit,

    /// Number of words composed into the segment.
    pub length: u64,

    /// True iff every adjacency and split check along the segment held.
    pub valid: bool,
}

/// Public commitment to a chain state.
///
/// This is the value a proof is bound to: a single field element that commits
/// to the word split, the length and the validity flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStateCommitment(#[serde(with = "serde_fp_hex")] pub Fp);

impl ChainStateCommitment {
    pub fn as_fp(&self) -> &Fp {
        &self.0
    }
}

impl ChainState {
    pub fn new(current_word: WordSplit, length: u64, valid: bool) -> Self {
        Self {
            current_word,
            length,
            valid,
        }
    }

    /// State of a one-word segment: `{word, 1, true}`.
    pub fn genesis(word: WordSplit) -> Self {
        Self::new(word, 1, true)
    }

    /// Committed field layout:
    /// `[version, H(word), H(prefix), H(last_char), length, valid]`.
    pub fn to_fields(&self) -> [Fp; 6] {
        let [word, prefix, last_char] = self.current_word.to_fields();
        [
            Fp::from(CHAIN_STATE_VERSION as u64),
            word,
            prefix,
            last_char,
            Fp::from(self.length),
            Fp::from(self.valid as u64),
        ]
    }

    /// Canonical commitment, `C = Hash(to_fields())`.
    pub fn commitment(&self) -> ChainStateCommitment {
        ChainStateCommitment(hash_fields(COMMITMENT_DOMAIN, &self.to_fields()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(word: &str, length: u64, valid: bool) -> ChainState {
        ChainState::new(WordSplit::new(word), length, valid)
    }

    #[test]
    fn commitment_is_deterministic() {
        assert_eq!(
            state("cat", 1, true).commitment(),
            state("cat", 1, true).commitment()
        );
    }

    #[test]
    fn every_field_changes_the_commitment() {
        let base = state("tree", 2, true).commitment();
        assert_ne!(base, state("tref", 2, true).commitment());
        assert_ne!(base, state("tree", 3, true).commitment());
        assert_ne!(base, state("tree", 2, false).commitment());

        let mut forged_split = state("tree", 2, true);
        forged_split.current_word = WordSplit::from_parts("tree", "tr", "ee");
        assert_ne!(base, forged_split.commitment());
    }

    #[test]
    fn genesis_is_single_valid_word() {
        let genesis = ChainState::genesis(WordSplit::new("cat"));
        assert_eq!(genesis.length, 1);
        assert!(genesis.valid);
    }

    #[test]
    fn state_serialization_round_trip() {
        let original = state("elephant", 3, true);
        let json = serde_json::to_string(&original).unwrap();
        let recovered: ChainState = serde_json::from_str(&json).unwrap();
        assert_eq!(original.commitment(), recovered.commitment());
    }
}
