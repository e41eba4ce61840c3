//! Word Chain State Model
//!
//! A word chain segment is summarized by a compact, hash-based commitment:
//! ```text
//! ChainState = {
//!     current_word: WordSplit  - most recently appended word, split as prefix ++ last_char
//!     length:       u64        - number of words composed into the segment (>= 1)
//!     valid:        bool       - every adjacency rule and split invariant held so far
//! }
//!
//! C = Hash(version || H(word) || H(prefix) || H(last_char) || length || valid)
//! ```
//!
//! # Transitions
//!
//! - extend: `(n, v) -> (n + 1, v && can_chain(current, next))`
//! - merge:  `(n1, v1) x (n2, v2) -> (n1 + n2, v1 && v2 && can_chain(current1, current2))`
//!
//! Adjacency failures never abort a transition; they only clear `valid`, which
//! can never be set again.

pub mod error;
pub mod rule;
pub mod split;
pub mod state;
pub mod transition;

pub use error::StateError;
pub use rule::can_chain;
pub use split::WordSplit;
pub use state::{ChainState, ChainStateCommitment, CHAIN_STATE_VERSION};
