//! # wordchain-program
//!
//! Recursive proofs that a sequence of words forms a word chain: every word
//! starts with the last symbol of the word before it.
//!
//! A chain segment is summarized by a [`ChainState`] and committed to a single
//! field element. Three operations produce proofs bound to such commitments:
//!
//! ```text
//!   Init(w)                      Unstarted        ──► Segment(1, true, C)
//!   Extend(P, w')                Segment(n, v, C) ──► Segment(n + 1, v && connects, C')
//!   Merge(P1, P2)    Segment(n1, v1, C1) x Segment(n2, v2, C2)
//!                                                 ──► Segment(n1 + n2, v1 && v2 && connects, Cm)
//! ```
//!
//! Extend and Merge verify the proofs they consume inside their own circuits,
//! so the final proof attests to the whole history down to each Init.
//!
//! Merge checks the current (last) word of each input. Extending by `w` and
//! merging with the one-word segment `[w]` give the same state, but merging a
//! segment of two or more words compares its last word, not its first. So
//! [`join_segments`] and [`build_balanced`] can report `valid = false` for a
//! chain that [`build_sequential`] reports valid.
//!
//! A proof that verifies certifies the protocol arithmetic only. Whether the
//! words actually chain is the `valid` flag of the disclosed final state.
//!
//! ## Example
//!
//! ```
//! use wordchain_backend::AttestationBackend;
//! use wordchain_program::{build_sequential, ProgramConfig, WordChainProgram};
//!
//! let program = WordChainProgram::compile(AttestationBackend::new(), ProgramConfig::default())?;
//! let chain = build_sequential(&program, &["cat", "tree", "elephant"])?;
//! assert_eq!(chain.length(), 3);
//! assert!(chain.is_valid());
//! assert!(program.verify(&chain.proof, &chain.commitment));
//! # Ok::<(), wordchain_program::ChainError>(())
//! ```

pub mod bundle;
pub mod circuits;
pub mod compose;
pub mod config;
pub mod error;
pub mod program;
pub mod segment;
pub mod telemetry;

pub use bundle::{verify_bundle, ChainProofBundle, VerifiedChain};
pub use circuits::{ExtendCircuit, InitCircuit, MergeCircuit, PriorSegment};
pub use compose::{build_balanced, build_sequential, join_segments};
pub use config::{ProgramConfig, CIRCUIT_VERSION, DEFAULT_PROGRAM_NAME};
pub use error::ChainError;
pub use program::WordChainProgram;
pub use segment::ChainSegment;
pub use telemetry::init_tracing;

pub use wordchain_state::{can_chain, ChainState, ChainStateCommitment, WordSplit};
