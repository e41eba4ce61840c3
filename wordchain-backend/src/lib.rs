//! # wordchain-backend
//!
//! The proof backend seen by the word chain transition program.
//!
//! The program never touches proving internals. Each operation is expressed as
//! a [`StepCircuit`]: a public input plus a `synthesize` routine that checks the
//! operation's requirements and recursively verifies the proofs it consumes.
//! A [`ProofBackend`] compiles the program once into a [`VerificationKey`],
//! runs circuits into [`ChainProof`]s and verifies them.
//!
//! ```text
//!            compile(ProgramSpec) ──► VerificationKey (read-only, shared)
//!                                          │
//!  StepCircuit ──► generate_proof ──► synthesize ──► verify_child(..) ──► ChainProof
//!                                                                           │
//!                                          verify_proof(proof, key) ◄───────┘
//! ```
//!
//! [`AttestationBackend`] is a transparent BLAKE3 implementation: it executes the
//! checks and binds the result, but it is neither zero-knowledge nor sound
//! against a prover that bypasses `generate_proof`.

pub mod attestation;
pub mod backend;
pub mod circuit;
pub mod types;

pub use attestation::AttestationBackend;
pub use backend::{BackendError, ProofBackend};
pub use circuit::{CircuitError, StepCircuit, StepContext};
pub use types::{ChainProof, ChildDigest, OperationId, ProgramSpec, VerificationKey};
