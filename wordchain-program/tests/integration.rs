//! Integration tests for wordchain-program.
//!
//! These tests drive Init, Extend and Merge end to end through the attestation
//! backend, including hand-off of the final proof to a separate verifier.

use proptest::prelude::*;
use wordchain_backend::AttestationBackend;
use wordchain_program::{
    build_balanced, build_sequential, init_tracing, join_segments, verify_bundle, ChainError,
    ChainProofBundle, ChainSegment, ChainState, PriorSegment, ProgramConfig, WordChainProgram,
    WordSplit,
};

// === Test Fixtures ===

fn strict_program() -> WordChainProgram<AttestationBackend> {
    let _ = init_tracing();
    WordChainProgram::compile(AttestationBackend::new(), ProgramConfig::default())
        .expect("compile")
}

fn lenient_program() -> WordChainProgram<AttestationBackend> {
    let _ = init_tracing();
    WordChainProgram::compile(AttestationBackend::new(), ProgramConfig::default().lenient())
        .expect("compile")
}

fn elephant_chain(program: &WordChainProgram<AttestationBackend>) -> ChainSegment {
    build_sequential(program, &["cat", "tree", "elephant"]).expect("first chain")
}

fn trunt_chain(program: &WordChainProgram<AttestationBackend>) -> ChainSegment {
    ChainSegment::start(program, WordSplit::new("trunt"))
        .and_then(|s| s.append(program, WordSplit::new("tking")))
        .expect("second chain")
}

fn corrupt(segment: &ChainSegment) -> ChainSegment {
    let mut bad = segment.clone();
    bad.proof.proof_bytes[0] ^= 0x80;
    bad
}

// === Scenarios ===

#[test]
fn test_scenario_a_valid_chain() {
    let program = strict_program();
    let chain = elephant_chain(&program);

    assert_eq!(chain.length(), 3);
    assert!(chain.is_valid());
    assert_eq!(chain.state.current_word.word, "elephant");
    assert!(program.verify(&chain.proof, &chain.commitment));
}

#[test]
fn test_scenario_b_broken_link_still_proves() {
    let program = strict_program();
    let chain = build_sequential(&program, &["cat", "dog"]).unwrap();

    assert_eq!(chain.length(), 2);
    assert!(!chain.is_valid());
    assert!(program.verify(&chain.proof, &chain.commitment));
}

#[test]
fn test_scenario_c_merge_independent_chains() {
    let program = strict_program();
    let first = elephant_chain(&program);
    let second = trunt_chain(&program);
    assert_eq!(second.length(), 2);
    assert!(second.is_valid());

    let merged = first.join(&program, &second).unwrap();
    assert_eq!(merged.length(), 5);
    assert!(merged.is_valid());
    assert_eq!(merged.depth(), 3);
    assert!(program.verify(&merged.proof, &merged.commitment));
}

#[test]
fn test_scenario_d_extend_from_unverified_proof_fails() {
    let program = strict_program();
    let chain = corrupt(&elephant_chain(&program));

    let result = chain.append(&program, WordSplit::new("tusk"));
    assert_eq!(result, Err(ChainError::UnverifiedProof("previous".into())));
}

// === Protocol Violations ===

#[test]
fn test_extend_with_proof_for_other_commitment_fails() {
    let program = strict_program();
    let chain = elephant_chain(&program);
    let other = build_sequential(&program, &["cat", "tree"]).unwrap();

    let next = WordSplit::new("tusk");
    let extended = chain.state.extend(next.clone()).unwrap();
    let result = program.extend(
        PriorSegment::new(&chain.state, chain.commitment, &other.proof),
        &next,
        &program.commit(&extended),
    );
    assert_eq!(result, Err(ChainError::UnverifiedProof("previous".into())));
}

#[test]
fn test_extend_cannot_lie_about_validity() {
    let program = strict_program();
    let chain = build_sequential(&program, &["cat", "dog"]).unwrap();

    let next = WordSplit::new("goat");
    let honest = chain.state.extend(next.clone()).unwrap();
    let forged = ChainState::new(next.clone(), honest.length, true);
    let result = program.extend(chain.as_prior(), &next, &program.commit(&forged));
    assert!(matches!(result, Err(ChainError::CommitmentMismatch(_))));
}

#[test]
fn test_malformed_word_at_extend_clears_valid() {
    let program = strict_program();
    let chain = build_sequential(&program, &["cat"]).unwrap();

    let malformed = WordSplit::from_parts("tree", "tr", "ee");
    let extended = chain.append(&program, malformed).unwrap();
    assert_eq!(extended.length(), 2);
    assert!(!extended.is_valid());
}

// === Merge Strictness ===

#[test]
fn test_strict_merge_rejects_unverified_input() {
    let program = strict_program();
    let first = elephant_chain(&program);
    let second = corrupt(&trunt_chain(&program));

    assert_eq!(
        first.join(&program, &second),
        Err(ChainError::UnverifiedProof("right".into()))
    );
}

#[test]
fn test_lenient_merge_continues_over_unverified_input() {
    let program = lenient_program();
    let first = corrupt(&elephant_chain(&program));
    let second = trunt_chain(&program);

    let merged = first.join(&program, &second).unwrap();
    assert_eq!(merged.length(), 5);
    assert!(program.verify(&merged.proof, &merged.commitment));
}

#[test]
fn test_lenient_merge_still_binds_states() {
    let program = lenient_program();
    let first = elephant_chain(&program);
    let second = trunt_chain(&program);

    let mut forged = second.clone();
    forged.state.length = 40;
    assert!(matches!(
        first.join(&program, &forged),
        Err(ChainError::CommitmentMismatch(_))
    ));
}

// === Composition ===

#[test]
fn test_join_segments_left_to_right() {
    let program = strict_program();
    let segments = vec![
        elephant_chain(&program),
        ChainSegment::start(&program, WordSplit::new("tusk")).unwrap(),
        ChainSegment::start(&program, WordSplit::new("kite")).unwrap(),
    ];

    let joined = join_segments(&program, &segments).unwrap();
    let sequential =
        build_sequential(&program, &["cat", "tree", "elephant", "tusk", "kite"]).unwrap();
    assert_eq!(joined.state, sequential.state);
    assert_eq!(joined.commitment, sequential.commitment);
    assert!(program.verify(&joined.proof, &joined.commitment));
}

#[test]
fn test_balanced_build_verifies() {
    let program = strict_program();
    let words = ["eye", "ewe", "eve", "eke", "ease", "edge", "eerie"];

    let balanced = build_balanced(&program, &words).unwrap();
    assert_eq!(balanced.length(), 7);
    assert!(balanced.is_valid());
    assert_eq!(balanced.depth(), 3);
    assert!(program.verify(&balanced.proof, &balanced.commitment));
}

#[test]
fn test_multi_word_right_input_diverges_from_sequential() {
    let program = strict_program();
    let words = ["ab", "bc", "cd", "de"];
    let sequential = build_sequential(&program, &words).unwrap();
    assert!(sequential.is_valid());

    let balanced = build_balanced(&program, &words).unwrap();
    assert_eq!(balanced.length(), 4);
    assert!(!balanced.is_valid());

    let left = build_sequential(&program, &["ab", "bc"]).unwrap();
    let right = build_sequential(&program, &["cd", "de"]).unwrap();
    let merged = left.join(&program, &right).unwrap();
    assert_eq!(merged.length(), 4);
    assert!(!merged.is_valid());
    assert!(program.verify(&merged.proof, &merged.commitment));
}

// === Verifier Hand-off ===

#[test]
fn test_bundle_verified_by_separate_program() {
    let producer = strict_program();
    let chain = elephant_chain(&producer);
    let json = ChainProofBundle::from_segment(&producer, &chain, true)
        .to_json()
        .unwrap();

    let verifier = WordChainProgram::with_key(
        AttestationBackend::new(),
        producer.verification_key().clone(),
        ProgramConfig::default(),
    );
    let bundle = ChainProofBundle::from_json(&json).unwrap();
    let report = verify_bundle(&verifier, &bundle).unwrap();
    assert_eq!(report.length, Some(3));
    assert_eq!(report.valid, Some(true));
    assert_eq!(report.depth, 2);
}

#[test]
fn test_bundle_reports_invalid_chain() {
    let program = strict_program();
    let chain = build_sequential(&program, &["cat", "dog"]).unwrap();
    let bundle = ChainProofBundle::from_segment(&program, &chain, true);

    let report = verify_bundle(&program, &bundle).unwrap();
    assert_eq!(report.valid, Some(false));
}

#[test]
fn test_bundle_file_round_trip() {
    let program = strict_program();
    let chain = trunt_chain(&program);
    let bundle = ChainProofBundle::from_segment(&program, &chain, true);

    let path = std::env::temp_dir().join(format!(
        "wordchain-bundle-{}.json",
        std::process::id()
    ));
    bundle.write_to(&path).unwrap();
    let recovered = ChainProofBundle::read_from(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(bundle, recovered);
}

// === Properties ===

fn word() -> impl Strategy<Value = String> {
    "[a-e]{1,4}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_extend_agrees_with_singleton_merge(
        words in prop::collection::vec(word(), 1..5),
        next in word(),
    ) {
        let program = strict_program();
        let chain = build_sequential(&program, &words).unwrap();

        let extended = chain.append(&program, WordSplit::new(next.clone())).unwrap();
        let singleton = ChainSegment::start(&program, WordSplit::new(next)).unwrap();
        let merged = chain.join(&program, &singleton).unwrap();

        prop_assert_eq!(extended.length(), merged.length());
        prop_assert_eq!(extended.is_valid(), merged.is_valid());
        prop_assert_eq!(extended.commitment, merged.commitment);
    }

    #[test]
    fn prop_sequential_validity_matches_adjacency(words in prop::collection::vec(word(), 1..6)) {
        let program = strict_program();
        let chain = build_sequential(&program, &words).unwrap();

        let expected = words.windows(2).all(|pair| {
            pair[0].chars().last() == pair[1].chars().next()
        });
        prop_assert_eq!(chain.length(), words.len() as u64);
        prop_assert_eq!(chain.is_valid(), expected);
        prop_assert!(program.verify(&chain.proof, &chain.commitment));
    }

    #[test]
    fn prop_valid_is_monotonic(
        words in prop::collection::vec(word(), 1..5),
        steps in prop::collection::vec(
            (any::<bool>(), prop::collection::vec(word(), 1..3)),
            1..4,
        ),
    ) {
        let program = strict_program();
        let mut chain = build_sequential(&program, &words).unwrap();
        for (merge, step_words) in steps {
            let was_valid = chain.is_valid();
            chain = if merge {
                let other = build_sequential(&program, &step_words).unwrap();
                let as_left = chain.join(&program, &other).unwrap();
                let as_right = other.join(&program, &chain).unwrap();
                prop_assert!(other.is_valid() || !as_left.is_valid());
                prop_assert!(was_valid || !as_right.is_valid());
                as_left
            } else {
                chain.append(&program, WordSplit::new(step_words[0].clone())).unwrap()
            };
            prop_assert!(was_valid || !chain.is_valid());
        }
    }
}
