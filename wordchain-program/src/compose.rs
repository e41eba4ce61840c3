//! Building whole chains out of Init, Extend and Merge.

use rayon::prelude::*;
use tracing::debug;
use wordchain_backend::ProofBackend;
use wordchain_state::WordSplit;

use crate::error::ChainError;
use crate::program::WordChainProgram;
use crate::segment::ChainSegment;

/// Init on the first word, then one Extend per following word.
///
/// Composition depth is `words.len() - 1`.
pub fn build_sequential<B, S>(
    program: &WordChainProgram<B>,
    words: &[S],
) -> Result<ChainSegment, ChainError>
where
    B: ProofBackend,
    S: AsRef<str>,
{
    let (first, rest) = words.split_first().ok_or(ChainError::EmptyChain)?;
    let mut segment = ChainSegment::start(program, WordSplit::new(first.as_ref()))?;
    for word in rest {
        segment = segment.append(program, WordSplit::new(word.as_ref()))?;
    }
    Ok(segment)
}

/// Merge independently built segments left to right.
///
/// Each merge checks the current (last) word of the accumulated chain against
/// the current word of the next segment, not its first word. The resulting
/// `valid` can therefore differ from [`build_sequential`] over the same words
/// whenever a segment after the first has two or more words whose first and
/// last words start with different symbols.
pub fn join_segments<B: ProofBackend>(
    program: &WordChainProgram<B>,
    segments: &[ChainSegment],
) -> Result<ChainSegment, ChainError> {
    let (first, rest) = segments.split_first().ok_or(ChainError::EmptyChain)?;
    rest.iter()
        .try_fold(first.clone(), |acc, right| acc.join(program, right))
}

/// Prove every word as its own segment in parallel, then merge pairwise.
///
/// Composition depth is `ceil(log2(words.len()))`. Each internal merge applies
/// Merge's boundary check, which compares the current words of its two inputs.
/// As soon as a right-hand input holds two or more words, `valid` can differ
/// from [`build_sequential`]: `["ab", "bc", "cd", "de"]` chains sequentially
/// but is reported invalid here, because `bc` is checked against `de`. Length,
/// depth and proof verification are unaffected.
pub fn build_balanced<B, S>(
    program: &WordChainProgram<B>,
    words: &[S],
) -> Result<ChainSegment, ChainError>
where
    B: ProofBackend + Sync,
    S: AsRef<str> + Sync,
{
    if words.is_empty() {
        return Err(ChainError::EmptyChain);
    }

    let mut level: Vec<ChainSegment> = words
        .par_iter()
        .map(|word| ChainSegment::start(program, WordSplit::new(word.as_ref())))
        .collect::<Result<_, _>>()?;

    while level.len() > 1 {
        debug!(segments = level.len(), "merging level");
        level = level
            .par_chunks(2)
            .map(|pair| match pair {
                [left, right] => left.join(program, right),
                [single] => Ok(single.clone()),
                _ => Err(ChainError::EmptyChain),
            })
            .collect::<Result<_, _>>()?;
    }

    level.pop().ok_or(ChainError::EmptyChain)
}
