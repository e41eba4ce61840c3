//! The adjacency rule between chain segments.

use crate::split::WordSplit;

/// Whether `right` may follow `left` in a chain.
///
/// Both splits must validate and the first symbol of `right.word` must equal
/// `left.last_char`. Both sides compare single-symbol slices.
pub fn can_chain(left: &WordSplit, right: &WordSplit) -> bool {
    left.validate() && right.validate() && right.first_char() == Some(left.last_char.as_str())
}
