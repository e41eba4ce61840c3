//! State transition logic for chain segments.
//!
//! This module implements the transition relation on plaintext states:
//! - extend a segment by one word
//! - merge two independently built segments
//!
//! Both are pure. The proof-carrying versions in the program crate re-run these
//! checks inside each operation's circuit.

use crate::error::StateError;
use crate::rule::can_chain;
use crate::split::WordSplit;
use crate::state::ChainState;

impl ChainState {
    /// Reject states that cannot describe a segment.
    pub fn check_well_formed(&self) -> Result<(), StateError> {
        if self.length == 0 {
            return Err(StateError::EmptySegment);
        }
        Ok(())
    }

    /// Append `next` to this segment.
    ///
    /// `length_next = length + 1`, `valid_next = valid && can_chain(current, next)`.
    pub fn extend(&self, next: WordSplit) -> Result<ChainState, StateError> {
        self.check_well_formed()?;
        let length = self
            .length
            .checked_add(1)
            .ok_or(StateError::LengthOverflow(self.length, 1))?;
        let connects = can_chain(&self.current_word, &next);

        Ok(ChainState {
            current_word: next,
            length,
            valid: self.valid && connects,
        })
    }

    /// Concatenate `self` (left) with `right`.
    ///
    /// The boundary check compares the current word of each segment: the right
    /// segment's current word must start with the left segment's last symbol.
    pub fn merge(&self, right: &ChainState) -> Result<ChainState, StateError> {
        self.check_well_formed()?;
        right.check_well_formed()?;
        let length = self
            .length
            .checked_add(right.length)
            .ok_or(StateError::LengthOverflow(self.length, right.length))?;
        let connects = can_chain(&self.current_word, &right.current_word);

        Ok(ChainState {
            current_word: right.current_word.clone(),
            length,
            valid: self.valid && right.valid && connects,
        })
    }
}
