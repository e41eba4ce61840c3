//! Word splits and their validator.

use serde::{Deserialize, Serialize};
use wordchain_common::{first_symbol, hash_string, last_symbol, symbol_count, Fp};

/// A word decomposed into `prefix ++ last_char`.
///
/// The split is a claim supplied by the prover; [`WordSplit::validate`] checks it
/// against the committed word rather than trusting it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSplit {
    /// The whole word.
    pub word: String,

    /// Every symbol of `word` except the last.
    pub prefix: String,

    /// The trailing symbol. Must be exactly one symbol long.
    pub last_char: String,
}

impl WordSplit {
    /// Split `word` honestly at its last symbol.
    ///
    /// An empty word yields an empty prefix and an empty `last_char`, which
    /// [`validate`](Self::validate) rejects.
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into();
        let (prefix, last_char) = match last_symbol(&word) {
            Some(last) => (word[..word.len() - last.len()].to_string(), last.to_string()),
            None => (String::new(), String::new()),
        };
        Self {
            word,
            prefix,
            last_char,
        }
    }

    /// Build a split from caller-supplied parts without checking them.
    pub fn from_parts(
        word: impl Into<String>,
        prefix: impl Into<String>,
        last_char: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            prefix: prefix.into(),
            last_char: last_char.into(),
        }
    }

    /// `len(last_char) == 1 && H(prefix ++ last_char) == H(word)`.
    ///
    /// Malformed splits return `false`; callers decide whether that is fatal.
    pub fn validate(&self) -> bool {
        if symbol_count(&self.last_char) != 1 {
            return false;
        }
        let mut joined = String::with_capacity(self.prefix.len() + self.last_char.len());
        joined.push_str(&self.prefix);
        joined.push_str(&self.last_char);
        hash_string(&joined) == hash_string(&self.word)
    }

    /// First symbol of the word, using the same slicing as `last_char`.
    pub fn first_char(&self) -> Option<&str> {
        first_symbol(&self.word)
    }

    /// Field commitments to `(word, prefix, last_char)`.
    pub fn to_fields(&self) -> [Fp; 3] {
        [
            hash_string(&self.word),
            hash_string(&self.prefix),
            hash_string(&self.last_char),
        ]
    }
}
