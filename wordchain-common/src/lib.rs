// wordchain/wordchain-common/src/lib.rs

//! Field encoding and hashing primitives shared by the word chain crates.
//!
//! Commitments live in the Pallas base field (`pasta_curves::Fp`, Mina's native
//! field). Strings are encoded one field element per symbol, where a symbol is a
//! single Unicode scalar value, so that first/last character comparisons and the
//! committed representation use the same atomic unit.

use anyhow::{anyhow, ensure, Result};
use ff::{FromUniformBytes, PrimeField};
pub use pasta_curves::Fp;

/// Domain tag for chain state commitments.
pub const COMMITMENT_DOMAIN: &[u8] = b"wordchain_commitment_v1";
/// Domain tag for string commitments.
pub const STRING_DOMAIN: &[u8] = b"wordchain_string_v1";

/// Hash a sequence of field elements into a single field element.
///
/// The canonical little-endian encodings are absorbed into BLAKE3 behind a domain
/// tag and the element count; 64 bytes of XOF output are reduced into `Fp`.
pub fn hash_fields(domain: &[u8], fields: &[Fp]) -> Fp {
    let mut hasher = blake3::Hasher::new();
    hasher.update(domain);
    hasher.update(&(fields.len() as u64).to_le_bytes());
    for field in fields {
        hasher.update(&field.to_repr());
    }

    let mut wide = [0u8; 64];
    hasher.finalize_xof().fill(&mut wide);
    Fp::from_uniform_bytes(&wide)
}

/// Encode a string as `[symbol_count, symbol_0, symbol_1, ...]`.
pub fn string_to_fields(value: &str) -> Vec<Fp> {
    let mut fields = Vec::with_capacity(value.len() + 1);
    fields.push(Fp::from(symbol_count(value) as u64));
    fields.extend(value.chars().map(|c| Fp::from(c as u64)));
    fields
}

/// Commitment to a string under the symbol encoding.
pub fn hash_string(value: &str) -> Fp {
    hash_fields(STRING_DOMAIN, &string_to_fields(value))
}

/// Number of symbols in `value`.
pub fn symbol_count(value: &str) -> usize {
    value.chars().count()
}

/// The first symbol of `value` as a string slice.
pub fn first_symbol(value: &str) -> Option<&str> {
    value.chars().next().map(|c| &value[..c.len_utf8()])
}

/// The last symbol of `value` as a string slice.
pub fn last_symbol(value: &str) -> Option<&str> {
    value
        .char_indices()
        .next_back()
        .map(|(idx, _)| &value[idx..])
}

pub fn fp_to_bytes(fp: &Fp) -> [u8; 32] {
    fp.to_repr()
}

pub fn fp_from_bytes(bytes: &[u8; 32]) -> Result<Fp> {
    Option::from(Fp::from_repr(*bytes)).ok_or_else(|| anyhow!("invalid pallas scalar encoding"))
}

pub fn fp_to_hex(fp: &Fp) -> String {
    format!("0x{}", hex::encode(fp_to_bytes(fp)))
}

pub fn fp_from_hex(value: &str) -> Result<Fp> {
    let bytes = digest_from_hex(value)?;
    fp_from_bytes(&bytes)
}

pub fn digest_to_hex(digest: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(digest))
}

pub fn digest_from_hex(value: &str) -> Result<[u8; 32]> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    ensure!(
        stripped.len() == 64,
        "expected 64 hex chars, got {}",
        stripped.len()
    );
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(stripped, &mut bytes)?;
    Ok(bytes)
}

/// Serde module for `Fp` as a 0x-prefixed 32-byte hex string (little-endian repr).
pub mod serde_fp_hex {
    use super::{fp_from_hex, fp_to_hex, Fp};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(fp: &Fp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&fp_to_hex(fp))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        fp_from_hex(&value).map_err(de::Error::custom)
    }
}

/// Serde module for 32-byte digests as 0x-prefixed hex strings.
pub mod serde_digest_hex {
    use super::{digest_from_hex, digest_to_hex};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(digest: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&digest_to_hex(digest))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        digest_from_hex(&value).map_err(de::Error::custom)
    }
}
