//! The Fiat-Shamir transcript: a deterministic mapping from an ordered list of group/scalar/byte
//! elements to a challenge scalar in `Fr`.
//!
//! Rearchitected from the source's duck-typed "anything with a serialize method, or hex-string
//! method, or raw bytes, or string" hashing: callers build an explicit, ordered `Vec<Hashable>`
//! instead, so an unsupported type is a compile error rather than a runtime `InvalidInput`.

use crate::crypto::{fr_from_hash, g1_serialize, g2_serialize, gt_serialize};
use blstrs::{G1Projective, G2Projective, Gt, Scalar};
use sha2::{Digest, Sha256};

/// An item that can be absorbed into a [`Transcript`].
#[derive(Clone)]
pub enum Hashable {
    G1(G1Projective),
    G2(G2Projective),
    Gt(Gt),
    Fr(Scalar),
    Bytes(Vec<u8>),
    Str(String),
}

impl Hashable {
    fn canonical_bytes(&self) -> Vec<u8> {
        match self {
            Hashable::G1(p) => g1_serialize(p).to_vec(),
            Hashable::G2(p) => g2_serialize(p).to_vec(),
            Hashable::Gt(g) => gt_serialize(g),
            Hashable::Fr(s) => crate::crypto::fr_serialize(s).to_vec(),
            Hashable::Bytes(b) => b.clone(),
            Hashable::Str(s) => s.as_bytes().to_vec(),
        }
    }
}

/// Computes the Fiat-Shamir challenge for an ordered transcript of [`Hashable`] items.
///
/// Each item is absorbed as `len(item) || canonical_bytes(item)`, with `len` a little-endian
/// `u64`: every caller in this crate passes a fixed, ordered list of items (so ambiguity is
/// already prevented by position), but the explicit length framing additionally rules out the
/// classic `H("ab" || "c") == H("a" || "bc")` collision the source's unframed concatenation left
/// open (see the design notes on transcript framing).
pub fn challenge(items: &[Hashable]) -> Scalar {
    let mut hasher = Sha256::new();

    for item in items {
        let bytes = item.canonical_bytes();
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(&bytes);
    }

    fr_from_hash(hasher.finalize().as_slice())
}
