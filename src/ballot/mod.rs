//! The ballot & proof engine: casts ballots and verifies proofs for one of two proof variants.
//!
//! A ballot is a `Gt` element `P1_j^{sk_j} * B^{v_j}`, where `P1_j = e(Y_j, H)` uses the voter's
//! cancelling key `Y_j` and `B = e(g, H)` is the election's shared vote base. The
//! [`schnorr`] variant proves knowledge of `v` (without constraining it to `{0, 1}`); the
//! [`or_proof`] variant additionally proves `v` is in `{0, 1}` via a Chaum-Pedersen disjunction.

pub mod envelope;
pub mod or_proof;
pub mod schnorr;

use crate::crypto::{g2_hash_to_curve, gt_mul, gt_pairing, gt_pow};
use crate::error::VotingError;
use crate::roster::Roster;
use blstrs::{G1Projective, G2Projective, Gt, Scalar};

pub use envelope::BallotEnvelope;
pub use or_proof::OrProof;
pub use schnorr::SchnorrProof;

/// The proof carried by a ballot: a Schnorr knowledge proof or a Chaum-Pedersen OR proof.
#[derive(Clone)]
pub enum Proof {
    Schnorr(SchnorrProof),
    Or(OrProof),
}

/// Computes the per-election pairing base `B = e(g, H)` and the election's `G2` hash `H`.
pub fn election_bases(generator: &G1Projective, election_id: &str) -> (G2Projective, Gt) {
    let h = g2_hash_to_curve(election_id.as_bytes());
    let b = gt_pairing(generator, &h);
    (h, b)
}

/// Computes `ballot_j = e(Y_j, H)^{sk_j} * B^{v_j}` for the voter at cancelling key `y_j`.
pub(crate) fn compute_ballot(y_j: &G1Projective, h: &G2Projective, sk: &Scalar, b: &Gt, vote: &Scalar) -> Gt {
    let p1 = gt_pairing(y_j, h);
    gt_mul(&gt_pow(&p1, sk), &gt_pow(b, vote))
}

pub(crate) fn check_vote_is_binary(vote: u8) -> Result<Scalar, VotingError> {
    match vote {
        0 => Ok(crate::crypto::fr_from_int(0)),
        1 => Ok(crate::crypto::fr_from_int(1)),
        _ => Err(VotingError::InvalidVote),
    }
}

pub(crate) fn require_closed_roster(roster: &Roster) -> Result<(), VotingError> {
    if !roster.is_closed() {
        return Err(VotingError::RegistrationOpen);
    }
    Ok(())
}

/// Verifies a [`BallotEnvelope`]'s proof, dispatching to the matching variant's verifier.
pub fn verify(envelope: &BallotEnvelope) -> bool {
    match &envelope.proof {
        Proof::Schnorr(p) => schnorr::verify(p),
        Proof::Or(p) => or_proof::verify(p, &envelope.election_id),
    }
}
