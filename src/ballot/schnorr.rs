//! The Schnorr-style knowledge proof: proves knowledge of `v` such that `vote_part = B^v`.
//!
//! NOTE (soundness): this proof does **not** constrain `v` to `{0, 1}`. A voter who can forge a
//! transcript in their own favor could submit e.g. `v = 5` and shift the tally. This is an
//! accepted limitation of this variant, documented rather than silently patched; callers who need
//! `v in {0, 1}` enforced should use [`crate::ballot::or_proof`] instead.

use super::{check_vote_is_binary, compute_ballot, election_bases, require_closed_roster, BallotEnvelope, Proof};
use crate::crypto::{fr_random, fr_sub, fr_mul, gt_eq, gt_mul, gt_pow};
use crate::error::VotingError;
use crate::roster::Roster;
use crate::transcript::{challenge, Hashable};
use blstrs::{G1Projective, Gt, Scalar};

#[derive(Clone)]
pub struct SchnorrProof {
    pub a: Gt,
    pub s: Scalar,
    pub pairing_base: Gt,
    pub vote_part: Gt,
}

/// Casts a ballot with a Schnorr knowledge proof for `vote` in the given election.
///
/// Fails with [`VotingError::UnknownVoter`] if `voter_id` is not registered,
/// [`VotingError::InvalidVote`] if `vote` is not `0` or `1`, and
/// [`VotingError::RegistrationOpen`] if the roster has not been closed yet.
pub fn cast<R>(
    roster: &Roster,
    generator: &G1Projective,
    voter_id: &str,
    vote: u8,
    election_id: &str,
    rng: &mut R,
) -> Result<BallotEnvelope, VotingError>
where
    R: rand_core::RngCore + rand::Rng + rand_core::CryptoRng + rand::CryptoRng,
{
    require_closed_roster(roster)?;
    let voter = roster.get(voter_id).ok_or(VotingError::UnknownVoter)?;
    let vote_scalar = check_vote_is_binary(vote)?;
    let y_j = roster
        .cancelling_key(voter_id)
        .expect("closed roster has cancelling keys for every registered voter");

    let (h, b) = election_bases(generator, election_id);
    let ballot = compute_ballot(y_j, &h, &voter.sk, &b, &vote_scalar);

    let r = fr_random(rng);
    let a = gt_pow(&b, &r);
    let vote_part = gt_pow(&b, &vote_scalar);

    let c = challenge(&[Hashable::Gt(b), Hashable::Gt(a), Hashable::Gt(vote_part)]);
    let s = fr_sub(&r, &fr_mul(&c, &vote_scalar));

    Ok(BallotEnvelope {
        election_id: election_id.to_string(),
        ballot,
        proof: Proof::Schnorr(SchnorrProof {
            a,
            s,
            pairing_base: b,
            vote_part,
        }),
    })
}

/// Verifies a [`SchnorrProof`]: recomputes `c` from `(B, a, vote_part)` and checks
/// `B^s * vote_part^c == a`.
pub fn verify(proof: &SchnorrProof) -> bool {
    let c = challenge(&[
        Hashable::Gt(proof.pairing_base),
        Hashable::Gt(proof.a),
        Hashable::Gt(proof.vote_part),
    ]);

    let lhs = gt_mul(&gt_pow(&proof.pairing_base, &proof.s), &gt_pow(&proof.vote_part, &c));
    gt_eq(&lhs, &proof.a)
}
