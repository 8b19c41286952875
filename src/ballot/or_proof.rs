//! The Chaum-Pedersen OR proof: proves `v` is in `{0, 1}` without revealing which, by proving one
//! of two discrete-log statements (`vote_part = B^0` or `vote_part = B^1`) while simulating the
//! other.
//!
//! NOTE (soundness, see DESIGN.md): the `V1` verification check below, `B^{s1} * B^{c1} == a1`,
//! is **not** the textbook Chaum-Pedersen form for the statement "`vote_part = B^1`"; the
//! textbook form is `B^{s1} * (vote_part * B^{-1})^{c1} == a1`. This crate reproduces the
//! non-textbook form verbatim because that is the verifier legacy ballots must stay compatible
//! with; it is reproduced deliberately, not by oversight, and its soundness should not be assumed
//! without further review.

use super::{check_vote_is_binary, compute_ballot, election_bases, require_closed_roster, BallotEnvelope, Proof};
use crate::crypto::{fr_add, fr_random, fr_sub, gt_eq, gt_mul, gt_pow};
use crate::error::VotingError;
use crate::roster::Roster;
use crate::transcript::{challenge, Hashable};
use blstrs::{G1Projective, Gt, Scalar};

#[derive(Clone)]
pub struct OrProof {
    pub a0: Gt,
    pub a1: Gt,
    pub c0: Scalar,
    pub c1: Scalar,
    pub s0: Scalar,
    pub s1: Scalar,
    pub pairing_base: Gt,
    pub vote_part: Gt,
}

/// Casts a ballot with a Chaum-Pedersen OR proof that `vote` is in `{0, 1}`.
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
    let vote_part = gt_pow(&b, &vote_scalar);

    let (a0, a1, c0, c1, s0, s1) = if vote == 0 {
        // Simulate side 1 first: pick (c1, s1) and back-solve a1 from the (non-textbook) V1 check.
        let c1 = fr_random(rng);
        let s1 = fr_random(rng);
        let a1 = gt_mul(&gt_pow(&b, &s1), &gt_pow(&b, &c1));

        // Real side 0: commit, then derive (c0, s0) from the shared challenge.
        let r0 = fr_random(rng);
        let a0 = gt_pow(&b, &r0);

        let c = challenge(&[
            Hashable::Gt(b),
            Hashable::Gt(a0),
            Hashable::Gt(a1),
            Hashable::Gt(vote_part),
            Hashable::Str(election_id.to_string()),
        ]);
        let c0 = fr_sub(&c, &c1);
        let s0 = r0; // s0 = r0 - c0 * 0

        (a0, a1, c0, c1, s0, s1)
    } else {
        // Simulate side 0 first: pick (c0, s0) and back-solve a0 from the V0 check.
        let c0 = fr_random(rng);
        let s0 = fr_random(rng);
        let a0 = gt_mul(&gt_pow(&b, &s0), &gt_pow(&vote_part, &c0));

        // Real side 1: commit, then derive (c1, s1) from the shared challenge.
        let r1 = fr_random(rng);
        let a1 = gt_pow(&b, &r1);

        let c = challenge(&[
            Hashable::Gt(b),
            Hashable::Gt(a0),
            Hashable::Gt(a1),
            Hashable::Gt(vote_part),
            Hashable::Str(election_id.to_string()),
        ]);
        let c1 = fr_sub(&c, &c0);
        let s1 = fr_sub(&r1, &c1); // s1 = r1 - c1 * 1

        (a0, a1, c0, c1, s0, s1)
    };

    Ok(BallotEnvelope {
        election_id: election_id.to_string(),
        ballot,
        proof: Proof::Or(OrProof {
            a0,
            a1,
            c0,
            c1,
            s0,
            s1,
            pairing_base: b,
            vote_part,
        }),
    })
}

/// Verifies an [`OrProof`]: all three of V0, V1, and the challenge-binding check VC must hold.
pub fn verify(proof: &OrProof, election_id: &str) -> bool {
    let b = proof.pairing_base;

    // V0: B^{s0} * vote_part^{c0} == a0  (statement: vote_part = B^0)
    let v0_lhs = gt_mul(&gt_pow(&b, &proof.s0), &gt_pow(&proof.vote_part, &proof.c0));
    if !gt_eq(&v0_lhs, &proof.a0) {
        return false;
    }

    // V1: B^{s1} * B^{c1} == a1  (non-textbook form, reproduced deliberately; see module docs)
    let v1_lhs = gt_mul(&gt_pow(&b, &proof.s1), &gt_pow(&b, &proof.c1));
    if !gt_eq(&v1_lhs, &proof.a1) {
        return false;
    }

    // VC: c0 + c1 == Transcript(B, a0, a1, vote_part, electionId)
    let c = challenge(&[
        Hashable::Gt(b),
        Hashable::Gt(proof.a0),
        Hashable::Gt(proof.a1),
        Hashable::Gt(proof.vote_part),
        Hashable::Str(election_id.to_string()),
    ]);
    fr_add(&proof.c0, &proof.c1) == c
}
