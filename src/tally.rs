//! The tally engine: filters ballots by election, verifies each proof, aggregates the survivors
//! multiplicatively in `Gt`, and recovers the small-magnitude integer sum by brute-force
//! discrete log.

use crate::ballot::{self, BallotEnvelope};
use crate::crypto::{fr_from_int, gt_identity, gt_mul, gt_pow};
use blstrs::{G1Projective, Gt};

/// The aggregated, still-encrypted tally for one election: `R = B^{sum of valid votes}`, along
/// with the `B` it should be compared against during decryption.
#[derive(Clone)]
pub struct EncryptedTally {
    pub r: Gt,
    pub base: Gt,
}

/// The outcome of [`decrypt_tally`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DecryptedTally {
    Count(u64),
    TallyFailed,
}

/// Verifies and aggregates every envelope in `envelopes` whose `election_id` matches.
///
/// Never fails: a ballot whose proof does not verify is skipped and logged, not propagated as an
/// error, and an election with no cast ballots yields `R = 1_GT`. This mirrors encrypt_tally's
/// "verify then fold" contract; the actual discrete-log recovery is a separate step
/// ([`decrypt_tally`]) so a caller can hand `R` off to an external time-lock wrapper unopened.
pub fn encrypt_tally(
    generator: &G1Projective,
    election_id: &str,
    envelopes: &[BallotEnvelope],
) -> EncryptedTally {
    let (_, base) = ballot::election_bases(generator, election_id);

    let r = envelopes
        .iter()
        .filter(|e| e.election_id == election_id)
        .filter(|e| {
            let ok = ballot::verify(e);
            if !ok {
                tracing::warn!(election_id, "skipping ballot with invalid proof");
            }
            ok
        })
        .fold(gt_identity(), |acc, e| gt_mul(&acc, &e.ballot));

    EncryptedTally { r, base }
}

/// Recovers the integer tally from an [`EncryptedTally`] by brute-force discrete log: the
/// smallest `i` in `0..=max_votes` with `base^i == r`.
///
/// Returns [`DecryptedTally::TallyFailed`] if the search exhausts `max_votes` without a match.
/// This is surfaced to the caller, never retried automatically (see the tally engine's error
/// propagation policy).
pub fn decrypt_tally(tally: &EncryptedTally, max_votes: u64) -> DecryptedTally {
    more_asserts::assert_le!(max_votes, 1 << 32, "max_votes is too large for naive discrete-log search");

    for i in 0..=max_votes {
        let candidate = gt_pow(&tally.base, &fr_from_int(i));
        if crate::crypto::gt_eq(&candidate, &tally.r) {
            return DecryptedTally::Count(i);
        }
    }
    tracing::warn!(max_votes, "discrete-log search exhausted without a match");
    DecryptedTally::TallyFailed
}
