//! The voter roster: an ordered list of `(voter_id, secret-key, public-key)` triples, plus the
//! per-voter *cancelling key* `Y_j` that makes individual votes self-cancelling at tally time.

use crate::crypto::{fr_random, g1_add, g1_identity, g1_mul_scalar, g1_sub};
use crate::error::VotingError;
use blstrs::{G1Projective, Scalar};
use std::collections::HashMap;

/// A single registered voter.
///
/// Deliberately not `Clone`: `sk` is secret key material, and the roster is the sole owner of it.
pub struct Voter {
    pub(crate) voter_id: String,
    pub(crate) sk: Scalar,
    pub(crate) pk: G1Projective,
}

static_assertions::assert_not_impl_any!(Voter: Clone);

impl Voter {
    pub fn voter_id(&self) -> &str {
        &self.voter_id
    }

    pub fn public_key(&self) -> &G1Projective {
        &self.pk
    }
}

/// The ordered, append-only set of registered voters for one deployment of the system.
///
/// Registration order is part of the public protocol state: the cancelling key `Y_j` for the
/// voter at index `j` depends on every other voter's public key, so no ballot may be cast until
/// registration is [`Roster::close`]d. Cancelling keys are computed once, on close, and cached:
/// they are undefined (and meaningless to compute) while the roster can still grow.
pub struct Roster {
    voters: Vec<Voter>,
    index_by_id: HashMap<String, usize>,
    generator: G1Projective,
    closed: bool,
    cancelling_keys: Vec<G1Projective>,
}

impl Roster {
    pub fn new(generator: G1Projective) -> Self {
        Roster {
            voters: Vec::new(),
            index_by_id: HashMap::new(),
            generator,
            closed: false,
            cancelling_keys: Vec::new(),
        }
    }

    /// Registers a new voter, sampling a fresh `(sk, pk = g * sk)` keypair.
    ///
    /// Fails with [`VotingError::DuplicateVoter`] if `voter_id` is already registered, or with
    /// [`VotingError::RosterClosed`] if [`Roster::close`] has already been called.
    pub fn register<R>(&mut self, voter_id: impl Into<String>, rng: &mut R) -> Result<(), VotingError>
    where
        R: rand_core::RngCore + rand::Rng + rand_core::CryptoRng + rand::CryptoRng,
    {
        if self.closed {
            return Err(VotingError::RosterClosed);
        }

        let voter_id = voter_id.into();
        if self.index_by_id.contains_key(&voter_id) {
            return Err(VotingError::DuplicateVoter);
        }

        let sk = fr_random(rng);
        let pk = g1_mul_scalar(&self.generator, &sk);

        self.index_by_id.insert(voter_id.clone(), self.voters.len());
        self.voters.push(Voter { voter_id, sk, pk });

        Ok(())
    }

    /// Closes registration, freezing the roster and computing every voter's cancelling key.
    ///
    /// Idempotent: calling it again is a no-op. No ballot may be cast before this is called.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }

        let n = self.voters.len();
        let mut prefix = Vec::with_capacity(n + 1);
        prefix.push(g1_identity());
        for voter in &self.voters {
            prefix.push(g1_add(prefix.last().unwrap(), &voter.pk));
        }
        let total = prefix[n];

        self.cancelling_keys = (0..n)
            .map(|j| {
                // Y_j = sum_{k<j} pk_k - sum_{k>j} pk_k
                //     = prefix[j] - (total - prefix[j+1])
                let suffix = g1_sub(&total, &prefix[j + 1]);
                g1_sub(&prefix[j], &suffix)
            })
            .collect();

        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn size(&self) -> usize {
        self.voters.len()
    }

    pub fn index_of(&self, voter_id: &str) -> Option<usize> {
        self.index_by_id.get(voter_id).copied()
    }

    pub fn get(&self, voter_id: &str) -> Option<&Voter> {
        self.index_of(voter_id).map(|i| &self.voters[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Voter> {
        self.voters.iter()
    }

    /// Returns the cancelling key `Y_j` for the voter registered under `voter_id`.
    ///
    /// Panics if the roster has not yet been [`Roster::close`]d; cancelling keys are undefined on
    /// an open roster.
    pub fn cancelling_key(&self, voter_id: &str) -> Option<&G1Projective> {
        assert!(
            self.closed,
            "cancelling keys are undefined until the roster is closed"
        );
        self.index_of(voter_id).map(|i| &self.cancelling_keys[i])
    }
}
