//! [`VotingSystem`]: the public facade wiring the roster, ballot store, cast log, and tally
//! engine together behind a single entry point for registering voters, casting ballots, and
//! tallying an election.

use crate::ballot::{self, BallotEnvelope};
use crate::config::{ProofMode, VotingConfig};
use crate::crypto::{g1_generator_from_hash, g1_serialize, init_crypto};
use crate::error::VotingError;
use crate::roster::Roster;
use crate::tally::{self, DecryptedTally, EncryptedTally};
use blstrs::G1Projective;
use std::collections::{HashMap, HashSet};

/// One deployment of the voting core: a single roster shared across any number of elections
/// distinguished by `election_id`, plus a per-election ballot store and (in
/// [`ProofMode::OrProof`]) cast log.
pub struct VotingSystem {
    config: VotingConfig,
    generator: G1Projective,
    roster: Roster,
    ballots: HashMap<String, Vec<BallotEnvelope>>,
    cast_log: HashMap<String, HashSet<String>>,
}

impl VotingSystem {
    pub fn new(config: VotingConfig) -> Result<Self, VotingError> {
        init_crypto()?;
        let generator = g1_generator_from_hash(crate::constants::DST_GENERATOR);
        Ok(VotingSystem {
            config,
            generator,
            roster: Roster::new(generator),
            ballots: HashMap::new(),
            cast_log: HashMap::new(),
        })
    }

    /// Registers a new voter and returns their public key, hex-encoded.
    ///
    /// Fails with [`VotingError::DuplicateVoter`] or [`VotingError::RosterClosed`].
    pub fn register_voter<R>(&mut self, voter_id: impl Into<String>, rng: &mut R) -> Result<String, VotingError>
    where
        R: rand_core::RngCore + rand::Rng + rand_core::CryptoRng + rand::CryptoRng,
    {
        let voter_id = voter_id.into();
        tracing::info!(voter_id = %voter_id, "registering voter");
        self.roster.register(voter_id.clone(), rng)?;
        let pk = self.roster.get(&voter_id).expect("just registered").public_key();
        Ok(hex::encode(g1_serialize(pk)))
    }

    /// Closes voter registration, freezing the roster and computing cancelling keys.
    ///
    /// Must be called before the first [`VotingSystem::cast_vote`]; see
    /// [`crate::roster::Roster::close`].
    pub fn close_registration(&mut self) {
        self.roster.close();
    }

    /// Casts `vote` for `voter_id` in `election_id`, using the configured [`ProofMode`].
    ///
    /// Fails with [`VotingError::UnknownVoter`], [`VotingError::InvalidVote`],
    /// [`VotingError::RegistrationOpen`], or (in [`ProofMode::OrProof`] mode)
    /// [`VotingError::AlreadyVoted`].
    pub fn cast_vote<R>(
        &mut self,
        voter_id: &str,
        vote: u8,
        election_id: &str,
        rng: &mut R,
    ) -> Result<(), VotingError>
    where
        R: rand_core::RngCore + rand::Rng + rand_core::CryptoRng + rand::CryptoRng,
    {
        if matches!(self.config.proof_mode, ProofMode::OrProof) {
            let already_voted = self
                .cast_log
                .get(election_id)
                .is_some_and(|voters| voters.contains(voter_id));
            if already_voted {
                return Err(VotingError::AlreadyVoted);
            }
        }

        let envelope = match self.config.proof_mode {
            ProofMode::Schnorr => {
                ballot::schnorr::cast(&self.roster, &self.generator, voter_id, vote, election_id, rng)?
            }
            ProofMode::OrProof => {
                ballot::or_proof::cast(&self.roster, &self.generator, voter_id, vote, election_id, rng)?
            }
        };

        tracing::info!(voter_id, election_id, "cast vote");

        if matches!(self.config.proof_mode, ProofMode::OrProof) {
            self.cast_log
                .entry(election_id.to_string())
                .or_default()
                .insert(voter_id.to_string());
        }

        self.ballots
            .entry(election_id.to_string())
            .or_default()
            .push(envelope);

        Ok(())
    }

    /// Verifies and aggregates every cast ballot for `election_id`. Never fails; an election with
    /// no ballots yields `R = 1_GT`.
    pub fn encrypt_tally(&self, election_id: &str) -> EncryptedTally {
        let envelopes = self.ballots.get(election_id).map(Vec::as_slice).unwrap_or(&[]);
        tally::encrypt_tally(&self.generator, election_id, envelopes)
    }

    /// Recovers the integer sum from an [`EncryptedTally`] by brute-force discrete log up to
    /// `max_votes`.
    pub fn decrypt_tally(&self, tally: &EncryptedTally, max_votes: u64) -> DecryptedTally {
        tally::decrypt_tally(tally, max_votes)
    }

    /// The opaque, per-election time-lock delay this deployment was configured with, if any. The
    /// core never interprets this value; it is a pass-through for an external time-lock
    /// collaborator.
    pub fn tlock_delay(&self, election_id: &str) -> Option<u64> {
        self.config.tlock_delays.get(election_id).copied()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}
