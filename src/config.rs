use std::collections::HashMap;

/// Selects which non-interactive proof accompanies a cast ballot.
///
/// [`ProofMode::Schnorr`] only proves knowledge of *some* `v` such that `vote_part = B^v`; it does
/// not constrain `v` to `{0, 1}` (see the soundness note on [`crate::ballot::schnorr::verify`]).
/// [`ProofMode::OrProof`] proves `v` in `{0, 1}` via a Chaum-Pedersen OR proof, and is the only mode
/// under which the cast log (one-ballot-per-voter-per-election) is enforced.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ProofMode {
    Schnorr,
    OrProof,
}

/// Configuration for a [`crate::system::VotingSystem`].
#[derive(Debug, Clone)]
pub struct VotingConfig {
    /// Opaque pass-through for an external time-lock collaborator: this core never interprets
    /// these delays, it only records them alongside an election so a caller-supplied time-lock
    /// wrapper can later read them back out.
    pub tlock_delays: HashMap<String, u64>,
    pub proof_mode: ProofMode,
}

impl VotingConfig {
    pub fn new(proof_mode: ProofMode) -> Self {
        VotingConfig {
            tlock_delays: HashMap::new(),
            proof_mode,
        }
    }

    pub fn with_tlock_delay(mut self, election_id: impl Into<String>, seconds: u64) -> Self {
        self.tlock_delays.insert(election_id.into(), seconds);
        self
    }
}

impl Default for VotingConfig {
    fn default() -> Self {
        VotingConfig::new(ProofMode::OrProof)
    }
}
