use thiserror::Error;

/// The error taxonomy surfaced by the public API.
///
/// Per-ballot proof failures during tally are deliberately *not* a variant here: spec-wise, a
/// single malformed ballot must never abort an election's tally, so that failure is logged (via
/// `tracing::warn!`) and the ballot is silently excluded instead of being propagated as an error.
/// `TallyFailed` is returned as a sentinel value from `decrypt_tally`, not as an `Err`, since an
/// exhausted discrete-log search is an expected, user-visible outcome rather than an exceptional one.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum VotingError {
    #[error("pairing library failed to initialize")]
    CryptoInit,

    #[error("voter is not registered")]
    UnknownVoter,

    #[error("voter is already registered")]
    DuplicateVoter,

    #[error("vote is not in {{0, 1}}")]
    InvalidVote,

    #[error("voter has already cast a ballot in this election")]
    AlreadyVoted,

    #[error("voter registration for this election is still open")]
    RegistrationOpen,

    #[error("voter registration is closed; no further voters may be registered")]
    RosterClosed,

    #[error("bad hex or length while deserializing")]
    Serialization,

    #[error("no defined canonical serialization for this input")]
    InvalidInput,
}
