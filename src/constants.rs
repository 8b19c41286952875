use num_bigint::BigUint;
use once_cell::sync::Lazy;

//
// DSTs and seeds
//

/// Domain-separator for deriving the process-wide generator `g` by hashing to `G1`.
pub const DST_GENERATOR: &[u8; 9] = b"generator";

/// Domain-separator for hashing an `electionId` to `G2` to obtain that election's pairing base `H`.
pub const DST_ELECTION_G2: &[u8; 22] = b"VotingElectionG2HashDS";

/// Domain-separator used when reducing a SHA-256-derived digest down to a `Scalar`.
pub const DST_HASH_TO_SCALAR: &[u8; 24] = b"VotingHashToScalarHashDS";

//
// Sizes
//

/// The size in bytes of a compressed `G1` point.
pub const G1_COMPRESSED_BYTES: usize = 48;

/// The size in bytes of a compressed `G2` point.
pub const G2_COMPRESSED_BYTES: usize = 96;

/// The size in bytes of a serialized `Scalar`.
pub const SCALAR_NUM_BYTES: usize = 32;

/// The order of the BLS12-381 scalar field, used to reduce wide hash outputs into `Fr` uniformly.
pub(crate) static SCALAR_FIELD_ORDER: Lazy<BigUint> =
    Lazy::new(crate::utils::biguint::get_scalar_field_order_as_biguint);
