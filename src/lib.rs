pub mod ballot;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod roster;
pub mod system;
pub mod tally;
pub mod transcript;
pub(crate) mod utils;

pub use config::{ProofMode, VotingConfig};
pub use crypto::init_crypto;
pub use error::VotingError;
pub use system::VotingSystem;
pub use tally::DecryptedTally;
