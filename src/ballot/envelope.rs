//! Ballot envelopes and their hex-encoded wire format: proof fields are persisted as hex strings,
//! a wire-format choice that is not part of the core's in-memory representation.

use super::{OrProof, Proof, SchnorrProof};
use crate::crypto::{
    fr_deserialize, fr_serialize, gt_deserialize, gt_serialize,
};
use crate::error::VotingError;
use blstrs::{Gt, Scalar};
use serde::{Deserialize, Serialize};

/// A cast ballot together with the election it belongs to and the proof attesting to its
/// well-formedness.
#[derive(Clone)]
pub struct BallotEnvelope {
    pub election_id: String,
    pub ballot: Gt,
    pub proof: Proof,
}

fn gt_to_hex(g: &Gt) -> String {
    hex::encode(gt_serialize(g))
}

fn gt_from_hex(s: &str) -> Result<Gt, VotingError> {
    let bytes = hex::decode(s).map_err(|_| VotingError::Serialization)?;
    gt_deserialize(&bytes)
}

fn fr_to_hex(s: &Scalar) -> String {
    hex::encode(fr_serialize(s))
}

fn fr_from_hex(s: &str) -> Result<Scalar, VotingError> {
    let bytes = hex::decode(s).map_err(|_| VotingError::Serialization)?;
    fr_deserialize(&bytes)
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SchnorrProofHex {
    pub a_hex: String,
    pub s_hex: String,
    pub pairing_base_hex: String,
    pub vote_part_hex: String,
}

impl From<&SchnorrProof> for SchnorrProofHex {
    fn from(p: &SchnorrProof) -> Self {
        SchnorrProofHex {
            a_hex: gt_to_hex(&p.a),
            s_hex: fr_to_hex(&p.s),
            pairing_base_hex: gt_to_hex(&p.pairing_base),
            vote_part_hex: gt_to_hex(&p.vote_part),
        }
    }
}

impl TryFrom<&SchnorrProofHex> for SchnorrProof {
    type Error = VotingError;

    fn try_from(p: &SchnorrProofHex) -> Result<Self, Self::Error> {
        Ok(SchnorrProof {
            a: gt_from_hex(&p.a_hex)?,
            s: fr_from_hex(&p.s_hex)?,
            pairing_base: gt_from_hex(&p.pairing_base_hex)?,
            vote_part: gt_from_hex(&p.vote_part_hex)?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OrProofHex {
    pub a0_hex: String,
    pub a1_hex: String,
    pub c0_hex: String,
    pub c1_hex: String,
    pub s0_hex: String,
    pub s1_hex: String,
    pub pairing_base_hex: String,
    pub vote_part_hex: String,
}

impl From<&OrProof> for OrProofHex {
    fn from(p: &OrProof) -> Self {
        OrProofHex {
            a0_hex: gt_to_hex(&p.a0),
            a1_hex: gt_to_hex(&p.a1),
            c0_hex: fr_to_hex(&p.c0),
            c1_hex: fr_to_hex(&p.c1),
            s0_hex: fr_to_hex(&p.s0),
            s1_hex: fr_to_hex(&p.s1),
            pairing_base_hex: gt_to_hex(&p.pairing_base),
            vote_part_hex: gt_to_hex(&p.vote_part),
        }
    }
}

impl TryFrom<&OrProofHex> for OrProof {
    type Error = VotingError;

    fn try_from(p: &OrProofHex) -> Result<Self, Self::Error> {
        Ok(OrProof {
            a0: gt_from_hex(&p.a0_hex)?,
            a1: gt_from_hex(&p.a1_hex)?,
            c0: fr_from_hex(&p.c0_hex)?,
            c1: fr_from_hex(&p.c1_hex)?,
            s0: fr_from_hex(&p.s0_hex)?,
            s1: fr_from_hex(&p.s1_hex)?,
            pairing_base: gt_from_hex(&p.pairing_base_hex)?,
            vote_part: gt_from_hex(&p.vote_part_hex)?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "proof_kind")]
pub enum ProofHex {
    Schnorr(SchnorrProofHex),
    Or(OrProofHex),
}

impl From<&Proof> for ProofHex {
    fn from(p: &Proof) -> Self {
        match p {
            Proof::Schnorr(p) => ProofHex::Schnorr(p.into()),
            Proof::Or(p) => ProofHex::Or(p.into()),
        }
    }
}

impl TryFrom<&ProofHex> for Proof {
    type Error = VotingError;

    fn try_from(p: &ProofHex) -> Result<Self, Self::Error> {
        Ok(match p {
            ProofHex::Schnorr(p) => Proof::Schnorr(p.try_into()?),
            ProofHex::Or(p) => Proof::Or(p.try_into()?),
        })
    }
}

/// The persisted, hex-encoded wire form of a [`BallotEnvelope`].
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BallotEnvelopeHex {
    pub election_id: String,
    pub ballot_hex: String,
    pub proof: ProofHex,
}

impl From<&BallotEnvelope> for BallotEnvelopeHex {
    fn from(e: &BallotEnvelope) -> Self {
        BallotEnvelopeHex {
            election_id: e.election_id.clone(),
            ballot_hex: gt_to_hex(&e.ballot),
            proof: (&e.proof).into(),
        }
    }
}

impl TryFrom<&BallotEnvelopeHex> for BallotEnvelope {
    type Error = VotingError;

    fn try_from(e: &BallotEnvelopeHex) -> Result<Self, Self::Error> {
        Ok(BallotEnvelope {
            election_id: e.election_id.clone(),
            ballot: gt_from_hex(&e.ballot_hex)?,
            proof: (&e.proof).try_into()?,
        })
    }
}
