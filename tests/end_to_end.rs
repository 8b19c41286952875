use rand::thread_rng;
use voting_core::ballot::{self, or_proof, schnorr, Proof};
use voting_core::crypto::{g1_add, g1_eq, g1_generator_from_hash, gt_eq, gt_identity};
use voting_core::roster::Roster;
use voting_core::tally::{decrypt_tally, encrypt_tally, DecryptedTally};
use voting_core::{ProofMode, VotingConfig, VotingError, VotingSystem};

fn roster_of(names: &[&str]) -> (Roster, blstrs::G1Projective) {
    let g = g1_generator_from_hash(voting_core::constants::DST_GENERATOR);
    let mut roster = Roster::new(g);
    let mut rng = thread_rng();
    for name in names {
        roster.register(*name, &mut rng).unwrap();
    }
    roster.close();
    (roster, g)
}

// S1 - Three voters, sum=2.
#[test]
fn s1_three_voters_sum_two() {
    let mut rng = thread_rng();
    let (roster, g) = roster_of(&["Tom", "John", "Sarah"]);
    let election_id = "Election2025/01";

    let envelopes = vec![
        or_proof::cast(&roster, &g, "Tom", 0, election_id, &mut rng).unwrap(),
        or_proof::cast(&roster, &g, "John", 1, election_id, &mut rng).unwrap(),
        or_proof::cast(&roster, &g, "Sarah", 1, election_id, &mut rng).unwrap(),
    ];

    let enc = encrypt_tally(&g, election_id, &envelopes);
    assert_eq!(decrypt_tally(&enc, 3), DecryptedTally::Count(2));
}

// S2 - Three voters, sum=1.
#[test]
fn s2_three_voters_sum_one() {
    let mut rng = thread_rng();
    let (roster, g) = roster_of(&["Tom", "John", "Sarah"]);
    let election_id = "Election2025/02";

    let envelopes = vec![
        or_proof::cast(&roster, &g, "Tom", 0, election_id, &mut rng).unwrap(),
        or_proof::cast(&roster, &g, "John", 1, election_id, &mut rng).unwrap(),
        or_proof::cast(&roster, &g, "Sarah", 0, election_id, &mut rng).unwrap(),
    ];

    let enc = encrypt_tally(&g, election_id, &envelopes);
    assert_eq!(decrypt_tally(&enc, 3), DecryptedTally::Count(1));
}

// S3 - All abstain.
#[test]
fn s3_all_abstain() {
    let (_roster, g) = roster_of(&["Tom", "John", "Sarah"]);
    let election_id = "Election2025/03";

    let enc = encrypt_tally(&g, election_id, &[]);
    assert!(gt_eq(&enc.r, &gt_identity()));
    assert_eq!(decrypt_tally(&enc, 3), DecryptedTally::Count(0));
}

// S4 - Proof tamper: one of three ballots (tally would be 2) is mutated and must be skipped.
#[test]
fn s4_tampered_ballot_is_skipped() {
    let mut rng = thread_rng();
    let (roster, g) = roster_of(&["Tom", "John", "Sarah"]);
    let election_id = "Election2025/04";

    let mut envelopes = vec![
        or_proof::cast(&roster, &g, "Tom", 0, election_id, &mut rng).unwrap(),
        or_proof::cast(&roster, &g, "John", 1, election_id, &mut rng).unwrap(),
        or_proof::cast(&roster, &g, "Sarah", 1, election_id, &mut rng).unwrap(),
    ];

    if let Proof::Or(p) = &mut envelopes[1].proof {
        p.s0 = voting_core::crypto::fr_add(&p.s0, &voting_core::crypto::fr_from_int(1));
    } else {
        unreachable!()
    }

    let enc = encrypt_tally(&g, election_id, &envelopes);
    assert_eq!(decrypt_tally(&enc, 3), DecryptedTally::Count(1));
}

// S5 - Wrong max_votes: true tally is 2, caller passes max_votes=1.
#[test]
fn s5_wrong_max_votes_fails() {
    let mut rng = thread_rng();
    let (roster, g) = roster_of(&["Tom", "John", "Sarah"]);
    let election_id = "Election2025/05";

    let envelopes = vec![
        or_proof::cast(&roster, &g, "Tom", 0, election_id, &mut rng).unwrap(),
        or_proof::cast(&roster, &g, "John", 1, election_id, &mut rng).unwrap(),
        or_proof::cast(&roster, &g, "Sarah", 1, election_id, &mut rng).unwrap(),
    ];

    let enc = encrypt_tally(&g, election_id, &envelopes);
    assert_eq!(decrypt_tally(&enc, 1), DecryptedTally::TallyFailed);
}

// S6 - Invalid vote rejected; roster and ballot store unchanged.
#[test]
fn s6_invalid_vote_rejected() {
    let mut rng = thread_rng();
    let mut sys = VotingSystem::new(VotingConfig::new(ProofMode::OrProof)).unwrap();
    sys.register_voter("Tom", &mut rng).unwrap();
    sys.close_registration();

    let election_id = "Election2025/06";
    assert_eq!(
        sys.cast_vote("Tom", 2, election_id, &mut rng).unwrap_err(),
        VotingError::InvalidVote
    );

    let enc = sys.encrypt_tally(election_id);
    assert!(gt_eq(&enc.r, &gt_identity()));
}

// S7 - Cancellation invariant (property test).
#[test]
fn s7_cancellation_invariant() {
    for n in [1, 2, 5, 10, 50] {
        let names: Vec<String> = (0..n).map(|i| format!("voter-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (roster, _) = roster_of(&refs);

        let mut acc = voting_core::crypto::g1_identity();
        for voter in roster.iter() {
            acc = g1_add(&acc, roster.cancelling_key(voter.voter_id()).unwrap());
        }
        assert!(g1_eq(&acc, &voting_core::crypto::g1_identity()));
    }
}

// Homomorphic tally invariant: the product of all ballots equals B^{sum of votes}, independent
// of which of the two proof variants produced each ballot.
#[test]
fn homomorphic_tally_matches_sum_across_proof_modes() {
    let mut rng = thread_rng();
    let (roster, g) = roster_of(&["Tom", "John", "Sarah", "Ravi"]);
    let election_id = "Election2025/homomorphic";
    let votes = [0u8, 1, 1, 0];
    let names = ["Tom", "John", "Sarah", "Ravi"];

    let envelopes: Vec<_> = names
        .iter()
        .zip(votes.iter())
        .enumerate()
        .map(|(i, (name, vote))| {
            if i % 2 == 0 {
                schnorr::cast(&roster, &g, name, *vote, election_id, &mut rng).unwrap()
            } else {
                or_proof::cast(&roster, &g, name, *vote, election_id, &mut rng).unwrap()
            }
        })
        .collect();

    for e in &envelopes {
        assert!(ballot::verify(e));
    }

    let enc = encrypt_tally(&g, election_id, &envelopes);
    let expected_sum: u64 = votes.iter().map(|&v| v as u64).sum();
    assert_eq!(decrypt_tally(&enc, votes.len() as u64), DecryptedTally::Count(expected_sum));
}

// Round-trip through the VotingSystem facade, exercising registration, a closed roster, casting
// in both proof modes, and the hex wire format for persisted envelopes.
#[test]
fn full_system_lifecycle_with_hex_envelopes() {
    use voting_core::ballot::envelope::BallotEnvelopeHex;

    let mut rng = thread_rng();
    let mut sys = VotingSystem::new(VotingConfig::new(ProofMode::OrProof)).unwrap();

    let pk_hex = sys.register_voter("Tom", &mut rng).unwrap();
    assert_eq!(pk_hex.len(), voting_core::constants::G1_COMPRESSED_BYTES * 2);
    sys.register_voter("John", &mut rng).unwrap();
    sys.close_registration();

    let election_id = "Election2025/system";
    sys.cast_vote("Tom", 1, election_id, &mut rng).unwrap();
    sys.cast_vote("John", 1, election_id, &mut rng).unwrap();

    let enc = sys.encrypt_tally(election_id);
    assert_eq!(sys.decrypt_tally(&enc, 2), DecryptedTally::Count(2));

    // Persist and reload a ballot through the hex wire format; it must still verify.
    let (roster2, g2) = roster_of(&["Solo"]);
    let envelope = or_proof::cast(&roster2, &g2, "Solo", 1, "Election2025/solo", &mut rng).unwrap();
    let wire = BallotEnvelopeHex::from(&envelope);
    let json = serde_json::to_string(&wire).unwrap();
    let wire_back: BallotEnvelopeHex = serde_json::from_str(&json).unwrap();
    let envelope_back = voting_core::ballot::BallotEnvelope::try_from(&wire_back).unwrap();
    assert!(ballot::verify(&envelope_back));
}
