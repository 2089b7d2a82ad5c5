// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_matches::assert_matches;

use crate::ake::{Initiator, Responder, SessionSealingToken, TokenError};
use crate::crypto::Rng;
use crate::crypto::pairing::{PairingParams, gt_bytes, pairing};
use crate::message::Message;
use crate::session::SessionContext;
use crate::test_utils::{ALICE, BOB, Handshake, SessionSetup};
use crate::trapdoor::{
    TrapdoorError, TrapdoorShare, combine_shares, generate_shares, open_token, verify_shares,
};
use crate::{AkeError, SessionKey, Step};

fn escrowed_session(n_authorities: u8, seed: u8) {
    let setup = SessionSetup::new(n_authorities, [seed; 32]);
    let handshake = Handshake::run(&setup);

    assert_eq!(handshake.alice_session_key, handshake.bob_session_key);

    let transcript = handshake
        .token
        .audit(
            &setup.params,
            &setup.operator_key.public_key(),
            &setup.alice_key.public_key(),
            &setup.bob_key.public_key(),
        )
        .unwrap();
    assert_eq!(transcript.context().authorities().len(), n_authorities as usize);

    let rng = Rng::from_seed([seed.wrapping_add(1); 32]);
    let shares = generate_shares(
        &setup.params,
        &setup.authorities,
        transcript.x_p(),
        transcript.y_q(),
        &rng,
    )
    .unwrap();
    let opened = open_token(
        &setup.params,
        &setup.escrow,
        &setup.operator_key.public_key(),
        &handshake.token,
        &shares,
    )
    .unwrap();

    assert_eq!(opened, handshake.alice_session_key);
    assert_eq!(opened.as_bytes(), handshake.bob_session_key.as_bytes());
}

#[test]
fn single_authority() {
    escrowed_session(1, 1);
}

#[test]
fn two_authorities() {
    escrowed_session(2, 2);
}

#[test]
fn five_authorities() {
    escrowed_session(5, 3);
}

#[test]
fn every_share_counts() {
    let setup = SessionSetup::new(2, [4; 32]);
    let handshake = Handshake::run(&setup);
    let rng = Rng::from_seed([5; 32]);
    let (x_p, y_q) = (handshake.commitment.x_p(), handshake.response.y_q());
    let shares = generate_shares(&setup.params, &setup.authorities, x_p, y_q, &rng).unwrap();

    // Correct shares recover the key, a single altered share does not.
    let values: Vec<_> = shares.iter().map(|share| *share.share()).collect();
    assert_eq!(
        SessionKey::from_gt(&combine_shares(&values)),
        handshake.alice_session_key
    );
    for i in 0..values.len() {
        let mut altered = values.clone();
        altered[i] += pairing(setup.params.p(), setup.params.q());
        assert_ne!(
            SessionKey::from_gt(&combine_shares(&altered)),
            handshake.alice_session_key
        );
    }

    // A flipped bit in the encoded share is caught while decoding or by the share proof.
    for (i, share) in shares.iter().enumerate() {
        let mut bytes = share.to_bytes().unwrap();
        let encoded = gt_bytes(share.share());
        let offset = bytes
            .windows(encoded.len())
            .position(|window| window == encoded)
            .unwrap();
        bytes[offset + 100] ^= 0x01;

        match TrapdoorShare::from_bytes(&bytes) {
            Err(_) => (),
            Ok(flipped) => {
                let mut tampered = shares.clone();
                tampered[i] = flipped;
                assert_matches!(
                    verify_shares(&setup.params, &setup.escrow, x_p, y_q, &tampered),
                    Err(TrapdoorError::InvalidShareProof(id)) if id == share.authority()
                );
            }
        }
    }

    // Leaving out an authority.
    assert_matches!(
        open_token(
            &setup.params,
            &setup.escrow,
            &setup.operator_key.public_key(),
            &handshake.token,
            &shares[1..],
        ),
        Err(TrapdoorError::ShareMismatch(_))
    );
    assert_matches!(
        open_token(
            &setup.params,
            &setup.escrow,
            &setup.operator_key.public_key(),
            &handshake.token,
            &shares[..1],
        ),
        Err(TrapdoorError::MissingShares(2, 1))
    );
}

#[test]
fn replay_into_other_session() {
    let setup = SessionSetup::new(2, [6; 32]);
    let handshake = Handshake::run(&setup);
    let rng = Rng::from_seed([7; 32]);

    // Same parties and authorities, but in other roles.
    let swapped = SessionContext::new(BOB, ALICE, &setup.escrow);
    assert_matches!(
        Responder::accept(
            &setup.params,
            swapped.clone(),
            &setup.escrow,
            &handshake.commitment,
            &setup.bob_key,
            &rng,
        ),
        Err(AkeError::InvalidProof(Step::InitiatorCommitment))
    );

    // A fresh commitment from Alice with Bob's old response.
    let (alice, _) =
        Initiator::start(&setup.params, setup.context.clone(), &setup.escrow, &rng).unwrap();
    assert_matches!(
        Initiator::confirm(
            alice,
            &setup.params,
            &handshake.response,
            &setup.alice_key,
            &setup.bob_key.public_key(),
        ),
        Err(AkeError::InvalidSignature(Step::ResponderCommitment))
    );
}

#[test]
fn sealing_token_survives_the_wire() {
    let setup = SessionSetup::new(3, [8; 32]);
    let handshake = Handshake::run(&setup);

    let bytes = handshake.token.to_bytes().unwrap();
    let token = SessionSealingToken::from_bytes(&bytes).unwrap();
    assert_eq!(token, handshake.token);
    assert_eq!(token.to_bytes().unwrap(), bytes);

    let json = serde_json::to_string(&token).unwrap();
    let token_again: SessionSealingToken = serde_json::from_str(&json).unwrap();
    assert_eq!(token_again, token);

    // Signed by somebody who is not the operator.
    let forged = SessionSealingToken::seal(&token.transcript().unwrap(), &setup.alice_key);
    assert_matches!(
        open_token(
            &setup.params,
            &setup.escrow,
            &setup.operator_key.public_key(),
            &forged,
            &[],
        ),
        Err(TrapdoorError::Token(TokenError::InvalidOperatorSignature))
    );
}

#[test]
fn independent_sessions_differ() {
    let setup = SessionSetup::new(1, [9; 32]);
    let first = Handshake::run_with_seed(&setup, [10; 32]);
    let second = Handshake::run_with_seed(&setup, [11; 32]);
    assert_ne!(first.alice_session_key, second.alice_session_key);
    assert_ne!(first.token.message(), second.token.message());

    // Same seed, same handshake.
    let again = Handshake::run_with_seed(&setup, [10; 32]);
    assert_eq!(again.token, first.token);
}

#[test]
fn debug_output_hides_secrets() {
    let setup = SessionSetup::new(1, [12; 32]);
    let handshake = Handshake::run(&setup);
    let rng = Rng::from_seed([13; 32]);

    let authority = &setup.authorities[0];
    let output = format!("{authority:?}");
    assert!(output.contains("SecretScalar(\"***\")"));
    assert!(!output.contains(&authority.secret().as_scalar().to_string()));

    let (alice, _) =
        Initiator::start(&setup.params, setup.context.clone(), &setup.escrow, &rng).unwrap();
    assert!(format!("{alice:?}").contains("SecretScalar(\"***\")"));

    let key = format!("{:?}", handshake.alice_session_key);
    assert!(!key.contains(&handshake.alice_session_key.to_hex()[..16]));
}

#[test]
fn shared_parameters() {
    assert_eq!(PairingParams::shared(), &PairingParams::default());
}
