// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic parties and complete handshakes for tests.
use like_core::{PartyId, PrivateKey};

use crate::ake::{
    Initiator, InitiatorCommitment, InitiatorConfirmation, Operator, Responder,
    ResponderCommitment, ResponderConfirmation, SessionKey, SessionSealingToken,
};
use crate::crypto::Rng;
use crate::crypto::pairing::PairingParams;
use crate::escrow::{AuthorityKey, EscrowAuthority, EscrowPublicKey};
use crate::session::SessionContext;

pub const ALICE: PartyId = PartyId::from_bytes([0xaa; 16]);

pub const BOB: PartyId = PartyId::from_bytes([0xbb; 16]);

/// Enables log output when `RUST_LOG` is set.
pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Alice as initiator, Bob as responder, an operator and `n` escrow authorities with ids
/// `[0; 16]`, `[1; 16]` and so on.
pub struct SessionSetup {
    pub params: PairingParams,
    pub authorities: Vec<EscrowAuthority>,
    pub escrow: EscrowPublicKey,
    pub context: SessionContext,
    pub alice_key: PrivateKey,
    pub bob_key: PrivateKey,
    pub operator_key: PrivateKey,
}

impl SessionSetup {
    pub fn new(n_authorities: u8, seed: [u8; 32]) -> Self {
        setup_logging();

        let params = PairingParams::default();
        let rng = Rng::from_seed(seed);

        let authorities: Vec<EscrowAuthority> = (0..n_authorities)
            .map(|i| {
                EscrowAuthority::generate(PartyId::from_bytes([i; 16]), &params, &rng).unwrap()
            })
            .collect();
        let keys: Vec<AuthorityKey> = authorities
            .iter()
            .map(|authority| authority.public().clone())
            .collect();
        let escrow = EscrowPublicKey::aggregate(&params, &keys).unwrap();
        let context = SessionContext::new(ALICE, BOB, &escrow);

        Self {
            params,
            authorities,
            escrow,
            context,
            alice_key: PrivateKey::from_bytes(&[1; 32]),
            bob_key: PrivateKey::from_bytes(&[2; 32]),
            operator_key: PrivateKey::from_bytes(&[3; 32]),
        }
    }
}

/// Every message of one successful handshake, the sealing token and the keys both sides
/// derived.
pub struct Handshake {
    pub commitment: InitiatorCommitment,
    pub response: ResponderCommitment,
    pub confirmation: InitiatorConfirmation,
    pub closing: ResponderConfirmation,
    pub token: SessionSealingToken,
    pub alice_session_key: SessionKey,
    pub bob_session_key: SessionKey,
}

impl Handshake {
    pub fn run(setup: &SessionSetup) -> Self {
        Self::run_with_seed(setup, [0xff; 32])
    }

    /// Runs all three roles to completion, with the operator observing every message.
    pub fn run_with_seed(setup: &SessionSetup, seed: [u8; 32]) -> Self {
        let rng = Rng::from_seed(seed);
        let params = &setup.params;
        let alice_public = setup.alice_key.public_key();
        let bob_public = setup.bob_key.public_key();

        let operator = Operator::init(setup.context.clone(), alice_public, bob_public);

        let (alice, commitment) =
            Initiator::start(params, setup.context.clone(), &setup.escrow, &rng).unwrap();
        let operator = Operator::observe_commitment(operator, params, &commitment).unwrap();

        let (bob, response) = Responder::accept(
            params,
            setup.context.clone(),
            &setup.escrow,
            &commitment,
            &setup.bob_key,
            &rng,
        )
        .unwrap();
        let operator = Operator::observe_response(operator, params, &response).unwrap();

        let (alice, confirmation) =
            Initiator::confirm(alice, params, &response, &setup.alice_key, &bob_public).unwrap();
        let operator = Operator::observe_confirmation(operator, &confirmation).unwrap();

        let (bob_session_key, closing) =
            Responder::finish(bob, &confirmation, &setup.bob_key, &alice_public).unwrap();
        let alice_session_key = Initiator::finish(alice, &closing, &bob_public).unwrap();

        let token = Operator::seal(operator, &closing, &setup.operator_key).unwrap();

        Self {
            commitment,
            response,
            confirmation,
            closing,
            token,
            alice_session_key,
            bob_session_key,
        }
    }
}
