// SPDX-License-Identifier: MIT OR Apache-2.0

use ark_ec::CurveGroup;
use like_core::{PrivateKey, PublicKey};
use tracing::{debug, warn};

use crate::ake::messages::{
    InitiatorCommitment, InitiatorConfirmation, ResponderCommitment, ResponderConfirmation,
};
use crate::ake::transcript::TranscriptBytes;
use crate::ake::{AkeError, AkeResult, SessionKey, Step, verify_signature};
use crate::crypto::pairing::{G1, G2, PairingParams, pairing};
use crate::crypto::{Rng, SecretScalar};
use crate::escrow::EscrowPublicKey;
use crate::proofs::SignatureOfKnowledge;
use crate::session::SessionContext;

/// Initiator "A" of a handshake.
pub struct Initiator;

/// Initiator waiting for the responder's commitment.
#[derive(Debug)]
pub struct InitiatorStarted {
    context: SessionContext,
    escrow_key: G1,
    x: SecretScalar,
    commitment: InitiatorCommitment,
}

impl InitiatorStarted {
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn commitment(&self) -> &InitiatorCommitment {
        &self.commitment
    }
}

/// Initiator which confirmed the transcript and waits for the responder's closing signature.
#[derive(Debug)]
pub struct InitiatorConfirmed {
    context: SessionContext,
    escrow_key: G1,
    x: SecretScalar,
    y_q: G2,
    transcript: TranscriptBytes,
}

impl InitiatorConfirmed {
    pub fn context(&self) -> &SessionContext {
        &self.context
    }
}

impl Initiator {
    /// Samples the ephemeral exponent `x` and commits to it in both source groups.
    pub fn start(
        params: &PairingParams,
        context: SessionContext,
        escrow: &EscrowPublicKey,
        rng: &Rng,
    ) -> AkeResult<(InitiatorStarted, InitiatorCommitment)> {
        if !context.matches(escrow) {
            warn!("session context does not match escrow authorities");
            return Err(AkeError::ContextMismatch);
        }

        let x = SecretScalar::random(rng)?;
        let x_p = (*params.p() * x.as_scalar()).into_affine();
        let x_q = (*params.q() * x.as_scalar()).into_affine();
        let proof = SignatureOfKnowledge::sign(params, &x, &x_q, context.as_bytes(), rng)?;
        let commitment = InitiatorCommitment::new(x_p, x_q, proof);

        debug!(responder = %context.responder(), "initiator committed");

        Ok((
            InitiatorStarted {
                context,
                escrow_key: *escrow.public_key(),
                x,
                commitment: commitment.clone(),
            },
            commitment,
        ))
    }

    /// Checks the responder's commitment and signs the transcript extended by `σY1`.
    pub fn confirm(
        state: InitiatorStarted,
        params: &PairingParams,
        response: &ResponderCommitment,
        our_key: &PrivateKey,
        their_key: &PublicKey,
    ) -> AkeResult<(InitiatorConfirmed, InitiatorConfirmation)> {
        response.verify(params, &state.context, &state.commitment, their_key)?;

        let transcript = TranscriptBytes::commitments(
            &state.context,
            &state.commitment,
            response.y_q(),
            response.proof(),
        )
        .with_signature(response.signature());
        let signature = our_key.sign(transcript.as_bytes());
        let transcript = transcript.with_signature(&signature);

        debug!(responder = %state.context.responder(), "initiator confirmed transcript");

        Ok((
            InitiatorConfirmed {
                context: state.context,
                escrow_key: state.escrow_key,
                x: state.x,
                y_q: *response.y_q(),
                transcript,
            },
            InitiatorConfirmation::new(signature),
        ))
    }

    /// Checks the responder's closing signature and derives the session key `e(L, yQ)^x`.
    ///
    /// The ephemeral exponent is erased when this returns.
    pub fn finish(
        state: InitiatorConfirmed,
        closing: &ResponderConfirmation,
        their_key: &PublicKey,
    ) -> AkeResult<SessionKey> {
        verify_signature(
            their_key,
            state.transcript.as_bytes(),
            closing.signature(),
            Step::ResponderConfirmation,
        )?;

        let key = pairing(&state.escrow_key, &state.y_q) * state.x.as_scalar();

        debug!(responder = %state.context.responder(), "initiator derived session key");

        Ok(SessionKey::from_gt(&key))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use like_core::PartyId;

    use crate::ake::{AkeError, Initiator, Responder, Step};
    use crate::crypto::Rng;
    use crate::session::SessionContext;
    use crate::test_utils::SessionSetup;

    #[test]
    fn context_must_match_escrow() {
        let setup = SessionSetup::new(2, [1; 32]);
        let rng = Rng::from_seed([2; 32]);

        // Context names only one of the two authorities.
        let context = SessionContext::from_parties(
            setup.context.initiator(),
            setup.context.responder(),
            &[PartyId::from_bytes([0; 16])],
        );
        assert_matches!(
            Initiator::start(&setup.params, context, &setup.escrow, &rng),
            Err(AkeError::ContextMismatch)
        );
    }

    #[test]
    fn rejects_forged_response() {
        let setup = SessionSetup::new(1, [3; 32]);
        let rng = Rng::from_seed([4; 32]);

        let (alice, commitment) =
            Initiator::start(&setup.params, setup.context.clone(), &setup.escrow, &rng).unwrap();

        // Somebody else than Bob answers in Bob's name.
        let mallory_key = like_core::PrivateKey::from_bytes(&[66; 32]);
        let (_, response) = Responder::accept(
            &setup.params,
            setup.context.clone(),
            &setup.escrow,
            &commitment,
            &mallory_key,
            &rng,
        )
        .unwrap();

        assert_matches!(
            Initiator::confirm(
                alice,
                &setup.params,
                &response,
                &setup.alice_key,
                &setup.bob_key.public_key(),
            ),
            Err(AkeError::InvalidSignature(Step::ResponderCommitment))
        );
    }
}
