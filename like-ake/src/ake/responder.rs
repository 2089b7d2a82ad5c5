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

/// Responder "B" of a handshake.
pub struct Responder;

/// Responder which sent its commitment and waits for the initiator's confirmation.
#[derive(Debug)]
pub struct ResponderAccepted {
    context: SessionContext,
    escrow_key: G1,
    y: SecretScalar,
    x_q: G2,
    transcript: TranscriptBytes,
}

impl ResponderAccepted {
    pub fn context(&self) -> &SessionContext {
        &self.context
    }
}

impl Responder {
    /// Checks the initiator's commitment, samples the ephemeral exponent `y` and signs the
    /// commitments of both sides (`σY1`).
    pub fn accept(
        params: &PairingParams,
        context: SessionContext,
        escrow: &EscrowPublicKey,
        commitment: &InitiatorCommitment,
        our_key: &PrivateKey,
        rng: &Rng,
    ) -> AkeResult<(ResponderAccepted, ResponderCommitment)> {
        if !context.matches(escrow) {
            warn!("session context does not match escrow authorities");
            return Err(AkeError::ContextMismatch);
        }

        // Checked here again, independent of what the operator or anyone else reported.
        commitment.verify(params, &context)?;

        let y = SecretScalar::random(rng)?;
        let y_q = (*params.q() * y.as_scalar()).into_affine();
        let proof = SignatureOfKnowledge::sign(params, &y, &y_q, context.as_bytes(), rng)?;

        let transcript = TranscriptBytes::commitments(&context, commitment, &y_q, &proof);
        let signature = our_key.sign(transcript.as_bytes());
        let transcript = transcript.with_signature(&signature);

        debug!(initiator = %context.initiator(), "responder accepted commitment");

        Ok((
            ResponderAccepted {
                context,
                escrow_key: *escrow.public_key(),
                y,
                x_q: *commitment.x_q(),
                transcript,
            },
            ResponderCommitment::new(y_q, proof, signature),
        ))
    }

    /// Checks the initiator's confirmation `σX`, closes the transcript with `σY2` and derives
    /// the session key `e(L, xQ)^y`.
    ///
    /// The ephemeral exponent is erased when this returns.
    pub fn finish(
        state: ResponderAccepted,
        confirmation: &InitiatorConfirmation,
        our_key: &PrivateKey,
        their_key: &PublicKey,
    ) -> AkeResult<(SessionKey, ResponderConfirmation)> {
        verify_signature(
            their_key,
            state.transcript.as_bytes(),
            confirmation.signature(),
            Step::InitiatorConfirmation,
        )?;

        let transcript = state.transcript.with_signature(confirmation.signature());
        let signature = our_key.sign(transcript.as_bytes());

        let key = pairing(&state.escrow_key, &state.x_q) * state.y.as_scalar();

        debug!(initiator = %state.context.initiator(), "responder derived session key");

        Ok((
            SessionKey::from_gt(&key),
            ResponderConfirmation::new(signature),
        ))
    }
}
