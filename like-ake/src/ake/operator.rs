// SPDX-License-Identifier: MIT OR Apache-2.0

use like_core::{PrivateKey, PublicKey};
use tracing::{debug, warn};

use crate::ake::messages::{
    InitiatorCommitment, InitiatorConfirmation, ResponderCommitment, ResponderConfirmation,
};
use crate::ake::{AkeError, AkeResult, SessionSealingToken, SessionTranscript, Step};
use crate::crypto::pairing::PairingParams;
use crate::session::SessionContext;

/// Operator "O" notarising a handshake.
///
/// The operator holds no key material of the session. It checks every message as it passes by
/// and finally seals the transcript with its own signature.
pub struct Operator;

/// Messages the operator has seen and accepted so far.
#[derive(Debug)]
pub struct OperatorState {
    context: SessionContext,
    initiator_key: PublicKey,
    responder_key: PublicKey,
    observed: Observed,
}

#[derive(Debug)]
enum Observed {
    Nothing,
    Commitment(InitiatorCommitment),
    Response(InitiatorCommitment, ResponderCommitment),
    Confirmation(InitiatorCommitment, ResponderCommitment, InitiatorConfirmation),
}

impl OperatorState {
    pub fn context(&self) -> &SessionContext {
        &self.context
    }
}

impl Operator {
    pub fn init(
        context: SessionContext,
        initiator_key: PublicKey,
        responder_key: PublicKey,
    ) -> OperatorState {
        OperatorState {
            context,
            initiator_key,
            responder_key,
            observed: Observed::Nothing,
        }
    }

    pub fn observe_commitment(
        state: OperatorState,
        params: &PairingParams,
        commitment: &InitiatorCommitment,
    ) -> AkeResult<OperatorState> {
        let Observed::Nothing = state.observed else {
            return Err(unexpected(Step::InitiatorCommitment));
        };

        commitment.verify(params, &state.context)?;

        Ok(OperatorState {
            observed: Observed::Commitment(commitment.clone()),
            ..state
        })
    }

    pub fn observe_response(
        state: OperatorState,
        params: &PairingParams,
        response: &ResponderCommitment,
    ) -> AkeResult<OperatorState> {
        let Observed::Commitment(commitment) = state.observed else {
            return Err(unexpected(Step::ResponderCommitment));
        };

        response.verify(params, &state.context, &commitment, &state.responder_key)?;

        Ok(OperatorState {
            observed: Observed::Response(commitment, response.clone()),
            ..state
        })
    }

    pub fn observe_confirmation(
        state: OperatorState,
        confirmation: &InitiatorConfirmation,
    ) -> AkeResult<OperatorState> {
        let Observed::Response(commitment, response) = state.observed else {
            return Err(unexpected(Step::InitiatorConfirmation));
        };

        confirmation.verify(
            &state.context,
            &commitment,
            &response,
            &state.initiator_key,
        )?;

        Ok(OperatorState {
            observed: Observed::Confirmation(commitment, response, confirmation.clone()),
            ..state
        })
    }

    /// Checks the responder's closing signature and signs the complete transcript.
    ///
    /// The returned token owns the transcript bytes; the operator keeps nothing of the session.
    pub fn seal(
        state: OperatorState,
        closing: &ResponderConfirmation,
        operator_key: &PrivateKey,
    ) -> AkeResult<SessionSealingToken> {
        let Observed::Confirmation(commitment, response, confirmation) = state.observed else {
            return Err(unexpected(Step::ResponderConfirmation));
        };

        closing.verify(
            &state.context,
            &commitment,
            &response,
            &confirmation,
            &state.responder_key,
        )?;

        let transcript = SessionTranscript::new(
            state.context,
            commitment,
            response,
            confirmation,
            closing.clone(),
        );
        let token = SessionSealingToken::seal(&transcript, operator_key);

        debug!(
            initiator = %transcript.context().initiator(),
            responder = %transcript.context().responder(),
            "sealed session transcript"
        );

        Ok(token)
    }
}

fn unexpected(step: Step) -> AkeError {
    warn!(%step, "handshake message out of order");
    AkeError::UnexpectedMessage(step)
}
