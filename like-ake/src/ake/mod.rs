// SPDX-License-Identifier: MIT OR Apache-2.0

//! Accountable authenticated key-exchange between an initiator and a responder, notarised by an
//! operator.
//!
//! ## Protocol
//!
//! All parties agree on the [`SessionContext`](crate::SessionContext) `ω` (initiator, responder
//! and every escrow authority) and on the aggregate escrow key `L`.
//!
//! 1. The initiator samples `x`, sends `xP`, `xQ` and a signature of knowledge of `x` over `ω`
//!    ([`InitiatorCommitment`]).
//! 2. Anyone can check the signature of knowledge and `e(xP, Q) == e(P, xQ)`, which ties both
//!    commitments to the same exponent.
//! 3. The responder checks the commitment itself, samples `y` and sends `yQ`, a signature of
//!    knowledge of `y` over `ω` and a signature `σY1` over the transcript so far
//!    ([`ResponderCommitment`]).
//! 4. The initiator checks all of it and signs the transcript extended by `σY1`
//!    ([`InitiatorConfirmation`], `σX`).
//! 5. The responder checks `σX` and closes with a signature over the transcript extended by `σX`
//!    ([`ResponderConfirmation`], `σY2`).
//! 6. The operator, who checked every step on the way, signs the complete transcript and hands
//!    out the [`SessionSealingToken`].
//!
//! The initiator derives `e(L, yQ)^x`, the responder `e(L, xQ)^y`. Both equal
//! `e(P, Q)^(x·y·Σl_i)`, which the escrow authorities can recover together from `xP` and `yQ`,
//! see [`trapdoor`](crate::trapdoor).
//!
//! Role functions are pure state transitions: they consume the previous state and return the
//! next one with the outgoing message. A failed check consumes the state as well, which aborts
//! the session; nothing of a failed step can be observed afterwards.
//!
//! ## Canonical transcript
//!
//! ```text
//! ω ∥ xP ∥ xQ ∥ Rho_x ∥ d_x ∥ yQ ∥ Rho_y ∥ d_y ∥ σY1 ∥ σX ∥ σY2
//! ```
//!
//! Every field is written at its fixed length, each signature covers all fields before it and
//! the operator signs the whole string.
use std::fmt;

use like_core::{PublicKey, Signature};
use thiserror::Error;
use tracing::warn;

use crate::crypto::RngError;

mod initiator;
mod key;
mod messages;
mod operator;
mod responder;
mod token;
mod transcript;

pub use initiator::{Initiator, InitiatorConfirmed, InitiatorStarted};
pub use key::SessionKey;
pub use messages::{
    InitiatorCommitment, InitiatorConfirmation, ResponderCommitment, ResponderConfirmation,
};
pub use operator::{Operator, OperatorState};
pub use responder::{Responder, ResponderAccepted};
pub use token::{SessionSealingToken, TokenError};
pub use transcript::SessionTranscript;

/// Handshake step a message belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    InitiatorCommitment,
    ResponderCommitment,
    InitiatorConfirmation,
    ResponderConfirmation,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::InitiatorCommitment => "initiator commitment",
            Step::ResponderCommitment => "responder commitment",
            Step::InitiatorConfirmation => "initiator confirmation",
            Step::ResponderConfirmation => "responder confirmation",
        };
        write!(f, "{name}")
    }
}

/// Checks a transcript signature of the given handshake step.
fn verify_signature(
    key: &PublicKey,
    transcript: &[u8],
    signature: &Signature,
    step: Step,
) -> AkeResult<()> {
    if !key.verify(transcript, signature) {
        warn!(%step, "invalid transcript signature");
        return Err(AkeError::InvalidSignature(step));
    }
    Ok(())
}

pub type AkeResult<T> = Result<T, AkeError>;

#[derive(Debug, Error)]
pub enum AkeError {
    #[error(transparent)]
    Rng(#[from] RngError),

    #[error("invalid signature of knowledge in {0}")]
    InvalidProof(Step),

    #[error("invalid transcript signature in {0}")]
    InvalidSignature(Step),

    #[error("initiator commitments in G1 and G2 use different exponents")]
    InconsistentCommitment,

    #[error("session context does not list the authorities of the escrow key")]
    ContextMismatch,

    #[error("did not expect {0} at this point of the handshake")]
    UnexpectedMessage(Step),
}
