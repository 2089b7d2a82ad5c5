// SPDX-License-Identifier: MIT OR Apache-2.0

use like_core::{PrivateKey, PublicKey, Signature};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::ake::{AkeError, SessionTranscript};
use crate::crypto::EncodingError;
use crate::crypto::pairing::PairingParams;

/// Session Sealing Token: the canonical transcript of a handshake and the operator's signature
/// over it.
///
/// It is the durable record that this exact handshake took place and what escrow authorities
/// open later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSealingToken {
    #[serde(with = "serde_bytes")]
    message: Vec<u8>,

    operator_signature: Signature,
}

impl SessionSealingToken {
    pub(crate) fn seal(transcript: &SessionTranscript, operator_key: &PrivateKey) -> Self {
        let message = transcript.to_bytes();
        let operator_signature = operator_key.sign(&message);
        Self {
            message,
            operator_signature,
        }
    }

    /// Canonical transcript bytes.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn operator_signature(&self) -> &Signature {
        &self.operator_signature
    }

    /// Checks the operator's signature over the sealed transcript.
    pub fn verify(&self, operator_key: &PublicKey) -> Result<(), TokenError> {
        if !operator_key.verify(&self.message, &self.operator_signature) {
            warn!("invalid operator signature on session sealing token");
            return Err(TokenError::InvalidOperatorSignature);
        }
        Ok(())
    }

    /// Decodes the sealed transcript. This does not check any signature.
    pub fn transcript(&self) -> Result<SessionTranscript, TokenError> {
        Ok(SessionTranscript::from_bytes(&self.message)?)
    }

    /// Full audit: operator signature, then every check of the handshake itself.
    pub fn audit(
        &self,
        params: &PairingParams,
        operator_key: &PublicKey,
        initiator_key: &PublicKey,
        responder_key: &PublicKey,
    ) -> Result<SessionTranscript, TokenError> {
        self.verify(operator_key)?;
        let transcript = self.transcript()?;
        transcript.verify(params, initiator_key, responder_key)?;
        Ok(transcript)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("operator signature on session sealing token is invalid")]
    InvalidOperatorSignature,

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Handshake(#[from] AkeError),
}
