// SPDX-License-Identifier: MIT OR Apache-2.0

use like_core::{PARTY_ID_LEN, PublicKey, SIGNATURE_LEN, Signature};

use crate::ake::AkeResult;
use crate::ake::messages::{
    InitiatorCommitment, InitiatorConfirmation, ResponderCommitment, ResponderConfirmation,
};
use crate::crypto::pairing::{
    G1, G1_SIZE, G2, G2_SIZE, PairingParams, SCALAR_SIZE, g1_bytes, g1_from_bytes, g2_bytes,
    g2_from_bytes, scalar_from_bytes,
};
use crate::crypto::EncodingError;
use crate::proofs::SignatureOfKnowledge;
use crate::session::SessionContext;

/// Canonical transcript prefix, growing by one signature per handshake step.
#[derive(Clone, Debug)]
pub(crate) struct TranscriptBytes(Vec<u8>);

impl TranscriptBytes {
    /// `ω ∥ xP ∥ xQ ∥ Rho_x ∥ d_x ∥ yQ ∥ Rho_y ∥ d_y`, the part the responder signs first.
    pub(crate) fn commitments(
        context: &SessionContext,
        commitment: &InitiatorCommitment,
        y_q: &G2,
        y_proof: &SignatureOfKnowledge,
    ) -> Self {
        let mut bytes = Vec::with_capacity(context.as_bytes().len() + SessionTranscript::BODY_SIZE);
        bytes.extend_from_slice(context.as_bytes());
        bytes.extend_from_slice(&g1_bytes(commitment.x_p()));
        bytes.extend_from_slice(&g2_bytes(commitment.x_q()));
        bytes.extend_from_slice(&commitment.proof().to_bytes());
        bytes.extend_from_slice(&g2_bytes(y_q));
        bytes.extend_from_slice(&y_proof.to_bytes());
        Self(bytes)
    }

    pub(crate) fn with_signature(mut self, signature: &Signature) -> Self {
        self.0.extend_from_slice(&signature.to_bytes());
        self
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// Complete record of one handshake: the session context and every message exchanged.
///
/// This is what the operator seals. Anyone holding the public keys of initiator and responder
/// can re-run all checks of the handshake with [`SessionTranscript::verify`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionTranscript {
    context: SessionContext,
    commitment: InitiatorCommitment,
    response: ResponderCommitment,
    confirmation: InitiatorConfirmation,
    closing: ResponderConfirmation,
}

impl SessionTranscript {
    /// Size of everything after the session context.
    pub const BODY_SIZE: usize = G1_SIZE
        + G2_SIZE
        + SignatureOfKnowledge::SIZE
        + G2_SIZE
        + SignatureOfKnowledge::SIZE
        + 3 * SIGNATURE_LEN;

    pub(crate) fn new(
        context: SessionContext,
        commitment: InitiatorCommitment,
        response: ResponderCommitment,
        confirmation: InitiatorConfirmation,
        closing: ResponderConfirmation,
    ) -> Self {
        Self {
            context,
            commitment,
            response,
            confirmation,
            closing,
        }
    }

    /// Canonical, delimiter-free encoding of the whole transcript.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.prefix_until_closing()
            .with_signature(self.closing.signature())
            .into_bytes()
    }

    /// Decodes a canonical transcript. The session context takes whatever precedes the
    /// fixed-size body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        let context_len = bytes.len().checked_sub(Self::BODY_SIZE).ok_or(
            EncodingError::InvalidLength(bytes.len(), Self::BODY_SIZE + 3 * PARTY_ID_LEN),
        )?;
        let (context, body) = bytes.split_at(context_len);
        let context = SessionContext::from_bytes(context)?;

        let mut reader = Reader(body);
        let x_p = g1_from_bytes(reader.take::<G1_SIZE>()?)?;
        let x_q = g2_from_bytes(reader.take::<G2_SIZE>()?)?;
        let x_proof = reader.proof()?;
        let y_q = g2_from_bytes(reader.take::<G2_SIZE>()?)?;
        let y_proof = reader.proof()?;
        let sigma_y1 = reader.signature()?;
        let sigma_x = reader.signature()?;
        let sigma_y2 = reader.signature()?;

        Ok(Self {
            context,
            commitment: InitiatorCommitment::new(x_p, x_q, x_proof),
            response: ResponderCommitment::new(y_q, y_proof, sigma_y1),
            confirmation: InitiatorConfirmation::new(sigma_x),
            closing: ResponderConfirmation::new(sigma_y2),
        })
    }

    /// Re-runs every check of the handshake: both signatures of knowledge, the cross-pairing
    /// consistency of the initiator's commitment and all three chained signatures.
    pub fn verify(
        &self,
        params: &PairingParams,
        initiator_key: &PublicKey,
        responder_key: &PublicKey,
    ) -> AkeResult<()> {
        self.commitment.verify(params, &self.context)?;
        self.response
            .verify(params, &self.context, &self.commitment, responder_key)?;
        self.confirmation.verify(
            &self.context,
            &self.commitment,
            &self.response,
            initiator_key,
        )?;
        self.closing.verify(
            &self.context,
            &self.commitment,
            &self.response,
            &self.confirmation,
            responder_key,
        )?;
        Ok(())
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn commitment(&self) -> &InitiatorCommitment {
        &self.commitment
    }

    pub fn response(&self) -> &ResponderCommitment {
        &self.response
    }

    pub fn confirmation(&self) -> &InitiatorConfirmation {
        &self.confirmation
    }

    pub fn closing(&self) -> &ResponderConfirmation {
        &self.closing
    }

    /// Initiator's G1 commitment, one half of the input to trapdoor generation.
    pub fn x_p(&self) -> &G1 {
        self.commitment.x_p()
    }

    /// Responder's G2 commitment, the other half of the input to trapdoor generation.
    pub fn y_q(&self) -> &G2 {
        self.response.y_q()
    }

    fn prefix_until_closing(&self) -> TranscriptBytes {
        TranscriptBytes::commitments(
            &self.context,
            &self.commitment,
            self.response.y_q(),
            self.response.proof(),
        )
        .with_signature(self.response.signature())
        .with_signature(self.confirmation.signature())
    }
}

struct Reader<'a>(&'a [u8]);

impl<'a> Reader<'a> {
    fn take<const N: usize>(&mut self) -> Result<&'a [u8; N], EncodingError> {
        let (head, rest) = self
            .0
            .split_first_chunk::<N>()
            .ok_or(EncodingError::InvalidLength(self.0.len(), N))?;
        self.0 = rest;
        Ok(head)
    }

    fn proof(&mut self) -> Result<SignatureOfKnowledge, EncodingError> {
        let rho = g2_from_bytes(self.take::<G2_SIZE>()?)?;
        let d = scalar_from_bytes(self.take::<SCALAR_SIZE>()?)?;
        Ok(SignatureOfKnowledge::from_parts(rho, d))
    }

    fn signature(&mut self) -> Result<Signature, EncodingError> {
        Ok(Signature::from_bytes(self.take::<SIGNATURE_LEN>()?))
    }
}
