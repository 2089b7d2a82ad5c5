// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messages exchanged during the handshake and the checks any observer can run on them.
use like_core::{PublicKey, Signature};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ake::transcript::TranscriptBytes;
use crate::ake::{AkeError, AkeResult, Step, verify_signature};
use crate::crypto::pairing::{G1, G2, PairingParams, canonical, pairing};
use crate::proofs::SignatureOfKnowledge;
use crate::session::SessionContext;

/// First message, initiator to responder: `xP`, `xQ` and a signature of knowledge of `x` over the
/// session context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiatorCommitment {
    #[serde(with = "canonical")]
    x_p: G1,

    #[serde(with = "canonical")]
    x_q: G2,

    proof: SignatureOfKnowledge,
}

impl InitiatorCommitment {
    pub(crate) fn new(x_p: G1, x_q: G2, proof: SignatureOfKnowledge) -> Self {
        Self { x_p, x_q, proof }
    }

    pub fn x_p(&self) -> &G1 {
        &self.x_p
    }

    pub fn x_q(&self) -> &G2 {
        &self.x_q
    }

    pub fn proof(&self) -> &SignatureOfKnowledge {
        &self.proof
    }

    /// Checks the signature of knowledge over the session context and that `xP` and `xQ` share
    /// their exponent, `e(xP, Q) == e(P, xQ)`.
    pub fn verify(&self, params: &PairingParams, context: &SessionContext) -> AkeResult<()> {
        if !self.proof.verify(params, &self.x_q, context.as_bytes()) {
            warn!(step = %Step::InitiatorCommitment, "invalid signature of knowledge");
            return Err(AkeError::InvalidProof(Step::InitiatorCommitment));
        }

        if pairing(&self.x_p, params.q()) != pairing(params.p(), &self.x_q) {
            warn!("initiator commitments are inconsistent");
            return Err(AkeError::InconsistentCommitment);
        }

        Ok(())
    }
}

/// Second message, responder to initiator: `yQ`, a signature of knowledge of `y` over the session
/// context and the responder's first transcript signature `σY1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponderCommitment {
    #[serde(with = "canonical")]
    y_q: G2,

    proof: SignatureOfKnowledge,

    signature: Signature,
}

impl ResponderCommitment {
    pub(crate) fn new(y_q: G2, proof: SignatureOfKnowledge, signature: Signature) -> Self {
        Self {
            y_q,
            proof,
            signature,
        }
    }

    pub fn y_q(&self) -> &G2 {
        &self.y_q
    }

    pub fn proof(&self) -> &SignatureOfKnowledge {
        &self.proof
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Checks the signature of knowledge of `y` and `σY1` over the commitments of both sides.
    pub fn verify(
        &self,
        params: &PairingParams,
        context: &SessionContext,
        commitment: &InitiatorCommitment,
        responder_key: &PublicKey,
    ) -> AkeResult<()> {
        if !self.proof.verify(params, &self.y_q, context.as_bytes()) {
            warn!(step = %Step::ResponderCommitment, "invalid signature of knowledge");
            return Err(AkeError::InvalidProof(Step::ResponderCommitment));
        }

        let transcript = TranscriptBytes::commitments(context, commitment, &self.y_q, &self.proof);
        verify_signature(
            responder_key,
            transcript.as_bytes(),
            &self.signature,
            Step::ResponderCommitment,
        )
    }
}

/// Third message, initiator to responder: `σX` over the transcript including `σY1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiatorConfirmation {
    signature: Signature,
}

impl InitiatorConfirmation {
    pub(crate) fn new(signature: Signature) -> Self {
        Self { signature }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn verify(
        &self,
        context: &SessionContext,
        commitment: &InitiatorCommitment,
        response: &ResponderCommitment,
        initiator_key: &PublicKey,
    ) -> AkeResult<()> {
        let transcript =
            TranscriptBytes::commitments(context, commitment, response.y_q(), response.proof())
                .with_signature(response.signature());
        verify_signature(
            initiator_key,
            transcript.as_bytes(),
            &self.signature,
            Step::InitiatorConfirmation,
        )
    }
}

/// Closing message of the responder: `σY2` over the transcript including `σX`. Goes to the
/// initiator and to the operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponderConfirmation {
    signature: Signature,
}

impl ResponderConfirmation {
    pub(crate) fn new(signature: Signature) -> Self {
        Self { signature }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn verify(
        &self,
        context: &SessionContext,
        commitment: &InitiatorCommitment,
        response: &ResponderCommitment,
        confirmation: &InitiatorConfirmation,
        responder_key: &PublicKey,
    ) -> AkeResult<()> {
        let transcript =
            TranscriptBytes::commitments(context, commitment, response.y_q(), response.proof())
                .with_signature(response.signature())
                .with_signature(confirmation.signature());
        verify_signature(
            responder_key,
            transcript.as_bytes(),
            &self.signature,
            Step::ResponderConfirmation,
        )
    }
}

#[cfg(test)]
mod tests {
    use ark_ec::{AffineRepr, CurveGroup};
    use assert_matches::assert_matches;
    use like_core::PartyId;

    use crate::ake::{AkeError, Initiator, Step};
    use crate::crypto::{Rng, SecretScalar};
    use crate::proofs::SignatureOfKnowledge;
    use crate::session::SessionContext;
    use crate::test_utils::{Handshake, SessionSetup};

    use super::InitiatorCommitment;

    #[test]
    fn mix_and_match_commitments() {
        let setup = SessionSetup::new(1, [1; 32]);
        let rng = Rng::from_seed([10; 32]);

        let (_, commitment) =
            Initiator::start(&setup.params, setup.context.clone(), &setup.escrow, &rng).unwrap();
        commitment.verify(&setup.params, &setup.context).unwrap();

        // Replace xP by a point with another exponent. The signature of knowledge only covers
        // xQ and still verifies, the pairing check catches it.
        let other = SecretScalar::random(&rng).unwrap();
        let forged = InitiatorCommitment::new(
            (*setup.params.p() * other.as_scalar()).into_affine(),
            *commitment.x_q(),
            commitment.proof().clone(),
        );
        assert_matches!(
            forged.verify(&setup.params, &setup.context),
            Err(AkeError::InconsistentCommitment)
        );

        // Replace xQ consistently with xP but keep the old signature of knowledge.
        let forged = InitiatorCommitment::new(
            (commitment.x_p().into_group() + setup.params.p()).into_affine(),
            (commitment.x_q().into_group() + setup.params.q()).into_affine(),
            commitment.proof().clone(),
        );
        assert_matches!(
            forged.verify(&setup.params, &setup.context),
            Err(AkeError::InvalidProof(Step::InitiatorCommitment))
        );

        // A fresh signature of knowledge for a consistent pair with an unknown exponent can not
        // be made, signing with another secret fails as well.
        let forged_proof = SignatureOfKnowledge::sign(
            &setup.params,
            &other,
            forged.x_q(),
            setup.context.as_bytes(),
            &rng,
        )
        .unwrap();
        let forged = InitiatorCommitment::new(*forged.x_p(), *forged.x_q(), forged_proof);
        assert_matches!(
            forged.verify(&setup.params, &setup.context),
            Err(AkeError::InvalidProof(Step::InitiatorCommitment))
        );
    }

    #[test]
    fn bound_to_session_context() {
        let setup = SessionSetup::new(2, [2; 32]);
        let handshake = Handshake::run(&setup);

        // Same parties but a different responder.
        let other_context = SessionContext::new(
            PartyId::from_bytes([0xaa; 16]),
            PartyId::from_bytes([0xcc; 16]),
            &setup.escrow,
        );
        assert_matches!(
            handshake.commitment.verify(&setup.params, &other_context),
            Err(AkeError::InvalidProof(Step::InitiatorCommitment))
        );
        assert_matches!(
            handshake.response.verify(
                &setup.params,
                &other_context,
                &handshake.commitment,
                &setup.bob_key.public_key(),
            ),
            Err(AkeError::InvalidProof(Step::ResponderCommitment))
        );
    }

    #[test]
    fn chained_signatures() {
        let setup = SessionSetup::new(1, [3; 32]);
        let handshake = Handshake::run(&setup);
        let alice = setup.alice_key.public_key();
        let bob = setup.bob_key.public_key();

        handshake
            .response
            .verify(&setup.params, &setup.context, &handshake.commitment, &bob)
            .unwrap();
        handshake
            .confirmation
            .verify(
                &setup.context,
                &handshake.commitment,
                &handshake.response,
                &alice,
            )
            .unwrap();
        handshake
            .closing
            .verify(
                &setup.context,
                &handshake.commitment,
                &handshake.response,
                &handshake.confirmation,
                &bob,
            )
            .unwrap();

        // Signed by the wrong party.
        assert_matches!(
            handshake.confirmation.verify(
                &setup.context,
                &handshake.commitment,
                &handshake.response,
                &bob,
            ),
            Err(AkeError::InvalidSignature(Step::InitiatorConfirmation))
        );

        // Closing signature presented as the initiator's confirmation.
        let misplaced = super::InitiatorConfirmation::new(*handshake.closing.signature());
        assert_matches!(
            misplaced.verify(
                &setup.context,
                &handshake.commitment,
                &handshake.response,
                &alice,
            ),
            Err(AkeError::InvalidSignature(Step::InitiatorConfirmation))
        );
    }
}
