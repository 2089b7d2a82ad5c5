// SPDX-License-Identifier: MIT OR Apache-2.0

use ark_ec::CurveGroup;
use serde::{Deserialize, Serialize};

use crate::crypto::pairing::{G1, G1_SIZE, PairingParams, SCALAR_SIZE, Scalar, canonical};
use crate::crypto::pairing::{g1_bytes, scalar_bytes};
use crate::crypto::sha2::hash_to_scalar;
use crate::crypto::{Rng, RngError, SecretScalar};

/// Proof of knowledge of `x` behind a public value `xP` in G1.
///
/// Schnorr-style: `Rho = rP`, `e = H(Rho ∥ P ∥ xP)`, `d = e·x + r`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeProof {
    #[serde(with = "canonical")]
    rho: G1,

    #[serde(with = "canonical")]
    d: Scalar,
}

impl KnowledgeProof {
    pub const SIZE: usize = G1_SIZE + SCALAR_SIZE;

    pub fn prove(
        params: &PairingParams,
        secret: &SecretScalar,
        public: &G1,
        rng: &Rng,
    ) -> Result<Self, RngError> {
        let r = SecretScalar::random(rng)?;
        let rho = (*params.p() * r.as_scalar()).into_affine();
        let e = Self::challenge(params, &rho, public);
        let d = e * secret.as_scalar() + r.as_scalar();
        Ok(Self { rho, d })
    }

    /// Checks `d·P == e·xP + Rho`.
    pub fn verify(&self, params: &PairingParams, public: &G1) -> bool {
        let e = Self::challenge(params, &self.rho, public);
        *params.p() * self.d == *public * e + self.rho
    }

    /// Canonical encoding `Rho ∥ d`.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..G1_SIZE].copy_from_slice(&g1_bytes(&self.rho));
        out[G1_SIZE..].copy_from_slice(&scalar_bytes(&self.d));
        out
    }

    fn challenge(params: &PairingParams, rho: &G1, public: &G1) -> Scalar {
        hash_to_scalar(&[&g1_bytes(rho), &g1_bytes(params.p()), &g1_bytes(public)])
    }
}

#[cfg(test)]
mod tests {
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_ff::One;

    use crate::crypto::pairing::{G1, PairingParams, Scalar};
    use crate::crypto::{Rng, SecretScalar};

    use super::KnowledgeProof;

    fn keypair(params: &PairingParams, rng: &Rng) -> (SecretScalar, G1) {
        let secret = SecretScalar::random(rng).unwrap();
        let public = (*params.p() * secret.as_scalar()).into_affine();
        (secret, public)
    }

    #[test]
    fn prove_and_verify() {
        let rng = Rng::from_seed([1; 32]);
        let params = PairingParams::new();
        let (secret, public) = keypair(&params, &rng);

        let proof = KnowledgeProof::prove(&params, &secret, &public, &rng).unwrap();
        assert!(proof.verify(&params, &public));

        // Verification is a pure function of its inputs.
        assert!(proof.verify(&params, &public));
    }

    #[test]
    fn tampered_fields() {
        let rng = Rng::from_seed([2; 32]);
        let params = PairingParams::new();
        let (secret, public) = keypair(&params, &rng);
        let proof = KnowledgeProof::prove(&params, &secret, &public, &rng).unwrap();

        // Different public value.
        let (_, other_public) = keypair(&params, &rng);
        assert!(!proof.verify(&params, &other_public));

        // Shifted commitment.
        let mut tampered = proof.clone();
        tampered.rho = (tampered.rho + G1::generator()).into_affine();
        assert!(!tampered.verify(&params, &public));

        // Shifted response.
        let mut tampered = proof.clone();
        tampered.d += Scalar::one();
        assert!(!tampered.verify(&params, &public));
    }

    #[test]
    fn wrong_secret() {
        let rng = Rng::from_seed([3; 32]);
        let params = PairingParams::new();
        let (_, public) = keypair(&params, &rng);
        let (other_secret, _) = keypair(&params, &rng);

        let proof = KnowledgeProof::prove(&params, &other_secret, &public, &rng).unwrap();
        assert!(!proof.verify(&params, &public));
    }

    #[test]
    fn fresh_nonce_per_proof() {
        let rng = Rng::from_seed([4; 32]);
        let params = PairingParams::new();
        let (secret, public) = keypair(&params, &rng);

        let proof_1 = KnowledgeProof::prove(&params, &secret, &public, &rng).unwrap();
        let proof_2 = KnowledgeProof::prove(&params, &secret, &public, &rng).unwrap();
        assert_ne!(proof_1.to_bytes(), proof_2.to_bytes());
        assert_eq!(proof_1.to_bytes().len(), KnowledgeProof::SIZE);
    }
}
