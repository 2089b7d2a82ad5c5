// SPDX-License-Identifier: MIT OR Apache-2.0

use ark_ec::CurveGroup;
use serde::{Deserialize, Serialize};

use crate::crypto::pairing::{G2, G2_SIZE, PairingParams, SCALAR_SIZE, Scalar, canonical};
use crate::crypto::pairing::{g2_bytes, scalar_bytes};
use crate::crypto::sha2::hash_to_scalar;
use crate::crypto::{Rng, RngError, SecretScalar};

/// Signature of knowledge: a proof of knowledge of `x` behind `xQ` in G2 whose challenge also
/// commits to a message.
///
/// The handshake signs the session context with it, so a proof made for one set of parties does
/// not verify for another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureOfKnowledge {
    #[serde(with = "canonical")]
    rho: G2,

    #[serde(with = "canonical")]
    d: Scalar,
}

impl SignatureOfKnowledge {
    pub const SIZE: usize = G2_SIZE + SCALAR_SIZE;

    pub fn sign(
        params: &PairingParams,
        secret: &SecretScalar,
        public: &G2,
        message: &[u8],
        rng: &Rng,
    ) -> Result<Self, RngError> {
        let r = SecretScalar::random(rng)?;
        let rho = (*params.q() * r.as_scalar()).into_affine();
        let e = Self::challenge(params, &rho, public, message);
        let d = e * secret.as_scalar() + r.as_scalar();
        Ok(Self { rho, d })
    }

    /// Checks `d·Q == e·xQ + Rho` with the challenge recomputed over `message`.
    pub fn verify(&self, params: &PairingParams, public: &G2, message: &[u8]) -> bool {
        let e = Self::challenge(params, &self.rho, public, message);
        *params.q() * self.d == *public * e + self.rho
    }

    /// Canonical encoding `Rho ∥ d`.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..G2_SIZE].copy_from_slice(&g2_bytes(&self.rho));
        out[G2_SIZE..].copy_from_slice(&scalar_bytes(&self.d));
        out
    }

    pub(crate) fn from_parts(rho: G2, d: Scalar) -> Self {
        Self { rho, d }
    }

    fn challenge(params: &PairingParams, rho: &G2, public: &G2, message: &[u8]) -> Scalar {
        hash_to_scalar(&[
            &g2_bytes(rho),
            &g2_bytes(params.q()),
            &g2_bytes(public),
            message,
        ])
    }
}

#[cfg(test)]
mod tests {
    use ark_ec::CurveGroup;

    use crate::crypto::pairing::{G2, PairingParams};
    use crate::crypto::{Rng, SecretScalar};

    use super::SignatureOfKnowledge;

    fn keypair(params: &PairingParams, rng: &Rng) -> (SecretScalar, G2) {
        let secret = SecretScalar::random(rng).unwrap();
        let public = (*params.q() * secret.as_scalar()).into_affine();
        (secret, public)
    }

    #[test]
    fn bound_to_message() {
        let rng = Rng::from_seed([1; 32]);
        let params = PairingParams::new();
        let (secret, public) = keypair(&params, &rng);

        let omega_1 = [[1u8; 16], [2u8; 16], [3u8; 16]].concat();
        let omega_2 = [[1u8; 16], [2u8; 16], [4u8; 16]].concat();

        let signature =
            SignatureOfKnowledge::sign(&params, &secret, &public, &omega_1, &rng).unwrap();
        assert!(signature.verify(&params, &public, &omega_1));

        // The same secret and public value, but a different party set.
        assert!(!signature.verify(&params, &public, &omega_2));
        assert!(!signature.verify(&params, &public, b""));
    }

    #[test]
    fn wrong_public_value() {
        let rng = Rng::from_seed([2; 32]);
        let params = PairingParams::new();
        let (secret, public) = keypair(&params, &rng);
        let (_, other_public) = keypair(&params, &rng);

        let signature = SignatureOfKnowledge::sign(&params, &secret, &public, b"m", &rng).unwrap();
        assert!(!signature.verify(&params, &other_public, b"m"));

        let signature =
            SignatureOfKnowledge::sign(&params, &secret, &other_public, b"m", &rng).unwrap();
        assert!(!signature.verify(&params, &other_public, b"m"));
    }

    #[test]
    fn canonical_encoding() {
        let rng = Rng::from_seed([3; 32]);
        let params = PairingParams::new();
        let (secret, public) = keypair(&params, &rng);
        let signature = SignatureOfKnowledge::sign(&params, &secret, &public, b"m", &rng).unwrap();

        let bytes = signature.to_bytes();
        assert_eq!(bytes.len(), 128);
        let rho = crate::crypto::pairing::g2_from_bytes(&bytes[..96]).unwrap();
        let d = crate::crypto::pairing::scalar_from_bytes(&bytes[96..]).unwrap();
        assert_eq!(SignatureOfKnowledge::from_parts(rho, d), signature);
    }
}
