// SPDX-License-Identifier: MIT OR Apache-2.0

use ark_ec::CurveGroup;
use serde::{Deserialize, Serialize};

use crate::crypto::pairing::{G1, G2, Gt, PairingParams, Scalar, canonical};
use crate::crypto::pairing::{g1_bytes, g2_bytes, gt_bytes};
use crate::crypto::sha2::hash_to_scalar;
use crate::crypto::{Rng, RngError, SecretScalar};

/// Proof that the same secret `x` underlies `xP` in G1 and `xQ` in G2.
///
/// One nonce `r` is committed in both groups (`Rho = rP`, `Sigma = rQ`) and answered with a
/// single response, so the two discrete logarithms can not differ.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualityProof {
    #[serde(with = "canonical")]
    rho: G1,

    #[serde(with = "canonical")]
    sigma: G2,

    #[serde(with = "canonical")]
    d: Scalar,
}

impl EqualityProof {
    pub fn prove(
        params: &PairingParams,
        secret: &SecretScalar,
        g1_public: &G1,
        g2_public: &G2,
        rng: &Rng,
    ) -> Result<Self, RngError> {
        let r = SecretScalar::random(rng)?;
        let rho = (*params.p() * r.as_scalar()).into_affine();
        let sigma = (*params.q() * r.as_scalar()).into_affine();
        let e = Self::challenge(params, &rho, &sigma, g1_public, g2_public);
        let d = e * secret.as_scalar() + r.as_scalar();
        Ok(Self { rho, sigma, d })
    }

    /// Checks `d·P == e·xP + Rho` and `d·Q == e·xQ + Sigma`.
    pub fn verify(&self, params: &PairingParams, g1_public: &G1, g2_public: &G2) -> bool {
        let e = Self::challenge(params, &self.rho, &self.sigma, g1_public, g2_public);
        *params.p() * self.d == *g1_public * e + self.rho
            && *params.q() * self.d == *g2_public * e + self.sigma
    }

    fn challenge(params: &PairingParams, rho: &G1, sigma: &G2, g1: &G1, g2: &G2) -> Scalar {
        hash_to_scalar(&[
            &g1_bytes(rho),
            &g2_bytes(sigma),
            &g1_bytes(params.p()),
            &g2_bytes(params.q()),
            &g1_bytes(g1),
            &g2_bytes(g2),
        ])
    }
}

/// Proof that the same secret `l` underlies a G1 public key `lP` and a target group value
/// `base^l`, where `base` is a pairing value chosen by the caller.
///
/// Escrow authorities use it to show that their trapdoor share was computed with their escrow
/// key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingEqualityProof {
    #[serde(with = "canonical")]
    rho: G1,

    #[serde(with = "canonical")]
    sigma: Gt,

    #[serde(with = "canonical")]
    d: Scalar,
}

impl PairingEqualityProof {
    pub fn prove(
        params: &PairingParams,
        secret: &SecretScalar,
        public_key: &G1,
        base: &Gt,
        value: &Gt,
        rng: &Rng,
    ) -> Result<Self, RngError> {
        let r = SecretScalar::random(rng)?;
        let rho = (*params.p() * r.as_scalar()).into_affine();
        let sigma = *base * r.as_scalar();
        let e = Self::challenge(params, &rho, &sigma, base, public_key, value);
        let d = e * secret.as_scalar() + r.as_scalar();
        Ok(Self { rho, sigma, d })
    }

    /// Checks `d·P == e·lP + Rho` and `base^d == value^e · Sigma`.
    pub fn verify(&self, params: &PairingParams, public_key: &G1, base: &Gt, value: &Gt) -> bool {
        let e = Self::challenge(params, &self.rho, &self.sigma, base, public_key, value);
        *params.p() * self.d == *public_key * e + self.rho
            && *base * self.d == *value * e + self.sigma
    }

    fn challenge(
        params: &PairingParams,
        rho: &G1,
        sigma: &Gt,
        base: &Gt,
        public_key: &G1,
        value: &Gt,
    ) -> Scalar {
        hash_to_scalar(&[
            &g1_bytes(rho),
            &gt_bytes(sigma),
            &g1_bytes(params.p()),
            &gt_bytes(base),
            &g1_bytes(public_key),
            &gt_bytes(value),
        ])
    }
}
