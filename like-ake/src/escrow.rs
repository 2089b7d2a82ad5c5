// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escrow authorities and the aggregate escrow public key.
//!
//! Every authority holds a secret `l_i` and publishes `L_i = l_i·P` together with a proof of
//! knowledge of `l_i`. The handshake keys sessions to the aggregate `L = Σ L_i`, so recovering a
//! session key needs a trapdoor share from every single authority.
use std::collections::HashSet;

use ark_bls12_381::G1Projective;
use ark_ec::CurveGroup;
use ark_ff::Zero;
use like_core::PartyId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::crypto::pairing::{G1, PairingParams, canonical};
use crate::crypto::{Rng, RngError, SecretScalar};
use crate::proofs::KnowledgeProof;

/// Escrow authority with its secret key.
#[derive(Debug)]
pub struct EscrowAuthority {
    id: PartyId,
    secret: SecretScalar,
    public: AuthorityKey,
}

impl EscrowAuthority {
    /// Generates a fresh escrow key and a self-certifying proof of knowledge for it.
    pub fn generate(id: PartyId, params: &PairingParams, rng: &Rng) -> EscrowResult<Self> {
        let secret = SecretScalar::random(rng)?;
        let public_key = (*params.p() * secret.as_scalar()).into_affine();
        let proof = KnowledgeProof::prove(params, &secret, &public_key, rng)?;
        debug!(authority = %id, "generated escrow key");
        Ok(Self {
            id,
            secret,
            public: AuthorityKey {
                id,
                public_key,
                proof,
            },
        })
    }

    pub fn id(&self) -> PartyId {
        self.id
    }

    /// Public part of this authority, to be published to everyone who builds the aggregate key.
    pub fn public(&self) -> &AuthorityKey {
        &self.public
    }

    pub(crate) fn secret(&self) -> &SecretScalar {
        &self.secret
    }
}

/// Published public key of an escrow authority with the proof that the authority knows its
/// secret.
///
/// A key received from someone else is untrusted until [`EscrowPublicKey::aggregate`] accepted
/// it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityKey {
    id: PartyId,

    #[serde(with = "canonical")]
    public_key: G1,

    proof: KnowledgeProof,
}

impl AuthorityKey {
    pub fn id(&self) -> PartyId {
        self.id
    }

    pub fn public_key(&self) -> &G1 {
        &self.public_key
    }

    pub fn proof(&self) -> &KnowledgeProof {
        &self.proof
    }

    /// Checks the self-certifying proof of knowledge.
    pub fn verify(&self, params: &PairingParams) -> bool {
        self.proof.verify(params, &self.public_key)
    }
}

/// Aggregate escrow public key `L = Σ L_i`.
///
/// Can only be constructed from authority keys whose proofs all verified. Keeps the ordered list
/// of authorities it was built from; that order is the order authorities appear in the session
/// context and in which trapdoor shares are expected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EscrowPublicKey {
    authorities: Vec<AuthorityKey>,
    aggregate: G1,
}

impl EscrowPublicKey {
    /// Verifies every authority's proof and sums up their public keys.
    ///
    /// A single invalid proof aborts the whole setup; there is no way to continue with the
    /// remaining authorities.
    pub fn aggregate(params: &PairingParams, authorities: &[AuthorityKey]) -> EscrowResult<Self> {
        if authorities.is_empty() {
            return Err(EscrowError::EmptyAuthoritySet);
        }

        let mut seen = HashSet::with_capacity(authorities.len());
        for authority in authorities {
            if !seen.insert(authority.id) {
                return Err(EscrowError::DuplicateAuthority(authority.id));
            }
        }

        for authority in authorities {
            if !authority.verify(params) {
                warn!(authority = %authority.id, "invalid escrow key proof");
                return Err(EscrowError::InvalidAuthorityProof(authority.id));
            }
        }

        let aggregate = authorities
            .iter()
            .fold(G1Projective::zero(), |sum, authority| {
                sum + authority.public_key
            })
            .into_affine();

        debug!(authorities = authorities.len(), "aggregated escrow public key");

        Ok(Self {
            authorities: authorities.to_vec(),
            aggregate,
        })
    }

    pub fn public_key(&self) -> &G1 {
        &self.aggregate
    }

    pub fn authorities(&self) -> &[AuthorityKey] {
        &self.authorities
    }

    /// Identifiers of all authorities, in order.
    pub fn authority_ids(&self) -> Vec<PartyId> {
        self.authorities.iter().map(AuthorityKey::id).collect()
    }

    pub fn len(&self) -> usize {
        self.authorities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authorities.is_empty()
    }
}

pub type EscrowResult<T> = Result<T, EscrowError>;

#[derive(Debug, Error)]
pub enum EscrowError {
    #[error(transparent)]
    Rng(#[from] RngError),

    #[error("proof of escrow key of authority {0} is invalid")]
    InvalidAuthorityProof(PartyId),

    #[error("escrow needs at least one authority")]
    EmptyAuthoritySet,

    #[error("authority {0} is listed more than once")]
    DuplicateAuthority(PartyId),
}
