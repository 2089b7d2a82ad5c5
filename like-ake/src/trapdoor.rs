// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trapdoor generation and opening (n-of-n).
//!
//! To open a session, every authority `i` computes `p = e(xP, yQ)` from the sealed transcript
//! and publishes its share `t_i = p^(l_i)` with a proof that `t_i` uses the same `l_i` as its
//! escrow public key. The product of all shares is `e(P, Q)^(x·y·Σl_i)`, the session key.
//!
//! Shares are only combined after every proof checked out; a missing or corrupted share never
//! yields a partially correct key.
use ark_ff::Zero;
use like_core::{PartyId, PublicKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::ake::{SessionKey, SessionSealingToken, TokenError};
use crate::crypto::pairing::{G1, G2, Gt, PairingParams, canonical, pairing};
use crate::crypto::{Rng, RngError};
use crate::escrow::{EscrowAuthority, EscrowPublicKey};
use crate::proofs::PairingEqualityProof;

/// Partial session key of one escrow authority with its proof of correctness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapdoorShare {
    authority: PartyId,

    #[serde(with = "canonical")]
    share: Gt,

    proof: PairingEqualityProof,
}

impl TrapdoorShare {
    pub fn authority(&self) -> PartyId {
        self.authority
    }

    pub fn share(&self) -> &Gt {
        &self.share
    }

    pub fn proof(&self) -> &PairingEqualityProof {
        &self.proof
    }
}

impl EscrowAuthority {
    /// Computes this authority's trapdoor share for the session with commitments `xP` and `yQ`.
    pub fn trapdoor_share(
        &self,
        params: &PairingParams,
        x_p: &G1,
        y_q: &G2,
        rng: &Rng,
    ) -> TrapdoorResult<TrapdoorShare> {
        self.share_for(params, &pairing(x_p, y_q), rng)
    }

    fn share_for(
        &self,
        params: &PairingParams,
        base: &Gt,
        rng: &Rng,
    ) -> TrapdoorResult<TrapdoorShare> {
        let share = *base * self.secret().as_scalar();
        let proof = PairingEqualityProof::prove(
            params,
            self.secret(),
            self.public().public_key(),
            base,
            &share,
            rng,
        )?;
        debug!(authority = %self.id(), "generated trapdoor share");
        Ok(TrapdoorShare {
            authority: self.id(),
            share,
            proof,
        })
    }
}

/// Computes the trapdoor shares of several authorities, pairing `xP` and `yQ` only once.
pub fn generate_shares(
    params: &PairingParams,
    authorities: &[EscrowAuthority],
    x_p: &G1,
    y_q: &G2,
    rng: &Rng,
) -> TrapdoorResult<Vec<TrapdoorShare>> {
    let base = pairing(x_p, y_q);
    authorities
        .iter()
        .map(|authority| authority.share_for(params, &base, rng))
        .collect()
}

/// Trapdoor shares of all authorities of an escrow key, each with a valid proof.
///
/// Only [`verify_shares`] creates this, so [`open`] can not be called on unchecked shares.
#[derive(Clone, Debug)]
pub struct VerifiedShares {
    shares: Vec<Gt>,
}

impl VerifiedShares {
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Checks one share per authority of `escrow`, given in the escrow key's order.
///
/// Any missing, misplaced, foreign or invalid share rejects the whole set.
pub fn verify_shares(
    params: &PairingParams,
    escrow: &EscrowPublicKey,
    x_p: &G1,
    y_q: &G2,
    shares: &[TrapdoorShare],
) -> TrapdoorResult<VerifiedShares> {
    let authorities = escrow.authorities();

    for (authority, share) in authorities.iter().zip(shares) {
        if share.authority != authority.id() {
            return Err(misplaced(escrow, share.authority));
        }
    }

    if shares.len() < authorities.len() {
        return Err(TrapdoorError::MissingShares(authorities.len(), shares.len()));
    }

    if let Some(extra) = shares.get(authorities.len()) {
        return Err(misplaced(escrow, extra.authority));
    }

    let base = pairing(x_p, y_q);
    for (authority, share) in authorities.iter().zip(shares) {
        if !share
            .proof
            .verify(params, authority.public_key(), &base, &share.share)
        {
            warn!(authority = %share.authority, "invalid trapdoor share proof");
            return Err(TrapdoorError::InvalidShareProof(share.authority));
        }
    }

    debug!(shares = shares.len(), "verified trapdoor shares");

    Ok(VerifiedShares {
        shares: shares.iter().map(|share| share.share).collect(),
    })
}

fn misplaced(escrow: &EscrowPublicKey, authority: PartyId) -> TrapdoorError {
    if escrow.authority_ids().contains(&authority) {
        TrapdoorError::ShareMismatch(authority)
    } else {
        TrapdoorError::UnknownAuthority(authority)
    }
}

/// Recovers the session key as the product of all verified shares.
pub fn open(shares: &VerifiedShares) -> SessionKey {
    SessionKey::from_gt(&combine_shares(&shares.shares))
}

// GT is written additively in arkworks, so the product of shares is their sum.
pub(crate) fn combine_shares(shares: &[Gt]) -> Gt {
    shares.iter().fold(Gt::zero(), |product, share| product + share)
}

/// Opens a sealed session: checks the operator's seal, takes `xP` and `yQ` from the sealed
/// transcript, verifies all shares and combines them.
pub fn open_token(
    params: &PairingParams,
    escrow: &EscrowPublicKey,
    operator_key: &PublicKey,
    token: &SessionSealingToken,
    shares: &[TrapdoorShare],
) -> TrapdoorResult<SessionKey> {
    token.verify(operator_key)?;
    let transcript = token.transcript()?;

    if !transcript.context().matches(escrow) {
        warn!("sealed session was escrowed to other authorities");
        return Err(TrapdoorError::ContextMismatch);
    }

    let verified = verify_shares(params, escrow, transcript.x_p(), transcript.y_q(), shares)?;
    Ok(open(&verified))
}

pub type TrapdoorResult<T> = Result<T, TrapdoorError>;

#[derive(Debug, Error)]
pub enum TrapdoorError {
    #[error(transparent)]
    Rng(#[from] RngError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("trapdoor share proof of authority {0} is invalid")]
    InvalidShareProof(PartyId),

    #[error("trapdoor share of authority {0} is not at its expected position")]
    ShareMismatch(PartyId),

    #[error("trapdoor share from unknown authority {0}")]
    UnknownAuthority(PartyId),

    #[error("expected {0} trapdoor shares, got {1}")]
    MissingShares(usize, usize),

    #[error("sealed session lists other authorities than the escrow key")]
    ContextMismatch,
}
