// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session context ("omega") binding proofs and signatures of a handshake to its party set.
use like_core::{PARTY_ID_LEN, PartyId};

use crate::crypto::EncodingError;
use crate::escrow::EscrowPublicKey;

/// Ordered concatenation of all party identifiers of a session: initiator, responder and every
/// escrow authority in the order of the escrow key.
///
/// Every signature of knowledge and transcript signature of a handshake covers these bytes, so
/// nothing produced in one session verifies in a session with a different party set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionContext(Vec<u8>);

impl SessionContext {
    pub fn new(initiator: PartyId, responder: PartyId, escrow: &EscrowPublicKey) -> Self {
        Self::from_parties(initiator, responder, &escrow.authority_ids())
    }

    pub(crate) fn from_parties(
        initiator: PartyId,
        responder: PartyId,
        authorities: &[PartyId],
    ) -> Self {
        let mut bytes = Vec::with_capacity(PARTY_ID_LEN * (authorities.len() + 2));
        bytes.extend_from_slice(initiator.as_bytes());
        bytes.extend_from_slice(responder.as_bytes());
        for authority in authorities {
            bytes.extend_from_slice(authority.as_bytes());
        }
        Self(bytes)
    }

    /// Parses a context, for example from the head of a sealed transcript.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        if bytes.len() < PARTY_ID_LEN * 3 || bytes.len() % PARTY_ID_LEN != 0 {
            return Err(EncodingError::InvalidContext(bytes.len()));
        }
        Ok(Self(bytes.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// All parties in order: initiator, responder, authorities.
    pub fn parties(&self) -> Vec<PartyId> {
        self.0
            .chunks_exact(PARTY_ID_LEN)
            .map(|chunk| {
                let mut id = [0u8; PARTY_ID_LEN];
                id.copy_from_slice(chunk);
                PartyId::from_bytes(id)
            })
            .collect()
    }

    pub fn initiator(&self) -> PartyId {
        self.party(0)
    }

    pub fn responder(&self) -> PartyId {
        self.party(1)
    }

    pub fn authorities(&self) -> Vec<PartyId> {
        self.parties().split_off(2)
    }

    /// Returns true if this context lists exactly the authorities of `escrow`, in the same order.
    pub fn matches(&self, escrow: &EscrowPublicKey) -> bool {
        self.authorities() == escrow.authority_ids()
    }

    fn party(&self, index: usize) -> PartyId {
        let mut id = [0u8; PARTY_ID_LEN];
        id.copy_from_slice(&self.0[index * PARTY_ID_LEN..(index + 1) * PARTY_ID_LEN]);
        PartyId::from_bytes(id)
    }
}
