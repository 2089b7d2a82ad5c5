// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::identity::IdentityError;

/// Size of a party identifier in bytes.
pub const PARTY_ID_LEN: usize = 16;

/// Opaque, fixed-length identifier of a protocol participant (initiator, responder or escrow
/// authority).
///
/// How identifiers are allocated is up to the application, UUIDs fit well.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartyId([u8; PARTY_ID_LEN]);

impl PartyId {
    pub const fn from_bytes(bytes: [u8; PARTY_ID_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PARTY_ID_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; PARTY_ID_LEN]> for PartyId {
    fn from(value: [u8; PARTY_ID_LEN]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for PartyId {
    type Error = IdentityError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let checked: [u8; PARTY_ID_LEN] = value
            .try_into()
            .map_err(|_| IdentityError::InvalidLength(value.len(), PARTY_ID_LEN))?;
        Ok(Self(checked))
    }
}

impl FromStr for PartyId {
    type Err = IdentityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(hex::decode(value)?.as_slice())
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PartyId").field(&self.to_hex()).finish()
    }
}
