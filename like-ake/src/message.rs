// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire encoding of handshake messages, authority keys, trapdoor shares and sealing tokens in
//! [CBOR].
//!
//! Group elements and signatures are embedded as CBOR byte strings in their canonical
//! compressed form. Decoding checks every element, so a decoded message never carries a point
//! off the curve or outside its prime-order subgroup.
//!
//! [CBOR]: https://cbor.io/
use ciborium::de::Error as DeserializeError;
use ciborium::ser::Error as SerializeError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::ake::{
    InitiatorCommitment, InitiatorConfirmation, ResponderCommitment, ResponderConfirmation,
    SessionSealingToken,
};
use crate::escrow::AuthorityKey;
use crate::trapdoor::TrapdoorShare;

/// Serializes a value into CBOR format.
pub fn encode_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(value, &mut bytes)?;
    Ok(bytes)
}

/// Deserializes a value which was formatted in CBOR.
pub fn decode_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let value = ciborium::from_reader::<T, _>(bytes)?;
    Ok(value)
}

/// Values which are exchanged between parties.
pub trait Message: Serialize + DeserializeOwned {
    fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        encode_cbor(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode_cbor(bytes)
    }
}

impl Message for InitiatorCommitment {}

impl Message for ResponderCommitment {}

impl Message for InitiatorConfirmation {}

impl Message for ResponderConfirmation {}

impl Message for SessionSealingToken {}

impl Message for AuthorityKey {}

impl Message for TrapdoorShare {}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("an error occurred while writing bytes: {0}")]
    Io(std::io::Error),

    #[error("an error occurred while serializing value: {0}")]
    Value(String),
}

impl From<SerializeError<std::io::Error>> for EncodeError {
    fn from(value: SerializeError<std::io::Error>) -> Self {
        match value {
            SerializeError::Io(err) => EncodeError::Io(err),
            SerializeError::Value(err) => EncodeError::Value(err),
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("an error occurred while reading bytes: {0}")]
    Io(std::io::Error),

    /// Contains the offset into the input where the syntax error occurred.
    #[error("an error occurred while parsing bytes at position {0}")]
    Syntax(usize),

    /// Invalid field or group element, with the offset of the item if known.
    #[error("an error occurred while processing a parsed value at position {0:?}: {1}")]
    Semantic(Option<usize>, String),

    #[error("recursion limit exceeded while decoding")]
    RecursionLimitExceeded,
}

impl From<DeserializeError<std::io::Error>> for DecodeError {
    fn from(value: DeserializeError<std::io::Error>) -> Self {
        match value {
            DeserializeError::Io(err) => DecodeError::Io(err),
            DeserializeError::Syntax(offset) => DecodeError::Syntax(offset),
            DeserializeError::Semantic(offset, description) => {
                DecodeError::Semantic(offset, description)
            }
            DeserializeError::RecursionLimitExceeded => DecodeError::RecursionLimitExceeded,
        }
    }
}
