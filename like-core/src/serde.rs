// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use serde_bytes::{ByteBuf as SerdeByteBuf, Bytes as SerdeBytes};

use crate::identity::{IdentityError, PublicKey, Signature};
use crate::party::PartyId;

/// Serializes bytes as a hex string for human readable formats (JSON) and as raw bytes for
/// binary formats (CBOR).
pub fn serialize_hex<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if serializer.is_human_readable() {
        hex::serde::serialize(value, serializer)
    } else {
        SerdeBytes::new(value).serialize(serializer)
    }
}

/// Counterpart of [`serialize_hex`].
pub fn deserialize_hex<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    if deserializer.is_human_readable() {
        hex::serde::deserialize(deserializer)
    } else {
        let bytes = <SerdeByteBuf>::deserialize(deserializer)?;
        Ok(bytes.into_vec())
    }
}

/// Byte-string serde for fixed-size identity types, hex in human-readable formats.
macro_rules! bytes_serde {
    ($type:ty, $to_bytes:expr) => {
        impl Serialize for $type {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let to_bytes = $to_bytes;
                serialize_hex(&to_bytes(self), serializer)
            }
        }

        impl<'de> Deserialize<'de> for $type {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let bytes = deserialize_hex(deserializer)?;
                <$type>::try_from(bytes.as_slice())
                    .map_err(|err: IdentityError| serde::de::Error::custom(err.to_string()))
            }
        }
    };
}

bytes_serde!(PublicKey, |key: &PublicKey| *key.as_bytes());
bytes_serde!(Signature, |signature: &Signature| signature.to_bytes());
bytes_serde!(PartyId, |id: &PartyId| *id.as_bytes());
