// SPDX-License-Identifier: MIT OR Apache-2.0

//! `like-core` holds the long-lived identity material every participant of an accountable
//! key-exchange carries around: an Ed25519 signing key, the matching public key and signatures,
//! and the opaque 16-byte identifier the protocol uses to name a party.
//!
//! Initiators, responders and the operator sign handshake transcripts with these keys, escrow
//! authorities are addressed through their [`PartyId`]. None of the types here know anything
//! about the key-exchange itself, see `like-ake` for the protocol.
//!
//! ## Example
//!
//! ```
//! use like_core::{PartyId, PrivateKey};
//!
//! let private_key = PrivateKey::new();
//! let public_key = private_key.public_key();
//!
//! let signature = private_key.sign(b"transcript");
//! assert!(public_key.verify(b"transcript", &signature));
//!
//! let id = PartyId::from_bytes([7; 16]);
//! assert_eq!(id.as_bytes().len(), 16);
//! ```
pub mod identity;
pub mod party;
mod serde;

pub use identity::{
    IdentityError, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN, PrivateKey, PublicKey, SIGNATURE_LEN,
    Signature,
};
pub use party::{PARTY_ID_LEN, PartyId};
pub use crate::serde::{deserialize_hex, serialize_hex};
