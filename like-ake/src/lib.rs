// SPDX-License-Identifier: MIT OR Apache-2.0

//! `like-ake` is an accountable authenticated key-exchange with key escrow over the BLS12-381
//! pairing groups.
//!
//! Two parties, an initiator and a responder, establish a shared session key while an operator
//! notarises the handshake. At the end the operator hands out a [`SessionSealingToken`]: the
//! canonical transcript of the handshake signed by the operator. Any auditor can check from the
//! token alone that this exact handshake took place between these parties.
//!
//! Session keys are escrowed towards a set of escrow authorities. Every authority holds a share
//! of the escrow secret; only all of them together can open a sealed session and recover its key,
//! see [`trapdoor`]. No single authority, and not the operator, learns anything about a session
//! key.
//!
//! All proofs are non-interactive (Fiat-Shamir) and bound to the [`SessionContext`], the list of
//! every party taking part in a session. Parties authenticate with long-lived Ed25519 keys from
//! `like-core`.
//!
//! ## Example
//!
//! ```
//! use like_ake::{
//!     EscrowAuthority, EscrowPublicKey, Initiator, Operator, PairingParams, Responder, Rng,
//!     SessionContext, trapdoor,
//! };
//! use like_core::{PartyId, PrivateKey};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = PairingParams::default();
//! let rng = Rng::default();
//!
//! // Two escrow authorities publish their keys.
//! let authorities = [
//!     EscrowAuthority::generate(PartyId::from_bytes([1; 16]), &params, &rng)?,
//!     EscrowAuthority::generate(PartyId::from_bytes([2; 16]), &params, &rng)?,
//! ];
//! let keys: Vec<_> = authorities.iter().map(|a| a.public().clone()).collect();
//! let escrow = EscrowPublicKey::aggregate(&params, &keys)?;
//!
//! let alice = PrivateKey::new();
//! let bob = PrivateKey::new();
//! let operator_key = PrivateKey::new();
//!
//! let context = SessionContext::new(
//!     PartyId::from_bytes([0xaa; 16]),
//!     PartyId::from_bytes([0xbb; 16]),
//!     &escrow,
//! );
//! let operator = Operator::init(context.clone(), alice.public_key(), bob.public_key());
//!
//! let (alice_state, commitment) = Initiator::start(&params, context.clone(), &escrow, &rng)?;
//! let operator = Operator::observe_commitment(operator, &params, &commitment)?;
//!
//! let (bob_state, response) =
//!     Responder::accept(&params, context, &escrow, &commitment, &bob, &rng)?;
//! let operator = Operator::observe_response(operator, &params, &response)?;
//!
//! let (alice_state, confirmation) =
//!     Initiator::confirm(alice_state, &params, &response, &alice, &bob.public_key())?;
//! let operator = Operator::observe_confirmation(operator, &confirmation)?;
//!
//! let (bob_key, closing) =
//!     Responder::finish(bob_state, &confirmation, &bob, &alice.public_key())?;
//! let alice_key = Initiator::finish(alice_state, &closing, &bob.public_key())?;
//! assert_eq!(alice_key, bob_key);
//!
//! let token = Operator::seal(operator, &closing, &operator_key)?;
//!
//! // Later, all authorities together open the sealed session.
//! let transcript = token.transcript()?;
//! let shares =
//!     trapdoor::generate_shares(&params, &authorities, transcript.x_p(), transcript.y_q(), &rng)?;
//! let opened =
//!     trapdoor::open_token(&params, &escrow, &operator_key.public_key(), &token, &shares)?;
//! assert_eq!(opened, alice_key);
//! # Ok(())
//! # }
//! ```
pub mod ake;
pub mod crypto;
pub mod escrow;
pub mod message;
pub mod proofs;
pub mod session;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
#[cfg(test)]
mod tests;
pub mod trapdoor;

pub use ake::{
    AkeError, Initiator, InitiatorCommitment, InitiatorConfirmation, Operator, Responder,
    ResponderCommitment, ResponderConfirmation, SessionKey, SessionSealingToken,
    SessionTranscript, Step, TokenError,
};
pub use crypto::{PairingParams, Rng, RngError};
pub use escrow::{AuthorityKey, EscrowAuthority, EscrowError, EscrowPublicKey};
pub use message::{DecodeError, EncodeError, Message};
pub use session::SessionContext;
pub use trapdoor::{TrapdoorError, TrapdoorShare, VerifiedShares};
