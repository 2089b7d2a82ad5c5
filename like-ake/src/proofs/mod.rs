// SPDX-License-Identifier: MIT OR Apache-2.0

//! Non-interactive zero-knowledge proofs (Fiat-Shamir transformed sigma protocols).
//!
//! All constructions follow the same pattern: sample a fresh nonce `r`, commit to it in the
//! relevant group(s), derive the challenge `e` by hashing the canonical encodings of the
//! commitments, base points and public values (plus a message for signatures of knowledge), and
//! answer with `d = e·secret + r`.
//!
//! Verifiers are pure functions returning `bool`. Turning a failed check into an error is up to
//! the protocol layer which knows which step failed.
mod equality;
mod knowledge;
mod sok;

pub use equality::{EqualityProof, PairingEqualityProof};
pub use knowledge::KnowledgeProof;
pub use sok::SignatureOfKnowledge;
