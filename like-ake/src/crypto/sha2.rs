// SPDX-License-Identifier: MIT OR Apache-2.0

//! SHA2 hashing and Fiat-Shamir challenge derivation.
use ark_ff::PrimeField;
use sha2::{Digest, Sha256};

use crate::crypto::pairing::Scalar;

pub const SHA256_DIGEST_SIZE: usize = 32;

/// SHA2-256 hashing function.
pub fn sha2_256(messages: &[&[u8]]) -> [u8; SHA256_DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    for message in messages {
        hasher.update(message);
    }
    hasher.finalize().into()
}

/// Hashes the concatenation of `messages` and reads the digest as a big-endian integer reduced
/// modulo the group order.
pub fn hash_to_scalar(messages: &[&[u8]]) -> Scalar {
    Scalar::from_be_bytes_mod_order(&sha2_256(messages))
}
