// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cryptographic building blocks: randomness, hashing, secret scalars and the pairing groups.
pub mod pairing;
mod rng;
pub mod secret;
pub mod sha2;

pub use pairing::{
    EncodingError, G1, G1_SIZE, G2, G2_SIZE, GT_SIZE, Gt, PairingParams, ParamsError,
    SCALAR_SIZE, Scalar,
};
pub use rng::{Rng, RngError};
pub use secret::SecretScalar;
