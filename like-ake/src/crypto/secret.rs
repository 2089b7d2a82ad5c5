// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use ark_ff::{PrimeField, Zero};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::pairing::Scalar;
use crate::crypto::{Rng, RngError};

/// Number of random bytes reduced into one scalar. Twice the field size keeps the modular bias
/// negligible.
const WIDE_SCALAR_SIZE: usize = 64;

/// Secret exponent: an authority's escrow key, an ephemeral handshake exponent or a proof nonce.
///
/// The value is zeroized on drop and never printed. Secrets are only handed out by reference to
/// code inside this crate.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretScalar(Scalar);

impl SecretScalar {
    /// Samples a uniformly random, non-zero scalar.
    pub fn random(rng: &Rng) -> Result<Self, RngError> {
        loop {
            let mut bytes: [u8; WIDE_SCALAR_SIZE] = rng.random_array()?;
            let scalar = Scalar::from_le_bytes_mod_order(&bytes);
            bytes.zeroize();
            if !scalar.is_zero() {
                return Ok(Self(scalar));
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn from_scalar(scalar: Scalar) -> Self {
        Self(scalar)
    }

    pub(crate) fn as_scalar(&self) -> &Scalar {
        &self.0
    }
}

impl fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not reveal secret values when printing debug info.
        f.debug_tuple("SecretScalar").field(&"***").finish()
    }
}
