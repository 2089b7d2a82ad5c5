// SPDX-License-Identifier: MIT OR Apache-2.0

//! Group types of the BLS12-381 pairing and their fixed-length canonical encodings.
//!
//! Points are encoded compressed, scalars little-endian, pairing values as the twelve base field
//! coefficients of the target group element. Every value of a type always encodes to the same
//! number of bytes, so concatenations of them need no delimiters.
use std::sync::OnceLock;

use ark_bls12_381::{Bls12_381, Fr, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ec::pairing::{Pairing, PairingOutput};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use thiserror::Error;

/// Point in the first source group.
pub type G1 = G1Affine;

/// Point in the second source group.
pub type G2 = G2Affine;

/// Element of the target group. Arkworks writes the target group additively: `a + b` is the
/// group operation and `a * s` is exponentiation by the scalar `s`.
pub type Gt = PairingOutput<Bls12_381>;

/// Element of the scalar field.
pub type Scalar = Fr;

pub const G1_SIZE: usize = 48;

pub const G2_SIZE: usize = 96;

pub const GT_SIZE: usize = 576;

pub const SCALAR_SIZE: usize = 32;

/// Base points every participant of a deployment agrees on.
///
/// Values are immutable once constructed. [`PairingParams::shared`] hands out one process-wide
/// instance which is set up exactly once on first use and read-only afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairingParams {
    p: G1,
    q: G2,
}

impl PairingParams {
    /// Standard generators of BLS12-381.
    pub fn new() -> Self {
        Self {
            p: G1::generator(),
            q: G2::generator(),
        }
    }

    /// Parses base points from the hex representation of their compressed encodings.
    pub fn from_hex(g1: &str, g2: &str) -> Result<Self, ParamsError> {
        let p = g1_from_bytes(&hex::decode(g1)?)?;
        let q = g2_from_bytes(&hex::decode(g2)?)?;
        if p.is_zero() || q.is_zero() {
            return Err(ParamsError::IdentityBasePoint);
        }
        Ok(Self { p, q })
    }

    /// Hex representation of both base points, in the format [`PairingParams::from_hex`]
    /// accepts.
    pub fn to_hex(&self) -> (String, String) {
        (hex::encode(g1_bytes(&self.p)), hex::encode(g2_bytes(&self.q)))
    }

    pub fn shared() -> &'static Self {
        static PARAMS: OnceLock<PairingParams> = OnceLock::new();
        PARAMS.get_or_init(PairingParams::new)
    }

    /// Base point of G1.
    pub fn p(&self) -> &G1 {
        &self.p
    }

    /// Base point of G2.
    pub fn q(&self) -> &G2 {
        &self.q
    }
}

impl Default for PairingParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Bilinear map `e: G1 x G2 -> Gt`.
pub fn pairing(a: &G1, b: &G2) -> Gt {
    Bls12_381::pairing(*a, *b)
}

fn encode<T: CanonicalSerialize, const N: usize>(value: &T) -> [u8; N] {
    let mut out = [0u8; N];
    value
        .serialize_compressed(&mut out[..])
        .expect("fixed-size group element encoding");
    out
}

pub fn g1_bytes(value: &G1) -> [u8; G1_SIZE] {
    encode(value)
}

pub fn g2_bytes(value: &G2) -> [u8; G2_SIZE] {
    encode(value)
}

pub fn gt_bytes(value: &Gt) -> [u8; GT_SIZE] {
    encode(value)
}

pub fn scalar_bytes(value: &Scalar) -> [u8; SCALAR_SIZE] {
    encode(value)
}

fn decode<T: CanonicalDeserialize>(
    bytes: &[u8],
    size: usize,
    name: &'static str,
) -> Result<T, EncodingError> {
    if bytes.len() != size {
        return Err(EncodingError::InvalidLength(bytes.len(), size));
    }
    T::deserialize_compressed(bytes).map_err(|_| EncodingError::InvalidElement(name))
}

/// Decodes a G1 point, rejecting anything off the curve or outside the prime-order subgroup.
pub fn g1_from_bytes(bytes: &[u8]) -> Result<G1, EncodingError> {
    decode(bytes, G1_SIZE, "G1")
}

/// Decodes a G2 point, rejecting anything off the curve or outside the prime-order subgroup.
pub fn g2_from_bytes(bytes: &[u8]) -> Result<G2, EncodingError> {
    decode(bytes, G2_SIZE, "G2")
}

pub fn gt_from_bytes(bytes: &[u8]) -> Result<Gt, EncodingError> {
    decode(bytes, GT_SIZE, "GT")
}

/// Decodes a scalar, rejecting non-canonical encodings (values not reduced modulo the group
/// order).
pub fn scalar_from_bytes(bytes: &[u8]) -> Result<Scalar, EncodingError> {
    decode(bytes, SCALAR_SIZE, "scalar")
}

/// Serde adapter for arkworks values: raw canonical bytes in binary formats and hex strings in
/// human-readable ones.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Commitment {
///     #[serde(with = "canonical")]
///     x_p: G1,
/// }
/// ```
pub mod canonical {
    use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
    use like_core::{deserialize_hex, serialize_hex};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: CanonicalSerialize,
        S: serde::Serializer,
    {
        let mut bytes = Vec::with_capacity(value.compressed_size());
        value
            .serialize_compressed(&mut bytes)
            .map_err(|err| serde::ser::Error::custom(err.to_string()))?;
        serialize_hex(&bytes, serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: CanonicalDeserialize,
        D: serde::Deserializer<'de>,
    {
        let bytes = deserialize_hex(deserializer)?;
        let mut reader = &bytes[..];
        let value = T::deserialize_compressed(&mut reader)
            .map_err(|err| serde::de::Error::custom(err.to_string()))?;
        if !reader.is_empty() {
            return Err(serde::de::Error::custom("trailing bytes after group element"));
        }
        Ok(value)
    }
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("invalid length {0} bytes, expected {1} bytes")]
    InvalidLength(usize, usize),

    #[error("bytes do not encode a valid {0} element")]
    InvalidElement(&'static str),

    #[error("session context of {0} bytes does not name both parties and an authority")]
    InvalidContext(usize),
}

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("base point can not be the identity")]
    IdentityBasePoint,
}
