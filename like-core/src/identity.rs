// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ed25519 keys and signatures used to authenticate handshake transcripts.
//!
//! Users and the operator each own one long-term key pair. The key-exchange treats these keys
//! as opaque handles: it only ever asks for a signature over some bytes or for a verification
//! result.
use std::fmt;
use std::str::FromStr;

use ed25519_dalek::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH, Signer};
use rand::rngs::OsRng;
use thiserror::Error;

/// Size of a private key in bytes.
pub const PRIVATE_KEY_LEN: usize = SECRET_KEY_LENGTH;

/// Size of a public key in bytes.
pub const PUBLIC_KEY_LEN: usize = PUBLIC_KEY_LENGTH;

/// Size of a signature in bytes.
pub const SIGNATURE_LEN: usize = SIGNATURE_LENGTH;

/// Private Ed25519 key used for signing.
#[derive(Clone)]
pub struct PrivateKey(ed25519_dalek::SigningKey);

impl PrivateKey {
    /// Generates a new private key using the systems random number generator (CSPRNG) as a seed.
    pub fn new() -> Self {
        let mut csprng: OsRng = OsRng;
        Self(ed25519_dalek::SigningKey::generate(&mut csprng))
    }

    /// Create a private key from its raw bytes, for example when loading it from a key store.
    pub fn from_bytes(bytes: &[u8; PRIVATE_KEY_LEN]) -> Self {
        Self(ed25519_dalek::SigningKey::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_LEN] {
        self.0.as_bytes()
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }

    pub fn sign(&self, bytes: &[u8]) -> Signature {
        Signature(self.0.sign(bytes))
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = IdentityError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let checked: [u8; PRIVATE_KEY_LEN] = value
            .try_into()
            .map_err(|_| IdentityError::InvalidLength(value.len(), PRIVATE_KEY_LEN))?;
        Ok(Self::from_bytes(&checked))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not reveal secret values when printing debug info.
        f.debug_tuple("PrivateKey").field(&"***").finish()
    }
}

/// Public Ed25519 key used for verifying signatures.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(ed25519_dalek::VerifyingKey);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LEN]) -> Result<Self, IdentityError> {
        let key = ed25519_dalek::VerifyingKey::from_bytes(bytes)?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        self.0.as_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Returns true if `signature` was created by the private counterpart of this key over
    /// exactly these `bytes`.
    ///
    /// Uses strict verification, rejecting weak public keys and malleable signatures.
    pub fn verify(&self, bytes: &[u8], signature: &Signature) -> bool {
        self.0.verify_strict(bytes, &signature.0).is_ok()
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = IdentityError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let checked: [u8; PUBLIC_KEY_LEN] = value
            .try_into()
            .map_err(|_| IdentityError::InvalidLength(value.len(), PUBLIC_KEY_LEN))?;
        Self::from_bytes(&checked)
    }
}

impl FromStr for PublicKey {
    type Err = IdentityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(hex::decode(value)?.as_slice())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_hex()).finish()
    }
}

/// Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(ed25519_dalek::Signature);

impl Signature {
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LEN]) -> Self {
        Self(ed25519_dalek::Signature::from_bytes(bytes))
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0.to_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = IdentityError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let checked: [u8; SIGNATURE_LEN] = value
            .try_into()
            .map_err(|_| IdentityError::InvalidLength(value.len(), SIGNATURE_LEN))?;
        Ok(Self::from_bytes(&checked))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Signature").field(&self.to_hex()).finish()
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("invalid length {0} bytes, expected {1} bytes")]
    InvalidLength(usize, usize),

    #[error(transparent)]
    InvalidHex(#[from] hex::FromHexError),

    #[error(transparent)]
    InvalidPublicKey(#[from] ed25519_dalek::SignatureError),
}

#[cfg(test)]
mod tests {
    use super::{IdentityError, PrivateKey, PublicKey, Signature};

    #[test]
    fn signing() {
        let private_key = PrivateKey::new();
        let public_key = private_key.public_key();
        let bytes = b"test";
        let signature = private_key.sign(bytes);
        assert!(public_key.verify(bytes, &signature));

        // Invalid data
        assert!(!public_key.verify(b"not test", &signature));

        // Invalid public key
        let public_key_2 = PrivateKey::new().public_key();
        assert!(!public_key_2.verify(bytes, &signature));
    }

    #[test]
    fn deterministic_from_bytes() {
        let private_key = PrivateKey::from_bytes(&[9; 32]);
        let private_key_2 = PrivateKey::try_from(&private_key.as_bytes()[..]).unwrap();
        assert_eq!(private_key.public_key(), private_key_2.public_key());

        // Ed25519 signatures are deterministic.
        assert_eq!(private_key.sign(b"omega"), private_key_2.sign(b"omega"));
    }

    #[test]
    fn hex_representation() {
        let public_key = PrivateKey::new().public_key();
        let parsed: PublicKey = public_key.to_hex().parse().unwrap();
        assert_eq!(public_key, parsed);

        let signature = PrivateKey::new().sign(b"test");
        let bytes = signature.to_bytes();
        assert_eq!(Signature::try_from(&bytes[..]).unwrap(), signature);
    }

    #[test]
    fn invalid_lengths() {
        assert!(matches!(
            PublicKey::try_from(&[1u8; 12][..]),
            Err(IdentityError::InvalidLength(12, 32))
        ));
        assert!(matches!(
            Signature::try_from(&[1u8; 63][..]),
            Err(IdentityError::InvalidLength(63, 64))
        ));
        assert!(matches!(
            "zz".parse::<PublicKey>(),
            Err(IdentityError::InvalidHex(_))
        ));
    }

    #[test]
    fn debug_hides_private_key() {
        let private_key = PrivateKey::from_bytes(&[1; 32]);
        assert_eq!(format!("{:?}", private_key), "PrivateKey(\"***\")");
    }
}
