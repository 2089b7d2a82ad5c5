// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::ZeroizeOnDrop;

use crate::crypto::pairing::{GT_SIZE, Gt, gt_bytes};

/// Session key `e(P, Q)^(x·y·Σl_i)` in its canonical encoding.
///
/// Initiator, responder and the escrow authorities (through opening) all arrive at the same
/// bytes. Deriving symmetric keys from it is up to the application.
#[derive(Clone, Eq, ZeroizeOnDrop)]
pub struct SessionKey([u8; GT_SIZE]);

impl SessionKey {
    pub(crate) fn from_gt(value: &Gt) -> Self {
        Self(gt_bytes(value))
    }

    pub fn as_bytes(&self) -> &[u8; GT_SIZE] {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; GT_SIZE] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl PartialEq for SessionKey {
    fn eq(&self, other: &Self) -> bool {
        // Constant-time comparison.
        bool::from(self.0.ct_eq(&other.0))
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not reveal secret values when printing debug info.
        f.debug_tuple("SessionKey").field(&"***").finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::crypto::pairing::{PairingParams, pairing};

    use super::SessionKey;

    #[test]
    fn encoding_and_comparison() {
        let params = PairingParams::new();
        let gt = pairing(params.p(), params.q());

        let key = SessionKey::from_gt(&gt);
        assert_eq!(key.to_bytes().len(), 576);
        assert_eq!(key.to_hex().len(), 2 * 576);
        assert_eq!(key, SessionKey::from_gt(&gt));
        assert_ne!(key, SessionKey::from_gt(&(gt + gt)));
        assert_eq!(format!("{key:?}"), "SessionKey(\"***\")");
    }
}
