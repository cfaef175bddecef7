//! # Node Private Key
//!
//! secp256k1 signing key that zeroizes memory on drop.
//!
//! ## Security
//!
//! The key is never printed and never serialized. The node address is
//! derived once at construction.

use super::ecdsa::address_from_pubkey;
use super::errors::{MessageHandlerError, MessageHandlerResult};
use k256::ecdsa::SigningKey;
use shared_types::Address;
use zeroize::ZeroizeOnDrop;

/// Node private key.
#[derive(Clone, ZeroizeOnDrop)]
pub struct PrivateKey {
    inner: [u8; 32],
    address: Address,
}

impl PrivateKey {
    /// Create from raw scalar bytes.
    ///
    /// Fails if the bytes are zero or not below the curve order.
    pub fn from_bytes(bytes: [u8; 32]) -> MessageHandlerResult<Self> {
        let signing_key =
            SigningKey::from_slice(&bytes).map_err(|_| MessageHandlerError::InvalidPrivateKey)?;
        let address = address_from_pubkey(signing_key.verifying_key());
        Ok(Self {
            inner: bytes,
            address,
        })
    }

    /// Generate a fresh random key.
    pub fn random() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let mut inner = [0u8; 32];
        inner.copy_from_slice(&signing_key.to_bytes());
        let address = address_from_pubkey(signing_key.verifying_key());
        Self { inner, address }
    }

    /// Address controlled by this key.
    pub fn address(&self) -> Address {
        self.address
    }

    pub(crate) fn signing_key(&self) -> MessageHandlerResult<SigningKey> {
        SigningKey::from_slice(&self.inner).map_err(|_| MessageHandlerError::InvalidPrivateKey)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the scalar
        write!(f, "PrivateKey(***, 0x{})", hex::encode(self.address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_derives_stable_address() {
        let a = PrivateKey::from_bytes([0x11u8; 32]).unwrap();
        let b = PrivateKey::from_bytes([0x11u8; 32]).unwrap();
        assert_eq!(a.address(), b.address());
        assert_ne!(a.address(), [0u8; 20]);
    }

    #[test]
    fn test_zero_key_rejected() {
        assert!(matches!(
            PrivateKey::from_bytes([0u8; 32]),
            Err(MessageHandlerError::InvalidPrivateKey)
        ));
    }

    #[test]
    fn test_key_above_order_rejected() {
        assert!(PrivateKey::from_bytes([0xFFu8; 32]).is_err());
    }

    #[test]
    fn test_debug_hides_scalar() {
        let key = PrivateKey::from_bytes([0xABu8; 32]).unwrap();
        let debug_str = format!("{:?}", key);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains(&"ab".repeat(32)));
    }

    #[test]
    fn test_random_keys_differ() {
        assert_ne!(PrivateKey::random().address(), PrivateKey::random().address());
    }

    #[test]
    fn test_dropping_clone_leaves_original_usable() {
        let key = PrivateKey::from_bytes([0x23u8; 32]).unwrap();
        let address = key.address();
        {
            let copy = key.clone();
            assert_eq!(copy.address(), address);
        }

        let signing_key = key.signing_key().unwrap();
        assert_eq!(address_from_pubkey(signing_key.verifying_key()), address);
    }

    #[test]
    fn test_signing_key_matches_address() {
        let key = PrivateKey::from_bytes([0x22u8; 32]).unwrap();
        let signing_key = key.signing_key().unwrap();
        assert_eq!(address_from_pubkey(signing_key.verifying_key()), key.address());
    }
}
