//! # ECDSA (secp256k1)
//!
//! Signer recovery and signing for balance proofs.
//!
//! Signatures are 65 bytes `r || s || v` over an Ethereum signed-message
//! digest; `v` is accepted as 0, 1, 27 or 28. Both low-s and high-s forms
//! of `s` recover the signer, as `ecrecover` does.

use super::errors::{MessageHandlerError, MessageHandlerResult};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash, Signature};

/// Prefix of the Ethereum signed-message digest.
const ETH_SIGNED_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Digest signed by `eth_sign`: keccak256 over prefix, decimal length and data.
pub fn eth_sign_hash(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(ETH_SIGNED_MESSAGE_PREFIX.as_bytes());
    hasher.update(data.len().to_string().as_bytes());
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Derive an address from a public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let pubkey_slice = pubkey_bytes.as_bytes();

    // Skip the 0x04 prefix
    let hash = keccak256(&pubkey_slice[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

/// Recover the signer address from a prehashed digest.
pub fn recover_address(digest: &Hash, signature: &Signature) -> MessageHandlerResult<Address> {
    use zeroize::Zeroize;

    let recovery_id = parse_recovery_id(signature.v())?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes.copy_from_slice(signature.rs());

    let sig = match EcdsaSignature::from_slice(&sig_bytes) {
        Ok(s) => {
            sig_bytes.zeroize();
            s
        }
        Err(_) => {
            sig_bytes.zeroize();
            return Err(MessageHandlerError::InvalidSignatureFormat);
        }
    };

    // High-s signatures recover the same key with the parity flipped
    let (sig, recovery_id) = match sig.normalize_s() {
        Some(normalized) => (
            normalized,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (sig, recovery_id),
    };

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| MessageHandlerError::RecoveryFailed)?;

    Ok(address_from_pubkey(&recovered_key))
}

/// Sign a prehashed digest, producing `r || s || v` with `v` in {27, 28}.
pub fn sign_prehash(digest: &Hash, signing_key: &SigningKey) -> MessageHandlerResult<Signature> {
    let (sig, recid) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|_| MessageHandlerError::SigningFailed)?;

    let sig_bytes = sig.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&sig_bytes[..32]);
    s.copy_from_slice(&sig_bytes[32..]);

    Ok(Signature::from_parts(&r, &s, 27 + recid.to_byte()))
}

fn parse_recovery_id(v: u8) -> MessageHandlerResult<RecoveryId> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(MessageHandlerError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| MessageHandlerError::InvalidRecoveryId(v))
}
