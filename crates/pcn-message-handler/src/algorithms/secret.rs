//! # Payment Secrets
//!
//! Secret generation and SHA-256 secret hashes.

use rand::RngCore;
use sha2::{Digest, Sha256};
use shared_types::{Secret, SecretHash};

/// Generate a random 32-byte secret.
///
/// The all-zero value is reserved for "no secret" on-chain and is never
/// returned.
pub fn random_secret() -> Secret {
    let mut rng = rand::thread_rng();
    let mut secret = [0u8; 32];
    loop {
        rng.fill_bytes(&mut secret);
        if secret != [0u8; 32] {
            return secret;
        }
    }
}

/// SHA-256 hash of a secret.
pub fn sha256_secrethash(secret: &Secret) -> SecretHash {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret_not_zero() {
        for _ in 0..64 {
            assert_ne!(random_secret(), [0u8; 32]);
        }
    }

    #[test]
    fn test_random_secrets_differ() {
        assert_ne!(random_secret(), random_secret());
    }

    #[test]
    fn test_sha256_known_vector() {
        // sha256 of 32 zero bytes
        assert_eq!(
            hex::encode(sha256_secrethash(&[0u8; 32])),
            "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925"
        );
    }

    #[test]
    fn test_different_secrets_hash_differently() {
        let secret = random_secret();
        let hash = sha256_secrethash(&secret);
        assert_eq!(hash, sha256_secrethash(&secret));
        assert_ne!(hash, sha256_secrethash(&[0xCDu8; 32]));
    }
}
