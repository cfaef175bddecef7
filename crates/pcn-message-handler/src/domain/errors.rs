//! # Domain Errors
//!
//! Error types for inbound message handling.
//!
//! None of these reach the transport layer: the dispatcher logs them and
//! drops the message.

use thiserror::Error;

/// Message handler error types.
#[derive(Debug, Error)]
pub enum MessageHandlerError {
    /// Signature bytes are not a valid secp256k1 `r || s` pair.
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Recovery byte outside 0, 1, 27, 28.
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Public key could not be recovered from the signature.
    #[error("Failed to recover signer")]
    RecoveryFailed,

    /// Signing a digest failed.
    #[error("Signing failed")]
    SigningFailed,

    /// Private key bytes are not a valid secp256k1 scalar.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// The secret registry could not be queried.
    #[error("Secret registry error: {0}")]
    SecretRegistry(String),

    /// The routing collaborator failed.
    #[error("Routing error: {0}")]
    Routing(String),

    /// The node inbox task has stopped.
    #[error("Node inbox closed")]
    InboxClosed,

    /// Configuration rejected by validation.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// A required collaborator was not supplied to the node context.
    #[error("Missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// The global log subscriber could not be installed.
    #[error("Logging init failed: {0}")]
    LoggingInit(String),
}

/// Result alias for message handling.
pub type MessageHandlerResult<T> = Result<T, MessageHandlerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_recovery_id_error() {
        let err = MessageHandlerError::InvalidRecoveryId(35);
        assert!(err.to_string().contains("35"));
    }

    #[test]
    fn test_secret_registry_error() {
        let err = MessageHandlerError::SecretRegistry("rpc timeout".to_string());
        assert!(err.to_string().contains("rpc timeout"));
    }

    #[test]
    fn test_missing_collaborator_error() {
        let err = MessageHandlerError::MissingCollaborator("route_finder");
        assert_eq!(err.to_string(), "Missing collaborator: route_finder");
    }

    #[test]
    fn test_inbox_closed_error() {
        let err = MessageHandlerError::InboxClosed;
        assert!(err.to_string().contains("closed"));
    }
}
