//! # Message Handler Configuration
//!
//! Configuration for the inbound message handler and its node inbox.

use crate::domain::{MessageHandlerError, MessageHandlerResult};
use serde::{Deserialize, Serialize};
use shared_types::{BlockNumber, TokenAmount};
use std::env;

/// Default number of alternative routes requested on refund.
pub const DEFAULT_MAX_PATHS: usize = 3;

/// Default depth of the node inbox.
pub const DEFAULT_INBOX_CAPACITY: usize = 1024;

/// Routing parameters handed verbatim to the route finder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Maximum number of routes to request.
    pub max_paths: usize,
    /// Maximum fee paid to the pathfinding service per request.
    pub pfs_max_fee: TokenAmount,
    /// Validity of a pathfinding IOU, in blocks.
    pub pfs_iou_timeout: BlockNumber,
    /// Ask the pathfinding service instead of the local graph.
    pub use_pathfinding_service: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_paths: DEFAULT_MAX_PATHS,
            pfs_max_fee: TokenAmount::from(50_000_000_000_000_000u64),
            pfs_iou_timeout: 200_000,
            use_pathfinding_service: true,
        }
    }
}

/// Logging options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Message handler configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHandlerConfig {
    /// Route lookup parameters.
    pub routing: RoutingConfig,
    /// Bounded depth of the per-node inbox.
    pub inbox_capacity: usize,
    /// Logging options.
    pub logging: LoggingConfig,
}

impl Default for MessageHandlerConfig {
    fn default() -> Self {
        Self {
            routing: RoutingConfig::default(),
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
            logging: LoggingConfig::default(),
        }
    }
}

impl MessageHandlerConfig {
    /// Create a config for testing (small inbox, local routing, debug logs).
    pub fn for_testing() -> Self {
        Self {
            routing: RoutingConfig {
                max_paths: 5,
                pfs_max_fee: TokenAmount::zero(),
                pfs_iou_timeout: 10,
                use_pathfinding_service: false,
            },
            inbox_capacity: 16,
            logging: LoggingConfig {
                level: "debug".to_string(),
                json: false,
            },
        }
    }

    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            routing: RoutingConfig {
                max_paths: env::var("PCN_MAX_PATHS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.routing.max_paths),
                ..defaults.routing
            },

            inbox_capacity: env::var("PCN_INBOX_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.inbox_capacity),

            logging: LoggingConfig {
                level: env::var("PCN_LOG_LEVEL")
                    .or_else(|_| env::var("RUST_LOG"))
                    .unwrap_or(defaults.logging.level),
                json: env::var("PCN_JSON_LOGS")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(defaults.logging.json),
            },
        }
    }

    /// Reject values the handler cannot run with.
    pub fn validate(&self) -> MessageHandlerResult<()> {
        if self.inbox_capacity == 0 {
            return Err(MessageHandlerError::InvalidConfig(
                "inbox_capacity must be > 0".to_string(),
            ));
        }
        if self.routing.max_paths == 0 {
            return Err(MessageHandlerError::InvalidConfig(
                "routing.max_paths must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MessageHandlerConfig::default();
        assert_eq!(config.routing.max_paths, 3);
        assert_eq!(config.inbox_capacity, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_config() {
        let config = MessageHandlerConfig::for_testing();
        assert!(!config.routing.use_pathfinding_service);
        assert_eq!(config.inbox_capacity, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = MessageHandlerConfig {
            inbox_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MessageHandlerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_paths() {
        let mut config = MessageHandlerConfig::default();
        config.routing.max_paths = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = MessageHandlerConfig::for_testing();
        let json = serde_json::to_string(&config).unwrap();
        let back: MessageHandlerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
