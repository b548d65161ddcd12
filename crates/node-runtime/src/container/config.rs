//! # Node Configuration
//!
//! Runtime parameters for the tweet ledger node.
//!
//! ## Environment Overrides
//!
//! | Variable | Field | Format |
//! |----------|-------|--------|
//! | `TL_PROGRAM_ID` | `program.program_id` | 64 hex chars |
//! | `TL_KEYPAIR_SEED` | `identity.keypair_seed` | 64 hex chars |
//! | `TL_AIRDROP_LAMPORTS` | `identity.airdrop_lamports` | decimal |
//! | `TL_LOG_LEVEL` | `logging.level` | `EnvFilter` directive |
//!
//! Malformed values are rejected rather than silently ignored.

use shared_crypto::Ed25519KeyPair;
use thiserror::Error;
use tl_01_tweet_program::domain::entities::ProgramConfig;
use tl_01_tweet_program::domain::value_objects::Pubkey;
use zeroize::Zeroize;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Tweet program configuration.
    pub program: ProgramConfig,
    /// Signing identity.
    pub identity: IdentityConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    ///
    /// # Errors
    ///
    /// `ConfigError` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides from `lookup`, which maps a variable name to its
    /// value if set.
    ///
    /// # Errors
    ///
    /// `ConfigError` if a value is present but malformed.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("TL_PROGRAM_ID") {
            self.program.program_id = raw
                .trim()
                .parse::<Pubkey>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "TL_PROGRAM_ID",
                    reason: e.to_string(),
                })?;
        }

        if let Some(mut raw) = lookup("TL_KEYPAIR_SEED") {
            let seed = Ed25519KeyPair::seed_from_hex(&raw);
            raw.zeroize();
            self.identity.keypair_seed = Some(seed.map_err(|e| ConfigError::InvalidValue {
                key: "TL_KEYPAIR_SEED",
                reason: e.to_string(),
            })?);
        }

        if let Some(raw) = lookup("TL_AIRDROP_LAMPORTS") {
            self.identity.airdrop_lamports =
                raw.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                        key: "TL_AIRDROP_LAMPORTS",
                        reason: e.to_string(),
                    })?;
        }

        if let Some(raw) = lookup("TL_LOG_LEVEL") {
            self.logging.level = raw.trim().to_string();
        }

        Ok(())
    }

    /// Validate configuration before starting.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - The program id is the zero key (the system program)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program.program_id == Pubkey::ZERO {
            return Err(ConfigError::ZeroProgramId);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Program id collides with the system program.
    #[error("program id must not be the zero key; set TL_PROGRAM_ID")]
    ZeroProgramId,

    /// An environment override could not be parsed.
    #[error("invalid {key}: {reason}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Parse failure.
        reason: String,
    },
}

/// Signing identity configuration.
#[derive(Clone)]
pub struct IdentityConfig {
    /// Ed25519 seed; a fresh key is generated when unset.
    pub keypair_seed: Option<[u8; 32]>,
    /// Lamports credited to the identity at startup.
    pub airdrop_lamports: u64,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("keypair_seed", &self.keypair_seed.map(|_| "<redacted>"))
            .field("airdrop_lamports", &self.airdrop_lamports)
            .finish()
    }
}

impl IdentityConfig {
    /// Startup airdrop when `TL_AIRDROP_LAMPORTS` is unset.
    pub const DEFAULT_AIRDROP: u64 = 1_000_000_000;
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            keypair_seed: None,
            airdrop_lamports: Self::DEFAULT_AIRDROP,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
