//! # Program Container
//!
//! Holds the tweet program, its ledger and the node's signing identity.
//!
//! ## Initialization
//!
//! 1. Create the in-memory ledger
//! 2. Create the tweet program over it
//! 3. Load or generate the signing keypair
//! 4. Airdrop the configured lamports to the identity

use std::sync::Arc;

use shared_crypto::Ed25519KeyPair;
use tracing::{info, instrument};

use tl_01_tweet_program::adapters::{Ed25519Verifier, InMemoryLedger, SystemClock};
use tl_01_tweet_program::domain::value_objects::Pubkey;
use tl_01_tweet_program::errors::LedgerError;
use tl_01_tweet_program::service::TweetProgramService;

use crate::container::config::NodeConfig;

/// Concrete tweet program wired to in-memory storage.
pub type ConcreteTweetProgram = TweetProgramService<InMemoryLedger, Ed25519Verifier, SystemClock>;

/// Central container for the node's services.
pub struct ProgramContainer {
    /// The tweet program.
    pub program: Arc<ConcreteTweetProgram>,
    /// Ledger backing the program.
    pub ledger: Arc<InMemoryLedger>,
    /// Identity that signs submitted instructions.
    pub keypair: Ed25519KeyPair,
    /// Node configuration (immutable after initialization).
    pub config: NodeConfig,
}

impl ProgramContainer {
    /// Builds and funds the container.
    ///
    /// # Errors
    ///
    /// Fails only if the startup airdrop cannot be credited.
    #[instrument(name = "container_init", skip(config))]
    pub fn new(config: NodeConfig) -> Result<Self, LedgerError> {
        let ledger = Arc::new(InMemoryLedger::new());
        let program = Arc::new(TweetProgramService::new(
            Arc::clone(&ledger),
            Ed25519Verifier,
            Arc::new(SystemClock),
            config.program.clone(),
        ));

        let keypair = match config.identity.keypair_seed {
            Some(seed) => Ed25519KeyPair::from_seed(seed),
            None => {
                info!("No TL_KEYPAIR_SEED set, generating an ephemeral identity");
                Ed25519KeyPair::generate()
            }
        };
        let identity = Pubkey::new(*keypair.public_key().as_bytes());

        let balance = ledger.airdrop(identity, config.identity.airdrop_lamports)?;
        info!(
            program_id = %config.program.program_id,
            identity = %identity,
            balance,
            "Program container initialized"
        );

        Ok(Self {
            program,
            ledger,
            keypair,
            config,
        })
    }

    /// Public key of the signing identity.
    #[must_use]
    pub fn identity(&self) -> Pubkey {
        Pubkey::new(*self.keypair.public_key().as_bytes())
    }

    /// Configured program id.
    #[must_use]
    pub fn program_id(&self) -> Pubkey {
        self.config.program.program_id
    }
}
