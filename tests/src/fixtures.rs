//! # Shared Fixtures
//!
//! A program wired to in-memory storage and a controllable clock, plus
//! helpers that sign and submit instructions for funded test identities.

use std::sync::Arc;

use shared_crypto::Ed25519KeyPair;
use tl_01_tweet_program::prelude::*;

/// Fixed start time, Unix milliseconds.
pub const GENESIS_MILLIS: i64 = 1_700_000_000_000;

/// Lamports credited to every funded identity.
pub const AIRDROP: u64 = 1_000_000_000;

/// Program under test.
pub type TestProgram = TweetProgramService<InMemoryLedger, Ed25519Verifier, ManualClock>;

/// A program plus handles on its ledger and clock.
pub struct TestNet {
    /// The program.
    pub program: Arc<TestProgram>,
    /// Its storage.
    pub ledger: Arc<InMemoryLedger>,
    /// Its clock.
    pub clock: Arc<ManualClock>,
}

impl TestNet {
    /// Fresh program with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ProgramConfig::default())
    }

    /// Fresh program with `config`.
    pub fn with_config(config: ProgramConfig) -> Self {
        let ledger = Arc::new(InMemoryLedger::new());
        let clock = Arc::new(ManualClock::new(GENESIS_MILLIS));
        let program = Arc::new(TweetProgramService::new(
            Arc::clone(&ledger),
            Ed25519Verifier,
            Arc::clone(&clock),
            config,
        ));
        Self {
            program,
            ledger,
            clock,
        }
    }

    /// Deterministic identity funded with `AIRDROP`.
    pub fn user(&self, seed: u8) -> Ed25519KeyPair {
        let keypair = Ed25519KeyPair::from_seed([seed; 32]);
        self.ledger
            .airdrop(pubkey(&keypair), AIRDROP)
            .expect("airdrop");
        keypair
    }

    /// Program id in use.
    pub fn program_id(&self) -> Pubkey {
        self.program.config().program_id
    }

    /// Signed transaction targeting `tweet`.
    pub fn sign(
        &self,
        keypair: &Ed25519KeyPair,
        tweet: Pubkey,
        instruction: &TweetInstruction,
    ) -> SignedTransaction {
        SignedTransaction::sign(&self.program_id(), tweet, instruction, keypair)
    }

    /// Creates a record at the canonical address for `seed`.
    pub async fn send(
        &self,
        keypair: &Ed25519KeyPair,
        seed: UniqueSeed,
        topic: &str,
        content: &str,
    ) -> Result<Receipt, TweetError> {
        let address = self.program.tweet_address(&pubkey(keypair), &seed)?;
        let tx = self.sign(
            keypair,
            address,
            &TweetInstruction::SendTweet {
                unique_seed: seed,
                topic: topic.into(),
                content: content.into(),
            },
        );
        self.program.execute(tx).await
    }

    /// Replaces topic and content of `tweet`.
    pub async fn update(
        &self,
        keypair: &Ed25519KeyPair,
        tweet: Pubkey,
        topic: &str,
        content: &str,
    ) -> Result<Receipt, TweetError> {
        let tx = self.sign(
            keypair,
            tweet,
            &TweetInstruction::UpdateTweet {
                topic: topic.into(),
                content: content.into(),
            },
        );
        self.program.execute(tx).await
    }

    /// Deletes `tweet`.
    pub async fn delete(&self, keypair: &Ed25519KeyPair, tweet: Pubkey) -> Result<Receipt, TweetError> {
        let tx = self.sign(keypair, tweet, &TweetInstruction::DeleteTweet);
        self.program.execute(tx).await
    }
}

impl Default for TestNet {
    fn default() -> Self {
        Self::new()
    }
}

/// Ledger identity of `keypair`.
pub fn pubkey(keypair: &Ed25519KeyPair) -> Pubkey {
    Pubkey::new(*keypair.public_key().as_bytes())
}

/// Seed with every byte set to `byte`.
pub fn seed(byte: u8) -> UniqueSeed {
    UniqueSeed::new([byte; 16])
}
