//! # Driving Ports (API - Inbound)
//!
//! The public surface of the tweet program: signed transactions in,
//! receipts and record snapshots out.

use crate::domain::entities::{Receipt, Tweet};
use crate::domain::instruction::TweetInstruction;
use crate::domain::query::RecordQuery;
use crate::domain::value_objects::{Pubkey, Signature};
use crate::errors::TweetError;
use async_trait::async_trait;
use shared_crypto::Ed25519KeyPair;

// =============================================================================
// SIGNED TRANSACTION
// =============================================================================

/// One instruction as submitted to the ledger.
///
/// The signature covers `program_id ‖ tweet ‖ author ‖ data`, binding the
/// instruction to both the target record and the program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    /// Targeted record address.
    pub tweet: Pubkey,
    /// Claimed author and fee payer.
    pub author: Pubkey,
    /// Encoded `TweetInstruction`.
    pub data: Vec<u8>,
    /// Author's signature over `message()`.
    pub signature: Signature,
}

impl SignedTransaction {
    /// Bytes the author signs.
    #[must_use]
    pub fn message(program_id: &Pubkey, tweet: &Pubkey, author: &Pubkey, data: &[u8]) -> Vec<u8> {
        let mut message = Vec::with_capacity(96 + data.len());
        message.extend_from_slice(program_id.as_bytes());
        message.extend_from_slice(tweet.as_bytes());
        message.extend_from_slice(author.as_bytes());
        message.extend_from_slice(data);
        message
    }

    /// Encodes `instruction` and signs it with `keypair`.
    #[must_use]
    pub fn sign(
        program_id: &Pubkey,
        tweet: Pubkey,
        instruction: &TweetInstruction,
        keypair: &Ed25519KeyPair,
    ) -> Self {
        let author = Pubkey::new(*keypair.public_key().as_bytes());
        let data = instruction.encode();
        let signature = keypair
            .sign(&Self::message(program_id, &tweet, &author, &data))
            .into();
        Self {
            tweet,
            author,
            data,
            signature,
        }
    }

    /// The message this transaction claims to have signed.
    #[must_use]
    pub fn signed_message(&self, program_id: &Pubkey) -> Vec<u8> {
        Self::message(program_id, &self.tweet, &self.author, &self.data)
    }
}

// =============================================================================
// PROGRAM API
// =============================================================================

/// Primary API of the tweet program.
#[async_trait]
pub trait TweetProgramApi: Send + Sync {
    /// Executes one transaction atomically.
    ///
    /// # Errors
    ///
    /// Any `TweetError`; on error the ledger is unchanged.
    async fn execute(&self, tx: SignedTransaction) -> Result<Receipt, TweetError>;

    /// Reads the record at `address`, if any.
    async fn fetch(&self, address: &Pubkey) -> Result<Option<Tweet>, TweetError>;

    /// Scans all records matching `query`, ordered by address.
    async fn query(&self, query: &RecordQuery) -> Result<Vec<Tweet>, TweetError>;
}
