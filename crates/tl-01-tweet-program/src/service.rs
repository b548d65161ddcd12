//! # Tweet Program Service
//!
//! Executes signed tweet instructions against the ledger.
//!
//! Every transition runs the same way: decode the instruction, stage all
//! checks against current state, then hand a single batch of
//! `StateChange`s to the ledger. A failed check returns before anything is
//! committed.
//!
//! ## Ordering
//!
//! Instructions are serialized by an execution lock held for the whole
//! transition, mirroring the ledger's total order. Reads (`fetch`, `query`)
//! do not take it.

use crate::adapters::{Ed25519Verifier, InMemoryLedger, SystemClock};
use crate::domain::access::{self, AuthorizationRequest};
use crate::domain::address::{self, DerivationTag};
use crate::domain::entities::{
    Account, ProgramConfig, Receipt, StateChange, Tweet, TweetRecord,
};
use crate::domain::instruction::{InstructionKind, TweetInstruction};
use crate::domain::layout::{self, TWEET_ACCOUNT_LEN};
use crate::domain::query::RecordQuery;
use crate::domain::validation::validate;
use crate::domain::value_objects::{Pubkey, UniqueSeed};
use crate::errors::TweetError;
use crate::ports::inbound::{SignedTransaction, TweetProgramApi};
use crate::ports::outbound::{Clock, LedgerState, SignatureVerifier};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

/// Statistics for the tweet program.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProgramStats {
    /// Total instructions executed.
    pub instructions_executed: u64,
    /// Instructions that committed.
    pub instructions_succeeded: u64,
    /// Instructions rejected before commit.
    pub instructions_failed: u64,
    /// Records created.
    pub tweets_created: u64,
    /// Records updated.
    pub tweets_updated: u64,
    /// Records deleted.
    pub tweets_deleted: u64,
    /// Rejections caused by failed ownership proofs.
    pub authorization_failures: u64,
}

/// The tweet program.
pub struct TweetProgramService<L: LedgerState, V: SignatureVerifier, C: Clock> {
    /// Program configuration.
    config: ProgramConfig,
    /// Derivation tag for this program's records.
    tag: DerivationTag,
    /// Ledger storage.
    ledger: Arc<L>,
    /// Identity provider.
    verifier: V,
    /// Timestamp source.
    clock: Arc<C>,
    /// Serializes transitions.
    ordering: Mutex<()>,
    /// Service statistics.
    stats: Arc<RwLock<ProgramStats>>,
}

impl<L: LedgerState, V: SignatureVerifier, C: Clock> TweetProgramService<L, V, C> {
    /// Create a new tweet program.
    pub fn new(ledger: Arc<L>, verifier: V, clock: Arc<C>, config: ProgramConfig) -> Self {
        Self {
            tag: DerivationTag::tweets(config.program_id),
            config,
            ledger,
            verifier,
            clock,
            ordering: Mutex::new(()),
            stats: Arc::new(RwLock::new(ProgramStats::default())),
        }
    }

    /// Program configuration.
    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Derivation tag for addresses owned by this program.
    pub fn tag(&self) -> &DerivationTag {
        &self.tag
    }

    /// Underlying ledger.
    pub fn ledger(&self) -> &Arc<L> {
        &self.ledger
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ProgramStats {
        self.stats.read().await.clone()
    }

    /// Canonical address of the record `author` would create with `seed`.
    ///
    /// # Errors
    ///
    /// `AddressSpaceExhausted` if no bump is viable.
    pub fn tweet_address(&self, author: &Pubkey, seed: &UniqueSeed) -> Result<Pubkey, TweetError> {
        address::derive(&self.tag, author, seed).map(|(address, _)| address)
    }

    /// Deposit charged for one tweet account.
    pub fn tweet_deposit(&self) -> u64 {
        self.config.rent.minimum_balance(TWEET_ACCOUNT_LEN)
    }

    fn signature_valid(&self, tx: &SignedTransaction, signer: &Pubkey) -> bool {
        let message = tx.signed_message(&self.config.program_id);
        self.verifier.verify(signer, &message, &tx.signature)
    }

    /// Loads a program-owned tweet account and decodes it.
    async fn load(&self, address: &Pubkey) -> Result<(Account, TweetRecord), TweetError> {
        let account = self
            .ledger
            .get_account(address)
            .await?
            .filter(|account| account.owner == self.config.program_id)
            .ok_or(TweetError::NotFound)?;
        let record = layout::decode(&account.data)?;
        Ok((account, record))
    }

    /// Ownership proof for an existing record.
    fn authorize_owner(&self, tx: &SignedTransaction, record: &TweetRecord) -> Result<(), TweetError> {
        if record.author != tx.author {
            debug!(stored = %record.author, claimed = %tx.author, "author mismatch");
            return Err(TweetError::AuthorizationViolation);
        }
        access::authorize(
            &self.tag,
            &AuthorizationRequest {
                claimed_author: &tx.author,
                record_address: &tx.tweet,
                unique_seed: &record.unique_seed,
                bump: record.bump,
            },
            |signer| self.signature_valid(tx, signer),
        )
    }

    async fn send_tweet(
        &self,
        tx: &SignedTransaction,
        unique_seed: UniqueSeed,
        topic: String,
        content: String,
    ) -> Result<Receipt, TweetError> {
        let (address, bump) = address::derive(&self.tag, &tx.author, &unique_seed)?;
        access::authorize(
            &self.tag,
            &AuthorizationRequest {
                claimed_author: &tx.author,
                record_address: &tx.tweet,
                unique_seed: &unique_seed,
                bump,
            },
            |signer| self.signature_valid(tx, signer),
        )?;

        if self.ledger.get_account(&address).await?.is_some() {
            return Err(TweetError::AlreadyExists);
        }

        validate(&topic, &content)?;

        let lamports = self.tweet_deposit();
        let available = self.ledger.balance(&tx.author).await?;
        if available < lamports {
            return Err(TweetError::InsufficientFunds {
                needed: lamports,
                available,
            });
        }

        let now = self.clock.now_millis();
        let record = TweetRecord {
            author: tx.author,
            unique_seed,
            bump,
            created_at: now,
            updated_at: now,
            topic,
            content,
        };
        let data = layout::encode_account(&record)?;

        self.ledger
            .commit(vec![StateChange::CreateAccount {
                address,
                owner: self.config.program_id,
                payer: tx.author,
                lamports,
                data,
            }])
            .await?;

        Ok(Receipt {
            instruction: InstructionKind::SendTweet,
            address,
            tweet: Some(Tweet { address, record }),
            lamports,
        })
    }

    async fn update_tweet(
        &self,
        tx: &SignedTransaction,
        topic: String,
        content: String,
    ) -> Result<Receipt, TweetError> {
        let (_, mut record) = self.load(&tx.tweet).await?;
        self.authorize_owner(tx, &record)?;
        validate(&topic, &content)?;

        record.topic = topic;
        record.content = content;
        record.updated_at = self
            .clock
            .now_millis()
            .max(record.updated_at.saturating_add(1));
        let data = layout::encode_account(&record)?;

        self.ledger
            .commit(vec![StateChange::WriteData {
                address: tx.tweet,
                data,
            }])
            .await?;

        Ok(Receipt {
            instruction: InstructionKind::UpdateTweet,
            address: tx.tweet,
            tweet: Some(Tweet {
                address: tx.tweet,
                record,
            }),
            lamports: 0,
        })
    }

    async fn delete_tweet(&self, tx: &SignedTransaction) -> Result<Receipt, TweetError> {
        let (account, record) = self.load(&tx.tweet).await?;
        self.authorize_owner(tx, &record)?;

        self.ledger
            .commit(vec![StateChange::CloseAccount {
                address: tx.tweet,
                beneficiary: record.author,
            }])
            .await?;

        Ok(Receipt {
            instruction: InstructionKind::DeleteTweet,
            address: tx.tweet,
            tweet: None,
            lamports: account.lamports,
        })
    }

    async fn dispatch(
        &self,
        tx: &SignedTransaction,
        instruction: TweetInstruction,
    ) -> Result<Receipt, TweetError> {
        match instruction {
            TweetInstruction::SendTweet {
                unique_seed,
                topic,
                content,
            } => self.send_tweet(tx, unique_seed, topic, content).await,
            TweetInstruction::UpdateTweet { topic, content } => {
                self.update_tweet(tx, topic, content).await
            }
            TweetInstruction::DeleteTweet => self.delete_tweet(tx).await,
        }
    }
}

/// Create a service backed by in-memory storage, Ed25519 verification and
/// the system clock.
#[must_use]
pub fn create_in_memory_service(
    config: ProgramConfig,
) -> TweetProgramService<InMemoryLedger, Ed25519Verifier, SystemClock> {
    TweetProgramService::new(
        Arc::new(InMemoryLedger::new()),
        Ed25519Verifier,
        Arc::new(SystemClock),
        config,
    )
}

// =============================================================================
// TweetProgramApi Implementation
// =============================================================================

#[async_trait]
impl<L: LedgerState, V: SignatureVerifier, C: Clock> TweetProgramApi
    for TweetProgramService<L, V, C>
{
    #[instrument(skip(self, tx), fields(author = %tx.author, tweet = %tx.tweet))]
    async fn execute(&self, tx: SignedTransaction) -> Result<Receipt, TweetError> {
        let _ordered = self.ordering.lock().await;

        let result = match TweetInstruction::decode(&tx.data) {
            Ok(instruction) => {
                debug!(instruction = instruction.name(), "executing instruction");
                self.dispatch(&tx, instruction).await
            }
            Err(e) => Err(e),
        };

        {
            let mut stats = self.stats.write().await;
            stats.instructions_executed += 1;
            match &result {
                Ok(receipt) => {
                    stats.instructions_succeeded += 1;
                    match receipt.instruction {
                        InstructionKind::SendTweet => stats.tweets_created += 1,
                        InstructionKind::UpdateTweet => stats.tweets_updated += 1,
                        InstructionKind::DeleteTweet => stats.tweets_deleted += 1,
                    }
                }
                Err(e) => {
                    stats.instructions_failed += 1;
                    if *e == TweetError::AuthorizationViolation {
                        stats.authorization_failures += 1;
                    }
                }
            }
        }

        match &result {
            Ok(receipt) => info!(
                instruction = %receipt.instruction,
                address = %receipt.address,
                lamports = receipt.lamports,
                "Instruction committed"
            ),
            Err(e) => warn!(error = %e, "Instruction rejected"),
        }
        result
    }

    async fn fetch(&self, address: &Pubkey) -> Result<Option<Tweet>, TweetError> {
        match self.load(address).await {
            Ok((_, record)) => Ok(Some(Tweet {
                address: *address,
                record,
            })),
            Err(TweetError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self, query), fields(filters = query.filters().len()))]
    async fn query(&self, query: &RecordQuery) -> Result<Vec<Tweet>, TweetError> {
        let accounts = self.ledger.scan(&self.config.program_id, query).await?;
        let tweets: Vec<Tweet> = accounts
            .into_iter()
            .filter_map(|(address, account)| match layout::decode(&account.data) {
                Ok(record) => Some(Tweet { address, record }),
                Err(e) => {
                    warn!(%address, error = %e, "skipping undecodable record");
                    None
                }
            })
            .collect();
        debug!(matches = tweets.len(), "query complete");
        Ok(tweets)
    }
}

// =============================================================================
// TESTS
// =============================================================================
