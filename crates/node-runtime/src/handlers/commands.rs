//! # Command Handler
//!
//! Line-oriented JSON protocol in front of the tweet program.
//!
//! ## Protocol
//!
//! One JSON object per input line, tagged by `cmd`; one JSON object per
//! output line, tagged by `type`.
//!
//! ```text
//! {"cmd":"send","topic":"veganism","content":"Hummus, am I right?"}
//! {"type":"receipt","receipt":{"instruction":"send_tweet","address":"…",…}}
//!
//! {"cmd":"by_topic","topic":"veganism"}
//! {"type":"tweets","tweets":[…]}
//! ```
//!
//! Mutations are signed with the container's identity. Errors never end
//! the session; they are reported as `{"type":"error","message":…}`.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument, warn};

use tl_01_tweet_program::domain::entities::{Receipt, Tweet};
use tl_01_tweet_program::domain::instruction::TweetInstruction;
use tl_01_tweet_program::domain::query::RecordQuery;
use tl_01_tweet_program::domain::value_objects::{Pubkey, UniqueSeed};
use tl_01_tweet_program::errors::TweetError;
use tl_01_tweet_program::ports::inbound::{SignedTransaction, TweetProgramApi};
use tl_01_tweet_program::ports::outbound::LedgerState;

use crate::container::ProgramContainer;

/// A request read from the input stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Create a tweet; a random seed is drawn when none is given.
    Send {
        /// Topic text.
        #[serde(default)]
        topic: String,
        /// Content text.
        content: String,
        /// Optional explicit seed (32 hex chars).
        #[serde(default)]
        seed: Option<UniqueSeed>,
    },
    /// Replace topic and content.
    Update {
        /// Record address.
        address: Pubkey,
        /// New topic.
        #[serde(default)]
        topic: String,
        /// New content.
        content: String,
    },
    /// Delete a record and reclaim its deposit.
    Delete {
        /// Record address.
        address: Pubkey,
    },
    /// Read one record.
    Get {
        /// Record address.
        address: Pubkey,
    },
    /// Every record.
    List,
    /// Records by author; defaults to the node identity.
    ByAuthor {
        /// Author key.
        #[serde(default)]
        author: Option<Pubkey>,
    },
    /// Records with exactly this topic.
    ByTopic {
        /// Topic.
        topic: String,
    },
    /// Records whose topic starts with `prefix`.
    ByTopicPrefix {
        /// Topic prefix.
        prefix: String,
    },
    /// Lamport balance; defaults to the node identity.
    Balance {
        /// Account key.
        #[serde(default)]
        address: Option<Pubkey>,
    },
}

/// A reply written to the output stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// A committed mutation.
    Receipt {
        /// Outcome and record snapshot.
        receipt: Receipt,
    },
    /// Result of `get`.
    Tweet {
        /// The record, if present.
        tweet: Option<Tweet>,
    },
    /// Result of a scan.
    Tweets {
        /// Matches ordered by address.
        tweets: Vec<Tweet>,
    },
    /// Result of `balance`.
    Balance {
        /// Account key.
        address: Pubkey,
        /// Lamports held.
        lamports: u64,
    },
    /// Rejected command.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

/// Executes commands against a `ProgramContainer`.
pub struct CommandHandler {
    container: Arc<ProgramContainer>,
}

impl CommandHandler {
    /// Create a handler over `container`.
    pub fn new(container: Arc<ProgramContainer>) -> Self {
        Self { container }
    }

    /// Parses and executes one input line.
    pub async fn handle_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Command>(line) {
            Ok(command) => self.handle(command).await,
            Err(e) => {
                warn!(error = %e, "Unparseable command");
                Response::Error {
                    message: format!("invalid command: {e}"),
                }
            }
        }
    }

    /// Executes a parsed command.
    #[instrument(skip(self))]
    pub async fn handle(&self, command: Command) -> Response {
        match self.dispatch(command).await {
            Ok(response) => response,
            Err(e) => Response::Error {
                message: e.to_string(),
            },
        }
    }

    /// Reads commands from `input` until EOF, writing one response line each.
    ///
    /// Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Only I/O and serialization failures end the loop.
    pub async fn serve<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read command")? {
            if line.trim().is_empty() {
                continue;
            }
            let response = self.handle_line(&line).await;
            let mut encoded =
                serde_json::to_string(&response).context("Failed to encode response")?;
            encoded.push('\n');
            output
                .write_all(encoded.as_bytes())
                .await
                .context("Failed to write response")?;
            output.flush().await.context("Failed to flush response")?;
        }
        debug!("Command stream closed");
        Ok(())
    }

    async fn dispatch(&self, command: Command) -> Result<Response, TweetError> {
        let program = &self.container.program;
        let identity = self.container.identity();

        let response = match command {
            Command::Send {
                topic,
                content,
                seed,
            } => {
                let unique_seed = seed.unwrap_or_else(UniqueSeed::random);
                let address = program.tweet_address(&identity, &unique_seed)?;
                self.submit(
                    address,
                    TweetInstruction::SendTweet {
                        unique_seed,
                        topic,
                        content,
                    },
                )
                .await?
            }
            Command::Update {
                address,
                topic,
                content,
            } => {
                self.submit(address, TweetInstruction::UpdateTweet { topic, content })
                    .await?
            }
            Command::Delete { address } => {
                self.submit(address, TweetInstruction::DeleteTweet).await?
            }
            Command::Get { address } => Response::Tweet {
                tweet: program.fetch(&address).await?,
            },
            Command::List => self.scan(&RecordQuery::all()).await?,
            Command::ByAuthor { author } => {
                self.scan(&RecordQuery::by_author(&author.unwrap_or(identity)))
                    .await?
            }
            Command::ByTopic { topic } => self.scan(&RecordQuery::by_topic(&topic)).await?,
            Command::ByTopicPrefix { prefix } => {
                self.scan(&RecordQuery::by_topic_prefix(&prefix)).await?
            }
            Command::Balance { address } => {
                let address = address.unwrap_or(identity);
                Response::Balance {
                    address,
                    lamports: self.container.ledger.balance(&address).await?,
                }
            }
        };
        Ok(response)
    }

    async fn submit(
        &self,
        tweet: Pubkey,
        instruction: TweetInstruction,
    ) -> Result<Response, TweetError> {
        let tx = SignedTransaction::sign(
            &self.container.program_id(),
            tweet,
            &instruction,
            &self.container.keypair,
        );
        let receipt = self.container.program.execute(tx).await?;
        Ok(Response::Receipt { receipt })
    }

    async fn scan(&self, query: &RecordQuery) -> Result<Response, TweetError> {
        Ok(Response::Tweets {
            tweets: self.container.program.query(query).await?,
        })
    }
}
