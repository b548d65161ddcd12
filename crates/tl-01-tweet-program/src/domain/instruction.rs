//! # Instruction Codec
//!
//! Wire form of the three mutating instructions:
//! an 8-byte discriminator (`SHA-256("global:<name>")[..8]`) followed by the
//! arguments. Seeds are raw bytes; strings are `u32 LE` length + UTF-8.

use crate::domain::codec::{put_string, Reader};
use crate::domain::value_objects::UniqueSeed;
use crate::errors::{LayoutError, TweetError};
use serde::{Deserialize, Serialize};
use shared_crypto::sha256;
use std::fmt;

/// Which instruction ran, without its arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionKind {
    /// `send_tweet`
    SendTweet,
    /// `update_tweet`
    UpdateTweet,
    /// `delete_tweet`
    DeleteTweet,
}

impl InstructionKind {
    /// Every kind, in discriminator lookup order.
    pub const ALL: [Self; 3] = [Self::SendTweet, Self::UpdateTweet, Self::DeleteTweet];

    /// Name used in discriminators and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SendTweet => "send_tweet",
            Self::UpdateTweet => "update_tweet",
            Self::DeleteTweet => "delete_tweet",
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded tweet instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TweetInstruction {
    /// Create a record at the address derived from the signer and `unique_seed`.
    SendTweet {
        /// Creation randomness.
        unique_seed: UniqueSeed,
        /// Topic text.
        topic: String,
        /// Content text.
        content: String,
    },
    /// Replace topic and content of an existing record.
    UpdateTweet {
        /// New topic.
        topic: String,
        /// New content.
        content: String,
    },
    /// Erase a record and refund its deposit.
    DeleteTweet,
}

impl TweetInstruction {
    /// Kind of this instruction.
    #[must_use]
    pub fn kind(&self) -> InstructionKind {
        match self {
            Self::SendTweet { .. } => InstructionKind::SendTweet,
            Self::UpdateTweet { .. } => InstructionKind::UpdateTweet,
            Self::DeleteTweet => InstructionKind::DeleteTweet,
        }
    }

    /// Instruction name as used in discriminators and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Discriminator for an instruction name.
    #[must_use]
    pub fn discriminator(name: &str) -> [u8; 8] {
        let hash = sha256(format!("global:{name}").as_bytes());
        let mut out = [0u8; 8];
        out.copy_from_slice(&hash[..8]);
        out
    }

    /// Serializes to instruction data.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Self::discriminator(self.name()).to_vec();
        match self {
            Self::SendTweet {
                unique_seed,
                topic,
                content,
            } => {
                out.extend_from_slice(unique_seed.as_bytes());
                put_string(&mut out, topic);
                put_string(&mut out, content);
            }
            Self::UpdateTweet { topic, content } => {
                put_string(&mut out, topic);
                put_string(&mut out, content);
            }
            Self::DeleteTweet => {}
        }
        out
    }

    /// Parses instruction data.
    ///
    /// # Errors
    ///
    /// `InvalidInstruction` on unknown discriminators, truncated or trailing
    /// bytes, or non-UTF-8 strings.
    pub fn decode(data: &[u8]) -> Result<Self, TweetError> {
        let mut reader = Reader::new(data);
        let tag = reader.array::<8>("discriminator").map_err(invalid)?;

        let kind = InstructionKind::ALL
            .into_iter()
            .find(|kind| tag == Self::discriminator(kind.name()))
            .ok_or_else(|| {
                TweetError::InvalidInstruction(format!(
                    "unknown discriminator {}",
                    hex::encode(tag)
                ))
            })?;

        let instruction = match kind {
            InstructionKind::SendTweet => {
                let unique_seed = reader
                    .array::<{ UniqueSeed::LEN }>("unique_seed")
                    .map_err(invalid)?;
                Self::SendTweet {
                    unique_seed: UniqueSeed::new(unique_seed),
                    topic: reader.string("topic").map_err(invalid)?,
                    content: reader.string("content").map_err(invalid)?,
                }
            }
            InstructionKind::UpdateTweet => Self::UpdateTweet {
                topic: reader.string("topic").map_err(invalid)?,
                content: reader.string("content").map_err(invalid)?,
            },
            InstructionKind::DeleteTweet => Self::DeleteTweet,
        };

        if reader.remaining() != 0 {
            return Err(TweetError::InvalidInstruction(format!(
                "{} trailing bytes",
                reader.remaining()
            )));
        }
        Ok(instruction)
    }
}

fn invalid(err: LayoutError) -> TweetError {
    TweetError::InvalidInstruction(err.to_string())
}
