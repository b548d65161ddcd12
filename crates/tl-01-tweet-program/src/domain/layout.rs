//! # Record Layout
//!
//! Canonical binary form of a tweet account. External readers filter records
//! by comparing bytes at fixed offsets, so the field order and widths below
//! are a public contract. New fields may only be appended after `content`.
//!
//! ## Schema v1
//!
//! | Field | Offset | Width |
//! |-------|--------|-------|
//! | discriminator | 0 | 8 |
//! | author | 8 | 32 |
//! | unique_seed | 40 | 16 |
//! | bump | 56 | 1 |
//! | created_at (i64 LE) | 57 | 8 |
//! | updated_at (i64 LE) | 65 | 8 |
//! | topic_len (u32 LE) | 73 | 4 |
//! | topic | 77 | topic_len |
//! | content_len (u32 LE) | 77 + topic_len | 4 |
//! | content | 81 + topic_len | content_len |

use crate::domain::codec::{put_string, Reader};
use crate::domain::entities::TweetRecord;
use crate::domain::validation::{MAX_CONTENT_CHARS, MAX_TOPIC_CHARS};
use crate::domain::value_objects::{Pubkey, UniqueSeed};
use crate::errors::LayoutError;
use shared_crypto::sha256;

// =============================================================================
// FIELD WIDTHS
// =============================================================================

/// Type tag width.
pub const DISCRIMINATOR_LENGTH: usize = 8;
/// Author key width.
pub const PUBKEY_LENGTH: usize = 32;
/// Unique seed width.
pub const SEED_LENGTH: usize = UniqueSeed::LEN;
/// Bump width.
pub const BUMP_LENGTH: usize = 1;
/// Timestamp width.
pub const TIMESTAMP_LENGTH: usize = 8;
pub use crate::domain::codec::STRING_PREFIX_LENGTH;
/// Worst-case topic bytes (4 bytes per UTF-8 character).
pub const MAX_TOPIC_LENGTH: usize = MAX_TOPIC_CHARS * 4;
/// Worst-case content bytes.
pub const MAX_CONTENT_LENGTH: usize = MAX_CONTENT_CHARS * 4;

/// Fixed byte offsets of schema v1.
pub mod offsets {
    use super::*;

    /// Type tag.
    pub const DISCRIMINATOR: usize = 0;
    /// Author key.
    pub const AUTHOR: usize = DISCRIMINATOR + DISCRIMINATOR_LENGTH;
    /// Unique seed.
    pub const UNIQUE_SEED: usize = AUTHOR + PUBKEY_LENGTH;
    /// Bump.
    pub const BUMP: usize = UNIQUE_SEED + SEED_LENGTH;
    /// Creation timestamp.
    pub const CREATED_AT: usize = BUMP + BUMP_LENGTH;
    /// Update timestamp.
    pub const UPDATED_AT: usize = CREATED_AT + TIMESTAMP_LENGTH;
    /// Topic length prefix.
    pub const TOPIC_LEN: usize = UPDATED_AT + TIMESTAMP_LENGTH;
    /// First topic byte.
    pub const TOPIC: usize = TOPIC_LEN + STRING_PREFIX_LENGTH;
}

/// Allocated size of every tweet account.
pub const TWEET_ACCOUNT_LEN: usize = offsets::TOPIC
    + MAX_TOPIC_LENGTH
    + STRING_PREFIX_LENGTH
    + MAX_CONTENT_LENGTH;

// =============================================================================
// VERSIONED SCHEMA
// =============================================================================

/// Location of one field in the encoded record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name.
    pub name: &'static str,
    /// Offset, when it does not depend on earlier variable-length fields.
    pub offset: Option<usize>,
    /// Width, when fixed.
    pub width: Option<usize>,
}

impl FieldSpec {
    const fn fixed(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset: Some(offset),
            width: Some(width),
        }
    }
}

/// An ordered, versioned field table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TweetSchema {
    /// Schema version.
    pub version: u16,
    /// Fields in encoding order.
    pub fields: &'static [FieldSpec],
}

/// Schema v1.
pub const TWEET_SCHEMA_V1: TweetSchema = TweetSchema {
    version: 1,
    fields: &[
        FieldSpec::fixed("discriminator", offsets::DISCRIMINATOR, DISCRIMINATOR_LENGTH),
        FieldSpec::fixed("author", offsets::AUTHOR, PUBKEY_LENGTH),
        FieldSpec::fixed("unique_seed", offsets::UNIQUE_SEED, SEED_LENGTH),
        FieldSpec::fixed("bump", offsets::BUMP, BUMP_LENGTH),
        FieldSpec::fixed("created_at", offsets::CREATED_AT, TIMESTAMP_LENGTH),
        FieldSpec::fixed("updated_at", offsets::UPDATED_AT, TIMESTAMP_LENGTH),
        FieldSpec::fixed("topic_len", offsets::TOPIC_LEN, STRING_PREFIX_LENGTH),
        FieldSpec {
            name: "topic",
            offset: Some(offsets::TOPIC),
            width: None,
        },
        FieldSpec {
            name: "content_len",
            offset: None,
            width: Some(STRING_PREFIX_LENGTH),
        },
        FieldSpec {
            name: "content",
            offset: None,
            width: None,
        },
    ],
};

impl TweetSchema {
    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fixed offset of a field, if it has one.
    #[must_use]
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.field(name).and_then(|f| f.offset)
    }
}

/// Type tag: first 8 bytes of `SHA-256("account:Tweet")`.
#[must_use]
pub fn tweet_discriminator() -> [u8; DISCRIMINATOR_LENGTH] {
    let hash = sha256(b"account:Tweet");
    let mut tag = [0u8; DISCRIMINATOR_LENGTH];
    tag.copy_from_slice(&hash[..DISCRIMINATOR_LENGTH]);
    tag
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a record into its exact (unpadded) byte form.
#[must_use]
pub fn encode(record: &TweetRecord) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        offsets::TOPIC + record.topic.len() + STRING_PREFIX_LENGTH + record.content.len(),
    );
    out.extend_from_slice(&tweet_discriminator());
    out.extend_from_slice(record.author.as_bytes());
    out.extend_from_slice(record.unique_seed.as_bytes());
    out.push(record.bump);
    out.extend_from_slice(&record.created_at.to_le_bytes());
    out.extend_from_slice(&record.updated_at.to_le_bytes());
    put_string(&mut out, &record.topic);
    put_string(&mut out, &record.content);
    out
}

/// Encodes a record padded with zeroes to the full account size.
///
/// # Errors
///
/// `RecordTooLarge` if the encoded form exceeds `TWEET_ACCOUNT_LEN`.
pub fn encode_account(record: &TweetRecord) -> Result<Vec<u8>, LayoutError> {
    let mut data = encode(record);
    if data.len() > TWEET_ACCOUNT_LEN {
        return Err(LayoutError::RecordTooLarge {
            len: data.len(),
            max: TWEET_ACCOUNT_LEN,
        });
    }
    data.resize(TWEET_ACCOUNT_LEN, 0);
    Ok(data)
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a record. Trailing bytes after `content` are ignored.
///
/// # Errors
///
/// - `DiscriminatorMismatch` if the type tag is wrong
/// - `BufferTooShort` / `LengthOverrun` if the buffer ends early
/// - `InvalidUtf8` if a string field is not UTF-8
pub fn decode(data: &[u8]) -> Result<TweetRecord, LayoutError> {
    let mut reader = Reader::new(data);

    let tag = reader.take("discriminator", DISCRIMINATOR_LENGTH)?;
    if tag != tweet_discriminator() {
        return Err(LayoutError::DiscriminatorMismatch);
    }

    let author = reader.array::<32>("author")?;
    let unique_seed = reader.array::<16>("unique_seed")?;
    let bump = reader.array::<1>("bump")?[0];
    let created_at = i64::from_le_bytes(reader.array::<8>("created_at")?);
    let updated_at = i64::from_le_bytes(reader.array::<8>("updated_at")?);
    let topic = reader.string("topic")?;
    let content = reader.string("content")?;

    Ok(TweetRecord {
        author: Pubkey::new(author),
        unique_seed: UniqueSeed::new(unique_seed),
        bump,
        created_at,
        updated_at,
        topic,
        content,
    })
}

// =============================================================================
// TESTS
// =============================================================================
