//! # Record Queries
//!
//! Read-side filters evaluated against raw account bytes without decoding.
//! Each filter names a fixed offset from the record layout, so a query
//! expression stays valid for as long as schema v1 does.

use crate::domain::codec::{string_bytes, STRING_PREFIX_LENGTH};
use crate::domain::layout::{offsets, tweet_discriminator};
use crate::domain::value_objects::Pubkey;
use serde::{Deserialize, Serialize};

/// A single byte-level predicate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    /// `data[offset..offset + bytes.len()] == bytes`.
    Memcmp {
        /// Start offset.
        offset: usize,
        /// Expected bytes.
        bytes: Vec<u8>,
    },
    /// Little-endian `u32` at `offset` is at least `min`.
    U32AtLeast {
        /// Start offset.
        offset: usize,
        /// Lower bound, inclusive.
        min: u32,
    },
}

impl Filter {
    /// Evaluates the filter. Out-of-range offsets never match.
    #[must_use]
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            Filter::Memcmp { offset, bytes } => offset
                .checked_add(bytes.len())
                .and_then(|end| data.get(*offset..end))
                .is_some_and(|window| window == bytes.as_slice()),
            Filter::U32AtLeast { offset, min } => offset
                .checked_add(STRING_PREFIX_LENGTH)
                .and_then(|end| data.get(*offset..end))
                .and_then(|window| <[u8; 4]>::try_from(window).ok())
                .is_some_and(|raw| u32::from_le_bytes(raw) >= *min),
        }
    }
}

/// A conjunction of filters over tweet accounts.
///
/// Every query built here also pins the tweet discriminator, so foreign
/// account types never match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    filters: Vec<Filter>,
}

impl RecordQuery {
    /// Every tweet record.
    #[must_use]
    pub fn all() -> Self {
        Self {
            filters: vec![Filter::Memcmp {
                offset: offsets::DISCRIMINATOR,
                bytes: tweet_discriminator().to_vec(),
            }],
        }
    }

    /// Records authored by `author`.
    #[must_use]
    pub fn by_author(author: &Pubkey) -> Self {
        Self::all().and(Filter::Memcmp {
            offset: offsets::AUTHOR,
            bytes: author.as_bytes().to_vec(),
        })
    }

    /// Records whose topic is exactly `topic`.
    ///
    /// Compares the length prefix together with the bytes.
    #[must_use]
    pub fn by_topic(topic: &str) -> Self {
        Self::all().and(Filter::Memcmp {
            offset: offsets::TOPIC_LEN,
            bytes: string_bytes(topic),
        })
    }

    /// Records whose topic starts with `prefix`.
    ///
    /// The length guard keeps the prefix from matching the content-length
    /// bytes that follow a shorter topic.
    #[must_use]
    pub fn by_topic_prefix(prefix: &str) -> Self {
        Self::all()
            .and(Filter::U32AtLeast {
                offset: offsets::TOPIC_LEN,
                min: prefix.len() as u32,
            })
            .and(Filter::Memcmp {
                offset: offsets::TOPIC,
                bytes: prefix.as_bytes().to_vec(),
            })
    }

    /// Adds a filter.
    #[must_use]
    pub fn and(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Filters in evaluation order.
    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// True if `data` satisfies every filter.
    #[must_use]
    pub fn matches(&self, data: &[u8]) -> bool {
        self.filters.iter().all(|f| f.matches(data))
    }
}
