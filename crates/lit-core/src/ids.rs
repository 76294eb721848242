//! Identifier types: store-assigned run IDs and per-run reference tags.
//!
//! Reference tags are the human-citable handle for a search result in an
//! exported report. They are a constant letter followed by a fixed-width,
//! zero-padded, 1-based sequence number: `S00001`, `S00002`, ...

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Prefix letter of every reference tag.
pub const REF_TAG_PREFIX: char = 'S';

/// Number of digits in the zero-padded sequence part.
pub const REF_TAG_WIDTH: usize = 5;

/// Identifier of a persisted run, assigned by the result store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub i64);

impl RunId {
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential reference tag of a search result within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RefTag {
    seq: u32,
}

impl RefTag {
    /// Build the tag for a 1-based sequence number.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRefTag` for `0`.
    pub fn new(seq: u32) -> Result<Self, CoreError> {
        if seq == 0 {
            return Err(CoreError::InvalidRefTag(
                "sequence numbers start at 1".to_string(),
            ));
        }
        Ok(Self { seq })
    }

    /// The first tag of a batch.
    #[must_use]
    pub const fn first() -> Self {
        Self { seq: 1 }
    }

    /// The 1-based sequence number.
    #[must_use]
    pub const fn seq(self) -> u32 {
        self.seq
    }

    /// The tag immediately after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self { seq: self.seq + 1 }
    }

    /// Tags for a batch of `len` items starting at `start`, in order.
    pub fn sequence(start: Self, len: usize) -> impl Iterator<Item = Self> {
        (0..len).scan(start, |tag, _| {
            let current = *tag;
            *tag = tag.next();
            Some(current)
        })
    }
}

impl fmt::Display for RefTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{REF_TAG_PREFIX}{:0width$}", self.seq, width = REF_TAG_WIDTH)
    }
}

impl FromStr for RefTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(REF_TAG_PREFIX)
            .ok_or_else(|| CoreError::InvalidRefTag(s.to_string()))?;
        if digits.len() < REF_TAG_WIDTH || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CoreError::InvalidRefTag(s.to_string()));
        }
        let seq = digits
            .parse::<u32>()
            .map_err(|_| CoreError::InvalidRefTag(s.to_string()))?;
        Self::new(seq).map_err(|_| CoreError::InvalidRefTag(s.to_string()))
    }
}

impl TryFrom<String> for RefTag {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RefTag> for String {
    fn from(tag: RefTag) -> Self {
        tag.to_string()
    }
}
